/// Read-only adapter over a keyed tree.
///
/// Implementors own the child ordering and the expansion state; helpers in
/// this crate only walk the structure.
pub trait TreeSource {
    /// Stable identifier of a node.
    type Key: Clone + PartialEq;
    /// Payload rendered for each row.
    type Node;

    /// Top-level keys in display order.
    fn roots(&self) -> Vec<Self::Key>;
    /// Direct children of `key` in display order.
    fn children(&self, key: &Self::Key) -> Vec<Self::Key>;
    /// Node payload for `key`, if it still exists.
    fn node(&self, key: &Self::Key) -> Option<&Self::Node>;
    /// Whether the children of `key` are visible.
    fn is_expanded(&self, key: &Self::Key) -> bool;
}

/// Flattened representation of a visible tree node.
pub struct FlattenedNode<'a, S: TreeSource + ?Sized> {
    /// Zero-based tree depth (`0` for root-level rows).
    pub depth: usize,
    /// Key of the row.
    pub key: S::Key,
    /// Borrowed source node.
    pub node: &'a S::Node,
    /// Whether the node has at least one child, visible or not.
    pub has_children: bool,
    /// Whether the node is expanded in the source.
    pub is_expanded: bool,
}

/// Flatten a tree into a depth-first list of visible rows.
///
/// Children are included only when their parent is expanded. Keys the source
/// cannot resolve to a node are skipped together with their subtree.
pub fn flatten_tree<S: TreeSource + ?Sized>(
    source: &S,
) -> Vec<FlattenedNode<'_, S>> {
    let mut entries = Vec::new();
    for key in source.roots() {
        push_node(source, key, 0, &mut entries);
    }
    entries
}

fn push_node<'a, S: TreeSource + ?Sized>(
    source: &'a S,
    key: S::Key,
    depth: usize,
    entries: &mut Vec<FlattenedNode<'a, S>>,
) {
    let Some(node) = source.node(&key) else {
        return;
    };
    let children = source.children(&key);
    let is_expanded = source.is_expanded(&key);

    entries.push(FlattenedNode {
        depth,
        key,
        node,
        has_children: !children.is_empty(),
        is_expanded,
    });

    if is_expanded {
        for child in children {
            push_node(source, child, depth + 1, entries);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    struct TestNode {
        id: u8,
        parent: Option<u8>,
        title: &'static str,
    }

    struct TestTree {
        nodes: Vec<TestNode>,
        expanded: HashSet<u8>,
    }

    impl TestTree {
        fn new(nodes: &[(u8, Option<u8>, &'static str)]) -> Self {
            Self {
                nodes: nodes
                    .iter()
                    .map(|(id, parent, title)| TestNode {
                        id: *id,
                        parent: *parent,
                        title: *title,
                    })
                    .collect(),
                expanded: HashSet::new(),
            }
        }

        fn expand(mut self, ids: &[u8]) -> Self {
            self.expanded.extend(ids.iter().copied());
            self
        }
    }

    impl TreeSource for TestTree {
        type Key = u8;
        type Node = TestNode;

        fn roots(&self) -> Vec<u8> {
            self.nodes
                .iter()
                .filter(|node| node.parent.is_none())
                .map(|node| node.id)
                .collect()
        }

        fn children(&self, key: &u8) -> Vec<u8> {
            self.nodes
                .iter()
                .filter(|node| node.parent == Some(*key))
                .map(|node| node.id)
                .collect()
        }

        fn node(&self, key: &u8) -> Option<&TestNode> {
            self.nodes.iter().find(|node| node.id == *key)
        }

        fn is_expanded(&self, key: &u8) -> bool {
            self.expanded.contains(key)
        }
    }

    fn titles(entries: &[FlattenedNode<'_, TestTree>]) -> Vec<&'static str> {
        entries.iter().map(|entry| entry.node.title).collect()
    }

    #[test]
    fn given_empty_source_when_flattened_then_no_rows() {
        let tree = TestTree::new(&[]);
        assert!(flatten_tree(&tree).is_empty());
    }

    #[test]
    fn given_expanded_nodes_when_flattened_then_depth_first_in_source_order() {
        let tree = TestTree::new(&[
            (1, None, "Depot"),
            (2, Some(1), "Vans"),
            (3, Some(2), "Night shift"),
            (4, Some(1), "Trucks"),
            (5, None, "Rentals"),
        ])
        .expand(&[1, 2]);

        let entries = flatten_tree(&tree);

        assert_eq!(
            titles(&entries),
            vec!["Depot", "Vans", "Night shift", "Trucks", "Rentals"]
        );
        let depths: Vec<usize> =
            entries.iter().map(|entry| entry.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 1, 0]);
    }

    #[test]
    fn given_collapsed_parent_when_flattened_then_children_are_hidden() {
        let tree =
            TestTree::new(&[(1, None, "Depot"), (2, Some(1), "Vans")]);

        let entries = flatten_tree(&tree);

        assert_eq!(titles(&entries), vec!["Depot"]);
        assert!(entries[0].has_children);
        assert!(!entries[0].is_expanded);
    }

    #[test]
    fn given_expanded_leaf_when_flattened_then_has_children_is_false() {
        let tree = TestTree::new(&[(1, None, "Depot")]).expand(&[1]);

        let entries = flatten_tree(&tree);

        assert_eq!(entries.len(), 1);
        assert!(!entries[0].has_children);
        assert!(entries[0].is_expanded);
    }

    #[test]
    fn given_duplicate_titles_when_flattened_then_keys_stay_distinct() {
        let tree = TestTree::new(&[(1, None, "Trucks"), (2, None, "Trucks")]);

        let entries = flatten_tree(&tree);

        let keys: Vec<u8> = entries.iter().map(|entry| entry.key).collect();
        assert_eq!(keys, vec![1, 2]);
    }

    #[test]
    fn given_dangling_child_key_when_flattened_then_it_is_skipped() {
        struct Dangling;

        impl TreeSource for Dangling {
            type Key = u8;
            type Node = &'static str;

            fn roots(&self) -> Vec<u8> {
                vec![1, 9]
            }

            fn children(&self, _key: &u8) -> Vec<u8> {
                Vec::new()
            }

            fn node(&self, key: &u8) -> Option<&&'static str> {
                match key {
                    1 => Some(&"present"),
                    _ => None,
                }
            }

            fn is_expanded(&self, _key: &u8) -> bool {
                false
            }
        }

        let entries = flatten_tree(&Dangling);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, 1);
    }
}
