use std::collections::BTreeMap;

use super::model::{GroupField, GroupId};
use super::store::GroupStore;

/// Pending field values staged on dragged groups, held across one drag.
///
/// The store drops change records of a moved subtree, so the buffer copies
/// them when the drag starts and stages them again after the drop. It is
/// empty outside of a drag gesture.
#[derive(Debug, Clone, Default)]
pub struct DragEditBuffer {
    entries: BTreeMap<GroupId, BTreeMap<GroupField, String>>,
}

impl DragEditBuffer {
    /// Replace the buffer contents with the pending values of `dragged`.
    ///
    /// Groups without pending values get no entry.
    pub fn capture(&mut self, store: &GroupStore, dragged: &[GroupId]) {
        self.entries.clear();
        for &id in dragged {
            let fields: BTreeMap<GroupField, String> = GroupField::ALL
                .iter()
                .filter_map(|&field| {
                    store
                        .pending(id, field)
                        .map(|value| (field, value.to_string()))
                })
                .collect();
            if !fields.is_empty() {
                self.entries.insert(id, fields);
            }
        }
    }

    /// Stage every buffered value again and empty the buffer.
    ///
    /// Returns the groups whose edits were restored. Groups that vanished
    /// from the store are skipped.
    pub fn restore(&mut self, store: &mut GroupStore) -> Vec<GroupId> {
        let mut restored = Vec::new();
        for (id, fields) in std::mem::take(&mut self.entries) {
            let mut applied = false;
            for (field, value) in fields {
                match store.add_change(id, field, value) {
                    Ok(()) => applied = true,
                    Err(err) => {
                        log::debug!("skipping buffered edit of {id}: {err}");
                    },
                }
            }
            if applied {
                restored.push(id);
            }
        }
        restored
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of groups holding buffered values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Buffered value of `field` on `id`.
    #[cfg(test)]
    pub(crate) fn get(&self, id: GroupId, field: GroupField) -> Option<&str> {
        self.entries
            .get(&id)
            .and_then(|fields| fields.get(&field))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::groups_dialog::model::Group;

    fn store() -> GroupStore {
        GroupStore::from_groups(vec![
            Group::new(GroupId(1), "Depot", "", None),
            Group::new(GroupId(2), "Vans", "City", Some(GroupId(1))),
            Group::new(GroupId(3), "Rentals", "", None),
        ])
        .expect("store should be valid")
    }

    #[test]
    fn given_dragged_group_with_edits_when_captured_then_values_are_buffered()
    {
        let mut store = store();
        store
            .add_change(GroupId(2), GroupField::Description, "Suburbs")
            .expect("group exists");
        let mut buffer = DragEditBuffer::default();

        buffer.capture(&store, &[GroupId(2)]);

        assert_eq!(buffer.len(), 1);
        assert_eq!(
            buffer.get(GroupId(2), GroupField::Description),
            Some("Suburbs")
        );
        assert_eq!(buffer.get(GroupId(2), GroupField::Name), None);
    }

    #[test]
    fn given_dragged_group_without_edits_when_captured_then_buffer_is_empty() {
        let store = store();
        let mut buffer = DragEditBuffer::default();

        buffer.capture(&store, &[GroupId(1), GroupId(2)]);

        assert!(buffer.is_empty());
    }

    #[test]
    fn given_stale_entries_when_captured_again_then_buffer_is_rebuilt() {
        let mut store = store();
        store
            .add_change(GroupId(2), GroupField::Name, "Vans 2")
            .expect("group exists");
        store
            .add_change(GroupId(3), GroupField::Name, "Leases")
            .expect("group exists");
        let mut buffer = DragEditBuffer::default();
        buffer.capture(&store, &[GroupId(2)]);

        buffer.capture(&store, &[GroupId(3)]);

        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.get(GroupId(2), GroupField::Name), None);
        assert_eq!(buffer.get(GroupId(3), GroupField::Name), Some("Leases"));
    }

    #[test]
    fn given_moved_group_when_restored_then_edits_survive_the_move() {
        let mut store = store();
        store
            .add_change(GroupId(2), GroupField::Name, "Vans 2")
            .expect("group exists");
        let mut buffer = DragEditBuffer::default();
        buffer.capture(&store, &store.subtree(GroupId(2)));
        store
            .move_group(GroupId(2), Some(GroupId(3)))
            .expect("move should succeed");
        assert_eq!(store.pending(GroupId(2), GroupField::Name), None);

        let restored = buffer.restore(&mut store);

        assert_eq!(restored, vec![GroupId(2)]);
        assert_eq!(store.pending(GroupId(2), GroupField::Name), Some("Vans 2"));
        assert!(buffer.is_empty());
    }

    #[test]
    fn given_removed_group_when_restored_then_entry_is_skipped() {
        let mut store = store();
        store
            .add_change(GroupId(2), GroupField::Name, "Vans 2")
            .expect("group exists");
        let mut buffer = DragEditBuffer::default();
        buffer.capture(&store, &[GroupId(2)]);
        store.remove(GroupId(2));

        let restored = buffer.restore(&mut store);

        assert!(restored.is_empty());
        assert!(buffer.is_empty());
    }
}
