use std::collections::{HashMap, HashSet};

use super::errors::GroupsError;
use super::model::{ChangeRecord, Group, GroupField, GroupId};

/// Flat store of groups linked by parent id, with per-group change records.
///
/// Groups keep insertion order; siblings are listed in that order. A move
/// re-inserts the moved subtree at the end and starts it with fresh change
/// records, so callers that want to keep pending edits across a move must
/// stage them again afterwards.
///
/// Moves of persisted groups are tracked against their committed parent
/// until [`GroupStore::commit_all`] or [`GroupStore::revert_moves`].
#[derive(Debug, Clone, Default)]
pub struct GroupStore {
    groups: Vec<Group>,
    records: HashMap<GroupId, ChangeRecord>,
    committed_parents: HashMap<GroupId, Option<GroupId>>,
}

impl GroupStore {
    /// Build a store from committed groups, validating the parent links.
    pub fn from_groups(groups: Vec<Group>) -> Result<Self, GroupsError> {
        let mut seen = HashSet::new();
        for group in &groups {
            if !seen.insert(group.id()) {
                return Err(GroupsError::DuplicateId(group.id()));
            }
        }
        for group in &groups {
            if let Some(parent) = group.parent() {
                if !seen.contains(&parent) {
                    return Err(GroupsError::UnknownParent(parent));
                }
            }
        }

        let store = Self {
            groups,
            records: HashMap::new(),
            committed_parents: HashMap::new(),
        };
        for group in &store.groups {
            let mut visited = HashSet::new();
            let mut cursor = Some(group.id());
            while let Some(id) = cursor {
                if !visited.insert(id) {
                    return Err(GroupsError::Cycle { group: group.id() });
                }
                cursor = store.parent_of(id);
            }
        }
        Ok(store)
    }

    // --- Queries ---

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn contains(&self, id: GroupId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| group.id() == id)
    }

    /// Every group in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn parent_of(&self, id: GroupId) -> Option<GroupId> {
        self.get(id).and_then(Group::parent)
    }

    pub fn roots(&self) -> Vec<GroupId> {
        self.groups
            .iter()
            .filter(|group| group.parent().is_none())
            .map(Group::id)
            .collect()
    }

    pub fn children(&self, id: GroupId) -> Vec<GroupId> {
        self.groups
            .iter()
            .filter(|group| group.parent() == Some(id))
            .map(Group::id)
            .collect()
    }

    /// `id` followed by all of its descendants, depth first.
    pub fn subtree(&self, id: GroupId) -> Vec<GroupId> {
        if !self.contains(id) {
            return Vec::new();
        }
        let mut ids = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            ids.push(current);
            let mut children = self.children(current);
            children.reverse();
            stack.extend(children);
        }
        ids
    }

    /// Whether `id` is `ancestor` itself or lies somewhere below it.
    pub fn is_descendant(&self, ancestor: GroupId, id: GroupId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent_of(current);
        }
        false
    }

    /// Change record of `id`, if one was created.
    pub fn record(&self, id: GroupId) -> Option<&ChangeRecord> {
        self.records.get(&id)
    }

    /// Pending value of `field` on `id`.
    pub fn pending(&self, id: GroupId, field: GroupField) -> Option<&str> {
        self.records.get(&id).and_then(|record| record.change(field))
    }

    /// Displayed value of `field`: the pending value, else the committed one.
    pub fn value(&self, id: GroupId, field: GroupField) -> Option<&str> {
        match self.pending(id, field) {
            Some(value) => Some(value),
            None => self.get(id).map(|group| group.field(field)),
        }
    }

    pub fn is_modified(&self, id: GroupId, field: GroupField) -> bool {
        self.pending(id, field).is_some()
    }

    /// Whether any group holds an uncommitted change or move.
    pub fn has_pending_changes(&self) -> bool {
        !self.committed_parents.is_empty()
            || self.records.values().any(ChangeRecord::is_dirty)
    }

    /// Parent of `id` as of the last commit.
    pub fn committed_parent(&self, id: GroupId) -> Option<GroupId> {
        match self.committed_parents.get(&id) {
            Some(parent) => *parent,
            None => self.parent_of(id),
        }
    }

    /// Persisted groups with their committed values and parents.
    pub fn committed_groups(&self) -> Vec<Group> {
        self.groups
            .iter()
            .filter(|group| group.id().is_persisted())
            .map(|group| {
                let mut group = group.clone();
                group.set_parent(self.committed_parent(group.id()));
                group
            })
            .collect()
    }

    pub fn min_id(&self) -> Option<GroupId> {
        self.groups.iter().map(Group::id).min()
    }

    /// Smallest non-negative id not yet used by a persisted group.
    pub fn next_persisted_id(&self) -> GroupId {
        let next = self
            .groups
            .iter()
            .map(Group::id)
            .filter(|id| id.is_persisted())
            .map(|id| id.0 + 1)
            .max()
            .unwrap_or(0);
        GroupId(next)
    }

    // --- Mutations ---

    /// Insert a group under its declared parent.
    pub fn add(&mut self, group: Group) -> Result<(), GroupsError> {
        if self.contains(group.id()) {
            return Err(GroupsError::DuplicateId(group.id()));
        }
        if let Some(parent) = group.parent() {
            if !self.contains(parent) {
                return Err(GroupsError::UnknownParent(parent));
            }
        }
        self.groups.push(group);
        Ok(())
    }

    /// Remove `id` and its subtree, returning the removed groups.
    ///
    /// Unknown ids are ignored.
    pub fn remove(&mut self, id: GroupId) -> Vec<Group> {
        let doomed: HashSet<GroupId> = self.subtree(id).into_iter().collect();
        if doomed.is_empty() {
            return Vec::new();
        }
        let (removed, kept): (Vec<Group>, Vec<Group>) =
            std::mem::take(&mut self.groups)
                .into_iter()
                .partition(|group| doomed.contains(&group.id()));
        self.groups = kept;
        self.records.retain(|id, _| !doomed.contains(id));
        self.committed_parents.retain(|id, _| !doomed.contains(id));
        for parent in self.committed_parents.values_mut() {
            if parent.is_some_and(|id| doomed.contains(&id)) {
                *parent = None;
            }
        }
        removed
    }

    /// Re-parent `id` with its subtree under `parent` (`None` for root).
    pub fn move_group(
        &mut self,
        id: GroupId,
        parent: Option<GroupId>,
    ) -> Result<(), GroupsError> {
        if !self.contains(id) {
            return Err(GroupsError::UnknownGroup(id));
        }
        if let Some(target) = parent {
            if !self.contains(target) {
                return Err(GroupsError::UnknownParent(target));
            }
            if self.is_descendant(id, target) {
                return Err(GroupsError::MoveIntoSelf { group: id, target });
            }
        }

        if id.is_persisted() {
            let committed = self.committed_parent(id);
            if committed == parent {
                self.committed_parents.remove(&id);
            } else {
                self.committed_parents.insert(id, committed);
            }
        }

        let moved_ids: HashSet<GroupId> =
            self.subtree(id).into_iter().collect();
        let (mut moved, kept): (Vec<Group>, Vec<Group>) =
            std::mem::take(&mut self.groups)
                .into_iter()
                .partition(|group| moved_ids.contains(&group.id()));
        for group in &mut moved {
            if group.id() == id {
                group.set_parent(parent);
            }
        }
        self.groups = kept;
        self.groups.extend(moved);
        self.records.retain(|id, _| !moved_ids.contains(id));
        Ok(())
    }

    /// Stage a pending value on the record of `id`.
    pub fn add_change(
        &mut self,
        id: GroupId,
        field: GroupField,
        value: impl Into<String>,
    ) -> Result<(), GroupsError> {
        let Some(group) = self.groups.iter().find(|group| group.id() == id)
        else {
            return Err(GroupsError::UnknownGroup(id));
        };
        let record = self.records.entry(id).or_default();
        record.add_change(group, field, value);
        if !record.is_dirty() {
            self.records.remove(&id);
        }
        Ok(())
    }

    /// Commit pending values of `id` into the group.
    pub fn commit_changes(&mut self, id: GroupId) {
        let Some(mut record) = self.records.remove(&id) else {
            return;
        };
        if let Some(group) = self.groups.iter_mut().find(|g| g.id() == id) {
            record.commit(group);
        }
    }

    /// Commit pending values and moves of every group.
    pub fn commit_all(&mut self) {
        let ids: Vec<GroupId> = self.records.keys().copied().collect();
        for id in ids {
            self.commit_changes(id);
        }
        self.committed_parents.clear();
    }

    /// Put every moved persisted group back under its committed parent.
    ///
    /// Returns how many groups were moved back.
    pub fn revert_moves(&mut self) -> usize {
        let moves: Vec<(GroupId, Option<GroupId>)> =
            self.committed_parents.drain().collect();
        for (id, parent) in &moves {
            if let Some(group) = self.groups.iter_mut().find(|g| g.id() == *id)
            {
                group.set_parent(*parent);
            }
        }
        moves.len()
    }

    /// Discard pending values of `id`.
    pub fn reject_changes(&mut self, id: GroupId) {
        if let Some(mut record) = self.records.remove(&id) {
            record.reject();
        }
    }

    /// Replace the id of a group, updating child links and its record.
    pub fn assign_id(
        &mut self,
        old: GroupId,
        new: GroupId,
    ) -> Result<(), GroupsError> {
        if old == new {
            return Ok(());
        }
        if self.contains(new) {
            return Err(GroupsError::DuplicateId(new));
        }
        let Some(group) = self.groups.iter_mut().find(|g| g.id() == old)
        else {
            return Err(GroupsError::UnknownGroup(old));
        };
        group.set_id(new);
        for child in self.groups.iter_mut() {
            if child.parent() == Some(old) {
                child.set_parent(Some(new));
            }
        }
        if let Some(record) = self.records.remove(&old) {
            self.records.insert(new, record);
        }
        if let Some(parent) = self.committed_parents.remove(&old) {
            self.committed_parents.insert(new, parent);
        }
        for parent in self.committed_parents.values_mut() {
            if *parent == Some(old) {
                *parent = Some(new);
            }
        }
        Ok(())
    }
}
