use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a group.
///
/// Negative ids belong to groups created in the dialog and not yet saved.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GroupId(pub i64);

impl GroupId {
    /// Whether the group has been assigned an id by the persistence layer.
    pub fn is_persisted(self) -> bool {
        self.0 >= 0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Organizational container for tracked assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    id: GroupId,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    parent: Option<GroupId>,
}

impl Group {
    pub fn new(
        id: GroupId,
        name: impl Into<String>,
        description: impl Into<String>,
        parent: Option<GroupId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            parent,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parent(&self) -> Option<GroupId> {
        self.parent
    }

    /// Committed value of a tracked field.
    pub fn field(&self, field: GroupField) -> &str {
        match field {
            GroupField::Name => &self.name,
            GroupField::Description => &self.description,
        }
    }

    pub(crate) fn set_field(&mut self, field: GroupField, value: String) {
        match field {
            GroupField::Name => self.name = value,
            GroupField::Description => self.description = value,
        }
    }

    pub(crate) fn set_id(&mut self, id: GroupId) {
        self.id = id;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<GroupId>) {
        self.parent = parent;
    }
}

/// Editable field tracked by change records and the drag edit buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupField {
    Name,
    Description,
}

impl GroupField {
    /// Every tracked field, in column order.
    pub const ALL: [GroupField; 2] = [GroupField::Name, GroupField::Description];
}

/// Pending, uncommitted field values of one group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeRecord {
    changes: BTreeMap<GroupField, String>,
}

impl ChangeRecord {
    /// Stage `value` for `field`.
    ///
    /// Staging the committed value drops the pending change instead.
    pub fn add_change(
        &mut self,
        group: &Group,
        field: GroupField,
        value: impl Into<String>,
    ) {
        let value = value.into();
        if group.field(field) == value {
            self.changes.remove(&field);
        } else {
            self.changes.insert(field, value);
        }
    }

    /// Pending value of `field`, if any.
    pub fn change(&self, field: GroupField) -> Option<&str> {
        self.changes.get(&field).map(String::as_str)
    }

    pub fn is_dirty(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Write every pending value into `group` and clear the record.
    pub fn commit(&mut self, group: &mut Group) {
        for (field, value) in std::mem::take(&mut self.changes) {
            group.set_field(field, value);
        }
    }

    /// Discard every pending value.
    pub fn reject(&mut self) {
        self.changes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trucks() -> Group {
        Group::new(GroupId(3), "Trucks", "Heavy vehicles", None)
    }

    #[test]
    fn given_new_value_when_change_added_then_it_is_pending() {
        let group = trucks();
        let mut record = ChangeRecord::default();

        record.add_change(&group, GroupField::Name, "Lorries");

        assert_eq!(record.change(GroupField::Name), Some("Lorries"));
        assert_eq!(record.change(GroupField::Description), None);
        assert!(record.is_dirty());
    }

    #[test]
    fn given_committed_value_when_change_added_then_pending_change_is_dropped()
    {
        let group = trucks();
        let mut record = ChangeRecord::default();
        record.add_change(&group, GroupField::Name, "Lorries");

        record.add_change(&group, GroupField::Name, "Trucks");

        assert_eq!(record.change(GroupField::Name), None);
        assert!(!record.is_dirty());
    }

    #[test]
    fn given_pending_changes_when_committed_then_group_is_updated() {
        let mut group = trucks();
        let mut record = ChangeRecord::default();
        record.add_change(&group, GroupField::Name, "Lorries");
        record.add_change(&group, GroupField::Description, "");

        record.commit(&mut group);

        assert_eq!(group.name(), "Lorries");
        assert_eq!(group.description(), "");
        assert!(!record.is_dirty());
    }

    #[test]
    fn given_pending_changes_when_rejected_then_group_is_untouched() {
        let group = trucks();
        let mut record = ChangeRecord::default();
        record.add_change(&group, GroupField::Name, "Lorries");

        record.reject();

        assert!(!record.is_dirty());
        assert_eq!(group.name(), "Trucks");
    }

    #[test]
    fn given_group_ids_when_checked_then_only_non_negative_are_persisted() {
        assert!(GroupId(0).is_persisted());
        assert!(GroupId(5).is_persisted());
        assert!(!GroupId(-1).is_persisted());
    }
}
