use thiserror::Error;

use super::model::GroupId;

/// Errors emitted by group store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupsError {
    #[error("group {0} does not exist")]
    UnknownGroup(GroupId),
    #[error("group {0} already exists")]
    DuplicateId(GroupId),
    #[error("parent group {0} does not exist")]
    UnknownParent(GroupId),
    #[error("group {group} cannot be moved under itself or its descendant {target}")]
    MoveIntoSelf { group: GroupId, target: GroupId },
    #[error("group {group} is part of a parent cycle")]
    Cycle { group: GroupId },
}
