use iced::Point;

use super::model::{Group, GroupField, GroupId};

/// Answer given to the removal confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResponse {
    Yes,
    No,
    /// Closed without choosing (Escape or the backdrop).
    Dismissed,
}

/// UI intents emitted by the groups dialog presentation layer.
#[derive(Debug, Clone)]
pub enum GroupsDialogIntent {
    // Tree interaction
    NodePressed {
        id: GroupId,
    },
    NodeReleased {
        id: GroupId,
    },
    NodeHovered {
        id: Option<GroupId>,
    },
    BackgroundPressed,
    BackgroundReleased,
    CursorMoved {
        position: Point,
    },
    DragCanceled,
    ToggleExpanded {
        id: GroupId,
    },

    // Inline cell editing
    CellEditStarted {
        id: GroupId,
        field: GroupField,
    },
    CellEditChanged(String),
    CellEditSubmitted,
    CellEditCanceled,

    // Toolbar and footer actions
    AddPressed,
    RemovePressed,
    ConfirmResponded(ConfirmResponse),
    SharePressed,
    SavePressed,
    CancelPressed,
}

/// Effects produced by the groups dialog reducer, routed to the host.
#[derive(Debug, Clone)]
pub enum GroupsDialogEffect {
    /// Persist pending changes.
    Save,
    /// Removal of the group was confirmed.
    Remove { group: Group },
    /// Share the group with other users.
    Share { group: Group },
}

/// Messages flowing out of the groups dialog widget.
#[derive(Debug, Clone)]
pub enum GroupsDialogEvent {
    Intent(GroupsDialogIntent),
    Effect(GroupsDialogEffect),
}
