pub mod buffer;
mod errors;
pub mod event;
pub mod handler;
pub mod model;
pub mod reducer;
pub mod state;
pub mod store;
pub(crate) mod view;

pub use buffer::DragEditBuffer;
pub use errors::GroupsError;
pub use event::{
    ConfirmResponse, GroupsDialogEffect, GroupsDialogEvent, GroupsDialogIntent,
};
pub use handler::{GroupsHandler, route_effect};
use iced::widget::operation;
use iced::{Element, Task};
pub use model::{ChangeRecord, Group, GroupField, GroupId};
pub use reducer::GroupsDialogCtx;
use state::GroupsDialogState;
pub use state::{ActionAvailability, DropTarget};
pub use store::GroupStore;

use crate::i18n::Messages;

/// Groups dialog widget: edits a tree of groups with inline cell editors,
/// drag-and-drop re-parenting, and add/remove/share/save actions.
///
/// The dialog never persists anything itself. Outward actions leave as
/// [`GroupsDialogEffect`]s for the host to route to its [`GroupsHandler`].
pub struct GroupsDialog {
    state: GroupsDialogState,
}

impl GroupsDialog {
    /// Create a hidden dialog over `store`.
    pub fn new(store: GroupStore) -> Self {
        Self {
            state: GroupsDialogState::new(store),
        }
    }

    /// Show the dialog, expanding every group on a fresh binding.
    pub fn show(&mut self) {
        self.state.show();
    }

    /// Hide the dialog, discarding groups that were never saved.
    pub fn hide(&mut self) {
        self.state.hide();
    }

    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    /// Reduce an intent into state updates and follow-up messages.
    pub fn reduce(
        &mut self,
        intent: GroupsDialogIntent,
        ctx: &GroupsDialogCtx<'_>,
    ) -> Task<GroupsDialogEvent> {
        let editor_before = self.state.editor().map(|editor| editor.id.clone());
        let effects = reducer::reduce(&mut self.state, intent, ctx);

        let mut tasks: Vec<Task<GroupsDialogEvent>> = effects
            .into_iter()
            .map(|effect| Task::done(GroupsDialogEvent::Effect(effect)))
            .collect();
        if let Some(editor) = self.state.editor() {
            if editor_before.as_ref() != Some(&editor.id) {
                tasks.push(operation::focus(editor.id.clone()));
            }
        }
        Task::batch(tasks)
    }

    /// Intent bound to the Escape key in the current interaction state.
    pub fn escape_intent(&self) -> Option<GroupsDialogIntent> {
        if !self.state.is_visible() {
            return None;
        }
        if self.state.confirm().is_some() {
            return Some(GroupsDialogIntent::ConfirmResponded(
                ConfirmResponse::Dismissed,
            ));
        }
        if self.state.editor().is_some() {
            return Some(GroupsDialogIntent::CellEditCanceled);
        }
        if self.state.drag().is_some_and(|drag| drag.active) {
            return Some(GroupsDialogIntent::DragCanceled);
        }
        Some(GroupsDialogIntent::CancelPressed)
    }

    /// Render the modal dialog.
    pub fn view<'a>(
        &'a self,
        messages: &'a Messages,
    ) -> Element<'a, GroupsDialogEvent> {
        view::dialog::view(view::dialog::DialogProps {
            state: &self.state,
            messages,
        })
        .map(GroupsDialogEvent::Intent)
    }

    pub fn store(&self) -> &GroupStore {
        self.state.store()
    }

    /// Mutable store access for the host's save and remove handlers.
    pub fn store_mut(&mut self) -> &mut GroupStore {
        self.state.store_mut()
    }

    /// Remove a group and its subtree after the host confirmed removal.
    pub fn remove_group(&mut self, id: GroupId) -> Vec<Group> {
        let removed = self.state.store_mut().remove(id);
        self.state.prune_missing();
        removed
    }

    /// Toolbar actions enabled by the current selection.
    pub fn actions(&self) -> ActionAvailability {
        self.state.actions()
    }

    pub fn selected(&self) -> Option<GroupId> {
        self.state.selected()
    }

    /// Return read-only access to state for tests.
    #[cfg(test)]
    pub(crate) fn state(&self) -> &GroupsDialogState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialog() -> GroupsDialog {
        let store = GroupStore::from_groups(vec![
            Group::new(GroupId(1), "Depot", "", None),
            Group::new(GroupId(2), "Vans", "", Some(GroupId(1))),
        ])
        .expect("store should be valid");
        GroupsDialog::new(store)
    }

    #[test]
    fn given_hidden_dialog_when_escape_pressed_then_no_intent() {
        assert!(dialog().escape_intent().is_none());
    }

    #[test]
    fn given_open_editor_when_escape_pressed_then_editor_is_canceled() {
        let mut dialog = dialog();
        dialog.show();
        let messages = Messages::default();
        let _task = dialog.reduce(
            GroupsDialogIntent::CellEditStarted {
                id: GroupId(1),
                field: GroupField::Name,
            },
            &GroupsDialogCtx {
                messages: &messages,
            },
        );

        assert!(matches!(
            dialog.escape_intent(),
            Some(GroupsDialogIntent::CellEditCanceled)
        ));
        assert!(dialog.state().editor().is_some());
    }

    #[test]
    fn given_idle_dialog_when_escape_pressed_then_dialog_is_canceled() {
        let mut dialog = dialog();
        dialog.show();

        assert!(matches!(
            dialog.escape_intent(),
            Some(GroupsDialogIntent::CancelPressed)
        ));
    }

    #[test]
    fn given_selected_group_when_removed_by_host_then_selection_is_pruned() {
        let mut dialog = dialog();
        dialog.show();
        let messages = Messages::default();
        let _task = dialog.reduce(
            GroupsDialogIntent::NodePressed { id: GroupId(2) },
            &GroupsDialogCtx {
                messages: &messages,
            },
        );

        let removed = dialog.remove_group(GroupId(1));

        assert_eq!(removed.len(), 2);
        assert_eq!(dialog.selected(), None);
        assert!(dialog.store().is_empty());
    }

    #[test]
    fn given_shown_dialog_when_hidden_twice_then_second_hide_is_noop() {
        let mut dialog = dialog();
        dialog.show();
        let messages = Messages::default();
        let _task = dialog.reduce(
            GroupsDialogIntent::AddPressed,
            &GroupsDialogCtx {
                messages: &messages,
            },
        );

        dialog.hide();
        dialog.hide();

        assert!(!dialog.is_visible());
        assert_eq!(dialog.store().len(), 2);
    }
}
