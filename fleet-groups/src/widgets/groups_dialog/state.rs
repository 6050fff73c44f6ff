use std::collections::HashSet;

use iced::Point;
use iced::widget::Id;

use super::buffer::DragEditBuffer;
use super::model::{GroupField, GroupId};
use super::store::GroupStore;

/// Cursor travel, in logical pixels, before a press turns into a drag.
pub(crate) const DRAG_THRESHOLD: f32 = 4.0;

// ---------------------------------------------------------------------------
// Groups Dialog State
// ---------------------------------------------------------------------------

/// Store, view binding and interaction state of the groups dialog.
#[derive(Debug, Clone)]
pub struct GroupsDialogState {
    store: GroupStore,
    buffer: DragEditBuffer,
    visible: bool,
    bound: bool,
    expansion: HashSet<GroupId>,
    selected: Option<GroupId>,
    hovered: Option<GroupId>,
    pressed: Option<GroupId>,
    editor: Option<CellEditorState>,
    confirm: Option<ConfirmState>,
    drag: Option<DragState>,
    drop_target: Option<DropTarget>,
    cursor: Point,
    ids: LocalIdAllocator,
}

impl GroupsDialogState {
    pub fn new(store: GroupStore) -> Self {
        Self {
            store,
            buffer: DragEditBuffer::default(),
            visible: false,
            bound: false,
            expansion: HashSet::new(),
            selected: None,
            hovered: None,
            pressed: None,
            editor: None,
            confirm: None,
            drag: None,
            drop_target: None,
            cursor: Point::ORIGIN,
            ids: LocalIdAllocator::default(),
        }
    }

    // --- Store / buffer ---

    pub fn store(&self) -> &GroupStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut GroupStore {
        &mut self.store
    }

    pub fn buffer(&self) -> &DragEditBuffer {
        &self.buffer
    }

    /// Split borrow used by drop handling.
    pub(crate) fn store_and_buffer_mut(
        &mut self,
    ) -> (&mut GroupStore, &mut DragEditBuffer) {
        (&mut self.store, &mut self.buffer)
    }

    pub(crate) fn capture_drag_edits(&mut self, dragged: &[GroupId]) {
        self.buffer.capture(&self.store, dragged);
        if !self.buffer.is_empty() {
            log::debug!(
                "buffered pending edits of {} dragged groups",
                self.buffer.len()
            );
        }
    }

    pub(crate) fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    // --- Visibility / binding ---

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Show the dialog, binding the view to the store when detached.
    ///
    /// A fresh binding expands every group and reseeds local ids.
    pub(crate) fn show(&mut self) {
        if !self.bound {
            self.expand_all();
            self.ids = LocalIdAllocator::seeded(&self.store);
            self.bound = true;
        }
        self.visible = true;
    }

    /// Hide the dialog: undo unsaved moves, drop unsaved groups, then
    /// detach the view binding.
    pub(crate) fn hide(&mut self) {
        if !self.visible && !self.bound {
            return;
        }
        let reverted = self.store.revert_moves();
        if reverted > 0 {
            log::debug!("moved {reverted} unsaved groups back on close");
        }
        self.sweep_unsaved();
        self.visible = false;
        self.bound = false;
        self.expansion.clear();
        self.selected = None;
        self.hovered = None;
        self.pressed = None;
        self.editor = None;
        self.confirm = None;
        self.drag = None;
        self.drop_target = None;
        self.buffer.clear();
    }

    /// Remove every group still carrying a local id, with its subtree.
    ///
    /// Persisted groups found below a local one are lifted to the nearest
    /// persisted ancestor first. Returns how many groups were removed.
    pub(crate) fn sweep_unsaved(&mut self) -> usize {
        let local: Vec<GroupId> = self
            .store
            .groups()
            .map(|group| group.id())
            .filter(|id| !id.is_persisted())
            .collect();
        for id in &local {
            self.lift_persisted_children(*id);
        }
        let mut removed = 0;
        for id in local {
            removed += self.store.remove(id).len();
        }
        self.prune_missing();
        removed
    }

    fn lift_persisted_children(&mut self, local: GroupId) {
        let mut parent = self.store.parent_of(local);
        while let Some(id) = parent.filter(|id| !id.is_persisted()) {
            parent = self.store.parent_of(id);
        }
        let stranded: Vec<GroupId> = self
            .store
            .children(local)
            .into_iter()
            .filter(|id| id.is_persisted())
            .collect();
        for id in stranded {
            if let Err(err) = self.store.move_group(id, parent) {
                log::warn!("failed to keep group {id} on close: {err}");
            }
        }
    }

    /// Forget view references to groups that left the store.
    pub(crate) fn prune_missing(&mut self) {
        let store = &self.store;
        self.expansion.retain(|id| store.contains(*id));
        if self.selected.is_some_and(|id| !store.contains(id)) {
            self.selected = None;
        }
        if self.hovered.is_some_and(|id| !store.contains(id)) {
            self.hovered = None;
        }
        if self.pressed.is_some_and(|id| !store.contains(id)) {
            self.pressed = None;
        }
        if self.editor.as_ref().is_some_and(|e| !store.contains(e.group)) {
            self.editor = None;
        }
        if self.confirm.as_ref().is_some_and(|c| !store.contains(c.group)) {
            self.confirm = None;
        }
    }

    // --- Expansion ---

    pub fn is_expanded(&self, id: GroupId) -> bool {
        self.expansion.contains(&id)
    }

    pub(crate) fn expand(&mut self, id: GroupId) {
        self.expansion.insert(id);
    }

    pub(crate) fn toggle_expanded(&mut self, id: GroupId) {
        if !self.expansion.remove(&id) {
            self.expansion.insert(id);
        }
    }

    pub(crate) fn expand_all(&mut self) {
        self.expansion = self.store.groups().map(|group| group.id()).collect();
    }

    // --- Selection / hover ---

    pub fn selected(&self) -> Option<GroupId> {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, id: Option<GroupId>) {
        self.selected = id;
    }

    pub fn hovered(&self) -> Option<GroupId> {
        self.hovered
    }

    pub(crate) fn set_hovered(&mut self, id: Option<GroupId>) {
        self.hovered = id;
    }

    /// Which toolbar actions the current selection allows.
    pub fn actions(&self) -> ActionAvailability {
        ActionAvailability::for_selection(self.selected)
    }

    // --- Pressed ---

    pub(crate) fn pressed(&self) -> Option<GroupId> {
        self.pressed
    }

    pub(crate) fn set_pressed(&mut self, id: Option<GroupId>) {
        self.pressed = id;
    }

    // --- Cell editor ---

    pub fn editor(&self) -> Option<&CellEditorState> {
        self.editor.as_ref()
    }

    pub(crate) fn editor_mut(&mut self) -> Option<&mut CellEditorState> {
        self.editor.as_mut()
    }

    pub(crate) fn set_editor(&mut self, editor: Option<CellEditorState>) {
        self.editor = editor;
    }

    pub(crate) fn take_editor(&mut self) -> Option<CellEditorState> {
        self.editor.take()
    }

    // --- Confirmation prompt ---

    pub fn confirm(&self) -> Option<&ConfirmState> {
        self.confirm.as_ref()
    }

    pub(crate) fn set_confirm(&mut self, confirm: Option<ConfirmState>) {
        self.confirm = confirm;
    }

    pub(crate) fn take_confirm(&mut self) -> Option<ConfirmState> {
        self.confirm.take()
    }

    // --- Drag ---

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub(crate) fn drag_mut(&mut self) -> Option<&mut DragState> {
        self.drag.as_mut()
    }

    pub(crate) fn set_drag(&mut self, drag: Option<DragState>) {
        self.drag = drag;
    }

    pub(crate) fn take_drag(&mut self) -> Option<DragState> {
        self.drag.take()
    }

    pub fn drop_target(&self) -> Option<DropTarget> {
        self.drop_target
    }

    pub(crate) fn set_drop_target(&mut self, target: Option<DropTarget>) {
        self.drop_target = target;
    }

    pub(crate) fn take_drop_target(&mut self) -> Option<DropTarget> {
        self.drop_target.take()
    }

    // --- Cursor ---

    pub(crate) fn cursor(&self) -> Point {
        self.cursor
    }

    pub(crate) fn set_cursor(&mut self, position: Point) {
        self.cursor = position;
    }

    // --- Local ids ---

    pub(crate) fn next_local_id(&mut self) -> GroupId {
        self.ids.next()
    }
}

// ---------------------------------------------------------------------------
// Interaction sub-states
// ---------------------------------------------------------------------------

/// Inline editor open on one cell.
#[derive(Debug, Clone)]
pub struct CellEditorState {
    pub group: GroupId,
    pub field: GroupField,
    pub value: String,
    pub id: Id,
}

impl CellEditorState {
    pub(crate) fn new(
        group: GroupId,
        field: GroupField,
        value: String,
    ) -> Self {
        Self {
            group,
            field,
            value,
            id: Id::unique(),
        }
    }

    pub fn is_editing(&self, group: GroupId, field: GroupField) -> bool {
        self.group == group && self.field == field
    }
}

/// Removal confirmation awaiting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmState {
    pub group: GroupId,
}

/// Press on a group that may turn into a drag.
#[derive(Debug, Clone)]
pub struct DragState {
    pub source: GroupId,
    pub origin: Point,
    pub active: bool,
}

/// Where a drag would land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Move to the top level.
    Root,
    /// Append as child of the group.
    Group(GroupId),
}

impl DropTarget {
    pub fn parent(self) -> Option<GroupId> {
        match self {
            DropTarget::Root => None,
            DropTarget::Group(id) => Some(id),
        }
    }
}

/// Toolbar actions enabled by the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionAvailability {
    pub share: bool,
    pub remove: bool,
}

impl ActionAvailability {
    pub fn for_selection(selected: Option<GroupId>) -> Self {
        Self {
            share: selected.is_some_and(GroupId::is_persisted),
            remove: selected.is_some(),
        }
    }
}

/// Hands out decreasing negative ids for groups created in the dialog.
///
/// Ids are never handed out twice within one binding, even after the
/// group that carried one is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LocalIdAllocator {
    next: i64,
}

impl Default for LocalIdAllocator {
    fn default() -> Self {
        Self { next: -1 }
    }
}

impl LocalIdAllocator {
    pub(crate) fn seeded(store: &GroupStore) -> Self {
        let by_count = -(store.len() as i64) - 1;
        let below_lowest = store.min_id().map_or(-1, |id| id.0.min(0) - 1);
        Self {
            next: by_count.min(below_lowest),
        }
    }

    pub(crate) fn next(&mut self) -> GroupId {
        let id = GroupId(self.next);
        self.next -= 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::groups_dialog::model::Group;

    fn store(ids: &[i64]) -> GroupStore {
        GroupStore::from_groups(
            ids.iter()
                .map(|&id| Group::new(GroupId(id), format!("g{id}"), "", None))
                .collect(),
        )
        .expect("store should be valid")
    }

    #[test]
    fn given_selection_when_actions_computed_then_share_needs_persisted_id() {
        assert_eq!(
            ActionAvailability::for_selection(Some(GroupId(5))),
            ActionAvailability {
                share: true,
                remove: true,
            }
        );
        assert_eq!(
            ActionAvailability::for_selection(Some(GroupId(-1))),
            ActionAvailability {
                share: false,
                remove: true,
            }
        );
        assert_eq!(
            ActionAvailability::for_selection(None),
            ActionAvailability::default()
        );
    }

    #[test]
    fn given_store_count_when_allocator_seeded_then_first_id_is_minus_count_minus_one()
    {
        let mut ids = LocalIdAllocator::seeded(&store(&[0, 1, 2]));

        assert_eq!(ids.next(), GroupId(-4));
        assert_eq!(ids.next(), GroupId(-5));
    }

    #[test]
    fn given_existing_local_ids_when_allocator_seeded_then_ids_do_not_collide()
    {
        let mut ids = LocalIdAllocator::seeded(&store(&[4, -7]));

        assert_eq!(ids.next(), GroupId(-8));
    }

    #[test]
    fn given_hidden_dialog_when_shown_then_every_group_is_expanded() {
        let mut state = GroupsDialogState::new(store(&[1, 2]));

        state.show();

        assert!(state.is_visible());
        assert!(state.is_bound());
        assert!(state.is_expanded(GroupId(1)));
        assert!(state.is_expanded(GroupId(2)));
    }

    #[test]
    fn given_local_groups_when_swept_twice_then_second_sweep_is_noop() {
        let mut state = GroupsDialogState::new(store(&[1]));
        state
            .store_mut()
            .add(Group::new(GroupId(-1), "New", "", Some(GroupId(1))))
            .expect("add child");
        state.set_selected(Some(GroupId(-1)));

        assert_eq!(state.sweep_unsaved(), 1);
        assert_eq!(state.sweep_unsaved(), 0);
        assert_eq!(state.store().len(), 1);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn given_visible_dialog_when_hidden_then_binding_is_detached() {
        let mut state = GroupsDialogState::new(store(&[1]));
        state.show();
        state.set_selected(Some(GroupId(1)));
        state.set_confirm(Some(ConfirmState { group: GroupId(1) }));

        state.hide();

        assert!(!state.is_visible());
        assert!(!state.is_bound());
        assert!(!state.is_expanded(GroupId(1)));
        assert_eq!(state.selected(), None);
        assert!(state.confirm().is_none());
    }

    #[test]
    fn given_persisted_group_under_local_one_when_swept_then_it_is_lifted() {
        let mut state = GroupsDialogState::new(store(&[1]));
        state
            .store_mut()
            .add(Group::new(GroupId(-1), "New", "", Some(GroupId(1))))
            .expect("add local");
        state
            .store_mut()
            .add(Group::new(GroupId(-2), "Newer", "", Some(GroupId(-1))))
            .expect("add nested local");
        state
            .store_mut()
            .add(Group::new(GroupId(5), "Vans", "", Some(GroupId(-2))))
            .expect("add persisted");

        assert_eq!(state.sweep_unsaved(), 2);

        assert_eq!(state.store().parent_of(GroupId(5)), Some(GroupId(1)));
        assert_eq!(state.store().len(), 2);
    }
}
