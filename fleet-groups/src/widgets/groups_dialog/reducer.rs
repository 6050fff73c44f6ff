use super::event::{ConfirmResponse, GroupsDialogEffect, GroupsDialogIntent};
use super::model::{Group, GroupField, GroupId};
use super::state::{
    CellEditorState, ConfirmState, DRAG_THRESHOLD, DragState, DropTarget,
    GroupsDialogState,
};
use crate::i18n::Messages;

/// Runtime context for the groups dialog reducer.
pub struct GroupsDialogCtx<'a> {
    /// Labels used for values the dialog stages itself.
    pub messages: &'a Messages,
}

/// Reduce a dialog intent into state updates and outward effects.
pub(crate) fn reduce(
    state: &mut GroupsDialogState,
    intent: GroupsDialogIntent,
    ctx: &GroupsDialogCtx<'_>,
) -> Vec<GroupsDialogEffect> {
    use GroupsDialogIntent::*;

    if !state.is_visible() {
        log::debug!("groups dialog is hidden, ignoring {intent:?}");
        return Vec::new();
    }
    if state.confirm().is_some()
        && !matches!(intent, ConfirmResponded(_) | CursorMoved { .. })
    {
        log::debug!("removal prompt is open, ignoring {intent:?}");
        return Vec::new();
    }

    match intent {
        NodePressed { id } => {
            if !state.store().contains(id) {
                return Vec::new();
            }
            if state.drag().is_some() {
                cancel_drag(state);
            }
            if !state.editor().is_some_and(|editor| editor.group == id) {
                submit_editor(state);
            }
            state.set_pressed(Some(id));
            state.set_selected(Some(id));
            state.set_drag(Some(DragState {
                source: id,
                origin: state.cursor(),
                active: false,
            }));
            Vec::new()
        },
        NodeReleased { .. } => {
            finish_drag(state);
            state.set_pressed(None);
            Vec::new()
        },
        NodeHovered { id } => {
            state.set_hovered(id);
            update_drop_target(state);
            Vec::new()
        },
        BackgroundPressed => {
            if state.drag().is_some() {
                cancel_drag(state);
            }
            submit_editor(state);
            state.set_selected(None);
            state.set_pressed(None);
            Vec::new()
        },
        BackgroundReleased => {
            let drag_active = state.drag().is_some_and(|drag| drag.active);
            if drag_active {
                state.set_hovered(None);
                update_drop_target(state);
            }
            finish_drag(state);
            state.set_pressed(None);
            Vec::new()
        },
        CursorMoved { position } => {
            state.set_cursor(position);
            update_drag_state(state);
            Vec::new()
        },
        DragCanceled => {
            cancel_drag(state);
            Vec::new()
        },
        ToggleExpanded { id } => {
            state.toggle_expanded(id);
            Vec::new()
        },
        CellEditStarted { id, field } => {
            begin_cell_edit(state, id, field);
            Vec::new()
        },
        CellEditChanged(value) => {
            if let Some(editor) = state.editor_mut() {
                editor.value = value;
            }
            Vec::new()
        },
        CellEditSubmitted => {
            submit_editor(state);
            Vec::new()
        },
        CellEditCanceled => {
            state.set_editor(None);
            Vec::new()
        },
        AddPressed => {
            submit_editor(state);
            add_group(state, ctx.messages);
            Vec::new()
        },
        RemovePressed => {
            let Some(group) = state.selected() else {
                return Vec::new();
            };
            if state.actions().remove {
                state.set_confirm(Some(ConfirmState { group }));
            }
            Vec::new()
        },
        ConfirmResponded(response) => {
            let Some(confirm) = state.take_confirm() else {
                return Vec::new();
            };
            if response != ConfirmResponse::Yes {
                return Vec::new();
            }
            match state.store().get(confirm.group) {
                Some(group) => vec![GroupsDialogEffect::Remove {
                    group: group.clone(),
                }],
                None => Vec::new(),
            }
        },
        SharePressed => {
            if !state.actions().share {
                return Vec::new();
            }
            match selected_group(state) {
                Some(group) => vec![GroupsDialogEffect::Share { group }],
                None => Vec::new(),
            }
        },
        SavePressed => {
            submit_editor(state);
            vec![GroupsDialogEffect::Save]
        },
        CancelPressed => {
            state.hide();
            Vec::new()
        },
    }
}

fn selected_group(state: &GroupsDialogState) -> Option<Group> {
    let id = state.selected()?;
    state.store().get(id).cloned()
}

fn add_group(state: &mut GroupsDialogState, messages: &Messages) {
    let parent = state
        .selected()
        .filter(|id| state.store().contains(*id));
    let id = state.next_local_id();
    if let Err(err) = state.store_mut().add(Group::new(id, "", "", parent)) {
        log::warn!("groups dialog add failed: {err}");
        return;
    }
    if let Err(err) = state.store_mut().add_change(
        id,
        GroupField::Name,
        messages.new_group.as_str(),
    ) {
        log::warn!("groups dialog add failed: {err}");
    }
    if let Some(parent) = parent {
        state.expand(parent);
    }
}

fn begin_cell_edit(
    state: &mut GroupsDialogState,
    id: GroupId,
    field: GroupField,
) {
    if state
        .editor()
        .is_some_and(|editor| editor.is_editing(id, field))
    {
        return;
    }
    submit_editor(state);
    let Some(value) = state.store().value(id, field) else {
        return;
    };
    let value = value.to_string();
    state.set_selected(Some(id));
    state.set_editor(Some(CellEditorState::new(id, field, value)));
}

/// Stage the open editor's value on its group, if an editor is open.
fn submit_editor(state: &mut GroupsDialogState) {
    let Some(editor) = state.take_editor() else {
        return;
    };
    if let Err(err) =
        state
            .store_mut()
            .add_change(editor.group, editor.field, editor.value)
    {
        log::warn!("groups dialog edit dropped: {err}");
    }
}

fn update_drag_state(state: &mut GroupsDialogState) {
    let cursor = state.cursor();
    let started = {
        let Some(drag) = state.drag_mut() else {
            return;
        };
        let dx = cursor.x - drag.origin.x;
        let dy = cursor.y - drag.origin.y;
        if drag.active || dx * dx + dy * dy < DRAG_THRESHOLD * DRAG_THRESHOLD {
            None
        } else {
            drag.active = true;
            Some(drag.source)
        }
    };
    if let Some(source) = started {
        let dragged = state.store().subtree(source);
        state.capture_drag_edits(&dragged);
    }
    update_drop_target(state);
}

fn update_drop_target(state: &mut GroupsDialogState) {
    let Some(source) = state
        .drag()
        .filter(|drag| drag.active)
        .map(|drag| drag.source)
    else {
        return;
    };
    let target = match state.hovered() {
        Some(id) => DropTarget::Group(id),
        None => DropTarget::Root,
    };
    if can_drop(state, source, target) {
        state.set_drop_target(Some(target));
    } else {
        state.set_drop_target(None);
    }
}

fn can_drop(
    state: &GroupsDialogState,
    source: GroupId,
    target: DropTarget,
) -> bool {
    let store = state.store();
    if !store.contains(source) {
        return false;
    }
    if store.parent_of(source) == target.parent() {
        return false;
    }
    match target {
        DropTarget::Root => true,
        DropTarget::Group(id) => {
            store.contains(id) && !store.is_descendant(source, id)
        },
    }
}

/// Resolve the drag gesture, if any. Returns whether a drag was active.
fn finish_drag(state: &mut GroupsDialogState) -> bool {
    let Some(drag) = state.take_drag() else {
        return false;
    };
    let target = state.take_drop_target();
    if !drag.active {
        state.clear_buffer();
        return false;
    }
    match target {
        Some(target) => drop_group(state, drag.source, target),
        None => state.clear_buffer(),
    }
    true
}

fn cancel_drag(state: &mut GroupsDialogState) {
    state.set_drag(None);
    state.set_drop_target(None);
    state.set_pressed(None);
    state.clear_buffer();
}

fn drop_group(
    state: &mut GroupsDialogState,
    source: GroupId,
    target: DropTarget,
) {
    let (store, buffer) = state.store_and_buffer_mut();
    if let Err(err) = store.move_group(source, target.parent()) {
        log::warn!("groups dialog move failed: {err}");
        buffer.clear();
        return;
    }
    let restored = buffer.restore(store);
    let parents: Vec<GroupId> = restored
        .into_iter()
        .filter_map(|id| store.parent_of(id))
        .collect();
    for parent in parents {
        if !state.is_expanded(parent) {
            state.expand(parent);
        }
    }
    if let Some(parent) = target.parent() {
        state.expand(parent);
    }
    state.set_selected(Some(source));
}
