use crate::storage::GroupsFile;
use crate::widgets::groups_dialog::{
    Group, GroupId, GroupStore, GroupsDialog, GroupsDialogEffect, GroupsHandler,
    route_effect,
};

/// Parent-application side of the groups dialog.
///
/// Owns the dialog, answers its effects and queues snapshots of the
/// committed groups for the caller to write to disk.
pub struct GroupsHost {
    dialog: GroupsDialog,
    pending_write: Option<GroupsFile>,
}

impl GroupsHost {
    pub fn new(store: GroupStore) -> Self {
        Self {
            dialog: GroupsDialog::new(store),
            pending_write: None,
        }
    }

    pub fn dialog(&self) -> &GroupsDialog {
        &self.dialog
    }

    pub fn dialog_mut(&mut self) -> &mut GroupsDialog {
        &mut self.dialog
    }

    /// Route a dialog effect to the matching handler callback.
    pub fn handle(&mut self, effect: &GroupsDialogEffect) {
        route_effect(effect, self);
    }

    /// Snapshot waiting to be persisted, if any.
    pub fn take_pending_write(&mut self) -> Option<GroupsFile> {
        self.pending_write.take()
    }

    fn queue_write(&mut self) {
        self.pending_write = Some(GroupsFile::from_store(self.dialog.store()));
    }
}

impl GroupsHandler for GroupsHost {
    fn on_save(&mut self) {
        let store = self.dialog.store_mut();
        let local: Vec<GroupId> = store
            .groups()
            .map(Group::id)
            .filter(|id| !id.is_persisted())
            .collect();
        let mut next = store.next_persisted_id();
        for id in local {
            match store.assign_id(id, next) {
                Ok(()) => next = GroupId(next.0 + 1),
                Err(err) => log::warn!("failed to assign id to group {id}: {err}"),
            }
        }
        store.commit_all();
        log::info!("saving {} groups", store.len());
        self.queue_write();
        self.dialog.hide();
    }

    fn on_remove(&mut self, group: &Group) {
        let removed = self.dialog.remove_group(group.id());
        log::info!(
            "removed group {} ({} groups with subtree)",
            group.id(),
            removed.len()
        );
        if group.id().is_persisted() {
            self.queue_write();
        }
    }

    fn on_share(&mut self, group: &Group) {
        log::info!("share requested for group {} '{}'", group.id(), group.name());
    }
}

#[cfg(test)]
mod tests {
    use iced::Point;

    use super::*;
    use crate::i18n::Messages;
    use crate::widgets::groups_dialog::{
        GroupField, GroupsDialogCtx, GroupsDialogIntent,
    };

    fn host() -> GroupsHost {
        let store = GroupStore::from_groups(vec![
            Group::new(GroupId(0), "Depot", "", None),
            Group::new(GroupId(3), "Vans", "", Some(GroupId(0))),
        ])
        .expect("store should be valid");
        let mut host = GroupsHost::new(store);
        host.dialog_mut().show();
        host
    }

    fn send(host: &mut GroupsHost, intent: GroupsDialogIntent) {
        let messages = Messages::default();
        let _task = host.dialog_mut().reduce(intent, &GroupsDialogCtx {
            messages: &messages,
        });
    }

    #[test]
    fn given_local_groups_when_saved_then_ids_are_assigned_and_committed() {
        let mut host = host();
        send(&mut host, GroupsDialogIntent::NodePressed { id: GroupId(3) });
        send(&mut host, GroupsDialogIntent::AddPressed);

        host.on_save();

        let store = host.dialog().store();
        assert_eq!(store.children(GroupId(3)), vec![GroupId(4)]);
        assert_eq!(store.get(GroupId(4)).map(Group::name), Some("New group"));
        assert!(!store.has_pending_changes());
        assert!(!host.dialog().is_visible());
        let file = host.take_pending_write().expect("write should be queued");
        assert_eq!(file.groups.len(), 3);
    }

    #[test]
    fn given_saved_groups_when_dialog_reopened_then_they_survive_the_sweep() {
        let mut host = host();
        send(&mut host, GroupsDialogIntent::AddPressed);
        host.on_save();

        host.dialog_mut().show();
        host.dialog_mut().hide();

        assert_eq!(host.dialog().store().len(), 3);
    }

    #[test]
    fn given_persisted_group_when_removed_then_write_is_queued() {
        let mut host = host();
        let group = host
            .dialog()
            .store()
            .get(GroupId(0))
            .cloned()
            .expect("group exists");

        host.handle(&GroupsDialogEffect::Remove { group });

        assert!(host.dialog().store().is_empty());
        let file = host.take_pending_write().expect("write should be queued");
        assert!(file.groups.is_empty());
    }

    #[test]
    fn given_local_group_when_removed_then_nothing_is_written() {
        let mut host = host();
        send(&mut host, GroupsDialogIntent::AddPressed);
        let group = host
            .dialog()
            .store()
            .groups()
            .find(|group| !group.id().is_persisted())
            .cloned()
            .expect("local group exists");

        host.on_remove(&group);

        assert_eq!(host.dialog().store().len(), 2);
        assert!(host.take_pending_write().is_none());
    }

    #[test]
    fn given_share_effect_when_handled_then_store_is_unchanged() {
        let mut host = host();
        let group = Group::new(GroupId(3), "Vans", "", Some(GroupId(0)));

        host.handle(&GroupsDialogEffect::Share { group });

        assert_eq!(host.dialog().store().len(), 2);
        assert!(host.take_pending_write().is_none());
        assert!(
            host.dialog()
                .store()
                .pending(GroupId(3), GroupField::Name)
                .is_none()
        );
    }

    fn host_with_rentals() -> GroupsHost {
        let store = GroupStore::from_groups(vec![
            Group::new(GroupId(0), "Depot", "", None),
            Group::new(GroupId(3), "Vans", "", Some(GroupId(0))),
            Group::new(GroupId(4), "Rentals", "", None),
        ])
        .expect("store should be valid");
        let mut host = GroupsHost::new(store);
        host.dialog_mut().show();
        host
    }

    fn drag_to_root(host: &mut GroupsHost, id: GroupId) {
        send(host, GroupsDialogIntent::CursorMoved {
            position: Point::ORIGIN,
        });
        send(host, GroupsDialogIntent::NodePressed { id });
        send(host, GroupsDialogIntent::CursorMoved {
            position: Point::new(0.0, 30.0),
        });
        send(host, GroupsDialogIntent::NodeHovered { id: None });
        send(host, GroupsDialogIntent::BackgroundReleased);
    }

    fn written_parent(file: &GroupsFile, id: GroupId) -> Option<GroupId> {
        file.groups
            .iter()
            .find(|group| group.id() == id)
            .and_then(Group::parent)
    }

    #[test]
    fn given_unsaved_move_when_other_group_removed_then_file_keeps_old_parent()
    {
        let mut host = host_with_rentals();
        drag_to_root(&mut host, GroupId(3));
        assert_eq!(host.dialog().store().parent_of(GroupId(3)), None);
        let rentals = Group::new(GroupId(4), "Rentals", "", None);

        host.handle(&GroupsDialogEffect::Remove { group: rentals });

        let file = host.take_pending_write().expect("write should be queued");
        assert_eq!(written_parent(&file, GroupId(3)), Some(GroupId(0)));
    }

    #[test]
    fn given_canceled_move_when_reopened_and_group_removed_then_old_parent_written()
    {
        let mut host = host_with_rentals();
        drag_to_root(&mut host, GroupId(3));
        send(&mut host, GroupsDialogIntent::CancelPressed);
        host.dialog_mut().show();
        let rentals = Group::new(GroupId(4), "Rentals", "", None);

        host.handle(&GroupsDialogEffect::Remove { group: rentals });

        assert_eq!(
            host.dialog().store().parent_of(GroupId(3)),
            Some(GroupId(0))
        );
        let file = host.take_pending_write().expect("write should be queued");
        assert_eq!(written_parent(&file, GroupId(3)), Some(GroupId(0)));
    }

    #[test]
    fn given_saved_move_when_written_then_new_parent_is_kept() {
        let mut host = host_with_rentals();
        drag_to_root(&mut host, GroupId(3));

        host.on_save();

        let file = host.take_pending_write().expect("write should be queued");
        assert_eq!(written_parent(&file, GroupId(3)), None);
        assert_eq!(host.dialog().store().parent_of(GroupId(3)), None);
    }
}
