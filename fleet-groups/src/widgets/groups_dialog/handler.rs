use super::event::GroupsDialogEffect;
use super::model::Group;

/// Callbacks the host application provides for the dialog's outward
/// actions. Calls are fire-and-forget; the dialog does not wait for them.
pub trait GroupsHandler {
    /// Persist pending changes. The host assigns persisted ids, commits
    /// change records and usually hides the dialog afterwards.
    fn on_save(&mut self);
    /// Removal of `group` was confirmed by the user.
    fn on_remove(&mut self, group: &Group);
    /// Share `group` with other users.
    fn on_share(&mut self, group: &Group);
}

/// Forward one reducer effect to `handler`.
pub fn route_effect<H: GroupsHandler + ?Sized>(
    effect: &GroupsDialogEffect,
    handler: &mut H,
) {
    match effect {
        GroupsDialogEffect::Save => handler.on_save(),
        GroupsDialogEffect::Remove { group } => handler.on_remove(group),
        GroupsDialogEffect::Share { group } => handler.on_share(group),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::groups_dialog::model::GroupId;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl GroupsHandler for Recorder {
        fn on_save(&mut self) {
            self.calls.push(String::from("save"));
        }

        fn on_remove(&mut self, group: &Group) {
            self.calls.push(format!("remove {}", group.id()));
        }

        fn on_share(&mut self, group: &Group) {
            self.calls.push(format!("share {}", group.id()));
        }
    }

    #[test]
    fn given_effects_when_routed_then_matching_callbacks_run() {
        let group = Group::new(GroupId(7), "Vans", "", None);
        let mut recorder = Recorder::default();

        route_effect(&GroupsDialogEffect::Save, &mut recorder);
        route_effect(
            &GroupsDialogEffect::Remove {
                group: group.clone(),
            },
            &mut recorder,
        );
        route_effect(&GroupsDialogEffect::Share { group }, &mut recorder);

        assert_eq!(recorder.calls, vec!["save", "remove 7", "share 7"]);
    }
}
