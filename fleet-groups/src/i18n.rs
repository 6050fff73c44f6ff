use serde::{Deserialize, Serialize};

/// User-facing labels of the groups dialog.
///
/// Every field falls back to its English default, so a config file may
/// override any subset of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub groups: String,
    pub name: String,
    pub description: String,
    pub new_group: String,
    pub add: String,
    pub remove: String,
    pub share: String,
    pub save: String,
    pub cancel: String,
    pub confirm: String,
    pub confirm_group_removal: String,
    pub yes: String,
    pub no: String,
    pub edit_groups: String,
    pub no_groups: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            groups: String::from("Groups"),
            name: String::from("Name"),
            description: String::from("Description"),
            new_group: String::from("New group"),
            add: String::from("Add"),
            remove: String::from("Remove"),
            share: String::from("Share"),
            save: String::from("Save"),
            cancel: String::from("Cancel"),
            confirm: String::from("Confirm"),
            confirm_group_removal: String::from(
                "Are you sure you want to remove the selected group?",
            ),
            yes: String::from("Yes"),
            no: String::from("No"),
            edit_groups: String::from("Edit groups"),
            no_groups: String::from("No groups yet"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_partial_overrides_when_deserialized_then_rest_uses_defaults() {
        let messages: Messages = serde_json::from_value(serde_json::json!({
            "new_group": "Nuevo grupo",
        }))
        .expect("should deserialize");

        assert_eq!(messages.new_group, "Nuevo grupo");
        assert_eq!(messages.name, "Name");
    }
}
