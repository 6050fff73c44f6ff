pub mod groups_dialog;
