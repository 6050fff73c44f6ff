pub(crate) mod confirm_box;
pub(crate) mod dialog;
pub(crate) mod group_tree;
