//! Group tree editor for the fleet console.
//!
//! The [`widgets::groups_dialog`] widget edits a tree of groups in place:
//! inline name and description editors, drag-and-drop re-parenting, and
//! add/remove/share/save actions. Outward actions leave the widget as
//! effects; [`host::GroupsHost`] answers them and hands committed
//! snapshots to [`storage`] for persistence.

pub mod config;
pub mod host;
pub mod i18n;
pub mod storage;
pub mod style;
pub mod widgets;
