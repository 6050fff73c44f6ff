//! Tree data helpers and a lightweight [`iced`] tree widget.
//!
//! This crate is split into two layers:
//! - model helpers ([`TreeSource`], [`flatten_tree`]) that are UI-agnostic;
//! - view helpers ([`TreeView`], [`TreeRowContext`]) that render rows in `iced`.
//!
//! Trees are addressed by key rather than by title, so siblings may share a
//! display name. The source decides the child order and which nodes are
//! expanded; the view never sorts.
//!
//! The recommended flow for interactive trees:
//! 1. keep nodes and the expanded key set in your app state;
//! 2. expose them through a small [`TreeSource`] adapter;
//! 3. render with [`TreeView`] and update expansion from
//!    [`TreeView::on_toggle`].
//!
//! # Quick Example
//!
//! ```no_run
//! use std::collections::HashSet;
//!
//! use iced::widget::text;
//! use iced::Element;
//! use fleet_ui_tree::{TreeSource, TreeView};
//!
//! struct Node {
//!     id: u32,
//!     parent: Option<u32>,
//!     title: String,
//! }
//!
//! struct State {
//!     nodes: Vec<Node>,
//!     expanded: HashSet<u32>,
//! }
//!
//! impl TreeSource for State {
//!     type Key = u32;
//!     type Node = Node;
//!
//!     fn roots(&self) -> Vec<u32> {
//!         self.nodes.iter().filter(|n| n.parent.is_none()).map(|n| n.id).collect()
//!     }
//!
//!     fn children(&self, key: &u32) -> Vec<u32> {
//!         self.nodes
//!             .iter()
//!             .filter(|n| n.parent == Some(*key))
//!             .map(|n| n.id)
//!             .collect()
//!     }
//!
//!     fn node(&self, key: &u32) -> Option<&Node> {
//!         self.nodes.iter().find(|n| n.id == *key)
//!     }
//!
//!     fn is_expanded(&self, key: &u32) -> bool {
//!         self.expanded.contains(key)
//!     }
//! }
//!
//! #[derive(Debug, Clone)]
//! enum Message {
//!     Toggle(u32),
//! }
//!
//! fn view(state: &State) -> Element<'_, Message> {
//!     TreeView::new(state, |ctx| text(ctx.entry.node.title.as_str()).into())
//!         .on_toggle(Message::Toggle)
//!         .indent_width(14.0)
//!         .toggle_width(16.0)
//!         .view()
//! }
//! ```

mod model;
mod view;

pub use model::{FlattenedNode, TreeSource, flatten_tree};
pub use view::{TreeRow, TreeRowContext, TreeView};
