// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Linear undo/redo history for causal-loop-diagram documents.
//!
//! [`History`] owns one present [`Document`](cld_graph::Document) plus two
//! stacks of archived snapshots. Every edit archives the present, computes a
//! fresh snapshot and discards the redo trail; `undo`/`redo` only move
//! existing snapshots between the stacks.
//!
//! ```
//! use cld_graph::{GraphNode, BASE_LAYER};
//! use cld_history::History;
//!
//! let mut history = History::default();
//! history.add_node(GraphNode::new("n1", "Water", 10.0, 20.0));
//! assert_eq!(history.undo_depth(), 1);
//!
//! assert!(history.undo());
//! assert!(history.present().nodes.is_empty());
//! assert_eq!(history.present().layers, vec![BASE_LAYER.to_owned()]);
//! ```
//!
//! Several collaborators that need the same store share a [`StoreHandle`].

mod command;
mod config;
mod error;
mod handle;
mod store;

pub use command::{Command, Outcome};
pub use config::HistoryConfig;
pub use error::HistoryError;
pub use handle::StoreHandle;
pub use store::History;
