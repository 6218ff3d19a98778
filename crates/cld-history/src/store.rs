// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The history-backed document store.

use std::collections::VecDeque;
use std::mem;

use cld_graph::{Document, EditOp, GraphLink, GraphNode};
use tracing::{debug, trace, warn};

use crate::command::{Command, Outcome};
use crate::config::HistoryConfig;
use crate::error::HistoryError;

/// Present document plus linear undo/redo stacks.
///
/// Invariants:
/// - `past` is oldest-first; its top is the last element.
/// - `future` is most-recently-undone first.
/// - Any recorded edit empties `future`; there is no branching history.
#[derive(Debug, Clone)]
pub struct History {
    past: VecDeque<Document>,
    present: Document,
    future: VecDeque<Document>,
    config: HistoryConfig,
}

impl Default for History {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl History {
    /// Empty history over the initial document.
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            past: VecDeque::new(),
            present: Document::default(),
            future: VecDeque::new(),
            config,
        }
    }

    /// Empty history over an existing document.
    ///
    /// Repeated layer names are dropped (first occurrence wins) so toggling
    /// behaves as on any other snapshot. In strict mode the document must
    /// also pass [`Document::validate`].
    pub fn from_document(
        mut present: Document,
        config: HistoryConfig,
    ) -> Result<Self, HistoryError> {
        let dropped = present.dedup_layers();
        if dropped > 0 {
            debug!(dropped, "dropped repeated layers from seed document");
        }
        if config.strict {
            present.validate()?;
        }
        Ok(Self {
            present,
            ..Self::new(config)
        })
    }

    /// Current snapshot.
    pub fn present(&self) -> &Document {
        &self.present
    }

    /// Archived snapshots, oldest first.
    pub fn past(&self) -> &VecDeque<Document> {
        &self.past
    }

    /// Redo-able snapshots, most recently undone first.
    pub fn future(&self) -> &VecDeque<Document> {
        &self.future
    }

    /// Active policy.
    pub fn config(&self) -> HistoryConfig {
        self.config
    }

    /// Whether `undo` would move anything.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether `redo` would move anything.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of undo steps available.
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    /// Number of redo steps available.
    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    /// Record `op`: archive the present, install the edited copy, drop the redo trail.
    ///
    /// The entry is recorded even when the edit targets an unknown id and
    /// leaves the document unchanged. In strict mode a failed integrity check
    /// returns [`HistoryError::Rejected`] and leaves every stack untouched.
    pub fn apply(&mut self, op: EditOp) -> Result<(), HistoryError> {
        if self.config.strict {
            if let Err(err) = self.present.check(&op) {
                debug!(op = op.kind(), %err, "integrity check failed");
                return Err(err.into());
            }
        }

        let next = self.present.with_edit(&op);
        let previous = mem::replace(&mut self.present, next);
        self.archive(previous);
        let discarded = self.future.len();
        self.future.clear();

        debug!(
            op = op.kind(),
            undo_depth = self.past.len(),
            discarded_redo = discarded,
            "recorded edit"
        );
        Ok(())
    }

    /// Run one replay step.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, HistoryError> {
        match command {
            Command::Edit(op) => self.apply(op).map(|()| Outcome::Applied),
            Command::Undo => Ok(Outcome::from_moved(self.undo())),
            Command::Redo => Ok(Outcome::from_moved(self.redo())),
        }
    }

    /// Append a node.
    pub fn add_node(&mut self, node: GraphNode) {
        self.edit(EditOp::AddNode(node));
    }

    /// Set a node's coordinates.
    pub fn move_node(&mut self, id: &str, x: f64, y: f64) {
        self.edit(EditOp::MoveNode {
            id: id.to_owned(),
            x,
            y,
        });
    }

    /// Remove a node and every link touching it.
    pub fn remove_node(&mut self, id: &str) {
        self.edit(EditOp::RemoveNode { id: id.to_owned() });
    }

    /// Append a link.
    pub fn add_link(&mut self, link: GraphLink) {
        self.edit(EditOp::AddLink(link));
    }

    /// Remove a link.
    pub fn remove_link(&mut self, id: &str) {
        self.edit(EditOp::RemoveLink { id: id.to_owned() });
    }

    /// Flip a layer's visibility.
    pub fn toggle_layer(&mut self, name: &str) {
        self.edit(EditOp::ToggleLayer {
            name: name.to_owned(),
        });
    }

    /// Step back one edit. Returns `false` (and does nothing) when `past` is empty.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            trace!("undo with empty past");
            return false;
        };
        let current = mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        debug!(
            undo_depth = self.past.len(),
            redo_depth = self.future.len(),
            "undo"
        );
        true
    }

    /// Step forward one undone edit. Returns `false` (and does nothing) when `future` is empty.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            trace!("redo with empty future");
            return false;
        };
        let current = mem::replace(&mut self.present, next);
        self.archive(current);
        debug!(
            undo_depth = self.past.len(),
            redo_depth = self.future.len(),
            "redo"
        );
        true
    }

    // Convenience edits never surface errors to UI callers.
    fn edit(&mut self, op: EditOp) {
        let kind = op.kind();
        if let Err(err) = self.apply(op) {
            warn!(op = kind, %err, "edit ignored");
        }
    }

    fn archive(&mut self, snapshot: Document) {
        self.past.push_back(snapshot);
        if let Some(max) = self.config.max_depth {
            while self.past.len() > max {
                self.past.pop_front();
            }
        }
    }
}
