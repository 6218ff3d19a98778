// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared handle for injecting one store into several collaborators.

use std::sync::{Arc, Mutex, MutexGuard};

use cld_graph::{Document, EditOp, GraphLink, GraphNode};

use crate::command::{Command, Outcome};
use crate::config::HistoryConfig;
use crate::error::HistoryError;
use crate::store::History;

/// Cloneable handle to a single [`History`].
///
/// Clones share the same store; every call holds the lock for exactly one
/// operation, so each edit or undo/redo is atomic with respect to the
/// others. Readers only ever see `&Document`.
///
/// ```
/// use cld_graph::GraphNode;
/// use cld_history::StoreHandle;
///
/// let canvas = StoreHandle::default();
/// let toolbar = canvas.clone();
///
/// canvas.add_node(GraphNode::new("n1", "Water", 0.0, 0.0));
/// assert!(toolbar.can_undo());
/// toolbar.undo();
/// assert!(canvas.read(|doc| doc.nodes.is_empty()));
/// ```
#[derive(Clone, Default)]
pub struct StoreHandle {
    inner: Arc<Mutex<History>>,
}

impl StoreHandle {
    /// Fresh store with the given policy.
    pub fn new(config: HistoryConfig) -> Self {
        Self::from_history(History::new(config))
    }

    /// Wrap an existing store.
    pub fn from_history(history: History) -> Self {
        Self {
            inner: Arc::new(Mutex::new(history)),
        }
    }

    // Poisoning is recovered; the store keeps its last committed state.
    fn lock(&self) -> MutexGuard<'_, History> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Owned copy of the present snapshot.
    pub fn snapshot(&self) -> Document {
        self.lock().present().clone()
    }

    /// Borrow the present snapshot for the duration of `f`.
    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(self.lock().present())
    }

    /// Run `f` against the store under one lock.
    pub fn with<R>(&self, f: impl FnOnce(&mut History) -> R) -> R {
        f(&mut *self.lock())
    }

    /// See [`History::apply`].
    pub fn apply(&self, op: EditOp) -> Result<(), HistoryError> {
        self.lock().apply(op)
    }

    /// See [`History::execute`].
    pub fn execute(&self, command: Command) -> Result<Outcome, HistoryError> {
        self.lock().execute(command)
    }

    /// See [`History::add_node`].
    pub fn add_node(&self, node: GraphNode) {
        self.lock().add_node(node);
    }

    /// See [`History::move_node`].
    pub fn move_node(&self, id: &str, x: f64, y: f64) {
        self.lock().move_node(id, x, y);
    }

    /// See [`History::remove_node`].
    pub fn remove_node(&self, id: &str) {
        self.lock().remove_node(id);
    }

    /// See [`History::add_link`].
    pub fn add_link(&self, link: GraphLink) {
        self.lock().add_link(link);
    }

    /// See [`History::remove_link`].
    pub fn remove_link(&self, id: &str) {
        self.lock().remove_link(id);
    }

    /// See [`History::toggle_layer`].
    pub fn toggle_layer(&self, name: &str) {
        self.lock().toggle_layer(name);
    }

    /// See [`History::undo`].
    pub fn undo(&self) -> bool {
        self.lock().undo()
    }

    /// See [`History::redo`].
    pub fn redo(&self) -> bool {
        self.lock().redo()
    }

    /// See [`History::can_undo`].
    pub fn can_undo(&self) -> bool {
        self.lock().can_undo()
    }

    /// See [`History::can_redo`].
    pub fn can_redo(&self) -> bool {
        self.lock().can_redo()
    }
}
