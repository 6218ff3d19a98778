// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Document edits recorded by the history store.

use serde::{Deserialize, Serialize};

use crate::{GraphLink, GraphNode, LinkId, NodeId};

/// Structural document mutations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    /// Append a node.
    AddNode(GraphNode),
    /// Set a node's coordinates.
    MoveNode {
        /// Node identifier.
        id: NodeId,
        /// New x coordinate.
        x: f64,
        /// New y coordinate.
        y: f64,
    },
    /// Remove a node (incident links removed with it).
    RemoveNode {
        /// Node identifier.
        id: NodeId,
    },
    /// Append a link.
    AddLink(GraphLink),
    /// Remove a link.
    RemoveLink {
        /// Link identifier.
        id: LinkId,
    },
    /// Show the layer if hidden, hide it if shown.
    ToggleLayer {
        /// Layer name.
        name: String,
    },
}

impl EditOp {
    /// Stable name used in logs and scripts.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddNode(_) => "add_node",
            Self::MoveNode { .. } => "move_node",
            Self::RemoveNode { .. } => "remove_node",
            Self::AddLink(_) => "add_link",
            Self::RemoveLink { .. } => "remove_link",
            Self::ToggleLayer { .. } => "toggle_layer",
        }
    }
}
