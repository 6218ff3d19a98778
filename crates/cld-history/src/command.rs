// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Replay vocabulary: edits interleaved with time travel.
//!
//! Scripts serialize an edit as its tagged op object and time travel as a
//! bare string:
//!
//! ```json
//! [{"op":"toggle_layer","name":"Feedback"}, "undo", "redo"]
//! ```

use cld_graph::EditOp;
use serde::{Deserialize, Serialize};

/// One step applied to a [`History`](crate::History).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCommand", into = "RawCommand")]
pub enum Command {
    /// Record an edit.
    Edit(EditOp),
    /// Step back.
    Undo,
    /// Step forward.
    Redo,
}

impl From<EditOp> for Command {
    fn from(op: EditOp) -> Self {
        Self::Edit(op)
    }
}

/// Result of [`History::execute`](crate::History::execute).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// An edit was recorded.
    Applied,
    /// Undo/redo relocated a snapshot.
    Moved,
    /// Undo/redo hit an empty stack; nothing changed.
    Boundary,
}

impl Outcome {
    pub(crate) const fn from_moved(moved: bool) -> Self {
        if moved {
            Self::Moved
        } else {
            Self::Boundary
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawCommand {
    Edit(EditOp),
    Travel(Travel),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Travel {
    Undo,
    Redo,
}

impl From<RawCommand> for Command {
    fn from(raw: RawCommand) -> Self {
        match raw {
            RawCommand::Edit(op) => Self::Edit(op),
            RawCommand::Travel(Travel::Undo) => Self::Undo,
            RawCommand::Travel(Travel::Redo) => Self::Redo,
        }
    }
}

impl From<Command> for RawCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Edit(op) => Self::Edit(op),
            Command::Undo => Self::Travel(Travel::Undo),
            Command::Redo => Self::Travel(Travel::Redo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_script() {
        let script = r#"[
            {"op":"add_node","id":"n1","x":1.0,"y":2.0,"label":"Water","layer":"Base Loops"},
            "undo",
            "redo",
            {"op":"remove_node","id":"n1"}
        ]"#;
        let cmds: Vec<Command> = serde_json::from_str(script).unwrap();
        assert_eq!(cmds.len(), 4);
        assert!(matches!(cmds[0], Command::Edit(EditOp::AddNode(_))));
        assert_eq!(cmds[1], Command::Undo);
        assert_eq!(cmds[2], Command::Redo);
        assert_eq!(
            cmds[3],
            Command::Edit(EditOp::RemoveNode { id: "n1".into() })
        );
    }

    #[test]
    fn time_travel_serializes_as_bare_string() {
        let json = serde_json::to_string(&vec![Command::Undo, Command::Redo]).unwrap();
        assert_eq!(json, r#"["undo","redo"]"#);
    }

    #[test]
    fn unknown_step_is_rejected() {
        let res: Result<Command, _> = serde_json::from_str(r#""rewind""#);
        assert!(res.is_err());
    }
}
