// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Human-readable summaries of a history's state.

use anyhow::Result;
use cld_history::{Command, History};
use comfy_table::Table;

/// Hex digits of the document hash shown in tables.
const HASH_PREFIX_LEN: usize = 16;

/// One table row describing the store after a step.
pub struct Summary {
    step: String,
    nodes: usize,
    links: usize,
    layers: String,
    undo: usize,
    redo: usize,
    hash: String,
}

impl Summary {
    /// Capture `history` under the label `step`.
    pub fn of(step: impl Into<String>, history: &History) -> Result<Self> {
        let doc = history.present();
        let mut hash = hex::encode(doc.compute_hash()?);
        hash.truncate(HASH_PREFIX_LEN);
        Ok(Self {
            step: step.into(),
            nodes: doc.nodes.len(),
            links: doc.links.len(),
            layers: doc.layers.join(", "),
            undo: history.undo_depth(),
            redo: history.redo_depth(),
            hash,
        })
    }
}

/// Row label for a replay step.
pub fn step_label(command: &Command) -> &'static str {
    match command {
        Command::Edit(op) => op.kind(),
        Command::Undo => "undo",
        Command::Redo => "redo",
    }
}

/// Render rows as a table.
pub fn render(rows: &[Summary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "step", "nodes", "links", "layers", "undo", "redo", "hash",
    ]);
    for row in rows {
        table.add_row(vec![
            row.step.clone(),
            row.nodes.to_string(),
            row.links.to_string(),
            row.layers.clone(),
            row.undo.to_string(),
            row.redo.to_string(),
            row.hash.clone(),
        ]);
    }
    table
}
