// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved editor preferences shared by CLD tools.

use serde::{Deserialize, Serialize};

/// Config key the editor preferences are stored under.
pub const PREFS_KEY: &str = "editor";

/// How tools print a document by default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Full document as JSON.
    #[default]
    Json,
    /// Counts, depths and hash as a table.
    Table,
}

/// Saved preferences for a diagram editor session.
///
/// Unknown or missing fields fall back to their defaults so older files
/// keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct EditorPrefs {
    /// Reject duplicate ids and dangling links instead of recording them.
    pub strict_validation: bool,
    /// Undo steps to keep; `None` is unbounded.
    pub history_limit: Option<usize>,
    /// Output format for reports.
    pub default_format: ReportFormat,
}
