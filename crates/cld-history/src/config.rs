// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Store policy knobs.

use serde::{Deserialize, Serialize};

/// Policy applied by a [`History`](crate::History).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Reject duplicate ids and dangling link endpoints instead of recording them.
    #[serde(default)]
    pub strict: bool,
    /// Maximum number of undo steps kept; `None` keeps everything.
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl HistoryConfig {
    /// Permissive, unbounded policy.
    pub const fn permissive() -> Self {
        Self {
            strict: false,
            max_depth: None,
        }
    }

    /// Enable or disable integrity checks.
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Cap the undo stack.
    pub const fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}
