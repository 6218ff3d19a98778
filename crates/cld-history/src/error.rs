// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! History error types.

use cld_graph::IntegrityError;
use thiserror::Error;

/// Errors surfaced by [`History::apply`](crate::History::apply).
///
/// Only produced in strict mode; undo/redo boundaries are not errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HistoryError {
    /// The edit failed an integrity check and was not recorded.
    #[error("edit rejected: {0}")]
    Rejected(#[from] IntegrityError),
}
