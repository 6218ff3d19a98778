// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error types for document encoding and integrity checks.

use thiserror::Error;

/// Failure while producing a document's canonical form.
#[derive(Debug, Error)]
pub enum GraphError {
    /// CBOR encoding failed.
    #[error("canonical encode failed: {0}")]
    Encode(String),
}

/// Referential problem detected by [`crate::Document::check`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntegrityError {
    /// A node with this id already exists.
    #[error("node already exists: {0}")]
    DuplicateNode(String),
    /// A link with this id already exists.
    #[error("link already exists: {0}")]
    DuplicateLink(String),
    /// A link endpoint names a node that is not in the document.
    #[error("link {link} references missing node {node}")]
    DanglingEndpoint {
        /// Offending link id.
        link: String,
        /// Missing node id.
        node: String,
    },
}
