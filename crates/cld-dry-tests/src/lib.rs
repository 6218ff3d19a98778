// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for CLD crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`fixtures`] - Node/link constructors, a document builder and the
//!   reference edit scenario

pub mod config;
pub mod fixtures;

pub use config::InMemoryConfigStore;
pub use fixtures::{
    balancing, layered_node, node, reference_scenario, reinforcing, DocumentBuilder,
};
