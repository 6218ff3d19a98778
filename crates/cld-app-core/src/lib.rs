// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for CLD tools (config storage, editor prefs).
//! Storage backends plug in through [`config::ConfigStore`].

pub mod config;
pub mod prefs;
