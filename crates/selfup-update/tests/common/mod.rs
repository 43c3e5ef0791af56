//! Common test infrastructure for selfup-update tests
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Modules
//!
//! - `constants`: Versions, names and binary contents shared by tests
//! - `archive`: `.tar.gz` fixture builder and digest helpers
//! - `builders`: Fluent builder for `Release`
//! - `fake_source`: In-memory `ReleaseSource`
//! - `fake_replacer`: Scripted `ExecutableReplacer` that records its calls
//! - `mock_server`: Wiremock setup helpers for the GitHub client
//! - `assertions`: Semantic assertions for pipeline results
//! - `updater_helpers`: Observers and filesystem helpers

// Not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod archive;
pub mod assertions;
pub mod builders;
pub mod constants;
pub mod fake_replacer;
pub mod fake_source;
pub mod mock_server;
pub mod updater_helpers;

pub use archive::*;
pub use assertions::*;
pub use builders::*;
pub use constants::*;
pub use fake_replacer::*;
pub use fake_source::*;
pub use mock_server::*;
pub use updater_helpers::*;
