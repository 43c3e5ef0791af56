//! # selfup-core
//!
//! Core library for selfup providing:
//! - Runtime configuration types (network, GitHub, update behaviour)
//! - Hierarchical configuration loading (embedded defaults, user file, environment)
//! - Shared error types

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use config::HierarchicalConfigLoader;
pub use error::{Error, Result};
pub use types::RuntimeConfig;
pub use utils::get_home_dir;
