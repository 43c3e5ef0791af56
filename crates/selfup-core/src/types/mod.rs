//! Type definitions for selfup configuration

mod runtime_config;

pub use runtime_config::*;
