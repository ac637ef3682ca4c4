//! Configuration types
//!
//! Board-agnostic configuration structures and the TOML-subset parser
//! used to load them.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ConfigError};
pub use types::*;
