//! Configuration
//!
//! Logger tunables and the minimal TOML reader that fills them in.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
