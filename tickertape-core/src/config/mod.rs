//! Configuration types
//!
//! Board-agnostic configuration structures and the TOML subset parser that
//! fills them from the embedded `ticker.toml`.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
