//! Demo configuration
//!
//! Board-agnostic configuration structures and the parser for the
//! `demo.toml` file embedded in the firmware.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
