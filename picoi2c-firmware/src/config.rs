//! Board configuration
//!
//! Generated at build time from board.toml; see build.rs.

use picoi2c_core::config::{AdapterConfig, PinConfig};

include!(concat!(env!("OUT_DIR"), "/board.rs"));
