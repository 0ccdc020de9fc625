//! Configuration types
//!
//! Board-agnostic adapter configuration. The firmware fills these in at
//! build time from `board.toml`; nothing is persisted on the device.

pub mod hardware;

pub use hardware::*;
