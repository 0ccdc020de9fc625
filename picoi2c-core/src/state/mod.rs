//! State machine for bridged I2C transfers
//!
//! Tracks where the single in-flight transfer stands between host
//! requests. The state machine is explicit, finite, and deterministic.
//! A second, smaller machine follows the USB link for the status LED.

pub mod events;
pub mod link;
pub mod machine;

pub use events::Event;
pub use link::{LinkEvent, LinkState};
pub use machine::State;
