//! Board-agnostic core logic for the USB to I2C adapter
//!
//! This crate contains all adapter logic that does not depend on
//! specific hardware implementations:
//!
//! - Bus master trait implemented by bus drivers
//! - Clock timing computation for software-timed buses
//! - Transaction bridge from vendor control requests to I2C transfers
//! - Bridge state machine
//! - Adapter configuration types

#![no_std]
#![deny(unsafe_code)]

pub mod bridge;
pub mod config;
pub mod state;
pub mod timing;
pub mod traits;

pub use bridge::{Bridge, BridgeError, DataOutcome, Session, Setup};
pub use timing::ClockTiming;
pub use traits::I2cMaster;
