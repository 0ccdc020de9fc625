//! picoi2c Hardware Abstraction Layer
//!
//! This crate defines the two hardware capabilities the bit-banged I2C
//! driver needs: a pin whose direction and level can be switched at run
//! time, and a monotonic microsecond time source with a busy-wait.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  picoi2c-drivers (bit-banged I2C)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  picoi2c-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ picoi2c-hal-  │       │  simulated    │
//! │    rp2040     │       │  bus (tests)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::FlexPin`] - Pin with switchable direction (open-drain emulation)
//! - [`time::Timer`] - Monotonic time source and busy-wait delay

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod time;

// Re-export key traits at crate root for convenience
pub use gpio::{FlexPin, PinDirection};
pub use time::Timer;
