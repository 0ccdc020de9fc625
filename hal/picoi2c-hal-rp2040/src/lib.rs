//! RP2040-specific HAL for the picoi2c bus adapter
//!
//! This crate provides RP2040 implementations of the shared
//! `picoi2c-hal` traits, plus RP2040-specific functionality:
//!
//! - Bus pins with open-drain emulation on a `Flex` GPIO
//! - Microsecond timer on the embassy time driver
//! - Flash unique ID readout (used as the USB serial number)

#![no_std]

pub mod flash;
pub mod gpio;
pub mod time;

pub use gpio::BusPin;
pub use time::EmbassyTimer;
