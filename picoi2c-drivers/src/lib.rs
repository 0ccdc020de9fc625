//! Bus driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in picoi2c-core:
//!
//! - Bit-banged I2C master on two GPIO pins, with clock stretching
//!   support (implements `I2cMaster` and `embedded_hal::i2c::I2c`)

#![no_std]
#![deny(unsafe_code)]

pub mod bitbang;

pub use bitbang::{BitBangError, BitBangI2c, BusLines, Line};
