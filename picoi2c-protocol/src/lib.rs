//! i2c-tiny-usb Vendor Request Protocol
//!
//! This crate defines the USB control protocol between the host I2C driver
//! (Linux `i2c-tiny-usb`, or libusb tools) and the adapter. Every operation is
//! a vendor control transfer on endpoint 0; there are no other endpoints.
//!
//! # Request Layout
//!
//! ```text
//! ┌──────────┬────────────────┬──────────────┬──────────────┬─────────────┐
//! │ bRequest │ wValue         │ wIndex       │ wLength      │ data stage  │
//! │ selector │ flags / echo   │ I2C address  │ byte count   │ 0..wLength  │
//! └──────────┴────────────────┴──────────────┴──────────────┴─────────────┘
//! ```
//!
//! `bRequest` values 4 to 7 are all I2C transfers: bit 0 asks for a start
//! condition (otherwise a repeated start) and bit 1 asks for a stop condition
//! once the data stage is done.

#![no_std]
#![deny(unsafe_code)]

pub mod capabilities;
pub mod request;
pub mod status;
pub mod usb;

pub use capabilities::{Capabilities, ADAPTER_CAPABILITIES};
pub use request::{Command, ControlRequest, Direction, IoFlags, ProtocolError};
pub use status::TransferStatus;
