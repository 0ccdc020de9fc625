//! Bus abstraction traits
//!
//! These traits define the interface between the transaction bridge
//! and bus driver implementations.

pub mod bus;

pub use bus::I2cMaster;
