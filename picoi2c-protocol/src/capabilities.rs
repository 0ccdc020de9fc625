//! Capability bitmask reported by GET_FUNC
//!
//! Bit values are those of the Linux I2C `functionality` word, so the host
//! driver can pass the reply straight to the I2C core.

/// Plain I2C transfers
pub const I2C_FUNC_I2C: u32 = 0x0000_0001;
/// Transfers without a (repeated) start condition
pub const I2C_FUNC_NOSTART: u32 = 0x0000_0010;
/// All SMBus transactions the I2C core can emulate on a plain I2C adapter
pub const I2C_FUNC_SMBUS_EMUL: u32 = 0x0EFF_0008;

/// Capability bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Capabilities(pub u32);

impl Capabilities {
    /// Check whether every bit of `flags` is advertised
    pub const fn supports(self, flags: u32) -> bool {
        self.0 & flags == flags
    }

    /// Wire format (little-endian, as the host reads a `u32`)
    pub const fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

/// What this adapter advertises; fixed at build time
pub const ADAPTER_CAPABILITIES: Capabilities =
    Capabilities(I2C_FUNC_I2C | I2C_FUNC_SMBUS_EMUL | I2C_FUNC_NOSTART);
