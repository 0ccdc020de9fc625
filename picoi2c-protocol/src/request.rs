//! Vendor request decoding
//!
//! Request selectors (`bRequest`):
//! - `0` ECHO: reply with `wValue` (2 bytes, little-endian)
//! - `1` GET_FUNC: reply with the capability bitmask (4 bytes, little-endian)
//! - `2` SET_DELAY: accepted and ignored
//! - `3` GET_STATUS: reply with the last address-phase status (1 byte)
//! - `4..=7` I2C_IO: I2C transfer, bit 0 = BEGIN, bit 1 = END

// Request selectors
pub const CMD_ECHO: u8 = 0;
pub const CMD_GET_FUNC: u8 = 1;
pub const CMD_SET_DELAY: u8 = 2;
pub const CMD_GET_STATUS: u8 = 3;
pub const CMD_I2C_IO: u8 = 4;

// Flags combined with CMD_I2C_IO
pub const CMD_I2C_BEGIN: u8 = 1;
pub const CMD_I2C_END: u8 = 2;

/// Read flag in `wValue` of an I2C_IO request (Linux `I2C_M_RD`)
pub const I2C_M_RD: u16 = 0x0001;

/// Errors that can occur while decoding a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Selector is not part of the protocol
    UnsupportedRequest(u8),
    /// USB data stage runs against the I2C read/write flag
    DirectionMismatch,
}

/// Setup packet fields of a vendor control request
///
/// The USB stack decodes the setup packet; this is the subset the
/// adapter protocol looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlRequest {
    /// Operation selector (`bRequest`)
    pub request: u8,
    /// Flags or echo payload (`wValue`)
    pub value: u16,
    /// Target I2C address (`wIndex`)
    pub index: u16,
    /// Data stage length (`wLength`)
    pub length: u16,
}

impl ControlRequest {
    /// Create a request record
    pub const fn new(request: u8, value: u16, index: u16, length: u16) -> Self {
        Self {
            request,
            value,
            index,
            length,
        }
    }

    /// Build an I2C write request
    pub const fn i2c_write(flags: IoFlags, address: u8, length: u16) -> Self {
        Self::new(CMD_I2C_IO | flags.bits(), 0, address as u16, length)
    }

    /// Build an I2C read request
    pub const fn i2c_read(flags: IoFlags, address: u8, length: u16) -> Self {
        Self::new(CMD_I2C_IO | flags.bits(), I2C_M_RD, address as u16, length)
    }

    /// Decode the selector into a command
    pub fn command(&self) -> Result<Command, ProtocolError> {
        Command::from_request(self.request)
    }

    /// Check an I2C transfer against the direction of the USB data stage
    ///
    /// `data_stage` is [`Direction::Read`] for device-to-host (IN) control
    /// transfers. Only I2C transfers with a data stage are constrained: a
    /// zero-length transfer moves no data either way.
    pub fn check_direction(&self, data_stage: Direction) -> Result<(), ProtocolError> {
        match self.command() {
            Ok(Command::I2cIo(_))
                if self.length > 0 && Direction::from_flags(self.value) != data_stage =>
            {
                Err(ProtocolError::DirectionMismatch)
            }
            _ => Ok(()),
        }
    }
}

/// BEGIN/END flags of an I2C transfer request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IoFlags {
    /// Issue a start condition (otherwise a repeated start)
    pub begin: bool,
    /// Issue a stop condition after the data stage
    pub end: bool,
}

impl IoFlags {
    /// Start and stop: a complete, standalone transfer
    pub const FULL: Self = Self {
        begin: true,
        end: true,
    };

    /// Start without stop: first half of a combined transfer
    pub const BEGIN: Self = Self {
        begin: true,
        end: false,
    };

    /// Repeated start with stop: second half of a combined transfer
    pub const END: Self = Self {
        begin: false,
        end: true,
    };

    /// Extract flags from an I2C_IO selector
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            begin: bits & CMD_I2C_BEGIN != 0,
            end: bits & CMD_I2C_END != 0,
        }
    }

    /// Flag bits to combine with `CMD_I2C_IO`
    pub const fn bits(self) -> u8 {
        let mut bits = 0;
        if self.begin {
            bits |= CMD_I2C_BEGIN;
        }
        if self.end {
            bits |= CMD_I2C_END;
        }
        bits
    }
}

/// Transfer direction, as seen from the bus master
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Master writes to the target
    Write,
    /// Master reads from the target
    Read,
}

impl Direction {
    /// Decode the direction from the `wValue` flags
    pub const fn from_flags(flags: u16) -> Self {
        if flags & I2C_M_RD != 0 {
            Direction::Read
        } else {
            Direction::Write
        }
    }

    /// R/W bit of the on-wire address byte
    pub const fn rw_bit(self) -> u8 {
        match self {
            Direction::Write => 0,
            Direction::Read => 1,
        }
    }
}

/// Decoded request selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Echo `wValue` back to the host
    Echo,
    /// Report the capability bitmask
    GetCapabilities,
    /// Set the bus clock period (ignored)
    SetClockPeriod,
    /// Report the last address-phase status
    GetStatus,
    /// I2C transfer
    I2cIo(IoFlags),
}

impl Command {
    /// Decode a `bRequest` selector
    pub fn from_request(request: u8) -> Result<Self, ProtocolError> {
        match request {
            CMD_ECHO => Ok(Command::Echo),
            CMD_GET_FUNC => Ok(Command::GetCapabilities),
            CMD_SET_DELAY => Ok(Command::SetClockPeriod),
            CMD_GET_STATUS => Ok(Command::GetStatus),
            r if r & !(CMD_I2C_BEGIN | CMD_I2C_END) == CMD_I2C_IO => {
                Ok(Command::I2cIo(IoFlags::from_bits(r)))
            }
            other => Err(ProtocolError::UnsupportedRequest(other)),
        }
    }
}
