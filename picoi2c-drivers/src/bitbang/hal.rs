//! embedded-hal I2C implementation
//!
//! Lets ordinary device drivers run on the bit-banged bus. Consecutive
//! operations in the same direction share one address phase; a change of
//! direction issues a repeated start.

use embedded_hal::i2c::{
    Error, ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation, SevenBitAddress,
};
use picoi2c_core::I2cMaster;
use picoi2c_hal::{FlexPin, Timer};

use super::BitBangI2c;

/// Largest 7-bit address
const MAX_ADDRESS: u8 = 0x7F;

/// I2C error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitBangError {
    /// No acknowledge received
    NoAcknowledge(NoAcknowledgeSource),
    /// Address does not fit in 7 bits
    InvalidAddress(u8),
}

impl Error for BitBangError {
    fn kind(&self) -> ErrorKind {
        match self {
            BitBangError::NoAcknowledge(source) => ErrorKind::NoAcknowledge(*source),
            BitBangError::InvalidAddress(_) => ErrorKind::Other,
        }
    }
}

impl<SDA, SCL, T> ErrorType for BitBangI2c<SDA, SCL, T> {
    type Error = BitBangError;
}

impl<SDA, SCL, T> I2c<SevenBitAddress> for BitBangI2c<SDA, SCL, T>
where
    SDA: FlexPin,
    SCL: FlexPin,
    T: Timer,
{
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address > MAX_ADDRESS {
            return Err(BitBangError::InvalidAddress(address));
        }

        let mut reading: Option<bool> = None;
        // `I2c` and `I2cMaster` both have read/write; byte-level calls are spelled out
        for i in 0..operations.len() {
            let next_is_read = matches!(operations.get(i + 1), Some(Operation::Read(_)));
            let is_read = matches!(operations[i], Operation::Read(_));

            if reading != Some(is_read) {
                if reading.is_none() {
                    self.start();
                } else {
                    self.repeated_start();
                }
                if !I2cMaster::write(self, (address << 1) | is_read as u8) {
                    self.stop();
                    return Err(BitBangError::NoAcknowledge(NoAcknowledgeSource::Address));
                }
                reading = Some(is_read);
            }

            match &mut operations[i] {
                Operation::Write(bytes) => {
                    for &byte in bytes.iter() {
                        if !I2cMaster::write(self, byte) {
                            self.stop();
                            return Err(BitBangError::NoAcknowledge(NoAcknowledgeSource::Data));
                        }
                    }
                }
                Operation::Read(buffer) => {
                    let len = buffer.len();
                    for (j, slot) in buffer.iter_mut().enumerate() {
                        // NACK the final byte before a direction change or stop
                        let last = j + 1 == len && !next_is_read;
                        *slot = I2cMaster::read(self, last);
                    }
                }
            }
        }

        if reading.is_some() {
            self.stop();
        }
        Ok(())
    }
}
