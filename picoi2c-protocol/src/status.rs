//! Address-phase status reported by GET_STATUS

// Wire format values
pub const STATUS_IDLE: u8 = 0;
pub const STATUS_ADDRESS_ACK: u8 = 1;
pub const STATUS_ADDRESS_NACK: u8 = 2;

/// Outcome of the most recent address phase
///
/// Only one value is kept; a new transfer overwrites it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferStatus {
    /// No transfer since power-up
    #[default]
    Idle,
    /// Target acknowledged its address
    AddressAcked,
    /// No device answered the address
    AddressNacked,
}

impl TransferStatus {
    /// Convert to wire format byte
    pub const fn to_byte(self) -> u8 {
        match self {
            TransferStatus::Idle => STATUS_IDLE,
            TransferStatus::AddressAcked => STATUS_ADDRESS_ACK,
            TransferStatus::AddressNacked => STATUS_ADDRESS_NACK,
        }
    }
}
