//! Events that trigger state transitions

use picoi2c_protocol::Direction;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// An I2C transfer request arrived; a (repeated) start was issued
    TransferRequested,
    /// The target acknowledged its address
    AddressAcked {
        direction: Direction,
        /// Requested length is non-zero
        has_data: bool,
    },
    /// No target acknowledged the address
    AddressNacked,
    /// A chunk of the data phase was transferred
    ChunkDone {
        /// The requested length is exhausted
        last: bool,
    },
    /// The target refused a data byte
    DataNacked,
}
