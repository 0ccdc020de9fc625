//! State machine definition

use picoi2c_protocol::Direction;

use super::events::Event;

/// Bridge states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// No transfer in flight
    #[default]
    Idle,
    /// (Repeated) start issued, address byte on the wire
    AddressPhase,
    /// Reading: waiting for the transport to collect the next chunk
    DataRead,
    /// Writing: waiting for the transport to deliver the next chunk
    DataWrite,
    /// Transfer abandoned after a missing acknowledge; bus was stopped
    Aborted,
}

impl State {
    /// Check if a data phase is in progress
    pub fn in_data_phase(&self) -> bool {
        matches!(self, State::DataRead | State::DataWrite)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Start and repeated start reset the protocol from any state
            (_, TransferRequested) => AddressPhase,

            (AddressPhase, AddressAcked { has_data: false, .. }) => Idle,
            (
                AddressPhase,
                AddressAcked {
                    direction: Direction::Read,
                    has_data: true,
                },
            ) => DataRead,
            (
                AddressPhase,
                AddressAcked {
                    direction: Direction::Write,
                    has_data: true,
                },
            ) => DataWrite,
            (AddressPhase, AddressNacked) => Aborted,

            (DataRead, ChunkDone { last: true }) => Idle,
            (DataRead, ChunkDone { last: false }) => DataRead,

            (DataWrite, ChunkDone { last: true }) => Idle,
            (DataWrite, ChunkDone { last: false }) => DataWrite,
            (DataWrite, DataNacked) => Aborted,

            // Default: stay in current state
            _ => self,
        }
    }
}
