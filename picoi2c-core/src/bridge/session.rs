//! Per-adapter transfer session
//!
//! Holds everything that must survive between the USB stages of a
//! transfer: the pending transfer descriptor, the bridge state, the last
//! address-phase status and the chunk staging buffer. There is exactly one
//! session per adapter, owned by whoever drives the USB control endpoint.

use heapless::Vec;
use picoi2c_protocol::{ControlRequest, Direction, IoFlags, TransferStatus};

use super::BridgeError;
use crate::state::{Event, State};

/// Chunk capacity used by the firmware (one full-speed control packet)
pub const DEFAULT_CHUNK_SIZE: usize = 64;

/// In-flight I2C transfer descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PendingTransfer {
    /// BEGIN/END flags of the request
    pub flags: IoFlags,
    /// 7-bit target address
    pub address: u8,
    /// Transfer direction
    pub direction: Direction,
    /// Requested length in bytes
    pub length: u16,
    /// Bytes not yet transferred
    pub remaining: u16,
}

impl PendingTransfer {
    /// Describe the transfer requested by an I2C_IO request
    pub fn from_request(flags: IoFlags, request: &ControlRequest) -> Self {
        Self {
            flags,
            address: (request.index & 0x7F) as u8,
            direction: Direction::from_flags(request.value),
            length: request.length,
            remaining: request.length,
        }
    }

    /// On-wire address byte: 7-bit address followed by the R/W bit
    pub fn address_byte(&self) -> u8 {
        (self.address << 1) | self.direction.rw_bit()
    }
}

/// Transfer session with a staging buffer of `N` bytes
#[derive(Debug)]
pub struct Session<const N: usize = DEFAULT_CHUNK_SIZE> {
    state: State,
    status: TransferStatus,
    pending: Option<PendingTransfer>,
    staging: Vec<u8, N>,
}

impl<const N: usize> Default for Session<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Session<N> {
    /// Create an idle session
    pub const fn new() -> Self {
        Self {
            state: State::Idle,
            status: TransferStatus::Idle,
            pending: None,
            staging: Vec::new(),
        }
    }

    /// Staging buffer capacity (largest chunk)
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Current bridge state
    pub fn state(&self) -> State {
        self.state
    }

    /// Status of the most recent address phase
    pub fn status(&self) -> TransferStatus {
        self.status
    }

    /// Transfer currently in flight, if any
    pub fn pending(&self) -> Option<&PendingTransfer> {
        self.pending.as_ref()
    }

    /// Size of the next chunk of the pending transfer
    pub fn next_chunk_len(&self) -> usize {
        self.pending
            .map(|t| (t.remaining as usize).min(N))
            .unwrap_or(0)
    }

    fn apply(&mut self, event: Event) {
        self.state = self.state.transition(event);
    }

    /// Replace any stale transfer with a new one entering the address phase
    pub(crate) fn begin(&mut self, transfer: PendingTransfer) {
        self.pending = Some(transfer);
        self.staging.clear();
        self.apply(Event::TransferRequested);
    }

    pub(crate) fn address_acked(&mut self, transfer: &PendingTransfer) {
        self.status = TransferStatus::AddressAcked;
        self.apply(Event::AddressAcked {
            direction: transfer.direction,
            has_data: transfer.length > 0,
        });
        if transfer.length == 0 {
            self.pending = None;
        }
    }

    pub(crate) fn address_nacked(&mut self) {
        self.status = TransferStatus::AddressNacked;
        self.apply(Event::AddressNacked);
        self.release();
    }

    pub(crate) fn data_nacked(&mut self) {
        self.apply(Event::DataNacked);
        self.release();
    }

    /// Pending transfer, provided the bridge is in `expected`
    pub(crate) fn expect(&self, expected: State) -> Result<PendingTransfer, BridgeError> {
        match self.pending {
            Some(transfer) if self.state == expected => Ok(transfer),
            _ => Err(BridgeError::NoTransfer),
        }
    }

    /// Record progress after a chunk went over the bus
    pub(crate) fn chunk_done(&mut self, remaining: u16) {
        let last = remaining == 0;
        if let Some(transfer) = self.pending.as_mut() {
            transfer.remaining = remaining;
        }
        self.apply(Event::ChunkDone { last });
        if last {
            self.pending = None;
        }
    }

    /// Empty the staging buffer for a new chunk
    pub(crate) fn staging_mut(&mut self) -> &mut Vec<u8, N> {
        self.staging.clear();
        &mut self.staging
    }

    /// Bytes of the most recent chunk
    pub fn staged(&self) -> &[u8] {
        &self.staging
    }

    fn release(&mut self) {
        self.pending = None;
        self.staging.clear();
    }
}
