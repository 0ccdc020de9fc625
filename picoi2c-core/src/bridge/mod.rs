//! USB request to I2C transaction bridge
//!
//! Turns i2c-tiny-usb vendor requests into bus operations. An I2C request
//! is handled in two steps that follow the USB control transfer stages:
//!
//! 1. [`Bridge::setup`] decodes the request and runs the address phase.
//! 2. The data phase is driven chunk by chunk, [`Bridge::read_chunk`] for
//!    reads and [`Bridge::write_chunk`] for writes, each chunk bounded by the
//!    session's staging buffer.
//!
//! Chunking only affects buffering. The bus sees one uninterrupted
//! transaction: no start or stop is issued between chunks.
//!
//! Transports that see a whole control transfer at once use
//! [`Bridge::serve_in`] and [`Bridge::serve_out`], which run both steps
//! and stitch the chunks together.

pub mod session;

use heapless::Vec;
use picoi2c_protocol::{Command, ControlRequest, Direction, ProtocolError, ADAPTER_CAPABILITIES};

use crate::state::State;
use crate::traits::I2cMaster;

pub use session::{PendingTransfer, Session, DEFAULT_CHUNK_SIZE};

/// Largest fixed-size reply (the capability bitmask)
pub const MAX_REPLY_SIZE: usize = 4;

/// Fixed-size reply to a query request
pub type Reply = Vec<u8, MAX_REPLY_SIZE>;

/// Errors surfaced to the transport; each one fails the control transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeError {
    /// Request could not be decoded
    Protocol(ProtocolError),
    /// No device acknowledged the address
    AddressNack,
    /// Target refused a data byte during a write
    DataNack,
    /// Data stage without a matching transfer in progress
    NoTransfer,
    /// Chunk larger than the pending transfer or the staging buffer
    ChunkTooLarge,
    /// Data stage ended before the requested length was written
    ShortData,
}

impl From<ProtocolError> for BridgeError {
    fn from(e: ProtocolError) -> Self {
        BridgeError::Protocol(e)
    }
}

/// Result of the setup stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setup {
    /// Reply bytes for an IN request
    Reply(Reply),
    /// Request fully handled; no data stage
    Complete,
    /// Address acknowledged; collect `remaining` bytes with `read_chunk`
    ReadReady { remaining: u16 },
    /// Address acknowledged; deliver up to `chunk_len` bytes to `write_chunk`
    AwaitingData { chunk_len: usize },
}

/// Result of a write chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataOutcome {
    /// More data expected; next chunk of up to `chunk_len` bytes
    AwaitingData { chunk_len: usize },
    /// All requested bytes were written
    Complete,
}

/// Bridge between vendor requests and an I2C bus master
pub struct Bridge<B> {
    bus: B,
}

impl<B: I2cMaster> Bridge<B> {
    /// Create a bridge driving `bus`
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Access the bus driver
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Handle the setup stage of a vendor request
    ///
    /// Query requests never touch the in-flight transfer.
    pub fn setup<const N: usize>(
        &mut self,
        session: &mut Session<N>,
        request: &ControlRequest,
    ) -> Result<Setup, BridgeError> {
        match request.command()? {
            Command::Echo => Ok(Setup::Reply(reply(&request.value.to_le_bytes()))),
            Command::GetCapabilities => Ok(Setup::Reply(reply(
                &ADAPTER_CAPABILITIES.to_le_bytes(),
            ))),
            // The bus always runs at the configured speed; the host's
            // delay request is acknowledged and dropped.
            Command::SetClockPeriod => Ok(Setup::Complete),
            Command::GetStatus => Ok(Setup::Reply(reply(&[session.status().to_byte()]))),
            Command::I2cIo(flags) => {
                self.address_phase(session, PendingTransfer::from_request(flags, request))
            }
        }
    }

    /// Serve a device-to-host (IN) control transfer
    ///
    /// Fills `buf` with the reply or the bytes read and returns their
    /// count. Nothing reaches the bus unless the whole reply fits `buf` and
    /// the request reads.
    pub fn serve_in<const N: usize>(
        &mut self,
        session: &mut Session<N>,
        request: &ControlRequest,
        buf: &mut [u8],
    ) -> Result<usize, BridgeError> {
        if request.length as usize > buf.len() {
            return Err(BridgeError::ChunkTooLarge);
        }
        request.check_direction(Direction::Read)?;

        match self.setup(session, request)? {
            Setup::Reply(reply) => {
                let len = reply.len().min(request.length as usize);
                buf[..len].copy_from_slice(&reply[..len]);
                Ok(len)
            }
            Setup::Complete => Ok(0),
            Setup::ReadReady { .. } => {
                let mut filled = 0;
                while session.state().in_data_phase() {
                    let chunk = self.read_chunk(session)?;
                    let end = filled + chunk.len();
                    buf[filled..end].copy_from_slice(chunk);
                    filled = end;
                }
                Ok(filled)
            }
            Setup::AwaitingData { .. } => Err(ProtocolError::DirectionMismatch.into()),
        }
    }

    /// Serve a host-to-device (OUT) control transfer carrying `data`
    ///
    /// Replies of query requests have nowhere to go and are dropped.
    pub fn serve_out<const N: usize>(
        &mut self,
        session: &mut Session<N>,
        request: &ControlRequest,
        data: &[u8],
    ) -> Result<(), BridgeError> {
        request.check_direction(Direction::Write)?;

        match self.setup(session, request)? {
            Setup::Reply(_) | Setup::Complete => Ok(()),
            Setup::ReadReady { .. } => Err(ProtocolError::DirectionMismatch.into()),
            Setup::AwaitingData { .. } => {
                for chunk in data.chunks(session.capacity()) {
                    self.write_chunk(session, chunk)?;
                }
                if session.state().in_data_phase() {
                    return Err(BridgeError::ShortData);
                }
                Ok(())
            }
        }
    }

    fn address_phase<const N: usize>(
        &mut self,
        session: &mut Session<N>,
        transfer: PendingTransfer,
    ) -> Result<Setup, BridgeError> {
        session.begin(transfer);

        if transfer.flags.begin {
            self.bus.start();
        } else {
            self.bus.repeated_start();
        }

        if !self.bus.write(transfer.address_byte()) {
            self.bus.stop();
            session.address_nacked();
            return Err(BridgeError::AddressNack);
        }

        session.address_acked(&transfer);

        if transfer.length == 0 {
            if transfer.flags.end {
                self.bus.stop();
            }
            return Ok(Setup::Complete);
        }

        match transfer.direction {
            Direction::Read => Ok(Setup::ReadReady {
                remaining: transfer.length,
            }),
            Direction::Write => Ok(Setup::AwaitingData {
                chunk_len: session.next_chunk_len(),
            }),
        }
    }

    /// Read the next chunk of a pending read
    ///
    /// The final byte of the whole transfer (not of each chunk) is answered
    /// with a no-acknowledge. Returns the bytes read, which stay valid until
    /// the session is used again.
    pub fn read_chunk<'s, const N: usize>(
        &mut self,
        session: &'s mut Session<N>,
    ) -> Result<&'s [u8], BridgeError> {
        let transfer = session.expect(State::DataRead)?;
        let chunk_len = session.next_chunk_len();
        let mut remaining = transfer.remaining;

        let staging = session.staging_mut();
        for _ in 0..chunk_len {
            remaining -= 1;
            let byte = self.bus.read(remaining == 0);
            // Cannot fail: chunk_len never exceeds the capacity
            let _ = staging.push(byte);
        }

        if remaining == 0 && transfer.flags.end {
            self.bus.stop();
        }
        session.chunk_done(remaining);

        Ok(session.staged())
    }

    /// Write the next chunk of a pending write
    ///
    /// A short chunk is accepted; the transfer then waits for the rest.
    /// If the target refuses a byte the bus is stopped and the remainder of
    /// the transfer is dropped.
    pub fn write_chunk<const N: usize>(
        &mut self,
        session: &mut Session<N>,
        data: &[u8],
    ) -> Result<DataOutcome, BridgeError> {
        let transfer = session.expect(State::DataWrite)?;
        if data.len() > session.next_chunk_len() {
            return Err(BridgeError::ChunkTooLarge);
        }

        let staging = session.staging_mut();
        staging
            .extend_from_slice(data)
            .map_err(|_| BridgeError::ChunkTooLarge)?;

        let acked = staging.iter().all(|&byte| self.bus.write(byte));
        if !acked {
            self.bus.stop();
            session.data_nacked();
            return Err(BridgeError::DataNack);
        }

        let remaining = transfer.remaining - data.len() as u16;
        if remaining == 0 && transfer.flags.end {
            self.bus.stop();
        }
        session.chunk_done(remaining);

        if remaining == 0 {
            Ok(DataOutcome::Complete)
        } else {
            Ok(DataOutcome::AwaitingData {
                chunk_len: session.next_chunk_len(),
            })
        }
    }
}

fn reply(bytes: &[u8]) -> Reply {
    let mut reply = Reply::new();
    // Cannot fail: every reply fits MAX_REPLY_SIZE
    let _ = reply.extend_from_slice(bytes);
    reply
}
