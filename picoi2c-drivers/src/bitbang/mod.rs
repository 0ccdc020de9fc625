//! Bit-banged I2C master
//!
//! Generates the bus conditions in software on two GPIO pins. The RP2040
//! I2C block cannot issue a zero-length transfer, which is how i2cdetect
//! probes for devices, so the adapter drives the pins itself.
//!
//! Condition sequence:
//!
//! ```text
//! Idle ──start()──▶ Addressing/Data ──write()/read()──▶ Addressing/Data
//!   ▲                    │      ▲                              │
//!   │                    │      └───── repeated_start() ◀──────┤
//!   └────── stop() ◀─────┴─────────────────────────────────────┘
//! ```
//!
//! Timing is affected by interrupts; callers that need clean conditions
//! should mask them around [`I2cMaster::start`], [`I2cMaster::repeated_start`]
//! and [`I2cMaster::stop`].

mod hal;
mod line;

#[cfg(test)]
mod sim;

use picoi2c_core::{ClockTiming, I2cMaster};
use picoi2c_hal::{FlexPin, Timer};

pub use hal::BitBangError;
pub use line::{BusLines, Line};

/// Bit-banged I2C master
pub struct BitBangI2c<SDA, SCL, T> {
    lines: BusLines<SDA, SCL, T>,
}

impl<SDA, SCL, T> BitBangI2c<SDA, SCL, T>
where
    SDA: FlexPin,
    SCL: FlexPin,
    T: Timer,
{
    /// Create a driver running at `clock_period_us`, with both lines released
    pub fn new(sda: SDA, scl: SCL, timer: T, clock_period_us: u16) -> Self {
        Self {
            lines: BusLines::new(sda, scl, timer, clock_period_us),
        }
    }

    /// Set how long a target may stretch the clock (µs)
    pub fn with_stretch_timeout_us(mut self, timeout_us: u64) -> Self {
        self.lines.set_stretch_timeout_us(timeout_us);
        self
    }

    /// Current clock delays
    pub fn timing(&self) -> ClockTiming {
        self.lines.timing()
    }

    /// Access the underlying lines
    pub fn lines_mut(&mut self) -> &mut BusLines<SDA, SCL, T> {
        &mut self.lines
    }

    /// Clock high then low
    fn toggle_scl(&mut self) {
        self.lines.set(Line::Scl, true);
        self.lines.set(Line::Scl, false);
    }
}

impl<SDA, SCL, T> I2cMaster for BitBangI2c<SDA, SCL, T>
where
    SDA: FlexPin,
    SCL: FlexPin,
    T: Timer,
{
    fn start(&mut self) {
        self.lines.set(Line::Sda, false);
        self.lines.set(Line::Scl, false);
    }

    fn repeated_start(&mut self) {
        // SCL and SDA may be low; release both so the bus is idle first
        self.lines.set(Line::Sda, true);
        self.lines.set(Line::Scl, true);

        self.lines.set(Line::Sda, false);
        self.lines.set(Line::Scl, false);
    }

    fn stop(&mut self) {
        self.lines.set(Line::Sda, false);
        self.lines.set(Line::Scl, true);
        self.lines.set(Line::Sda, true);
    }

    fn write(&mut self, byte: u8) -> bool {
        let mut byte = byte;
        for _ in 0..8 {
            self.lines.set(Line::Sda, byte & 0x80 != 0);
            self.toggle_scl();
            byte <<= 1;
        }

        self.lines.set(Line::Sda, true);
        self.lines.set(Line::Scl, true);

        // Receiver pulls SDA low to acknowledge
        let ack = !self.lines.is_high(Line::Sda);
        self.lines.set(Line::Scl, false);

        ack
    }

    fn read(&mut self, last: bool) -> u8 {
        let mut byte = 0u8;

        self.lines.set(Line::Sda, true);
        self.lines.set(Line::Scl, false);

        for _ in 0..8 {
            self.lines.set(Line::Scl, true);
            byte <<= 1;
            if self.lines.is_high(Line::Sda) {
                byte |= 1;
            }
            self.lines.set(Line::Scl, false);
        }

        // NACK (released) ends the read, ACK (low) asks for more
        self.lines.set(Line::Sda, last);
        self.toggle_scl();
        self.lines.set(Line::Sda, true);

        byte
    }

    fn set_clock_period(&mut self, period_us: u16) {
        self.lines.set_clock_period(period_us);
    }
}
