//! Timed control of the two bus lines
//!
//! A line is never driven high: "high" releases the pin and lets the
//! pull-up raise it, "low" drives it. Every level change is framed by the
//! before/after delays of the current [`ClockTiming`]; that spacing, not
//! the GPIO toggle speed, sets the bus clock.
//!
//! Releasing SCL also waits for the line to actually rise, so a target can
//! stretch the clock. The wait is bounded; when it expires the driver
//! carries on and the target's state is whatever it is.

use picoi2c_core::config::DEFAULT_STRETCH_TIMEOUT_MS;
use picoi2c_core::ClockTiming;
use picoi2c_hal::{FlexPin, Timer};

/// Bus line selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Data line
    Sda,
    /// Clock line
    Scl,
}

/// SDA and SCL pins with calibrated transition delays
pub struct BusLines<SDA, SCL, T> {
    sda: SDA,
    scl: SCL,
    timer: T,
    timing: ClockTiming,
    stretch_timeout_us: u64,
}

impl<SDA, SCL, T> BusLines<SDA, SCL, T>
where
    SDA: FlexPin,
    SCL: FlexPin,
    T: Timer,
{
    /// Take ownership of the pins and release both lines
    pub fn new(mut sda: SDA, mut scl: SCL, timer: T, clock_period_us: u16) -> Self {
        sda.release();
        scl.release();
        Self {
            sda,
            scl,
            timer,
            timing: ClockTiming::from_period_us(clock_period_us),
            stretch_timeout_us: DEFAULT_STRETCH_TIMEOUT_MS as u64 * 1000,
        }
    }

    /// Recompute the delays for a new clock period
    pub fn set_clock_period(&mut self, period_us: u16) {
        self.timing = ClockTiming::from_period_us(period_us);
    }

    /// Current delays
    pub fn timing(&self) -> ClockTiming {
        self.timing
    }

    /// Limit how long a released SCL may be held low by a target
    pub fn set_stretch_timeout_us(&mut self, timeout_us: u64) {
        self.stretch_timeout_us = timeout_us;
    }

    /// Set a line to a logical level
    pub fn set(&mut self, line: Line, high: bool) {
        self.timer.busy_wait_us(self.timing.before_us);
        match (line, high) {
            (Line::Sda, true) => self.sda.release(),
            (Line::Sda, false) => self.sda.drive_low(),
            (Line::Scl, true) => {
                self.scl.release();
                let scl = &mut self.scl;
                // Timeout is not an error here; later samples show the state
                let _ = self
                    .timer
                    .wait_until(self.stretch_timeout_us, || scl.is_high());
            }
            (Line::Scl, false) => self.scl.drive_low(),
        }
        self.timer.busy_wait_us(self.timing.after_us);
    }

    /// Sample the level present on a line
    pub fn is_high(&mut self, line: Line) -> bool {
        match line {
            Line::Sda => self.sda.is_high(),
            Line::Scl => self.scl.is_high(),
        }
    }
}
