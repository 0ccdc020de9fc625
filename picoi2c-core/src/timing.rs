//! Clock timing for software-timed buses
//!
//! Every SCL transition is framed by two waits: one before the level
//! change and one after it. A full clock cycle is two transitions, so the
//! bit time is `2 * (before + after)` microseconds. Delays are whole
//! microseconds and are rounded up so the bus never runs faster than asked.

/// Default clock period (10 µs = 100 kHz standard mode)
pub const DEFAULT_CLOCK_PERIOD_US: u16 = 10;

/// Pre- and post-transition delays derived from a clock period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTiming {
    /// Wait before changing a line (µs)
    pub before_us: u32,
    /// Wait after changing a line (µs)
    pub after_us: u32,
}

impl Default for ClockTiming {
    fn default() -> Self {
        Self::from_period_us(DEFAULT_CLOCK_PERIOD_US)
    }
}

impl ClockTiming {
    /// Fastest timing available with microsecond delays (~500 kHz)
    pub const FASTEST: Self = Self {
        before_us: 0,
        after_us: 1,
    };

    /// Compute delays for a requested clock period in microseconds
    pub fn from_period_us(period_us: u16) -> Self {
        match period_us {
            0..=2 => Self::FASTEST,
            // ~250 kHz
            3..=4 => Self {
                before_us: 1,
                after_us: 1,
            },
            _ => {
                // Widen before rounding so u16::MAX does not overflow
                let mut period = period_us as u32;
                if period & 1 != 0 {
                    period += 1;
                }
                let mut before_us = period / 6;
                let after_us = (period - 2 * before_us) / 2;
                if 2 * (before_us + after_us) < period {
                    before_us += 1;
                }
                Self {
                    before_us,
                    after_us,
                }
            }
        }
    }

    /// Resulting clock period in microseconds
    pub const fn period_us(&self) -> u32 {
        2 * (self.before_us + self.after_us)
    }
}
