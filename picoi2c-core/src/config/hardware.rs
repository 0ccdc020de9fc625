//! Hardware configuration types
//!
//! Pin assignment and bus timing for the bit-banged I2C lines.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::timing::DEFAULT_CLOCK_PERIOD_US;

/// Number of user GPIOs on the RP2040
pub const GPIO_COUNT: u8 = 30;

/// Default SDA pin
pub const DEFAULT_SDA_PIN: u8 = 6;

/// Default SCL pin
pub const DEFAULT_SCL_PIN: u8 = 7;

/// Default status LED pin (Raspberry Pi Pico on-board LED)
pub const DEFAULT_LED_PIN: u8 = 25;

/// How long a target may hold SCL low before the master carries on
pub const DEFAULT_STRETCH_TIMEOUT_MS: u32 = 1000;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin number out of range
    InvalidPin(u8),
    /// Same pin assigned to two functions
    DuplicatePin(u8),
    /// Clock period of zero
    InvalidClockPeriod,
}

/// Pin configuration for a bus line or indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Enable the internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a pin without pull-up
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            pull_up: false,
        }
    }

    /// Create a pin with pull-up enabled
    pub const fn with_pullup(pin: u8) -> Self {
        Self { pin, pull_up: true }
    }
}

/// Complete adapter configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdapterConfig {
    /// I2C data line
    pub sda: PinConfig,
    /// I2C clock line
    pub scl: PinConfig,
    /// Status LED, lit while the host has the device configured
    pub led: Option<u8>,
    /// Bus clock period in µs
    pub clock_period_us: u16,
    /// Clock-stretch limit in ms
    pub stretch_timeout_ms: u32,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            sda: PinConfig::with_pullup(DEFAULT_SDA_PIN),
            scl: PinConfig::with_pullup(DEFAULT_SCL_PIN),
            led: Some(DEFAULT_LED_PIN),
            clock_period_us: DEFAULT_CLOCK_PERIOD_US,
            stretch_timeout_ms: DEFAULT_STRETCH_TIMEOUT_MS,
        }
    }
}

impl AdapterConfig {
    /// Check pin numbers and timing
    pub fn validate(&self) -> Result<(), ConfigError> {
        let led = self.led.map(PinConfig::new);
        for pin in [Some(self.sda), Some(self.scl), led].into_iter().flatten() {
            if pin.pin >= GPIO_COUNT {
                return Err(ConfigError::InvalidPin(pin.pin));
            }
        }

        if self.sda.pin == self.scl.pin {
            return Err(ConfigError::DuplicatePin(self.sda.pin));
        }
        if let Some(led) = self.led {
            if led == self.sda.pin || led == self.scl.pin {
                return Err(ConfigError::DuplicatePin(led));
            }
        }

        if self.clock_period_us == 0 {
            return Err(ConfigError::InvalidClockPeriod);
        }

        Ok(())
    }

    /// Clock-stretch limit in µs
    pub const fn stretch_timeout_us(&self) -> u64 {
        self.stretch_timeout_ms as u64 * 1000
    }
}
