//! Bus pins on RP2040 GPIO
//!
//! The RP2040 pads have no open-drain mode. A bus pin keeps its output
//! register at low and switches the output enable: input releases the
//! line, output pulls it down.

use embassy_rp::gpio::{Flex, Pin, Pull, SlewRate};
use embassy_rp::Peri;
use picoi2c_hal::{FlexPin, PinDirection};

/// One I2C line on a GPIO pad
pub struct BusPin<'d> {
    pin: Flex<'d>,
}

impl<'d> BusPin<'d> {
    /// Configure a pad for I2C use, starting released
    ///
    /// Slow slew and the schmitt trigger keep edges clean on long wires.
    /// The internal pull-up (~50kΩ) is only enough for short buses; use
    /// external resistors otherwise.
    pub fn new(pin: Peri<'d, impl Pin>, pull_up: bool) -> Self {
        let mut pin = Flex::new(pin);
        pin.set_pull(if pull_up { Pull::Up } else { Pull::None });
        pin.set_slew_rate(SlewRate::Slow);
        pin.set_schmitt(true);
        pin.set_low();
        pin.set_as_input();
        Self { pin }
    }
}

impl FlexPin for BusPin<'_> {
    fn set_direction(&mut self, direction: PinDirection) {
        match direction {
            PinDirection::Input => self.pin.set_as_input(),
            PinDirection::Output => self.pin.set_as_output(),
        }
    }

    fn set_level(&mut self, high: bool) {
        if high {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }

    fn is_high(&mut self) -> bool {
        self.pin.is_high()
    }

    fn drive_low(&mut self) {
        // Level first, so enabling the output never glitches high
        self.pin.set_low();
        self.pin.set_as_output();
    }
}
