//! GPIO pin abstractions
//!
//! I2C lines are open-drain: a device may only pull a line low, and the
//! high level comes from a pull-up resistor. Without open-drain hardware
//! this is emulated by switching the pin between input (released) and
//! output driving low.

/// Direction of a flexible pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinDirection {
    /// High impedance, level set by the bus
    Input,
    /// Pin drives its output level
    Output,
}

/// Pin that can switch between input and output at run time
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait FlexPin {
    /// Switch the pin direction
    fn set_direction(&mut self, direction: PinDirection);

    /// Set the output level (only visible while the pin is an output)
    fn set_level(&mut self, high: bool);

    /// Read the level actually present on the pin
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }

    /// Release the line so the pull-up (or another device) sets its level
    fn release(&mut self) {
        self.set_direction(PinDirection::Input);
    }

    /// Actively drive the line low
    fn drive_low(&mut self) {
        self.set_direction(PinDirection::Output);
        self.set_level(false);
    }
}
