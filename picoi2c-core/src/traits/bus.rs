//! I2C bus master trait

/// Condition-level I2C bus master
///
/// Unlike address-level traits (`embedded_hal::i2c::I2c`), this exposes the
/// individual bus conditions so a transaction can span several host
/// requests. None of the operations fail: a missing acknowledge is
/// reported as `false`, and the caller decides whether to abort.
pub trait I2cMaster {
    /// Start condition: take the bus from idle
    fn start(&mut self);

    /// Repeated start: address a new phase without releasing the bus
    fn repeated_start(&mut self);

    /// Stop condition: release the bus
    fn stop(&mut self);

    /// Shift out one byte, MSB first
    ///
    /// Returns `true` if the receiver acknowledged.
    fn write(&mut self, byte: u8) -> bool;

    /// Shift in one byte, MSB first
    ///
    /// `last` answers with a no-acknowledge to end the read; otherwise the
    /// byte is acknowledged.
    fn read(&mut self, last: bool) -> u8;

    /// Change the bus clock period (µs)
    fn set_clock_period(&mut self, period_us: u16);
}

impl<T: I2cMaster + ?Sized> I2cMaster for &mut T {
    fn start(&mut self) {
        (**self).start()
    }

    fn repeated_start(&mut self) {
        (**self).repeated_start()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn write(&mut self, byte: u8) -> bool {
        (**self).write(byte)
    }

    fn read(&mut self, last: bool) -> u8 {
        (**self).read(last)
    }

    fn set_clock_period(&mut self, period_us: u16) {
        (**self).set_clock_period(period_us)
    }
}
