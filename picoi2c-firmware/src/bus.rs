//! Interrupt masking around bus conditions
//!
//! A start or stop split by an interrupt can leave SDA changing while SCL
//! is high for longer than a target tolerates. Conditions run with
//! interrupts masked. Byte shifts do not: a clock stretch inside one may
//! last up to the stretch timeout, far longer than USB can go unserviced.

use cortex_m::interrupt;
use picoi2c_core::I2cMaster;

/// Bus driver whose start/repeated-start/stop run in a critical section
pub struct MaskedConditions<B> {
    bus: B,
}

impl<B: I2cMaster> MaskedConditions<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }
}

impl<B: I2cMaster> I2cMaster for MaskedConditions<B> {
    fn start(&mut self) {
        interrupt::free(|_| self.bus.start())
    }

    fn repeated_start(&mut self) {
        interrupt::free(|_| self.bus.repeated_start())
    }

    fn stop(&mut self) {
        interrupt::free(|_| self.bus.stop())
    }

    fn write(&mut self, byte: u8) -> bool {
        self.bus.write(byte)
    }

    fn read(&mut self, last: bool) -> u8 {
        self.bus.read(last)
    }

    fn set_clock_period(&mut self, period_us: u16) {
        self.bus.set_clock_period(period_us)
    }
}
