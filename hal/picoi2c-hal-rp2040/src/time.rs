//! Timer on the embassy time driver

use embassy_time::{block_for, Duration, Instant};
use picoi2c_hal::Timer;

/// Microsecond clock and busy-wait backed by `embassy-time`
///
/// Needs a tick rate of at least 1 MHz for the bus delays to be accurate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyTimer;

impl Timer for EmbassyTimer {
    fn now_us(&mut self) -> u64 {
        Instant::now().as_micros()
    }

    fn busy_wait_us(&mut self, us: u32) {
        block_for(Duration::from_micros(us as u64));
    }
}
