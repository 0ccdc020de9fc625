//! Time source abstractions

/// Monotonic microsecond clock with a blocking delay
///
/// Bit-banged protocols run to completion without yielding, so the delay
/// is a busy-wait rather than an async timer.
pub trait Timer {
    /// Microseconds since an arbitrary fixed point (typically boot)
    fn now_us(&mut self) -> u64;

    /// Spin for at least `us` microseconds
    fn busy_wait_us(&mut self, us: u32);

    /// Spin until `condition` returns true or `timeout_us` elapses
    ///
    /// Returns `true` if the condition was met before the deadline.
    fn wait_until<F: FnMut() -> bool>(&mut self, timeout_us: u64, mut condition: F) -> bool {
        let deadline = self.now_us().saturating_add(timeout_us);
        loop {
            if condition() {
                return true;
            }
            if self.now_us() >= deadline {
                return false;
            }
        }
    }
}
