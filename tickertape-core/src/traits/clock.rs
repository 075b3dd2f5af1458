//! Monotonic time source

/// Monotonic millisecond counter
///
/// Must never go backwards. Wrapping is not expected within the device's
/// uptime (a `u64` of milliseconds).
pub trait Clock {
    /// Milliseconds since boot
    fn now_ms(&self) -> u64;

    /// Milliseconds elapsed since `earlier`
    fn elapsed_since(&self, earlier: u64) -> u64 {
        self.now_ms().saturating_sub(earlier)
    }
}
