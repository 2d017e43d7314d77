//! Time base

/// Monotonic millisecond clock
///
/// The counter wraps after ~49 days; consumers compare timestamps with
/// `wrapping_sub` only.
pub trait WallClock {
    /// Milliseconds since boot
    fn now_ms(&self) -> u32;
}
