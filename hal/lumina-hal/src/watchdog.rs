//! Watchdog timer abstraction

/// Hardware watchdog
///
/// If [`WatchdogTimer::feed`] is not called within the timeout the chip
/// resets. Deep sleep stops the watchdog and restarts it on wake.
pub trait WatchdogTimer {
    /// Arm the watchdog with the given timeout
    fn start(&mut self, timeout_ms: u32);

    /// Service the watchdog
    fn feed(&mut self);

    /// Disarm the watchdog
    fn stop(&mut self);
}
