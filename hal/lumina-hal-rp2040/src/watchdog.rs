//! Hardware watchdog

use embassy_rp::watchdog::Watchdog;
use embassy_time::Duration;
use lumina_hal::WatchdogTimer;

/// RP2040 watchdog
pub struct Rp2040Watchdog {
    watchdog: Watchdog,
}

impl Rp2040Watchdog {
    pub fn new(mut watchdog: Watchdog) -> Self {
        // Keep counting while a debug probe halts the core
        watchdog.pause_on_debug(false);
        Self { watchdog }
    }

    /// Check if the last reset came from the watchdog
    pub fn caused_reset(&self) -> bool {
        self.watchdog.reset_reason().is_some()
    }
}

impl WatchdogTimer for Rp2040Watchdog {
    fn start(&mut self, timeout_ms: u32) {
        self.watchdog.start(Duration::from_millis(timeout_ms as u64));
    }

    fn feed(&mut self) {
        self.watchdog.feed();
    }

    fn stop(&mut self) {
        self.watchdog.stop();
    }
}
