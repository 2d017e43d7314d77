//! Millisecond clock

use embassy_time::Instant;
use lumina_hal::WallClock;

/// Clock backed by the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl WallClock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Truncation gives the wrapping counter the control logic expects
        Instant::now().as_millis() as u32
    }
}
