//! Fade timer task
//!
//! Ticks the fade controller at the fixed fade rate while a fade is
//! running and parks otherwise, so an idle lamp has no periodic timer.

use defmt::*;
use embassy_time::{Duration, Ticker};
use lumina_core::config::FADE_TICK_HZ;

use crate::channels::{FADE_KICK, WAKE};
use crate::SHARED;

#[embassy_executor::task]
pub async fn fade_task() {
    info!("Fade task started");

    loop {
        FADE_KICK.wait().await;

        let mut ticker = Ticker::every(Duration::from_hz(FADE_TICK_HZ as u64));
        let mut ticks = 0u32;
        while SHARED.fade_tick() {
            ticks += 1;
            ticker.next().await;
        }

        // Kicks from retargets during this fade are stale now. The edge task
        // shares this executor, so no new kick can land before the reset.
        FADE_KICK.reset();

        if ticks > 0 {
            debug!("Fade finished at {}% after {} ticks", SHARED.duty(), ticks);
            // Let the main loop re-plan its sleep now the output is settled
            WAKE.signal(());
        }
    }
}
