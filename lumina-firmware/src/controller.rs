//! Main loop
//!
//! Runs `Lamp::tick` and sleeps as the returned plan allows: an idle wait
//! bounded by the next deadline, or a power-down wait that only a
//! proximity edge ends.

use defmt::*;
use embassy_futures::select::select;
use embassy_time::Timer;
use lumina_core::config::TICK_MS;
use lumina_core::scheduler::SleepDepth;
use lumina_hal::WallClock;
use lumina_hal_rp2040::EmbassyClock;

use crate::channels::WAKE;
use crate::AppLamp;

pub async fn run(mut lamp: AppLamp) -> ! {
    let clock = EmbassyClock;
    info!("Main loop running");

    loop {
        // Fades only start from boot or an edge; both kick the fade task
        let plan = lamp.tick(clock.now_ms());

        match plan.depth {
            SleepDepth::Idle => {
                let wait_ms = plan.wake_in_ms.unwrap_or(TICK_MS);
                let _ = select(Timer::after_millis(wait_ms as u64), WAKE.wait()).await;
            }
            SleepDepth::PowerDown => {
                lamp.prepare_power_down();
                WAKE.wait().await;
                lamp.resume(clock.now_ms());
            }
        }
    }
}
