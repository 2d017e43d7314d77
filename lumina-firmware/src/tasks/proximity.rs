//! Proximity edge task
//!
//! Timestamps every edge of the proximity line and feeds it to the gesture
//! decoder in the shared block.

use defmt::*;
use lumina_core::gesture::GestureEvent;
use lumina_hal::WallClock;
use lumina_hal_rp2040::{EmbassyClock, ProximityInput};

use crate::channels::{FADE_KICK, WAKE};
use crate::SHARED;

#[embassy_executor::task]
pub async fn proximity_task(mut input: ProximityInput<'static>) {
    info!("Proximity task started");
    let clock = EmbassyClock;

    loop {
        let edge = input.wait_for_edge().await;
        let event = GestureEvent {
            edge,
            timestamp_ms: clock.now_ms(),
        };
        trace!("Proximity edge: {}", event);

        if SHARED.on_edge(event) {
            FADE_KICK.signal(());
        }
        WAKE.signal(());
    }
}
