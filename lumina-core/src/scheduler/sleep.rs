//! Sleep depth selection

use crate::config::TICK_MS;

/// How deeply the chip may sleep until the next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SleepDepth {
    /// Clocks keep running; the tick timer or an interrupt wakes the loop
    Idle,
    /// Watchdog and analog front-end off; only a proximity edge wakes
    PowerDown,
}

/// Result of one scheduler tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SleepPlan {
    pub depth: SleepDepth,
    /// Wake after this many ms (None: only on interrupt)
    pub wake_in_ms: Option<u32>,
}

impl SleepPlan {
    /// Idle sleep for `ms`
    pub const fn idle(ms: u32) -> Self {
        Self {
            depth: SleepDepth::Idle,
            wake_in_ms: Some(ms),
        }
    }

    /// Deep sleep until the next proximity edge
    pub const fn power_down() -> Self {
        Self {
            depth: SleepDepth::PowerDown,
            wake_in_ms: None,
        }
    }
}

/// Milliseconds from `now_ms` until `deadline_ms` (0 if already passed)
pub fn time_until(now_ms: u32, deadline_ms: u32) -> u32 {
    let remaining = deadline_ms.wrapping_sub(now_ms);
    if remaining > u32::MAX / 2 {
        0
    } else {
        remaining
    }
}

/// Sleep time until the earliest deadline, capped at one tick
pub fn next_wake(now_ms: u32, deadlines: impl IntoIterator<Item = Option<u32>>) -> u32 {
    deadlines
        .into_iter()
        .flatten()
        .map(|deadline| time_until(now_ms, deadline))
        .fold(TICK_MS, u32::min)
}
