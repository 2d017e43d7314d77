//! Timing and threshold contract
//!
//! These values define how gestures feel and how the device behaves
//! thermally. They must stay bit-for-bit identical across releases so a
//! user's muscle memory keeps working after an update.

/// Shortest assertion that counts as a gesture (debounce)
pub const GESTURE_MIN_MS: u32 = 100;

/// Longest assertion that still counts as a power-toggle tap
pub const POWER_TOGGLE_MAX_MS: u32 = 600;

/// Assertion length after which a hold starts dimming
pub const DIM_HOLD_MS: u32 = 800;

/// Cadence of stepped dimming while held
pub const STEP_INTERVAL_MS: u32 = 800;

/// Cadence of continuous dimming while held
pub const CONTINUOUS_INTERVAL_MS: u32 = 40;

/// Brightness change per continuous dimming step (percent)
pub const CONTINUOUS_INCREMENT: u8 = 1;

/// Hold at a brightness limit that switches stepped/continuous dimming
pub const MODE_TOGGLE_HOLD_MS: u32 = 5_000;

/// Hold from power-up that locks/unlocks the proximity sensor
pub const LOCK_TOGGLE_HOLD_MS: u32 = 15_000;

/// End-to-end duration of every fade
pub const FADE_DURATION_MS: u32 = 2_000;

/// Fade timer rate
pub const FADE_TICK_HZ: u32 = 500;

/// Number of fade timer ticks a fade is spread over
pub const FADE_TICKS: u32 = FADE_DURATION_MS * FADE_TICK_HZ / 1000;

/// Quiet period before a changed setting is written to storage
pub const SETTINGS_COMMIT_DELAY_MS: u32 = 10_000;

/// Temperature at or above which the lamp is considered overheating (°C)
pub const OVERHEAT_ENTER_C: i16 = 85;

/// Hysteresis band below the overheat threshold (°C)
pub const OVERHEAT_HYSTERESIS_C: i16 = 5;

/// Temperature at or below which over-temperature is cleared (°C)
pub const OVERHEAT_EXIT_C: i16 = OVERHEAT_ENTER_C - OVERHEAT_HYSTERESIS_C;

/// Interval between thermal checks
pub const THERMAL_INTERVAL_MS: u32 = 1_000;

/// Samples averaged per thermal check
pub const THERMAL_SAMPLES: u32 = 3;

/// Main loop cadence
pub const TICK_MS: u32 = 10;

/// Watchdog timeout
pub const WATCHDOG_TIMEOUT_MS: u32 = 2_000;

/// Blink period for limit and warning indications
pub const BLINK_FAST_MS: u32 = 100;

/// Blink period for the settings indication
pub const BLINK_SLOW_MS: u32 = 500;

/// Toggles shown when a brightness limit is reached (2 blinks)
pub const BLINK_LIMIT_TOGGLES: u8 = 4;

/// Toggles shown when a setting changes (3 slow blinks)
pub const BLINK_SETTINGS_TOGGLES: u8 = 6;

/// Toggles shown on over-temperature (5 blinks)
pub const BLINK_WARNING_TOGGLES: u8 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_values() {
        assert_eq!(GESTURE_MIN_MS, 100);
        assert_eq!(POWER_TOGGLE_MAX_MS, 600);
        assert_eq!(DIM_HOLD_MS, 800);
        assert_eq!(MODE_TOGGLE_HOLD_MS, 5000);
        assert_eq!(LOCK_TOGGLE_HOLD_MS, 15000);
        assert_eq!(FADE_DURATION_MS, 2000);
        assert_eq!(SETTINGS_COMMIT_DELAY_MS, 10000);
        assert_eq!(OVERHEAT_EXIT_C, 80);
    }

    #[test]
    fn test_fade_never_skips_units() {
        // A full 0..=100% fade must fit in the tick budget one unit at a time
        assert!(FADE_TICKS >= 100);
    }
}
