//! Mode definition and transition table

use super::events::ModeEvent;
use crate::config::{
    BLINK_FAST_MS, BLINK_LIMIT_TOGGLES, BLINK_SETTINGS_TOGGLES, BLINK_SLOW_MS,
    BLINK_WARNING_TOGGLES,
};

/// Blink indication progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Blink {
    /// Toggles left before the indication ends
    pub remaining: u8,
    /// Time between toggles
    pub period_ms: u32,
    /// Time of the last toggle (or of entering the mode)
    pub last_toggle_ms: u32,
    /// Output currently shows the placeholder level
    pub alternate: bool,
}

impl Blink {
    const fn new(toggles: u8, period_ms: u32, now_ms: u32) -> Self {
        Self {
            remaining: toggles,
            period_ms,
            last_toggle_ms: now_ms,
            alternate: false,
        }
    }

    fn next_toggle_ms(&self) -> u32 {
        self.last_toggle_ms.wrapping_add(self.period_ms)
    }
}

/// Operation modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Output off, waiting for a power-toggle tap
    Standby,
    /// Output on, holding a gesture dims
    Default,
    /// Brightness limit reached (2 fast blinks)
    BlinkLimit(Blink),
    /// Dimming style or lock changed (3 slow blinks)
    BlinkSettings(Blink),
    /// Over-temperature (5 fast blinks)
    BlinkWarning(Blink),
    /// Indication finished; brightness frozen until the next approach
    BlinkEnd,
}

/// Placeholder level shown on the alternate half of a blink
///
/// Dimmed for bright settings, boosted for dim ones, so the blink is
/// visible at every brightness.
pub fn blink_level(brightness: u8) -> u8 {
    if brightness > 50 {
        brightness / 2
    } else {
        brightness * 2
    }
}

impl Mode {
    /// Limit indication entered at `now_ms`
    pub const fn blink_limit(now_ms: u32) -> Self {
        Mode::BlinkLimit(Blink::new(BLINK_LIMIT_TOGGLES, BLINK_FAST_MS, now_ms))
    }

    /// Settings indication entered at `now_ms`
    pub const fn blink_settings(now_ms: u32) -> Self {
        Mode::BlinkSettings(Blink::new(BLINK_SETTINGS_TOGGLES, BLINK_SLOW_MS, now_ms))
    }

    /// Warning indication entered at `now_ms`
    pub const fn blink_warning(now_ms: u32) -> Self {
        Mode::BlinkWarning(Blink::new(BLINK_WARNING_TOGGLES, BLINK_FAST_MS, now_ms))
    }

    /// Check if holding a gesture may change brightness
    pub fn allows_dimming(&self) -> bool {
        matches!(self, Mode::Default)
    }

    /// Check if a blink indication is running
    pub fn is_blinking(&self) -> bool {
        self.blink().is_some()
    }

    /// Check if the output is meant to be off
    pub fn is_standby(&self) -> bool {
        matches!(self, Mode::Standby)
    }

    fn blink(&self) -> Option<&Blink> {
        match self {
            Mode::BlinkLimit(b) | Mode::BlinkSettings(b) | Mode::BlinkWarning(b) => Some(b),
            _ => None,
        }
    }

    fn blink_mut(&mut self) -> Option<&mut Blink> {
        match self {
            Mode::BlinkLimit(b) | Mode::BlinkSettings(b) | Mode::BlinkWarning(b) => Some(b),
            _ => None,
        }
    }

    /// Process an event and return the next mode
    ///
    /// Total over all (mode, event) pairs; unlisted pairs keep the mode.
    pub fn transition(self, event: ModeEvent, now_ms: u32) -> Self {
        use Mode::*;
        use ModeEvent::*;

        match (self, event) {
            // Power toggles override everything
            (_, PowerOff) => Standby,
            (Standby, PowerOn) => Default,

            // Nothing is indicated while the output is off
            (Standby, _) => Standby,

            // A new approach lifts the post-indication freeze
            (BlinkEnd, Approach) => Default,

            // Indications
            (Default | BlinkEnd, LimitReached) => Mode::blink_limit(now_ms),
            (_, SettingsChanged) => Mode::blink_settings(now_ms),
            (_, OverTemperature) => Mode::blink_warning(now_ms),
            (BlinkLimit(_) | BlinkSettings(_) | BlinkWarning(_), BlinkFinished) => BlinkEnd,

            // Default: stay in current mode
            _ => self,
        }
    }

    /// Advance a running blink indication
    ///
    /// Returns true if the displayed level changed. A finished indication
    /// moves to [`Mode::BlinkEnd`].
    pub fn tick(&mut self, now_ms: u32) -> bool {
        let Some(blink) = self.blink_mut() else {
            return false;
        };

        if now_ms.wrapping_sub(blink.last_toggle_ms) < blink.period_ms {
            return false;
        }

        blink.remaining = blink.remaining.saturating_sub(1);
        blink.alternate = !blink.alternate;
        blink.last_toggle_ms = now_ms;

        if blink.remaining == 0 {
            *self = self.transition(ModeEvent::BlinkFinished, now_ms);
        }
        true
    }

    /// Time of the next blink toggle, if an indication is running
    pub fn next_deadline(&self) -> Option<u32> {
        self.blink().map(Blink::next_toggle_ms)
    }

    /// Duty cycle the output should show for the given brightness
    pub fn displayed(&self, brightness: u8) -> u8 {
        match self {
            Mode::Standby => 0,
            _ => match self.blink() {
                Some(b) if b.alternate => blink_level(brightness),
                _ => brightness,
            },
        }
    }
}
