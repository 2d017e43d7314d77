//! Edge-timing gesture decoder

use super::events::{Edge, GestureEvent};
use crate::config::{DIM_HOLD_MS, GESTURE_MIN_MS, POWER_TOGGLE_MAX_MS};

/// What an assertion of a given length means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HoldKind {
    /// Released within the tap window
    PowerToggle,
    /// Held past the dim threshold
    DimHold,
}

/// Classify an assertion duration
///
/// - below [`GESTURE_MIN_MS`]: bounce, no gesture
/// - [`GESTURE_MIN_MS`]..=[`POWER_TOGGLE_MAX_MS`]: power toggle
/// - between the tap window and [`DIM_HOLD_MS`]: no gesture
/// - [`DIM_HOLD_MS`] and above: dim hold (only acted on while still held)
pub fn classify(duration_ms: u32) -> Option<HoldKind> {
    if (GESTURE_MIN_MS..=POWER_TOGGLE_MAX_MS).contains(&duration_ms) {
        Some(HoldKind::PowerToggle)
    } else if duration_ms >= DIM_HOLD_MS {
        Some(HoldKind::DimHold)
    } else {
        None
    }
}

/// Proximity session state shared with the main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProximityState {
    /// Line currently asserted
    pub near: bool,
    /// Start of the current approach (dim cadence reference)
    pub approach_start_ms: u32,
    /// No long-hold decision taken yet in this session
    pub initial_approach: bool,
    /// Line has been held continuously since power-up
    pub at_startup: bool,
    /// Incremented on every approach
    pub session: u16,
}

/// Edge-timing decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureDecoder {
    state: ProximityState,
}

impl Default for GestureDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureDecoder {
    pub const fn new() -> Self {
        Self {
            state: ProximityState {
                near: false,
                approach_start_ms: 0,
                initial_approach: false,
                at_startup: false,
                session: 0,
            },
        }
    }

    /// Seed the decoder with the line level sampled at power-up
    ///
    /// A line already asserted at boot is not an approach: it can never
    /// produce a tap, only the power-up lock hold.
    pub fn boot(&mut self, asserted: bool, now_ms: u32) {
        self.state = ProximityState {
            near: asserted,
            approach_start_ms: now_ms,
            initial_approach: false,
            at_startup: asserted,
            session: 0,
        };
    }

    pub fn state(&self) -> &ProximityState {
        &self.state
    }

    /// Handle one edge
    ///
    /// Returns true if the edge completed a power-toggle tap. A rising edge
    /// while already near restarts the session (missed falling edge); a
    /// falling edge while not near is ignored.
    pub fn on_edge(&mut self, event: GestureEvent) -> bool {
        let s = &mut self.state;
        match event.edge {
            Edge::Rising => {
                s.near = true;
                s.approach_start_ms = event.timestamp_ms;
                s.initial_approach = true;
                s.at_startup = false;
                s.session = s.session.wrapping_add(1);
                false
            }
            Edge::Falling => {
                if !s.near {
                    return false;
                }
                let was_initial = s.initial_approach;
                s.near = false;
                s.at_startup = false;
                s.initial_approach = false;

                let duration = event.timestamp_ms.wrapping_sub(s.approach_start_ms);
                was_initial && classify(duration) == Some(HoldKind::PowerToggle)
            }
        }
    }

    /// Advance the approach reference of `session` by `by_ms`
    ///
    /// Does nothing if a newer session has started since the caller took
    /// its snapshot.
    pub fn rearm(&mut self, session: u16, by_ms: u32) -> bool {
        let s = &mut self.state;
        if s.session != session || !s.near {
            return false;
        }
        s.approach_start_ms = s.approach_start_ms.wrapping_add(by_ms);
        true
    }

    /// Clear the initial-approach flag of `session`
    pub fn consume_initial(&mut self, session: u16) -> bool {
        let s = &mut self.state;
        if s.session != session {
            return false;
        }
        s.initial_approach = false;
        true
    }
}
