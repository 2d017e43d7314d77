//! Brightness engine
//!
//! Turns a held proximity gesture into brightness changes. A hold longer
//! than [`DIM_HOLD_MS`] first flips the dimming direction, then steps the
//! brightness at a fixed cadence until the user lets go or a limit is hit.
//!
//! The cadence is produced by re-arming: after each step the shared
//! approach-start reference is advanced by the step interval, so the hold
//! "qualifies" again exactly one interval later.

use crate::config::{
    CONTINUOUS_INCREMENT, CONTINUOUS_INTERVAL_MS, DIM_HOLD_MS, LOCK_TOGGLE_HOLD_MS,
    MODE_TOGGLE_HOLD_MS, STEP_INTERVAL_MS,
};
use crate::mode::Mode;
use crate::settings::Settings;
use crate::shared::ProximitySnapshot;

/// Lowest brightness the lamp can be dimmed to (percent)
pub const BRIGHTNESS_MIN: u8 = 4;

/// Highest brightness (percent)
pub const BRIGHTNESS_MAX: u8 = 100;

/// Discrete levels used in stepped dimming (percent)
pub const STEPPED_LEVELS: [u8; 5] = [0, 4, 16, 32, 100];

/// Clamp a brightness value into the valid range
pub fn clamp_brightness(value: u8) -> u8 {
    value.clamp(BRIGHTNESS_MIN, BRIGHTNESS_MAX)
}

/// Highest stepped level at or below `value`
pub fn floor_level(value: u8) -> u8 {
    STEPPED_LEVELS
        .iter()
        .rev()
        .copied()
        .find(|&level| level <= value)
        .unwrap_or(0)
}

/// Next stepped level strictly above `value`, clamped to the valid range
pub fn level_above(value: u8) -> u8 {
    let next = STEPPED_LEVELS
        .iter()
        .copied()
        .find(|&level| level > value)
        .unwrap_or(BRIGHTNESS_MAX);
    clamp_brightness(next)
}

/// Next stepped level strictly below `value`, clamped to the valid range
pub fn level_below(value: u8) -> u8 {
    let next = STEPPED_LEVELS
        .iter()
        .rev()
        .copied()
        .find(|&level| level < value)
        .unwrap_or(0);
    clamp_brightness(next)
}

/// Dimming direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// The opposite direction
    pub fn flipped(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// What one engine tick decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DimOutcome {
    /// Nothing to do this tick
    Idle,
    /// First long hold of the session reversed the direction
    DirectionFlipped(Direction),
    /// Brightness moved to a new value
    Changed(u8),
    /// Brightness is at (or just reached) MIN or MAX
    LimitReached(u8),
    /// Stepped dimming switched on (true) or off (false)
    SteppedToggled(bool),
    /// Proximity lock switched on (true) or off (false)
    LockToggled(bool),
}

/// Engine decision plus the shared-state bookkeeping it requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimStep {
    pub outcome: DimOutcome,
    /// Advance the approach-start reference by this many ms
    pub rearm_ms: Option<u32>,
    /// Clear the initial-approach flag of this session
    pub consume_initial: bool,
}

impl DimStep {
    const IDLE: Self = Self {
        outcome: DimOutcome::Idle,
        rearm_ms: None,
        consume_initial: false,
    };

    fn outcome(outcome: DimOutcome) -> Self {
        Self {
            outcome,
            ..Self::IDLE
        }
    }
}

/// Inputs the engine looks at each tick
#[derive(Debug, Clone, Copy)]
pub struct DimContext<'a> {
    pub now_ms: u32,
    pub proximity: ProximitySnapshot,
    pub mode: &'a Mode,
    pub settings: Settings,
    /// Upward dimming is capped at the minimum while overheating
    pub over_temperature: bool,
}

/// Brightness engine state
#[derive(Debug, Clone)]
pub struct BrightnessEngine {
    direction: Direction,
    /// Proximity session the per-session flags belong to
    session: u16,
    /// When the current session hit a brightness limit
    limit_reached_at: Option<u32>,
    /// Stepped/continuous switch already done this session
    mode_toggled: bool,
    /// Lock toggle already done for the power-up hold
    lock_toggled: bool,
}

impl Default for BrightnessEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BrightnessEngine {
    /// Create a new engine
    ///
    /// The first hold flips the direction, so starting at `Up` makes the
    /// first dim gesture after boot go down.
    pub const fn new() -> Self {
        Self {
            direction: Direction::Up,
            session: 0,
            limit_reached_at: None,
            mode_toggled: false,
            lock_toggled: false,
        }
    }

    /// Current dimming direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Evaluate one main-loop tick
    pub fn tick(&mut self, cx: &DimContext<'_>) -> DimStep {
        let p = &cx.proximity;

        if p.session != self.session {
            self.session = p.session;
            self.limit_reached_at = None;
            self.mode_toggled = false;
        }

        if !p.output_enabled || !p.near {
            return DimStep::IDLE;
        }

        let held_ms = cx.now_ms.wrapping_sub(p.approach_start_ms);

        // Power-up hold: only the lock gesture is evaluated
        if p.at_startup {
            if !self.lock_toggled && held_ms >= LOCK_TOGGLE_HOLD_MS {
                self.lock_toggled = true;
                return DimStep::outcome(DimOutcome::LockToggled(!cx.settings.proximity_locked));
            }
            return DimStep::IDLE;
        }

        if cx.settings.proximity_locked || held_ms < DIM_HOLD_MS {
            return DimStep::IDLE;
        }

        if p.initial_approach {
            self.direction = self.direction.flipped();
            return DimStep {
                outcome: DimOutcome::DirectionFlipped(self.direction),
                rearm_ms: None,
                consume_initial: true,
            };
        }

        if cx.mode.allows_dimming() {
            self.advance(cx)
        } else if *cx.mode == Mode::BlinkEnd {
            self.hold_at_limit(cx)
        } else {
            DimStep::IDLE
        }
    }

    /// Earliest time a held gesture needs attention, if one is in progress
    ///
    /// Outside the dimming mode a hold only matters for the initial
    /// direction flip or a pending stepped/continuous switch at a limit.
    pub fn next_deadline(
        &self,
        proximity: &ProximitySnapshot,
        mode: &Mode,
        locked: bool,
    ) -> Option<u32> {
        if !proximity.output_enabled || !proximity.near {
            return None;
        }

        if proximity.at_startup {
            return (!self.lock_toggled)
                .then(|| proximity.approach_start_ms.wrapping_add(LOCK_TOGGLE_HOLD_MS));
        }

        if locked {
            return None;
        }

        match self.limit_reached_at {
            Some(at) if !self.mode_toggled => Some(at.wrapping_add(MODE_TOGGLE_HOLD_MS)),
            Some(_) => None,
            None if proximity.initial_approach || mode.allows_dimming() => {
                Some(proximity.approach_start_ms.wrapping_add(DIM_HOLD_MS))
            }
            None => None,
        }
    }

    /// Hold continued past a limit indication: switch dimming style
    fn hold_at_limit(&mut self, cx: &DimContext<'_>) -> DimStep {
        let b = cx.settings.brightness;
        if b != BRIGHTNESS_MIN && b != BRIGHTNESS_MAX {
            return DimStep::IDLE;
        }

        match self.limit_reached_at {
            Some(at)
                if !self.mode_toggled
                    && cx.now_ms.wrapping_sub(at) >= MODE_TOGGLE_HOLD_MS =>
            {
                self.mode_toggled = true;
                DimStep::outcome(DimOutcome::SteppedToggled(!cx.settings.stepped_dimming))
            }
            _ => DimStep::IDLE,
        }
    }

    fn advance(&mut self, cx: &DimContext<'_>) -> DimStep {
        let current = cx.settings.brightness;
        let stepped = cx.settings.stepped_dimming;

        let next = match (self.direction, stepped) {
            (Direction::Up, _) if cx.over_temperature => BRIGHTNESS_MIN,
            (Direction::Up, true) => level_above(current),
            (Direction::Up, false) => clamp_brightness(current.saturating_add(CONTINUOUS_INCREMENT)),
            (Direction::Down, true) => level_below(current),
            (Direction::Down, false) => clamp_brightness(current.saturating_sub(CONTINUOUS_INCREMENT)),
        };

        let interval = if stepped {
            STEP_INTERVAL_MS
        } else {
            CONTINUOUS_INTERVAL_MS
        };

        let at_limit = match self.direction {
            Direction::Up => next == BRIGHTNESS_MAX || (cx.over_temperature && next == current),
            Direction::Down => next == BRIGHTNESS_MIN,
        };

        if at_limit {
            self.limit_reached_at = Some(cx.now_ms);
            return DimStep {
                outcome: DimOutcome::LimitReached(next),
                rearm_ms: (next != current).then_some(interval),
                consume_initial: false,
            };
        }

        DimStep {
            outcome: DimOutcome::Changed(next),
            rearm_ms: Some(interval),
            consume_initial: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn held(start: u32, session: u16) -> ProximitySnapshot {
        ProximitySnapshot {
            near: true,
            approach_start_ms: start,
            initial_approach: false,
            at_startup: false,
            session,
            output_enabled: true,
            locked: false,
            fading: false,
        }
    }

    fn cx<'a>(now_ms: u32, proximity: ProximitySnapshot, mode: &'a Mode, settings: Settings) -> DimContext<'a> {
        DimContext {
            now_ms,
            proximity,
            mode,
            settings,
            over_temperature: false,
        }
    }

    fn continuous(brightness: u8) -> Settings {
        Settings {
            brightness,
            stepped_dimming: false,
            proximity_locked: false,
        }
    }

    #[test]
    fn test_floor_level() {
        assert_eq!(floor_level(4), 4);
        assert_eq!(floor_level(20), 16);
        assert_eq!(floor_level(99), 32);
        assert_eq!(floor_level(100), 100);
    }

    #[test]
    fn test_level_stepping() {
        assert_eq!(level_above(4), 16);
        assert_eq!(level_above(20), 32);
        assert_eq!(level_above(32), 100);
        assert_eq!(level_above(100), 100);
        assert_eq!(level_below(100), 32);
        assert_eq!(level_below(20), 16);
        assert_eq!(level_below(16), 4);
        // 0 is a level but never a valid brightness
        assert_eq!(level_below(4), 4);
    }

    #[test]
    fn test_short_hold_does_nothing() {
        let mut engine = BrightnessEngine::new();
        let mode = Mode::Default;
        let mut p = held(0, 1);
        p.initial_approach = true;
        let step = engine.tick(&cx(799, p, &mode, continuous(50)));
        assert_eq!(step.outcome, DimOutcome::Idle);
    }

    #[test]
    fn test_first_hold_flips_direction() {
        let mut engine = BrightnessEngine::new();
        let mode = Mode::Default;
        let mut p = held(0, 1);
        p.initial_approach = true;

        let step = engine.tick(&cx(800, p, &mode, continuous(50)));
        assert_eq!(step.outcome, DimOutcome::DirectionFlipped(Direction::Down));
        assert!(step.consume_initial);
        assert_eq!(step.rearm_ms, None);

        // Next session flips back
        let mut p = held(5_000, 2);
        p.initial_approach = true;
        let step = engine.tick(&cx(5_800, p, &mode, continuous(50)));
        assert_eq!(step.outcome, DimOutcome::DirectionFlipped(Direction::Up));
    }

    #[test]
    fn test_continuous_step_rearms_by_40ms() {
        let mut engine = BrightnessEngine::new();
        engine.direction = Direction::Up;
        let mode = Mode::Default;

        let step = engine.tick(&cx(810, held(0, 1), &mode, continuous(50)));
        assert_eq!(step.outcome, DimOutcome::Changed(51));
        assert_eq!(step.rearm_ms, Some(40));
    }

    #[test]
    fn test_stepped_step_rearms_by_800ms() {
        let mut engine = BrightnessEngine::new();
        engine.direction = Direction::Down;
        let mode = Mode::Default;
        let settings = Settings {
            brightness: 32,
            ..Settings::default()
        };

        let step = engine.tick(&cx(810, held(0, 1), &mode, settings));
        assert_eq!(step.outcome, DimOutcome::Changed(16));
        assert_eq!(step.rearm_ms, Some(800));
    }

    #[test]
    fn test_reaching_max_reports_limit() {
        let mut engine = BrightnessEngine::new();
        engine.direction = Direction::Up;
        let mode = Mode::Default;

        let step = engine.tick(&cx(900, held(0, 1), &mode, continuous(99)));
        assert_eq!(step.outcome, DimOutcome::LimitReached(100));

        // Already at the limit: reported again without rearming
        let step = engine.tick(&cx(950, held(0, 1), &mode, continuous(100)));
        assert_eq!(step.outcome, DimOutcome::LimitReached(100));
        assert_eq!(step.rearm_ms, None);
    }

    #[test]
    fn test_no_change_outside_default_mode() {
        let mut engine = BrightnessEngine::new();
        engine.direction = Direction::Up;

        for mode in [Mode::Standby, Mode::blink_limit(0), Mode::BlinkEnd] {
            let step = engine.tick(&cx(900, held(0, 1), &mode, continuous(50)));
            assert_eq!(step.outcome, DimOutcome::Idle);
        }
    }

    #[test]
    fn test_limit_hold_toggles_stepped_once() {
        let mut engine = BrightnessEngine::new();
        engine.direction = Direction::Up;
        let settings = continuous(99);

        let step = engine.tick(&cx(900, held(0, 1), &Mode::Default, settings));
        assert_eq!(step.outcome, DimOutcome::LimitReached(100));

        let at_max = continuous(100);
        let end = Mode::BlinkEnd;
        let step = engine.tick(&cx(5_899, held(0, 1), &end, at_max));
        assert_eq!(step.outcome, DimOutcome::Idle);

        let step = engine.tick(&cx(5_900, held(0, 1), &end, at_max));
        assert_eq!(step.outcome, DimOutcome::SteppedToggled(true));

        let step = engine.tick(&cx(12_000, held(0, 1), &end, at_max));
        assert_eq!(step.outcome, DimOutcome::Idle);
    }

    #[test]
    fn test_new_session_resets_limit() {
        let mut engine = BrightnessEngine::new();
        engine.direction = Direction::Up;
        engine.tick(&cx(900, held(0, 1), &Mode::Default, continuous(99)));

        let step = engine.tick(&cx(9_000, held(8_000, 2), &Mode::BlinkEnd, continuous(100)));
        assert_eq!(step.outcome, DimOutcome::Idle);
        assert_eq!(engine.limit_reached_at, None);
    }

    #[test]
    fn test_over_temperature_caps_upward_dimming() {
        let mut engine = BrightnessEngine::new();
        engine.direction = Direction::Up;
        let mut c = cx(900, held(0, 1), &Mode::Default, continuous(4));
        c.over_temperature = true;

        let step = engine.tick(&c);
        assert_eq!(step.outcome, DimOutcome::LimitReached(4));
    }

    #[test]
    fn test_lock_gesture_requires_startup_hold() {
        let mut engine = BrightnessEngine::new();
        let mut p = held(0, 0);
        p.at_startup = true;

        let step = engine.tick(&cx(14_999, p, &Mode::Default, Settings::default()));
        assert_eq!(step.outcome, DimOutcome::Idle);

        let step = engine.tick(&cx(15_000, p, &Mode::Default, Settings::default()));
        assert_eq!(step.outcome, DimOutcome::LockToggled(true));

        let step = engine.tick(&cx(20_000, p, &Mode::Default, Settings::default()));
        assert_eq!(step.outcome, DimOutcome::Idle);

        // A normal 15s hold is just a dim gesture
        let mut engine = BrightnessEngine::new();
        let step = engine.tick(&cx(15_000, held(0, 1), &Mode::Default, continuous(50)));
        assert!(!matches!(step.outcome, DimOutcome::LockToggled(_)));
    }

    #[test]
    fn test_released_hold_does_nothing() {
        let mut engine = BrightnessEngine::new();
        engine.direction = Direction::Up;
        let mut p = held(0, 1);
        p.near = false;

        for now in [800, 1_600, 6_000] {
            let step = engine.tick(&cx(now, p, &Mode::Default, continuous(50)));
            assert_eq!(step, DimStep::IDLE);
        }
        assert_eq!(engine.next_deadline(&p, &Mode::Default, false), None);

        p.initial_approach = true;
        let step = engine.tick(&cx(900, p, &Mode::Default, continuous(50)));
        assert_eq!(step, DimStep::IDLE);
        assert_eq!(engine.direction(), Direction::Up);
    }

    #[test]
    fn test_deadline_follows_dim_cadence() {
        let engine = BrightnessEngine::new();
        let p = held(40, 1);
        assert_eq!(engine.next_deadline(&p, &Mode::Default, false), Some(840));
        assert_eq!(engine.next_deadline(&p, &Mode::Default, true), None);

        let mut first = held(3_000, 2);
        first.initial_approach = true;
        assert_eq!(engine.next_deadline(&first, &Mode::BlinkEnd, false), Some(3_800));
    }

    #[test]
    fn test_no_deadline_for_hold_outside_dimming() {
        let mut engine = BrightnessEngine::new();
        engine.direction = Direction::Down;
        let p = held(0, 1);

        // Overheating mid-hold: warning blink then BlinkEnd, nothing pending
        for mode in [Mode::blink_warning(1_000), Mode::BlinkEnd] {
            assert_eq!(engine.tick(&cx(2_000, p, &mode, continuous(4))), DimStep::IDLE);
            assert_eq!(engine.next_deadline(&p, &mode, false), None);
        }

        // A limit hold still wakes the loop for the dimming-style switch
        engine.direction = Direction::Up;
        engine.tick(&cx(900, p, &Mode::Default, continuous(99)));
        assert_eq!(engine.next_deadline(&p, &Mode::BlinkEnd, false), Some(5_900));
    }

    #[test]
    fn test_locked_ignores_dimming() {
        let mut engine = BrightnessEngine::new();
        let settings = Settings {
            proximity_locked: true,
            ..continuous(50)
        };
        let step = engine.tick(&cx(2_000, held(0, 1), &Mode::Default, settings));
        assert_eq!(step.outcome, DimOutcome::Idle);
    }

    proptest! {
        #[test]
        fn prop_brightness_stays_in_range(
            start in BRIGHTNESS_MIN..=BRIGHTNESS_MAX,
            stepped in any::<bool>(),
            ups in proptest::collection::vec(any::<bool>(), 1..64),
        ) {
            let mut settings = Settings { brightness: start, stepped_dimming: stepped, proximity_locked: false };
            if stepped {
                settings.brightness = clamp_brightness(floor_level(start));
            }
            let mut engine = BrightnessEngine::new();
            for (i, up) in ups.into_iter().enumerate() {
                engine.direction = if up { Direction::Up } else { Direction::Down };
                let now = 1_000 + i as u32 * 800;
                let step = engine.tick(&cx(now, held(0, 1), &Mode::Default, settings));
                if let DimOutcome::Changed(b) | DimOutcome::LimitReached(b) = step.outcome {
                    settings.brightness = b;
                }
                prop_assert!((BRIGHTNESS_MIN..=BRIGHTNESS_MAX).contains(&settings.brightness));
                if stepped {
                    prop_assert!(STEPPED_LEVELS.contains(&settings.brightness));
                }
            }
        }
    }
}
