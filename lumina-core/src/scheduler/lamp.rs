//! Main-loop controller
//!
//! [`Lamp`] owns everything that is only touched from the main loop
//! (settings store, thermal guard, brightness engine, mode) and talks to the
//! interrupt side through [`SharedState`]. One call to [`Lamp::tick`] per
//! main-loop iteration runs the components in dependency order:
//!
//! 1. service the watchdog
//! 2. drain gestures queued by the edge interrupt into mode events
//! 3. thermal check (forces minimum brightness when overheating)
//! 4. brightness engine for a held gesture
//! 5. blink timers and the direct output write
//! 6. quiet-period settings commit
//! 7. sleep depth for the caller

use lumina_hal::{PersistentStore, PwmOutput, WatchdogTimer};

use super::sleep::{next_wake, SleepPlan};
use crate::brightness::{BrightnessEngine, DimContext, DimOutcome, BRIGHTNESS_MIN};
use crate::config::WATCHDOG_TIMEOUT_MS;
use crate::gesture::Gesture;
use crate::mode::{Mode, ModeEvent};
use crate::settings::{Settings, SettingsStore};
use crate::shared::SharedState;
use crate::thermal::{ThermalEvent, ThermalGuard, ThermalState};
use crate::traits::TemperatureSensor;

/// Main-loop half of the luminaire controller
pub struct Lamp<'a, P, S, T, W> {
    shared: &'a SharedState<P>,
    settings: SettingsStore<S>,
    sensor: T,
    watchdog: W,
    thermal: ThermalGuard,
    engine: BrightnessEngine,
    mode: Mode,
}

impl<'a, P, S, T, W> Lamp<'a, P, S, T, W>
where
    P: PwmOutput,
    S: PersistentStore,
    T: TemperatureSensor,
    W: WatchdogTimer,
{
    /// Load settings, start the power-up fade and arm the watchdog
    ///
    /// `proximity_asserted` is the proximity line level sampled before the
    /// edge interrupt is enabled.
    pub fn boot(
        shared: &'a SharedState<P>,
        store: S,
        store_offset: u32,
        sensor: T,
        mut watchdog: W,
        proximity_asserted: bool,
        now_ms: u32,
    ) -> Self {
        let settings = SettingsStore::load(store, store_offset);
        shared.boot(&settings.settings(), proximity_asserted, now_ms);
        watchdog.start(WATCHDOG_TIMEOUT_MS);

        if proximity_asserted {
            info!("Proximity asserted at power-up");
        }

        Self {
            shared,
            settings,
            sensor,
            watchdog,
            thermal: ThermalGuard::new(),
            engine: BrightnessEngine::new(),
            mode: Mode::Default,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current (possibly uncommitted) settings
    pub fn settings(&self) -> Settings {
        self.settings.settings()
    }

    pub fn thermal(&self) -> ThermalState {
        self.thermal.state()
    }

    /// Run one main-loop iteration
    pub fn tick(&mut self, now_ms: u32) -> SleepPlan {
        self.watchdog.feed();

        self.drain_gestures(now_ms);
        self.check_thermal(now_ms);
        self.run_engine(now_ms);

        if self.mode.tick(now_ms) {
            trace!("Blink toggle at {}", now_ms);
        }
        let brightness = self.settings.settings().brightness;
        self.shared.show(self.mode.displayed(brightness));

        match self.settings.commit_if_quiet(now_ms) {
            Ok(_) => {}
            Err(e) => warn!("Settings write failed: {}", e),
        }

        self.plan(now_ms)
    }

    /// Quiesce before deep sleep
    pub fn prepare_power_down(&mut self) {
        info!("Entering power-down");
        self.watchdog.stop();
        self.sensor.set_powered(false);
    }

    /// Undo [`Lamp::prepare_power_down`] after a wake-up edge
    pub fn resume(&mut self, now_ms: u32) {
        info!("Resumed at {}", now_ms);
        self.sensor.set_powered(true);
        self.watchdog.start(WATCHDOG_TIMEOUT_MS);
        self.thermal.reschedule();
    }

    fn apply_event(&mut self, event: ModeEvent, now_ms: u32) {
        let next = self.mode.transition(event, now_ms);
        if next != self.mode {
            debug!("Mode {} -> {} ({})", self.mode, next, event);
            self.mode = next;
        }
    }

    fn drain_gestures(&mut self, now_ms: u32) {
        while let Some(gesture) = self.shared.take_gesture() {
            let event = match gesture {
                Gesture::Approach { .. } => ModeEvent::Approach,
                Gesture::PowerToggle { enabled: true, .. } => ModeEvent::PowerOn,
                Gesture::PowerToggle { enabled: false, .. } => ModeEvent::PowerOff,
            };
            self.apply_event(event, now_ms);
        }
    }

    fn check_thermal(&mut self, now_ms: u32) {
        if let Some(ThermalEvent::OverTemperature) = self.thermal.check(&mut self.sensor, now_ms) {
            self.set_brightness(now_ms, BRIGHTNESS_MIN);
            self.shared.cap_fade(BRIGHTNESS_MIN);
            self.apply_event(ModeEvent::OverTemperature, now_ms);
        }
    }

    fn run_engine(&mut self, now_ms: u32) {
        if self.mode.is_standby() {
            return;
        }

        let proximity = self.shared.snapshot();
        let step = self.engine.tick(&DimContext {
            now_ms,
            proximity,
            mode: &self.mode,
            settings: self.settings.settings(),
            over_temperature: self.thermal.is_over_temperature(),
        });

        if step.consume_initial {
            self.shared.consume_initial(proximity.session);
        }
        if let Some(ms) = step.rearm_ms {
            self.shared.rearm(proximity.session, ms);
        }

        match step.outcome {
            DimOutcome::Idle => {}
            DimOutcome::DirectionFlipped(direction) => {
                debug!("Dimming direction: {}", direction);
            }
            DimOutcome::Changed(brightness) => {
                self.set_brightness(now_ms, brightness);
            }
            DimOutcome::LimitReached(brightness) => {
                self.set_brightness(now_ms, brightness);
                self.apply_event(ModeEvent::LimitReached, now_ms);
            }
            DimOutcome::SteppedToggled(stepped) => {
                info!("Stepped dimming: {}", stepped);
                self.settings.update(now_ms, |s| s.stepped_dimming = stepped);
                self.apply_event(ModeEvent::SettingsChanged, now_ms);
            }
            DimOutcome::LockToggled(locked) => {
                info!("Proximity lock: {}", locked);
                self.settings.update(now_ms, |s| s.proximity_locked = locked);
                self.shared.set_locked(locked);
                self.apply_event(ModeEvent::SettingsChanged, now_ms);
            }
        }
    }

    fn set_brightness(&mut self, now_ms: u32, brightness: u8) {
        self.settings.update(now_ms, |s| s.brightness = brightness);
        self.shared.set_brightness(self.settings.settings().brightness);
    }

    fn plan(&self, now_ms: u32) -> SleepPlan {
        let proximity = self.shared.snapshot();

        if !proximity.output_enabled
            && !proximity.fading
            && !proximity.at_startup
            && !self.settings.is_dirty()
        {
            return SleepPlan::power_down();
        }

        let locked = self.settings.settings().proximity_locked;
        SleepPlan::idle(next_wake(
            now_ms,
            [
                self.mode.next_deadline(),
                self.engine.next_deadline(&proximity, &self.mode, locked),
                self.settings.commit_deadline(),
                self.thermal.next_deadline(),
            ],
        ))
    }
}
