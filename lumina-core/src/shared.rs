//! State shared between interrupt context and the main loop
//!
//! Proximity edges and the fade timer fire asynchronously; the main loop
//! runs every tick. Everything both sides touch lives in one block behind a
//! `critical_section::Mutex`, and every access goes through a method that
//! holds the critical section for its whole duration. The main loop reads
//! a [`ProximitySnapshot`] copy so multi-field decisions never see a
//! half-updated state.
//!
//! The PWM output lives here too: fades are driven from the timer
//! interrupt while blinks and brightness changes are written from the main
//! loop, and both must agree on who owns the duty cycle.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;
use lumina_hal::PwmOutput;

use crate::fade::FadeController;
use crate::gesture::{Edge, Gesture, GestureDecoder, GestureEvent};
use crate::output::drive;
use crate::settings::Settings;

/// Gestures buffered between two main-loop ticks
pub const GESTURE_QUEUE_LEN: usize = 4;

/// Copy of the shared state taken in a single critical section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProximitySnapshot {
    pub near: bool,
    pub approach_start_ms: u32,
    pub initial_approach: bool,
    pub at_startup: bool,
    pub session: u16,
    pub output_enabled: bool,
    pub locked: bool,
    pub fading: bool,
}

struct Shared<P> {
    decoder: GestureDecoder,
    output_enabled: bool,
    locked: bool,
    /// Logical brightness, target of power-on fades
    brightness: u8,
    fade: FadeController,
    gestures: Deque<Gesture, GESTURE_QUEUE_LEN>,
    pwm: Option<P>,
}

impl<P: PwmOutput> Shared<P> {
    fn apply(&mut self) {
        let (duty, fading) = (self.fade.duty(), self.fade.is_fading());
        if let Some(pwm) = self.pwm.as_mut() {
            drive(pwm, duty, fading);
        }
    }

    fn push(&mut self, gesture: Gesture) {
        if self.gestures.is_full() {
            warn!("Gesture queue full, dropping oldest");
            self.gestures.pop_front();
        }
        let _ = self.gestures.push_back(gesture);
    }
}

/// Interrupt-safe shared state block
pub struct SharedState<P> {
    inner: Mutex<RefCell<Shared<P>>>,
}

impl<P: PwmOutput> Default for SharedState<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PwmOutput> SharedState<P> {
    /// Create an empty block (usable in a `static`)
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Shared {
                decoder: GestureDecoder::new(),
                output_enabled: false,
                locked: false,
                brightness: 0,
                fade: FadeController::new(),
                gestures: Deque::new(),
                pwm: None,
            })),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut Shared<P>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    /// Hand the PWM output to the shared block
    pub fn install_output(&self, mut pwm: P) {
        pwm.disable();
        self.with(|s| s.pwm = Some(pwm));
    }

    /// Initialize from loaded settings and the power-up line level
    ///
    /// The output starts enabled and fades in to the stored brightness.
    pub fn boot(&self, settings: &Settings, proximity_asserted: bool, now_ms: u32) {
        self.with(|s| {
            s.decoder.boot(proximity_asserted, now_ms);
            s.locked = settings.proximity_locked;
            s.brightness = settings.brightness;
            s.output_enabled = true;
            s.gestures.clear();
            s.fade.fade_to(settings.brightness);
            s.apply();
        });
    }

    /// Proximity edge handler (interrupt context)
    ///
    /// Returns true if the edge started a fade, i.e. the fade timer needs
    /// to run.
    pub fn on_edge(&self, event: GestureEvent) -> bool {
        self.with(|s| {
            let toggled = s.decoder.on_edge(event);
            if s.locked {
                return false;
            }

            match event.edge {
                Edge::Rising => {
                    if s.output_enabled {
                        s.push(Gesture::Approach {
                            at_ms: event.timestamp_ms,
                        });
                    }
                }
                Edge::Falling => {
                    if toggled {
                        s.output_enabled = !s.output_enabled;
                        let target = if s.output_enabled { s.brightness } else { 0 };
                        s.fade.fade_to(target);
                        s.apply();
                        s.push(Gesture::PowerToggle {
                            enabled: s.output_enabled,
                            at_ms: event.timestamp_ms,
                        });
                    }
                }
            }
            toggled && s.fade.is_fading()
        })
    }

    /// Fade timer handler (interrupt context)
    ///
    /// Returns true while a fade is running.
    pub fn fade_tick(&self) -> bool {
        self.with(|s| {
            if !s.fade.is_fading() {
                return false;
            }
            s.fade.tick();
            s.apply();
            true
        })
    }

    /// Read all main-loop relevant fields at once
    pub fn snapshot(&self) -> ProximitySnapshot {
        self.with(|s| {
            let p = s.decoder.state();
            ProximitySnapshot {
                near: p.near,
                approach_start_ms: p.approach_start_ms,
                initial_approach: p.initial_approach,
                at_startup: p.at_startup,
                session: p.session,
                output_enabled: s.output_enabled,
                locked: s.locked,
                fading: s.fade.is_fading(),
            }
        })
    }

    /// Pop the oldest queued gesture
    pub fn take_gesture(&self) -> Option<Gesture> {
        self.with(|s| s.gestures.pop_front())
    }

    /// Advance the approach reference of `session` (dim cadence)
    pub fn rearm(&self, session: u16, by_ms: u32) -> bool {
        self.with(|s| s.decoder.rearm(session, by_ms))
    }

    /// Clear the initial-approach flag of `session`
    pub fn consume_initial(&self, session: u16) -> bool {
        self.with(|s| s.decoder.consume_initial(session))
    }

    /// Update the logical brightness used by power-on fades
    pub fn set_brightness(&self, brightness: u8) {
        self.with(|s| s.brightness = brightness);
    }

    /// Update the proximity lock seen by the edge handler
    pub fn set_locked(&self, locked: bool) {
        self.with(|s| s.locked = locked);
    }

    /// Write a duty cycle directly (main loop)
    ///
    /// Suppressed while a fade is running or the output is switched off.
    /// Returns true if the output was written.
    pub fn show(&self, duty: u8) -> bool {
        self.with(|s| {
            if !s.output_enabled || s.fade.duty() == duty {
                return false;
            }
            if !s.fade.set_direct(duty) {
                return false;
            }
            s.apply();
            true
        })
    }

    /// Lower a running fade's target to at most `cap`
    pub fn cap_fade(&self, cap: u8) {
        self.with(|s| {
            if matches!(s.fade.target(), Some(t) if t > cap) {
                s.fade.fade_to(cap);
            }
        });
    }

    /// Duty currently applied to the output
    pub fn duty(&self) -> u8 {
        self.with(|s| s.fade.duty())
    }

    /// Inspect the installed output
    pub fn with_output<R>(&self, f: impl FnOnce(&P) -> R) -> Option<R> {
        self.with(|s| s.pwm.as_ref().map(f))
    }
}
