//! Fade controller
//!
//! Ramps the physical duty cycle toward a target from a fast periodic
//! timer. Every fade takes the same time end-to-end: the distance is spread
//! evenly over [`FADE_TICKS`] timer ticks, so short fades move slowly and a
//! full-range fade moves one percent every few ticks.

use crate::config::FADE_TICKS;

/// Fade ramp state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FadeController {
    /// Duty currently applied to the output (percent)
    duty: u8,
    /// Pending target, if a fade is running
    target: Option<u8>,
    /// Duty when the current fade started
    origin: u8,
    /// Ticks elapsed in the current fade
    elapsed: u32,
    /// Ticks a fade is spread over
    ticks: u32,
}

impl Default for FadeController {
    fn default() -> Self {
        Self::new()
    }
}

impl FadeController {
    /// Create an idle controller at zero duty
    pub const fn new() -> Self {
        Self::with_ticks(FADE_TICKS)
    }

    /// Create a controller with a custom ramp length
    pub const fn with_ticks(ticks: u32) -> Self {
        Self {
            duty: 0,
            target: None,
            origin: 0,
            elapsed: 0,
            ticks: if ticks == 0 { 1 } else { ticks },
        }
    }

    /// Duty currently applied
    pub fn duty(&self) -> u8 {
        self.duty
    }

    /// Pending target
    pub fn target(&self) -> Option<u8> {
        self.target
    }

    /// Check if a fade is running
    pub fn is_fading(&self) -> bool {
        self.target.is_some()
    }

    /// Start a fade toward `target`
    ///
    /// Replaces any running fade; the new ramp starts from the current duty
    /// and again takes the full fade duration.
    pub fn fade_to(&mut self, target: u8) {
        if target == self.duty {
            self.target = None;
            return;
        }
        self.origin = self.duty;
        self.elapsed = 0;
        self.target = Some(target);
    }

    /// Record a direct write to the output
    ///
    /// Ignored while fading; returns true if the write was accepted.
    pub fn set_direct(&mut self, duty: u8) -> bool {
        if self.is_fading() {
            return false;
        }
        self.duty = duty;
        true
    }

    /// Advance one fade timer tick
    ///
    /// Returns the new duty if it changed. The target is cleared on arrival.
    pub fn tick(&mut self) -> Option<u8> {
        let target = self.target?;

        self.elapsed += 1;
        let next = if self.elapsed >= self.ticks {
            self.target = None;
            target
        } else {
            let distance = target.abs_diff(self.origin) as u32;
            let moved = (distance * self.elapsed / self.ticks) as u8;
            if target > self.origin {
                self.origin + moved
            } else {
                self.origin - moved
            }
        };

        if next == self.duty {
            return None;
        }
        self.duty = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(fade: &mut FadeController) -> u32 {
        let mut ticks = 0;
        while fade.is_fading() {
            let before = fade.duty();
            if let Some(d) = fade.tick() {
                assert_eq!(d.abs_diff(before), 1, "fade skipped a unit");
            }
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn test_fade_duration_fixed() {
        for target in [1u8, 4, 32, 100] {
            let mut fade = FadeController::new();
            fade.fade_to(target);
            assert_eq!(run_to_end(&mut fade), FADE_TICKS);
            assert_eq!(fade.duty(), target);
        }
    }

    #[test]
    fn test_fade_down() {
        let mut fade = FadeController::new();
        fade.set_direct(60);
        fade.fade_to(0);
        assert_eq!(run_to_end(&mut fade), FADE_TICKS);
        assert_eq!(fade.duty(), 0);
        assert_eq!(fade.target(), None);
    }

    #[test]
    fn test_retarget_restarts_ramp() {
        let mut fade = FadeController::new();
        fade.fade_to(100);
        for _ in 0..FADE_TICKS / 2 {
            fade.tick();
        }
        assert_eq!(fade.duty(), 50);

        fade.fade_to(0);
        assert_eq!(run_to_end(&mut fade), FADE_TICKS);
        assert_eq!(fade.duty(), 0);
    }

    #[test]
    fn test_direct_write_suppressed_while_fading() {
        let mut fade = FadeController::new();
        fade.fade_to(40);
        assert!(!fade.set_direct(90));
        run_to_end(&mut fade);
        assert!(fade.set_direct(90));
        assert_eq!(fade.duty(), 90);
    }

    #[test]
    fn test_fade_to_current_is_noop() {
        let mut fade = FadeController::new();
        fade.set_direct(30);
        fade.fade_to(30);
        assert!(!fade.is_fading());
        assert_eq!(fade.tick(), None);
    }
}
