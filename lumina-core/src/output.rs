//! Physical output gating
//!
//! The LED stage leaks current at 0% duty, so the output is disconnected
//! whenever it should be dark and no fade is about to drive it again.

use lumina_hal::PwmOutput;

/// Apply a duty cycle to the PWM output
pub fn drive<P: PwmOutput>(pwm: &mut P, duty: u8, fading: bool) {
    if duty == 0 && !fading {
        if pwm.is_enabled() {
            pwm.disable();
        }
    } else {
        pwm.set_duty(duty);
    }
}
