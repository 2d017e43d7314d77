//! PWM output abstraction
//!
//! The LED driver is controlled through a logical duty cycle in percent.
//! Implementations translate the percentage to timer-tick resolution.

/// Maximum logical duty cycle
pub const DUTY_MAX: u8 = 100;

/// Dimmable PWM output
pub trait PwmOutput {
    /// Set the duty cycle (0-100%) and make sure the output is driven
    ///
    /// Values above [`DUTY_MAX`] are clamped by the implementation.
    fn set_duty(&mut self, percent: u8);

    /// Physically disconnect the output (both channels)
    ///
    /// The LED stage leaks a little current even at zero duty, so an
    /// idle output is disabled rather than just driven at 0%.
    fn disable(&mut self);

    /// Check if the output is currently driven
    fn is_enabled(&self) -> bool;
}
