//! Board-agnostic core logic for the luminaire firmware
//!
//! This crate contains all control logic that does not depend on
//! specific hardware implementations:
//!
//! - Settings record, checksum and quiet-period commits
//! - Thermal guard with hysteresis and fail-safe sensor handling
//! - Gesture decoder for the proximity line
//! - Operation mode state machine (standby, dimming, blink indications)
//! - Brightness engine (stepped and continuous dimming)
//! - Fade controller for the PWM duty cycle
//! - Interrupt-shared state block
//! - Power scheduler tying everything to the main loop

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

pub mod brightness;
pub mod config;
pub mod fade;
pub mod gesture;
pub mod mode;
pub mod output;
pub mod scheduler;
pub mod settings;
pub mod shared;
pub mod thermal;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;
