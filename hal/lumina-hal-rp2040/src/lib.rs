//! RP2040-specific HAL for the luminaire firmware
//!
//! This crate provides RP2040 implementations of the shared `lumina-hal`
//! traits on top of `embassy-rp`:
//!
//! - Dual-channel LED PWM on one slice
//! - Blocking ADC channel for the thermistor divider
//! - Settings sector at the end of flash
//! - Hardware watchdog
//! - Proximity input with async edge waits
//! - Millisecond clock from the embassy time driver

#![no_std]

pub mod adc;
pub mod clock;
pub mod flash;
pub mod gpio;
pub mod pwm;
pub mod watchdog;

pub use adc::Rp2040Adc;
pub use clock::EmbassyClock;
pub use flash::Rp2040FlashStore;
pub use gpio::ProximityInput;
pub use pwm::Rp2040Pwm;
pub use watchdog::Rp2040Watchdog;
