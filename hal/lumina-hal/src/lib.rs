//! Lumina Hardware Abstraction Layer
//!
//! This crate defines the driver interfaces the luminaire control logic is
//! written against. Chip-specific crates (RP2040, ...) implement them, and
//! host tests implement them with fakes and a simulated clock.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  lumina-firmware                        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lumina-core / lumina-drivers           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lumina-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lumina-hal-rp2040                      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::ProximityLine`] - Proximity sensor level input
//! - [`pwm::PwmOutput`] - Dimmable LED output
//! - [`adc::AnalogInput`] - Thermistor divider reading
//! - [`storage::PersistentStore`] - Byte-addressed non-volatile storage
//! - [`watchdog::WatchdogTimer`] - Hang detection
//! - [`clock::WallClock`] - Millisecond time base

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod clock;
pub mod gpio;
pub mod pwm;
pub mod storage;
pub mod watchdog;

// Re-export key traits at crate root for convenience
pub use adc::{AdcError, AnalogInput};
pub use clock::WallClock;
pub use gpio::ProximityLine;
pub use pwm::PwmOutput;
pub use storage::{PersistentStore, StoreError};
pub use watchdog::WatchdogTimer;
