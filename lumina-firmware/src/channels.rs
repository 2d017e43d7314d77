//! Inter-context signals
//!
//! The control state itself lives in [`crate::SHARED`]; these signals only
//! wake sleepers when that state changed.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Wake the main loop early (proximity edge, fade finished)
pub static WAKE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// A fade target was set; start the fade ticker
pub static FADE_KICK: Signal<CriticalSectionRawMutex, ()> = Signal::new();
