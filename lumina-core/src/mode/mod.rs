//! Operation mode state machine
//!
//! Exactly one mode is active at a time. The lamp's visible behavior
//! (whether dimming is allowed, what the output shows) is a function of the
//! current mode and the stored brightness.

pub mod events;
pub mod machine;

pub use events::ModeEvent;
pub use machine::{blink_level, Blink, Mode};
