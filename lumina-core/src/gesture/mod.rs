//! Proximity gesture decoding
//!
//! The decoder runs in interrupt context on every edge of the proximity
//! line. It timestamps approaches, recognizes power-toggle taps on release
//! and leaves long holds to the brightness engine in the main loop.

pub mod decoder;
pub mod events;

pub use decoder::{classify, GestureDecoder, HoldKind, ProximityState};
pub use events::{Edge, Gesture, GestureEvent};
