//! Power scheduler
//!
//! Runs the control logic once per main-loop tick and tells the caller how
//! long and how deeply it may sleep until the next tick.

pub mod lamp;
pub mod sleep;

pub use lamp::Lamp;
pub use sleep::{next_wake, time_until, SleepDepth, SleepPlan};
