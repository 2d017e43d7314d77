//! Configuration types
//!
//! Fixed gesture/timing contract constants and board-level parameters.

pub mod board;
pub mod timing;

pub use board::*;
pub use timing::*;
