//! Embassy async tasks
//!
//! Both tasks run on the high-priority interrupt executor and preempt the
//! thread-mode main loop. They share state with it only through
//! [`crate::SHARED`], whose accessors run in critical sections.

pub mod fade;
pub mod proximity;

pub use fade::fade_task;
pub use proximity::proximity_task;
