//! Device abstraction traits
//!
//! These traits define the interface between the control logic and the
//! board drivers that do not map onto a single HAL peripheral.

pub mod sensor;

pub use sensor::{SensorError, TemperatureSensor};
