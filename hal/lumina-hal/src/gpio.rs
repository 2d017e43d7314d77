//! Proximity sensor input
//!
//! The sensor is a single binary line: asserted while something is close.
//! Edge detection happens in the chip HAL (interrupt or async wait); this
//! trait only exposes the level so the control logic can sample it at boot.

/// Proximity sensor line
pub trait ProximityLine {
    /// Check if the sensor currently reports an object in range
    fn is_asserted(&self) -> bool;
}
