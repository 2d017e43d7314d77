//! Gesture input and output types

/// Proximity line transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Object came into range
    Rising,
    /// Object left range
    Falling,
}

/// One timestamped edge of the proximity line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureEvent {
    pub edge: Edge,
    pub timestamp_ms: u32,
}

impl GestureEvent {
    pub const fn rising(timestamp_ms: u32) -> Self {
        Self {
            edge: Edge::Rising,
            timestamp_ms,
        }
    }

    pub const fn falling(timestamp_ms: u32) -> Self {
        Self {
            edge: Edge::Falling,
            timestamp_ms,
        }
    }
}

/// Decoded gestures handed from interrupt context to the main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// A new proximity session started while the output was on
    Approach { at_ms: u32 },
    /// A tap switched the output on or off
    PowerToggle { enabled: bool, at_ms: u32 },
}
