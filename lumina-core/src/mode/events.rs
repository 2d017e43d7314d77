//! Events that trigger mode transitions

/// Events that can trigger mode transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeEvent {
    // Gesture events
    /// Power-toggle tap turned the output on
    PowerOn,
    /// Power-toggle tap turned the output off
    PowerOff,
    /// A new proximity session started
    Approach,

    // Brightness engine events
    /// Dimming hit MIN or MAX
    LimitReached,
    /// Stepped dimming or the proximity lock was toggled
    SettingsChanged,

    // Thermal events
    /// Thermal guard entered over-temperature
    OverTemperature,

    // Timer events
    /// A blink indication ran out of toggles
    BlinkFinished,
}
