//! Analog input abstraction
//!
//! Raw reads of the thermistor divider. Resolution matches the native
//! ADC width of the chip.

/// Errors from analog conversions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// The converter is powered down
    Disabled,
    /// Conversion failed or timed out
    Conversion,
}

/// Single-channel analog input
pub trait AnalogInput {
    /// Read one raw sample (0..=full_scale)
    fn read_raw(&mut self) -> Result<u16, AdcError>;

    /// Highest value a sample can take (e.g. 4095 for a 12-bit ADC)
    fn full_scale(&self) -> u16;

    /// Power the converter up or down
    ///
    /// Disabled before deep sleep and re-enabled on wake.
    fn set_enabled(&mut self, enabled: bool);
}
