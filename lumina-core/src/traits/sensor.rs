//! Temperature sensor trait

/// Errors that can occur with temperature sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor disconnected (open circuit)
    OpenCircuit,
    /// Sensor shorted
    ShortCircuit,
    /// Sampled value cannot come from a working divider
    Implausible,
    /// ADC conversion error
    Conversion,
}

/// Trait for the luminaire temperature sensor
///
/// Implementations handle the specific sensor type and its wiring.
pub trait TemperatureSensor {
    /// Read the current temperature in whole degrees Celsius
    ///
    /// Takes `&mut self` because ADC reads require mutable access.
    fn read_celsius(&mut self) -> Result<i16, SensorError>;

    /// Power the sensor path up or down around deep sleep
    fn set_powered(&mut self, _powered: bool) {}
}
