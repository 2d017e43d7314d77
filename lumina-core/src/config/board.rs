//! Board configuration types
//!
//! Parameters that differ between lamp boards: thermistor network, PWM
//! timing, pin assignment and the storage offset of the settings record.
//! The firmware loads these from `board.toml` at build time.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Thermistor divider parameters
///
/// Circuit: VCC -- NTC -- ADC_PIN -- series resistor -- GND
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThermistorConfig {
    /// Nominal NTC resistance at `t0_c` (ohms)
    pub r0_ohms: u32,
    /// Reference temperature for `r0_ohms` (°C)
    pub t0_c: i16,
    /// Beta coefficient (K)
    pub beta: u16,
    /// Low-side series resistor (ohms)
    pub series_ohms: u32,
    /// Spacing between consecutive samples of one check (µs)
    pub sample_spacing_us: u32,
}

impl Default for ThermistorConfig {
    fn default() -> Self {
        Self {
            r0_ohms: 10_000,
            t0_c: 25,
            beta: 3950,
            series_ohms: 22_000,
            sample_spacing_us: 50,
        }
    }
}

/// PWM timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PwmConfig {
    /// Counter top value (timer ticks per period)
    pub top: u16,
    /// Integer clock divider
    pub divider: u8,
}

impl Default for PwmConfig {
    fn default() -> Self {
        // 125 MHz / 1 / 6250 = 20 kHz, above audible coil whine
        Self {
            top: 6_250,
            divider: 1,
        }
    }
}

/// GPIO assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// Proximity sensor output
    pub proximity: u8,
    /// Proximity sensor is active-low
    pub proximity_inverted: bool,
    /// LED driver channel A
    pub pwm_a: u8,
    /// LED driver channel B
    pub pwm_b: u8,
    /// Thermistor divider tap (ADC-capable pin)
    pub thermistor: u8,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            proximity: 2,
            proximity_inverted: false,
            pwm_a: 16,
            pwm_b: 17,
            thermistor: 26,
        }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    pub thermistor: ThermistorConfig,
    pub pwm: PwmConfig,
    pub pins: PinConfig,
    /// Byte offset of the settings record inside the persistent store
    pub store_offset: u32,
}

/// Board configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Thermistor R0, beta or series resistor is zero
    InvalidThermistor,
    /// PWM top or divider is zero
    InvalidPwm,
    /// Two functions share a pin
    PinConflict,
    /// Pin number outside the chip's GPIO range
    PinOutOfRange,
    /// Thermistor pin cannot be used as an analog input
    NotAnalogPin,
}

/// Highest GPIO number on the target chip
pub const MAX_GPIO: u8 = 29;

/// GPIOs routed to the ADC
pub const ADC_PINS: [u8; 4] = [26, 27, 28, 29];

impl BoardConfig {
    /// Check the configuration for values the firmware cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thermistor;
        if t.r0_ohms == 0 || t.beta == 0 || t.series_ohms == 0 {
            return Err(ConfigError::InvalidThermistor);
        }

        if self.pwm.top == 0 || self.pwm.divider == 0 {
            return Err(ConfigError::InvalidPwm);
        }

        let pins = [
            self.pins.proximity,
            self.pins.pwm_a,
            self.pins.pwm_b,
            self.pins.thermistor,
        ];
        if pins.iter().any(|&p| p > MAX_GPIO) {
            return Err(ConfigError::PinOutOfRange);
        }
        for (i, a) in pins.iter().enumerate() {
            if pins[i + 1..].contains(a) {
                return Err(ConfigError::PinConflict);
            }
        }

        if !ADC_PINS.contains(&self.pins.thermistor) {
            return Err(ConfigError::NotAnalogPin);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(BoardConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_pin_conflict() {
        let mut config = BoardConfig::default();
        config.pins.pwm_b = config.pins.pwm_a;
        assert_eq!(config.validate(), Err(ConfigError::PinConflict));
    }

    #[test]
    fn test_thermistor_must_be_analog() {
        let mut config = BoardConfig::default();
        config.pins.thermistor = 5;
        assert_eq!(config.validate(), Err(ConfigError::NotAnalogPin));
    }

    #[test]
    fn test_zero_beta_rejected() {
        let mut config = BoardConfig::default();
        config.thermistor.beta = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidThermistor));
    }
}
