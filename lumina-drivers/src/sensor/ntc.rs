//! NTC thermistor on a resistor divider
//!
//! Circuit: VCC -- NTC -- ADC_PIN -- series resistor -- GND
//!
//! The tap voltage rises with temperature. Each reading averages a few
//! closely spaced samples and converts the resulting resistance with the
//! Beta model: `1/T = 1/T0 + ln(R/R0)/B`.

use embedded_hal::delay::DelayNs;
use lumina_core::config::{ThermistorConfig, THERMAL_SAMPLES};
use lumina_core::traits::{SensorError, TemperatureSensor};
use lumina_hal::AnalogInput;

const KELVIN_OFFSET: f32 = 273.15;

/// Thermistor sensor
pub struct NtcThermistor<A, D> {
    adc: A,
    delay: D,
    config: ThermistorConfig,
}

impl<A: AnalogInput, D: DelayNs> NtcThermistor<A, D> {
    /// Create a new sensor
    ///
    /// # Arguments
    /// - `adc`: ADC channel on the divider tap
    /// - `delay`: Microsecond delay between samples
    /// - `config`: Divider and thermistor parameters
    pub fn new(adc: A, delay: D, config: ThermistorConfig) -> Self {
        Self { adc, delay, config }
    }

    /// Sum of [`THERMAL_SAMPLES`] raw samples
    fn sample_sum(&mut self) -> Result<u32, SensorError> {
        let mut sum = 0u32;
        for i in 0..THERMAL_SAMPLES {
            if i > 0 {
                self.delay.delay_us(self.config.sample_spacing_us);
            }
            let raw = self.adc.read_raw().map_err(|_| SensorError::Conversion)?;
            sum += u32::from(raw);
        }
        Ok(sum)
    }

    /// Convert an averaged tap reading to NTC resistance (ohms)
    ///
    /// R_ntc = R_series * (full_scale - avg) / avg
    pub fn resistance(&self, average: f32) -> f32 {
        let full_scale = f32::from(self.adc.full_scale());
        self.config.series_ohms as f32 * (full_scale - average) / average
    }

    /// Beta model, returns whole degrees Celsius
    pub fn resistance_to_celsius(&self, resistance: f32) -> Result<i16, SensorError> {
        let t0_k = f32::from(self.config.t0_c) + KELVIN_OFFSET;
        let ratio = resistance / self.config.r0_ohms as f32;
        let inv_t = 1.0 / t0_k + libm::logf(ratio) / f32::from(self.config.beta);
        let celsius = 1.0 / inv_t - KELVIN_OFFSET;

        if !celsius.is_finite() || celsius < f32::from(i16::MIN) || celsius > f32::from(i16::MAX) {
            return Err(SensorError::Implausible);
        }
        Ok(libm::roundf(celsius) as i16)
    }
}

impl<A: AnalogInput, D: DelayNs> TemperatureSensor for NtcThermistor<A, D> {
    fn read_celsius(&mut self) -> Result<i16, SensorError> {
        let sum = self.sample_sum()?;
        let full_scale = u32::from(self.adc.full_scale());

        // Thermistor open: the series resistor pulls the tap to ground
        if sum == 0 {
            return Err(SensorError::OpenCircuit);
        }

        // At or below a third of full scale per sample
        if sum <= full_scale * THERMAL_SAMPLES / 3 {
            return Err(SensorError::Implausible);
        }

        if sum >= full_scale * THERMAL_SAMPLES {
            return Err(SensorError::ShortCircuit);
        }

        let average = sum as f32 / THERMAL_SAMPLES as f32;
        self.resistance_to_celsius(self.resistance(average))
    }

    fn set_powered(&mut self, powered: bool) {
        self.adc.set_enabled(powered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumina_hal::AdcError;

    /// ADC returning a fixed 12-bit value
    struct DummyAdc {
        value: u16,
        enabled: bool,
        reads: u32,
    }

    impl DummyAdc {
        fn new(value: u16) -> Self {
            Self {
                value,
                enabled: true,
                reads: 0,
            }
        }
    }

    impl AnalogInput for DummyAdc {
        fn read_raw(&mut self) -> Result<u16, AdcError> {
            if !self.enabled {
                return Err(AdcError::Disabled);
            }
            self.reads += 1;
            Ok(self.value)
        }

        fn full_scale(&self) -> u16 {
            4095
        }

        fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }
    }

    #[derive(Default)]
    struct CountingDelay {
        total_us: u32,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_us += ns / 1_000;
        }
    }

    fn sensor(value: u16) -> NtcThermistor<DummyAdc, CountingDelay> {
        NtcThermistor::new(
            DummyAdc::new(value),
            CountingDelay::default(),
            ThermistorConfig::default(),
        )
    }

    #[test]
    fn test_reference_point() {
        // 10k NTC against 22k: 4095 * 22 / 32 = 2815
        let mut ntc = sensor(2815);
        assert_eq!(ntc.read_celsius(), Ok(25));
    }

    #[test]
    fn test_hot() {
        // ~1088 ohms is about 85 °C for B = 3950
        let mut ntc = sensor(3902);
        let t = ntc.read_celsius().unwrap();
        assert!((84..=86).contains(&t), "got {}", t);
    }

    #[test]
    fn test_takes_three_spaced_samples() {
        let mut ntc = sensor(2815);
        ntc.read_celsius().unwrap();
        assert_eq!(ntc.adc.reads, 3);
        assert_eq!(ntc.delay.total_us, 100);
    }

    #[test]
    fn test_low_reading_is_implausible() {
        let mut ntc = sensor(1365);
        assert_eq!(ntc.read_celsius(), Err(SensorError::Implausible));
        let mut ntc = sensor(1366);
        assert!(ntc.read_celsius().is_ok());
    }

    #[test]
    fn test_open_and_short() {
        assert_eq!(sensor(0).read_celsius(), Err(SensorError::OpenCircuit));
        assert_eq!(sensor(4095).read_celsius(), Err(SensorError::ShortCircuit));
    }

    #[test]
    fn test_powered_down_adc() {
        let mut ntc = sensor(2815);
        ntc.set_powered(false);
        assert_eq!(ntc.read_celsius(), Err(SensorError::Conversion));
        ntc.set_powered(true);
        assert_eq!(ntc.read_celsius(), Ok(25));
    }
}
