//! Thermistor ADC channel
//!
//! RP2040 has one 12-bit ADC; the divider tap is on GPIO26..=29.

use embassy_rp::adc::{Adc, Blocking, Channel};
use lumina_hal::{AdcError, AnalogInput};

/// 12-bit full scale
pub const ADC_FULL_SCALE: u16 = 4095;

/// Blocking ADC channel
pub struct Rp2040Adc<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
    enabled: bool,
}

impl<'d> Rp2040Adc<'d> {
    /// Create from a blocking ADC and the divider channel
    pub fn new(adc: Adc<'d, Blocking>, channel: Channel<'d>) -> Self {
        Self {
            adc,
            channel,
            enabled: true,
        }
    }
}

impl AnalogInput for Rp2040Adc<'_> {
    fn read_raw(&mut self) -> Result<u16, AdcError> {
        if !self.enabled {
            return Err(AdcError::Disabled);
        }
        self.adc
            .blocking_read(&mut self.channel)
            .map_err(|_| AdcError::Conversion)
    }

    fn full_scale(&self) -> u16 {
        ADC_FULL_SCALE
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
