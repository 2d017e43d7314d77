//! Thermal guard
//!
//! Periodically samples the luminaire temperature and limits brightness
//! when the LEDs run hot. A failed read counts as overheating.

use crate::config::{OVERHEAT_ENTER_C, OVERHEAT_EXIT_C, THERMAL_INTERVAL_MS};
use crate::traits::{SensorError, TemperatureSensor};

/// Temperature recorded when the sensor cannot be read
pub const SENSOR_FAULT_CELSIUS: i16 = i16::MAX;

/// Last reading and limiting state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThermalState {
    /// Most recent temperature (None before the first check)
    pub last_temp_c: Option<i16>,
    /// Brightness is being limited
    pub over_temperature: bool,
}

/// Change of the limiting state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ThermalEvent {
    /// Reached [`OVERHEAT_ENTER_C`]
    OverTemperature,
    /// Cooled to [`OVERHEAT_EXIT_C`]
    Recovered,
}

/// Over-temperature detector with hysteresis
#[derive(Debug, Clone)]
pub struct ThermalGuard {
    state: ThermalState,
    /// Time of the last check (None forces a check on the next tick)
    last_check_ms: Option<u32>,
}

impl Default for ThermalGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl ThermalGuard {
    pub const fn new() -> Self {
        Self {
            state: ThermalState {
                last_temp_c: None,
                over_temperature: false,
            },
            last_check_ms: None,
        }
    }

    pub fn state(&self) -> ThermalState {
        self.state
    }

    pub fn is_over_temperature(&self) -> bool {
        self.state.over_temperature
    }

    /// Apply one sensor reading
    pub fn record(&mut self, reading: Result<i16, SensorError>) -> Option<ThermalEvent> {
        let temp_c = match reading {
            Ok(t) => t,
            Err(e) => {
                warn!("Temperature read failed: {}", e);
                SENSOR_FAULT_CELSIUS
            }
        };
        self.state.last_temp_c = Some(temp_c);

        if !self.state.over_temperature && temp_c >= OVERHEAT_ENTER_C {
            self.state.over_temperature = true;
            warn!("Over-temperature: {}C, limiting brightness", temp_c);
            Some(ThermalEvent::OverTemperature)
        } else if self.state.over_temperature && temp_c <= OVERHEAT_EXIT_C {
            self.state.over_temperature = false;
            info!("Temperature back to {}C, limit lifted", temp_c);
            Some(ThermalEvent::Recovered)
        } else {
            None
        }
    }

    /// Sample the sensor if the check interval has elapsed
    pub fn check<T: TemperatureSensor>(
        &mut self,
        sensor: &mut T,
        now_ms: u32,
    ) -> Option<ThermalEvent> {
        if let Some(last) = self.last_check_ms {
            if now_ms.wrapping_sub(last) < THERMAL_INTERVAL_MS {
                return None;
            }
        }
        self.last_check_ms = Some(now_ms);
        self.record(sensor.read_celsius())
    }

    /// Time of the next scheduled check
    pub fn next_deadline(&self) -> Option<u32> {
        self.last_check_ms
            .map(|last| last.wrapping_add(THERMAL_INTERVAL_MS))
    }

    /// Check again on the next tick (after waking from power-down)
    pub fn reschedule(&mut self) {
        self.last_check_ms = None;
    }
}
