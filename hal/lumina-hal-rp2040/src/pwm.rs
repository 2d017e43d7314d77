//! LED PWM output
//!
//! Both LED driver channels sit on the A and B outputs of one PWM slice and
//! always carry the same duty. Disabling stops the slice so both pins idle
//! low.

use embassy_rp::pwm::{Config, Pwm};
use lumina_core::config::PwmConfig;
use lumina_hal::pwm::DUTY_MAX;
use lumina_hal::PwmOutput;

/// RP2040 PWM slice driving the LED stage
pub struct Rp2040Pwm<'d> {
    pwm: Pwm<'d>,
    config: Config,
}

impl<'d> Rp2040Pwm<'d> {
    /// Wrap a slice created with `Pwm::new_output_ab`
    ///
    /// The slice is reconfigured with the board timing and left disabled.
    pub fn new(mut pwm: Pwm<'d>, timing: &PwmConfig) -> Self {
        let mut config = Config::default();
        config.top = timing.top;
        config.divider = timing.divider.into();
        config.compare_a = 0;
        config.compare_b = 0;
        config.enable = false;
        pwm.set_config(&config);

        Self { pwm, config }
    }

    /// Compare value for a duty percentage
    fn compare(&self, percent: u8) -> u16 {
        let percent = percent.min(DUTY_MAX) as u32;
        // top + 1 counts per period, so top + 1 is a fully-on compare
        let compare = (self.config.top as u32 + 1) * percent / DUTY_MAX as u32;
        compare.min(u16::MAX as u32) as u16
    }
}

impl PwmOutput for Rp2040Pwm<'_> {
    fn set_duty(&mut self, percent: u8) {
        let compare = self.compare(percent);
        if self.config.enable && self.config.compare_a == compare {
            return;
        }
        self.config.compare_a = compare;
        self.config.compare_b = compare;
        self.config.enable = true;
        self.pwm.set_config(&self.config);
    }

    fn disable(&mut self) {
        self.config.compare_a = 0;
        self.config.compare_b = 0;
        self.config.enable = false;
        self.pwm.set_config(&self.config);
    }

    fn is_enabled(&self) -> bool {
        self.config.enable
    }
}
