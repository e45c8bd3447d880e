//! PWM buzzer output
//!
//! Runs the slice at a fixed ~500 Hz carrier (125 MHz / 32 / 7813) and
//! only changes the compare value of channel B.

use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use fixed::types::extra::U4;
use fixed::FixedU16;

/// Clock divider for the buzzer slice
pub const BUZZER_DIVIDER: u8 = 32;

/// Counter wrap value for the buzzer slice
pub const BUZZER_TOP: u16 = 7812;

/// Compare value for a duty cycle in percent
pub fn duty_to_compare(pct: u8, top: u16) -> u16 {
    let pct = pct.min(100) as u32;
    ((top as u32 + 1) * pct / 100) as u16
}

/// Buzzer on PWM channel B of one slice
pub struct PwmBuzzer<'d> {
    pwm: Pwm<'d>,
    config: PwmConfig,
}

impl<'d> PwmBuzzer<'d> {
    /// Take a PWM slice already bound to the buzzer pin and silence it
    pub fn new(mut pwm: Pwm<'d>) -> Self {
        let mut config = PwmConfig::default();
        config.divider = FixedU16::<U4>::from_num(BUZZER_DIVIDER);
        config.top = BUZZER_TOP;
        config.compare_b = 0;
        pwm.set_config(&config);
        Self { pwm, config }
    }
}

impl imulog_hal::PwmOutput for PwmBuzzer<'_> {
    fn set_duty_pct(&mut self, pct: u8) {
        self.config.compare_b = duty_to_compare(pct, self.config.top);
        self.pwm.set_config(&self.config);
    }
}
