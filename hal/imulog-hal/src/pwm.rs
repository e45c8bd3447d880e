//! PWM output abstraction
//!
//! The buzzer is driven at a fixed carrier frequency chosen by the chip
//! crate; drivers only vary the duty cycle.

/// Single PWM channel with a fixed frequency
pub trait PwmOutput {
    /// Set duty cycle in percent; values above 100 are clamped
    fn set_duty_pct(&mut self, pct: u8);

    /// Stop driving the output (0% duty)
    fn off(&mut self) {
        self.set_duty_pct(0);
    }
}
