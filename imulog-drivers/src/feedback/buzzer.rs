//! PWM buzzer beep patterns

use embedded_hal::delay::DelayNs;
use imulog_core::traits::Tone;
use imulog_hal::PwmOutput;

/// Silence between repeated beeps
const GAP_MS: u32 = 100;

/// Passive buzzer on a PWM channel
///
/// `play` blocks for the whole pattern.
pub struct Buzzer<P, D> {
    pwm: P,
    delay: D,
}

impl<P, D> Buzzer<P, D>
where
    P: PwmOutput,
    D: DelayNs,
{
    pub fn new(mut pwm: P, delay: D) -> Self {
        pwm.off();
        Self { pwm, delay }
    }

    /// Beep `repeats` times for `duration_ms` each at `duty_pct`
    pub fn play(&mut self, tone: Tone) {
        for i in 0..tone.repeats {
            if i > 0 {
                self.delay.delay_ms(GAP_MS);
            }
            self.pwm.set_duty_pct(tone.duty_pct.min(100));
            self.delay.delay_ms(tone.duration_ms as u32);
            self.pwm.off();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakePwm {
        duties: heapless::Vec<u8, 16>,
    }

    impl PwmOutput for FakePwm {
        fn set_duty_pct(&mut self, pct: u8) {
            let _ = self.duties.push(pct);
        }
    }

    #[derive(Default)]
    struct FakeDelay {
        total_ms: u32,
    }

    impl DelayNs for FakeDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ms += ns / 1_000_000;
        }

        fn delay_ms(&mut self, ms: u32) {
            self.total_ms += ms;
        }
    }

    #[test]
    fn test_pattern_timing() {
        let mut buzzer = Buzzer::new(FakePwm::default(), FakeDelay::default());
        buzzer.play(Tone::new(80, 3, 1000));

        // Initial off, then on/off per repeat
        assert_eq!(buzzer.pwm.duties.as_slice(), &[0, 80, 0, 80, 0, 80, 0]);
        assert_eq!(buzzer.delay.total_ms, 3 * 1000 + 2 * GAP_MS);
    }

    #[test]
    fn test_duty_clamped() {
        let mut buzzer = Buzzer::new(FakePwm::default(), FakeDelay::default());
        buzzer.play(Tone::new(150, 1, 10));
        assert_eq!(buzzer.pwm.duties.as_slice(), &[0, 100, 0]);
    }

    #[test]
    fn test_zero_repeats_is_silent() {
        let mut buzzer = Buzzer::new(FakePwm::default(), FakeDelay::default());
        buzzer.play(Tone::new(50, 0, 250));
        assert_eq!(buzzer.pwm.duties.as_slice(), &[0]);
        assert_eq!(buzzer.delay.total_ms, 0);
    }
}
