//! Status feedback: RGB LED and buzzer
//!
//! [`StatusFeedback`] combines both into the core's `Feedback` trait.

pub mod buzzer;
pub mod rgb_led;

pub use buzzer::Buzzer;
pub use rgb_led::RgbLed;

use embedded_hal::delay::DelayNs;
use imulog_core::traits::{Feedback, Rgb, Tone};
use imulog_hal::{OutputPin, PwmOutput};

/// RGB LED plus buzzer
pub struct StatusFeedback<R, G, B, P, D> {
    led: RgbLed<R, G, B>,
    buzzer: Buzzer<P, D>,
}

impl<R, G, B, P, D> StatusFeedback<R, G, B, P, D>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
    P: PwmOutput,
    D: DelayNs,
{
    pub fn new(led: RgbLed<R, G, B>, buzzer: Buzzer<P, D>) -> Self {
        Self { led, buzzer }
    }
}

impl<R, G, B, P, D> Feedback for StatusFeedback<R, G, B, P, D>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
    P: PwmOutput,
    D: DelayNs,
{
    fn set_leds(&mut self, rgb: Rgb) {
        self.led.set(rgb);
    }

    fn beep(&mut self, tone: Tone) {
        self.buzzer.play(tone);
    }
}
