//! Three-GPIO RGB status LED

use imulog_core::traits::Rgb;
use imulog_hal::OutputPin;

/// Common-cathode RGB LED, one active-high pin per channel
pub struct RgbLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
}

impl<R, G, B> RgbLed<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    /// Take the pins and switch every channel off
    pub fn new(red: R, green: G, blue: B) -> Self {
        let mut led = Self { red, green, blue };
        led.set(Rgb::OFF);
        led
    }

    pub fn set(&mut self, rgb: Rgb) {
        self.red.set_state(rgb.red);
        self.green.set_state(rgb.green);
        self.blue.set_state(rgb.blue);
    }

    /// Current colour as read back from the pins
    pub fn get(&self) -> Rgb {
        Rgb::new(
            self.red.is_set_high(),
            self.green.is_set_high(),
            self.blue.is_set_high(),
        )
    }
}
