//! Visual and audible feedback: RGB status LED and buzzer

/// RGB LED state (each channel on or off)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl Rgb {
    pub const OFF: Self = Self::new(false, false, false);
    pub const RED: Self = Self::new(true, false, false);
    pub const GREEN: Self = Self::new(false, true, false);
    pub const YELLOW: Self = Self::new(true, true, false);
    pub const CYAN: Self = Self::new(false, true, true);
    pub const WHITE: Self = Self::new(true, true, true);

    pub const fn new(red: bool, green: bool, blue: bool) -> Self {
        Self { red, green, blue }
    }
}

/// A beep pattern for the tone generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tone {
    /// PWM duty cycle in percent (0-100)
    pub duty_pct: u8,
    /// Number of beeps
    pub repeats: u8,
    /// Length of each beep in milliseconds
    pub duration_ms: u16,
}

impl Tone {
    pub const fn new(duty_pct: u8, repeats: u8, duration_ms: u16) -> Self {
        Self {
            duty_pct,
            repeats,
            duration_ms,
        }
    }
}

/// Trait for the status LED and buzzer
///
/// `beep` is allowed to block for the length of the pattern; the driver
/// owns the timing.
pub trait Feedback {
    /// Set the RGB status LED
    fn set_leds(&mut self, rgb: Rgb);

    /// Play a beep pattern
    fn beep(&mut self, tone: Tone);
}
