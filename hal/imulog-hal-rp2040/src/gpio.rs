//! GPIO output wrapper

use embassy_rp::gpio::Output;

/// Push-pull output implementing `imulog_hal::OutputPin`
pub struct RpOutput<'d>(Output<'d>);

impl<'d> RpOutput<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self(pin)
    }
}

impl imulog_hal::OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }

    fn toggle(&mut self) {
        self.0.toggle();
    }
}
