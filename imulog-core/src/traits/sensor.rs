//! Motion sensor trait

/// Errors that can occur while talking to the motion sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transfer failed (NACK, arbitration, stuck line)
    Bus,
    /// Device answered with an unexpected identity
    NotResponding,
}

impl core::fmt::Display for SensorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SensorError::Bus => f.write_str("sensor bus error"),
            SensorError::NotResponding => f.write_str("sensor not responding"),
        }
    }
}

/// One raw tri-axis reading, exactly as the sensor registers report it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawMotion {
    /// Accelerometer X, Y, Z
    pub accel: [i16; 3],
    /// Gyroscope X, Y, Z
    pub gyro: [i16; 3],
    /// Die temperature register
    pub temp: i16,
}

impl RawMotion {
    /// Die temperature in 0.1°C units
    ///
    /// Applies `temp / 340 + 36.53` and rounds half away from zero to one
    /// decimal, in integer math. For example a raw value of 0 yields 365.
    pub fn temperature_x10(&self) -> i16 {
        // temp_c * 10 = (raw * 5 + 62101) / 170
        let num = self.temp as i32 * 5 + 62_101;
        let rounded = if num >= 0 {
            (num + 85) / 170
        } else {
            (num - 85) / 170
        };
        rounded as i16
    }
}

/// Trait for the six-axis motion sensor
///
/// Takes `&mut self` because every read is a bus transaction.
pub trait MotionSensor {
    /// Reset the device and bring it out of sleep
    fn reset(&mut self) -> Result<(), SensorError>;

    /// Read accelerometer, gyroscope and temperature in one go
    fn read_raw(&mut self) -> Result<RawMotion, SensorError>;
}
