//! MPU6050 six-axis motion sensor
//!
//! Accelerometer, gyroscope and die temperature are read raw; scaling is
//! left to the consumer. The driver uses the power-on full-scale ranges.
//!
//! # Register burst
//!
//! A single 14-byte read starting at `ACCEL_XOUT_H` returns, big-endian:
//! accel X/Y/Z, temperature, gyro X/Y/Z.

use embedded_hal::delay::DelayNs;
use imulog_core::traits::{MotionSensor, RawMotion, SensorError};
use imulog_hal::{I2cBus, I2cError};

/// Default I2C address (AD0 low)
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// MPU6050 register addresses
pub mod reg {
    /// First byte of the accel/temp/gyro burst
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    /// Power management 1 (reset, sleep, clock select)
    pub const PWR_MGMT_1: u8 = 0x6B;
    /// Device identity, reads 0x68
    pub const WHO_AM_I: u8 = 0x75;
}

/// PWR_MGMT_1 device reset bit
const DEVICE_RESET: u8 = 0x80;

/// Burst length: 3 accel + 1 temp + 3 gyro words
const BURST_LEN: usize = 14;

fn bus_error(_: I2cError) -> SensorError {
    SensorError::Bus
}

/// MPU6050 on a blocking I2C bus
pub struct Mpu6050<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C, D> Mpu6050<I2C, D>
where
    I2C: I2cBus,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_address(i2c, delay, DEFAULT_ADDRESS)
    }

    pub fn with_address(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
        }
    }

    /// Check the WHO_AM_I register
    pub fn verify_identity(&mut self) -> Result<(), SensorError> {
        let mut id = [0u8];
        self.i2c
            .write_read(self.address, &[reg::WHO_AM_I], &mut id)
            .map_err(bus_error)?;
        if id[0] == DEFAULT_ADDRESS {
            Ok(())
        } else {
            Err(SensorError::NotResponding)
        }
    }
}

impl<I2C, D> MotionSensor for Mpu6050<I2C, D>
where
    I2C: I2cBus,
    D: DelayNs,
{
    fn reset(&mut self) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &[reg::PWR_MGMT_1, DEVICE_RESET])
            .map_err(bus_error)?;
        self.delay.delay_ms(100);
        // Clear sleep; internal 8 MHz oscillator
        self.i2c
            .write(self.address, &[reg::PWR_MGMT_1, 0x00])
            .map_err(bus_error)?;
        self.delay.delay_ms(10);
        Ok(())
    }

    fn read_raw(&mut self) -> Result<RawMotion, SensorError> {
        let mut buf = [0u8; BURST_LEN];
        self.i2c
            .write_read(self.address, &[reg::ACCEL_XOUT_H], &mut buf)
            .map_err(bus_error)?;

        let word = |i: usize| i16::from_be_bytes([buf[2 * i], buf[2 * i + 1]]);
        Ok(RawMotion {
            accel: [word(0), word(1), word(2)],
            temp: word(3),
            gyro: [word(4), word(5), word(6)],
        })
    }
}
