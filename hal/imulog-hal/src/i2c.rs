//! I2C bus abstractions
//!
//! Blocking I2C master operations. Both the motion sensor and the OLED sit
//! on their own bus, and every transfer is short, so the drivers use the
//! blocking form.

/// Errors reported by an I2C transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cError {
    /// Device did not acknowledge its address or data
    Nack,
    /// Arbitration lost on a multi-master bus
    ArbitrationLost,
    /// Bus fault (stuck line, invalid transfer length)
    Bus,
    /// Anything else the chip HAL reports
    Other,
}

/// I2C bus master
pub trait I2cBus {
    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cError>;

    /// Read data from a device at the given address
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), I2cError>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is how a register address is selected before a burst read.
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), I2cError>;
}

/// I2C configuration
#[derive(Debug, Clone, Copy)]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::FAST
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz), used by both the sensor and the display
    pub const FAST: Self = Self { frequency: 400_000 };
}
