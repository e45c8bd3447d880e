//! I2C adapter
//!
//! Wraps any blocking `embedded_hal::i2c::I2c` (the embassy-rp `I2c` in
//! blocking mode on the board) behind `imulog_hal::I2cBus`.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c, NoAcknowledgeSource};
use imulog_hal::{I2cBus, I2cError};

pub struct HalI2c<T> {
    bus: T,
}

impl<T: I2c> HalI2c<T> {
    pub fn new(bus: T) -> Self {
        Self { bus }
    }
}

fn map_error(kind: ErrorKind) -> I2cError {
    match kind {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
        | ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)
        | ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown) => I2cError::Nack,
        ErrorKind::ArbitrationLoss => I2cError::ArbitrationLost,
        ErrorKind::Bus | ErrorKind::Overrun => I2cError::Bus,
        _ => I2cError::Other,
    }
}

impl<T: I2c> I2cBus for HalI2c<T> {
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cError> {
        self.bus
            .write(address, data)
            .map_err(|e| map_error(e.kind()))
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), I2cError> {
        self.bus.read(address, buf).map_err(|e| map_error(e.kind()))
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), I2cError> {
        self.bus
            .write_read(address, write_data, read_buf)
            .map_err(|e| map_error(e.kind()))
    }
}
