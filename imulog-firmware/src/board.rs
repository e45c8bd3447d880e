//! Concrete collaborator types for the board
//!
//! Embassy tasks cannot be generic, so the controller and display tasks
//! name these aliases.

use embassy_rp::gpio::Output;
use embassy_rp::i2c::{Blocking as I2cBlocking, I2c};
use embassy_rp::peripherals::{I2C0, I2C1, SPI0};
use embassy_rp::spi::{Blocking as SpiBlocking, Spi};
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use embedded_sdmmc::SdCard;

use imulog_core::controller::Peripherals;
use imulog_drivers::display::Ssd1306;
use imulog_drivers::feedback::StatusFeedback;
use imulog_drivers::sensor::Mpu6050;
use imulog_hal_rp2040::{HalI2c, PwmBuzzer, RpOutput, RpRtc, UartConsole};

use crate::channels::SignalSink;
use crate::storage::SdStorage;

/// I2C0: GPIO0 SDA, GPIO1 SCL
pub type SensorBus = HalI2c<I2c<'static, I2C0, I2cBlocking>>;

/// I2C1: GPIO14 SDA, GPIO15 SCL
pub type DisplayBus = HalI2c<I2c<'static, I2C1, I2cBlocking>>;

pub type BoardSensor = Mpu6050<SensorBus, Delay>;

pub type BoardDisplay = Ssd1306<DisplayBus>;

/// RGB LED on GPIO13/11/12, buzzer on GPIO21 (PWM slice 2 B)
pub type BoardFeedback = StatusFeedback<
    RpOutput<'static>,
    RpOutput<'static>,
    RpOutput<'static>,
    PwmBuzzer<'static>,
    Delay,
>;

/// SPI0: GPIO18 SCK, GPIO19 MOSI, GPIO16 MISO, GPIO17 CS
pub type SdSpi = ExclusiveDevice<Spi<'static, SPI0, SpiBlocking>, Output<'static>, Delay>;

pub type BoardCard = SdCard<SdSpi, Delay>;

pub type BoardStorage = SdStorage<BoardCard>;

/// Retune SPI0 under the card
pub fn set_sd_clock(card: &BoardCard, hz: u32) {
    card.spi(|device| device.bus_mut().set_frequency(hz));
}

/// UART1: GPIO8 TX, GPIO9 RX
pub type BoardConsole = UartConsole<BufferedUartRx, BufferedUartTx>;

pub type BoardPeripherals = Peripherals<
    BoardStorage,
    BoardSensor,
    RpRtc<'static>,
    BoardFeedback,
    BoardConsole,
    SignalSink,
    Delay,
>;
