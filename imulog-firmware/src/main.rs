//! imulog - Motion Sensor Data Logger Firmware
//!
//! Samples an MPU6050 into CSV files on an SD card. Two buttons start or
//! cancel a capture and toggle the card mount; a UART console accepts
//! digit shortcuts and text commands; an SSD1306 OLED shows the menu and
//! the operation in progress.
//!
//! Core 0 runs the controller. Core 1 runs the display renderer and the
//! button edge tasks.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Executor;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_rp::peripherals::UART1;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::rtc::Rtc;
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use embedded_sdmmc::SdCard;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use imulog_core::config::{parse_config, LoggerConfig};
use imulog_core::controller::Peripherals;
use imulog_core::input::InputLine;
use imulog_drivers::display::Ssd1306;
use imulog_drivers::feedback::{Buzzer, RgbLed, StatusFeedback};
use imulog_drivers::sensor::Mpu6050;
use imulog_hal_rp2040::{HalI2c, PwmBuzzer, RpOutput, RpRtc, UartConsole};

mod board;
mod channels;
mod storage;
mod tasks;

use crate::channels::SignalSink;
use crate::storage::SdStorage;

/// Embedded configuration (compiled into firmware)
/// Edit logger.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../logger.toml");

bind_interrupts!(struct Irqs {
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 512]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

static CORE1_STACK: StaticCell<Stack<8192>> = StaticCell::new();
static EXECUTOR0: StaticCell<Executor> = StaticCell::new();
static EXECUTOR1: StaticCell<Executor> = StaticCell::new();

#[cortex_m_rt::entry]
fn main() -> ! {
    info!("imulog firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Display on I2C1 (GPIO14 SDA, GPIO15 SCL)
    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = imulog_hal::I2cConfig::FAST.frequency;
    let display_bus = I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, i2c_config);
    let display = Ssd1306::new(HalI2c::new(display_bus));

    let button_a = Input::new(p.PIN_5, Pull::Up);
    let button_b = Input::new(p.PIN_6, Pull::Up);

    let alert_row = config.alert_row;
    let refresh_ms = config.display_refresh_ms;

    spawn_core1(p.CORE1, CORE1_STACK.init(Stack::new()), move || {
        let executor1 = EXECUTOR1.init(Executor::new());
        executor1.run(|spawner| {
            spawner
                .spawn(tasks::display_task(display, alert_row, refresh_ms))
                .unwrap();
            spawner
                .spawn(tasks::button_task(button_a, InputLine::Primary))
                .unwrap();
            spawner
                .spawn(tasks::button_task(button_b, InputLine::Secondary))
                .unwrap();
        })
    });
    info!("Core 1 started");

    // Motion sensor on I2C0 (GPIO0 SDA, GPIO1 SCL)
    let sensor_bus = I2c::new_blocking(p.I2C0, p.PIN_1, p.PIN_0, i2c_config);
    let mut sensor = Mpu6050::new(HalI2c::new(sensor_bus), Delay);
    match sensor.verify_identity() {
        Ok(()) => info!("MPU6050 found"),
        Err(e) => warn!("MPU6050 identity check failed: {}", e),
    }

    // SD card on SPI0
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = storage::INIT_HZ;
    let spi = Spi::new_blocking(p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);
    let sd_spi = ExclusiveDevice::new(spi, cs, Delay).unwrap();
    let storage = SdStorage::new(SdCard::new(sd_spi, Delay), board::set_sd_clock);

    // Status LED and buzzer
    let led = RgbLed::new(
        RpOutput::new(Output::new(p.PIN_13, Level::Low)),
        RpOutput::new(Output::new(p.PIN_11, Level::Low)),
        RpOutput::new(Output::new(p.PIN_12, Level::Low)),
    );
    let pwm = Pwm::new_output_b(p.PWM_SLICE2, p.PIN_21, PwmConfig::default());
    let buzzer = Buzzer::new(PwmBuzzer::new(pwm), Delay);
    let feedback = StatusFeedback::new(led, buzzer);

    // Console on UART1 (GPIO8 TX, GPIO9 RX), 115200 baud
    let tx_buf = TX_BUF.init([0u8; 512]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART1, p.PIN_8, p.PIN_9, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    let console = UartConsole::new(rx, tx);

    let clock = RpRtc::new(Rtc::new(p.RTC));

    let peripherals = Peripherals {
        storage,
        sensor,
        clock,
        feedback,
        console,
        status: SignalSink,
        delay: Delay,
    };

    let executor0 = EXECUTOR0.init(Executor::new());
    executor0.run(|spawner| {
        spawner
            .spawn(tasks::controller_task(peripherals, config))
            .unwrap();
        info!("All tasks spawned, firmware running");
    })
}

/// Parse the embedded logger.toml, falling back to built-in defaults
fn load_config() -> LoggerConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration: {}", config);
            config.sanitized()
        }
        Err(e) => {
            // build.rs validates logger.toml, so this only trips on a parser mismatch
            error!("Failed to parse embedded config: {}", e);
            LoggerConfig::new()
        }
    }
}
