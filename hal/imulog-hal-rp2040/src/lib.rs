//! RP2040-specific HAL for the motion data logger
//!
//! This crate provides RP2040 implementations of the shared `imulog-hal`
//! traits, plus the board glue the control core talks to directly:
//!
//! - GPIO output wrapper for the RGB status LED
//! - I2C adapter over any `embedded-hal` blocking bus
//! - PWM buzzer output
//! - On-chip RTC as the core's `RealTimeClock`
//! - Buffered UART as the core's `Console`

#![no_std]

pub mod gpio;
pub mod i2c;
pub mod pwm;
pub mod rtc;
pub mod uart;

pub use gpio::RpOutput;
pub use i2c::HalI2c;
pub use pwm::PwmBuzzer;
pub use rtc::RpRtc;
pub use uart::UartConsole;
