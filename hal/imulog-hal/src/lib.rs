//! imulog Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the logger's drivers
//! are written against. Chip-specific crates implement them, so the drivers
//! in `imulog-drivers` stay board-agnostic and can be exercised on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ imulog-drivers (MPU6050, SSD1306, LED,  │
//! │                 buzzer)                 │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  imulog-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ imulog-hal-   │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output (status LEDs)
//! - [`i2c::I2cBus`] - Blocking I2C master (motion sensor, OLED)
//! - [`pwm::PwmOutput`] - Duty-cycle output (buzzer)

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod pwm;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use i2c::{I2cBus, I2cConfig, I2cError};
pub use pwm::PwmOutput;
