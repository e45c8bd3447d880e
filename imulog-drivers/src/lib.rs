//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator traits
//! defined in imulog-core, written against the imulog-hal traits:
//!
//! - Motion sensor (MPU6050 over I2C)
//! - Text display (SSD1306 128x64 OLED over I2C)
//! - Status feedback (RGB LED on three GPIOs, PWM buzzer)
//! - FAT volume usage for the free-space query

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod feedback;
pub mod sensor;
pub mod storage;
