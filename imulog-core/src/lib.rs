//! Board-agnostic control core for the motion data logger
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (motion sensor, storage, display, clock, feedback, console)
//! - Button edge debouncing shared with the interrupt context
//! - Cancellable capture sessions writing CSV records
//! - Display state and the change-driven display publisher
//! - Console line editing and command dispatch
//! - The main controller tying it all together
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod capture;
pub mod config;
pub mod console;
pub mod controller;
pub mod display;
pub mod input;
pub mod traits;

#[cfg(test)]
mod testing;
