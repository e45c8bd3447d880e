//! Main controller
//!
//! Ties the collaborators together: one `tick` per loop iteration reads the
//! sensor, handles at most one console byte and drains the button flags.

mod main_controller;
mod operation;
mod services;

pub use main_controller::{MainController, Peripherals, TickActions, SHORTCUT_PROMPT};
pub use operation::{Operation, Trigger};
pub use services::{DriveName, Services};
