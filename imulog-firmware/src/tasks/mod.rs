//! Embassy async tasks
//!
//! The controller runs on core 0; display and buttons run on core 1.

pub mod buttons;
pub mod controller;
pub mod display;

pub use buttons::button_task;
pub use controller::controller_task;
pub use display::display_task;
