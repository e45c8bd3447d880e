//! Status display
//!
//! The controller publishes whole [`DisplayState`] snapshots; the display
//! context renders the latest one with [`DisplayPublisher`].

mod publisher;
mod state;

pub use publisher::DisplayPublisher;
pub use state::{DisplayMode, DisplayState, DisplayText, DISPLAY_TEXT_CAPACITY, MENU_ITEMS};
