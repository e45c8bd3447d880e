//! Display traits
//!
//! The pixel driver only needs to place text; layout decisions (which
//! vertical offset, when to redraw) stay in [`crate::display`].

use crate::display::DisplayState;

/// Errors that can occur while driving the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus communication with the panel failed
    Communication,
    /// Coordinates outside the panel
    InvalidCoordinates,
    /// Panel not initialized yet
    NotInitialized,
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DisplayError::Communication => f.write_str("display bus error"),
            DisplayError::InvalidCoordinates => f.write_str("coordinates off panel"),
            DisplayError::NotInitialized => f.write_str("display not initialized"),
        }
    }
}

/// Trait for a text-capable frame-buffered display
pub trait TextDisplay {
    /// Clear the frame buffer
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text into the frame buffer
    ///
    /// - `x`: left edge in pixels
    /// - `y`: top edge in pixels
    /// - `text`: ASCII text, wrapped by the driver at the panel's right edge
    fn draw_text(&mut self, x: u8, y: u8, text: &str) -> Result<(), DisplayError>;

    /// Push the frame buffer to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;
}

/// Producer half of the display snapshot channel
///
/// Implementations must replace the published value as a whole so the
/// renderer never observes a half-written state.
pub trait StatusSink {
    /// Publish a new display state
    fn publish(&mut self, state: &DisplayState);
}
