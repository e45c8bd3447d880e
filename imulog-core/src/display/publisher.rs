//! Change-driven renderer

use super::state::{DisplayMode, DisplayState};
use crate::traits::{DisplayError, TextDisplay};

/// Renders display snapshots, skipping redraws of an unchanged state
pub struct DisplayPublisher {
    alert_row: u8,
    last: Option<DisplayState>,
}

impl DisplayPublisher {
    pub const fn new(alert_row: u8) -> Self {
        Self {
            alert_row,
            last: None,
        }
    }

    /// Draw `state` unless it is what is already on screen
    ///
    /// Returns whether the panel was redrawn. A failed draw leaves the
    /// publisher invalidated so the next call retries.
    pub fn render<D: TextDisplay>(
        &mut self,
        state: &DisplayState,
        display: &mut D,
    ) -> Result<bool, DisplayError> {
        if self.last.as_ref() == Some(state) {
            return Ok(false);
        }
        self.last = None;

        let row = match state.mode {
            DisplayMode::Alert => self.alert_row,
            DisplayMode::Idle => 0,
        };
        display.clear()?;
        display.draw_text(0, row, &state.text)?;
        display.flush()?;

        self.last = Some(state.clone());
        Ok(true)
    }

    /// Force the next `render` to redraw
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockDisplay;

    #[test]
    fn test_layout_by_mode() {
        let mut publisher = DisplayPublisher::new(25);
        let mut display = MockDisplay::default();

        publisher.render(&DisplayState::alert("Mounting SD"), &mut display).unwrap();
        assert_eq!(display.last_text(), Some((0, 25, "Mounting SD")));

        publisher.render(&DisplayState::menu(), &mut display).unwrap();
        let (x, y, text) = display.last_text().unwrap();
        assert_eq!((x, y), (0, 0));
        assert!(text.starts_with("1.Mount SD"));
        assert_eq!(display.clears, 2);
        assert_eq!(display.flushes, 2);
    }

    #[test]
    fn test_unchanged_state_skipped() {
        let mut publisher = DisplayPublisher::new(25);
        let mut display = MockDisplay::default();
        let state = DisplayState::menu();

        assert!(publisher.render(&state, &mut display).unwrap());
        assert!(!publisher.render(&state, &mut display).unwrap());
        assert_eq!(display.flushes, 1);

        publisher.invalidate();
        assert!(publisher.render(&state, &mut display).unwrap());
        assert_eq!(display.flushes, 2);
    }

    #[test]
    fn test_failed_draw_retried() {
        let mut publisher = DisplayPublisher::new(25);
        let mut display = MockDisplay::default();
        display.fail_next = true;
        let state = DisplayState::menu();

        assert_eq!(
            publisher.render(&state, &mut display),
            Err(DisplayError::Communication)
        );
        assert!(publisher.render(&state, &mut display).unwrap());
    }
}
