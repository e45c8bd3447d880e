//! Display snapshot

use heapless::String;

/// Longest text the status display holds
pub const DISPLAY_TEXT_CAPACITY: usize = 119;

/// Bounded display text
pub type DisplayText = String<DISPLAY_TEXT_CAPACITY>;

/// Main menu, one 15-column display line per item
pub const MENU_ITEMS: [&str; 7] = [
    "1.Mount SD     ",
    "2.Unmount SD   ",
    "3.List dir     ",
    "4.Last file    ",
    "5.Free space   ",
    "6.Capture data ",
    "7.Format SD    ",
];

/// Layout selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Operation label on the alert row
    Alert,
    /// Menu from the top row
    Idle,
}

/// What the display should show
///
/// Always replaced as a whole value, never edited in place by a reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub mode: DisplayMode,
    pub text: DisplayText,
}

impl DisplayState {
    /// Default menu text in idle layout
    pub fn menu() -> Self {
        let mut text = DisplayText::new();
        for item in MENU_ITEMS {
            // 7 x 15 columns fits the capacity
            let _ = text.push_str(item);
        }
        Self {
            mode: DisplayMode::Idle,
            text,
        }
    }

    /// Alert layout showing `label`, cut to the capacity on a char boundary
    pub fn alert(label: &str) -> Self {
        let mut text = DisplayText::new();
        for c in label.chars() {
            if text.push(c).is_err() {
                break;
            }
        }
        Self {
            mode: DisplayMode::Alert,
            text,
        }
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::menu()
    }
}
