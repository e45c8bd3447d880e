//! Operator-visible operations and their feedback

use crate::traits::{Rgb, Tone};

/// Something the operator can trigger with a digit or a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operation {
    Mount,
    Unmount,
    List,
    ShowLast,
    FreeSpace,
    Capture,
    Format,
    Help,
}

/// Where the request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    /// Digit typed on the console
    Shortcut,
    /// Physical button
    Button,
}

impl Operation {
    /// Map a digit `'1'..='8'` to its operation
    pub fn from_shortcut(byte: u8) -> Option<Self> {
        let op = match byte {
            b'1' => Operation::Mount,
            b'2' => Operation::Unmount,
            b'3' => Operation::List,
            b'4' => Operation::ShowLast,
            b'5' => Operation::FreeSpace,
            b'6' => Operation::Capture,
            b'7' => Operation::Format,
            b'8' => Operation::Help,
            _ => return None,
        };
        Some(op)
    }

    /// Alert text while the operation runs
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Mount => "Mounting SD",
            Operation::Unmount => "Unmounting SD",
            Operation::List => "Listing files",
            Operation::ShowLast => "Last file",
            Operation::FreeSpace => "Checking space",
            Operation::Capture => "Capturing data",
            Operation::Format => "Formatting SD",
            Operation::Help => "Help",
        }
    }

    /// Console line printed before the operation starts
    pub fn banner(&self) -> &'static str {
        match self {
            Operation::Mount => "Mounting SD...",
            Operation::Unmount => "Unmounting SD. Please wait...",
            Operation::List => "Listing files on the SD card.",
            Operation::ShowLast => "Showing contents of the last file...",
            Operation::FreeSpace => "Reading free space on the SD.",
            Operation::Capture => "Capturing data...",
            Operation::Format => "Formatting the SD card. Please wait...",
            Operation::Help => "",
        }
    }

    /// Console line printed once the operation is done
    pub fn epilogue(&self) -> Option<&'static str> {
        match self {
            Operation::List => Some("Listing complete."),
            Operation::FreeSpace => Some("Free space read."),
            Operation::Format => Some("Format complete."),
            _ => None,
        }
    }

    /// LED colour while busy; `None` leaves the LEDs alone
    pub fn busy_leds(&self) -> Option<Rgb> {
        match self {
            Operation::Mount => Some(Rgb::YELLOW),
            Operation::Unmount => Some(Rgb::OFF),
            Operation::List => Some(Rgb::GREEN),
            Operation::ShowLast | Operation::FreeSpace => Some(Rgb::CYAN),
            Operation::Capture => Some(Rgb::RED),
            Operation::Format => Some(Rgb::WHITE),
            Operation::Help => None,
        }
    }

    /// Beep pattern announcing the operation
    pub fn tone(&self, trigger: Trigger) -> Option<Tone> {
        // Button-driven mount toggles get a longer beep
        let toggle_ms = match trigger {
            Trigger::Shortcut => 250,
            Trigger::Button => 500,
        };
        match self {
            Operation::Mount => Some(Tone::new(50, 1, toggle_ms)),
            Operation::Unmount => Some(Tone::new(50, 2, toggle_ms)),
            Operation::List => Some(Tone::new(50, 1, 100)),
            Operation::ShowLast => Some(Tone::new(50, 2, 100)),
            Operation::FreeSpace => Some(Tone::new(50, 1, 700)),
            Operation::Capture => Some(Tone::new(50, 1, 1200)),
            Operation::Format => Some(Tone::new(80, 3, 1000)),
            Operation::Help => None,
        }
    }
}
