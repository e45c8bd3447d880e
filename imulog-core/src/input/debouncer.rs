//! Two-line edge debouncer

use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use crate::capture::CaptureFlags;

/// Minimum gap between accepted edges on one line
pub const DEBOUNCE_WINDOW_MS: u32 = 300;

/// Logical input lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputLine {
    /// Capture start / cancel
    Primary,
    /// Mount / unmount toggle
    Secondary,
}

struct LineState {
    pending: AtomicBool,
    last_accepted_ms: AtomicU32,
}

impl LineState {
    const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
            last_accepted_ms: AtomicU32::new(0),
        }
    }

    /// Accept the edge if it falls outside the window
    fn accept(&self, now_ms: u32) -> bool {
        let last = self.last_accepted_ms.load(Ordering::Relaxed);
        if now_ms.wrapping_sub(last) > DEBOUNCE_WINDOW_MS {
            self.last_accepted_ms.store(now_ms, Ordering::Relaxed);
            true
        } else {
            false
        }
    }
}

/// Converts raw edges into press / toggle flags
///
/// `on_edge` never blocks: it performs a handful of atomic loads and stores.
/// Each line has exactly one writer (its edge handler) for `last_accepted_ms`.
pub struct InputDebouncer<'a> {
    capture: &'a CaptureFlags,
    primary: LineState,
    secondary: LineState,
}

impl<'a> InputDebouncer<'a> {
    pub const fn new(capture: &'a CaptureFlags) -> Self {
        Self {
            capture,
            primary: LineState::new(),
            secondary: LineState::new(),
        }
    }

    /// Record one falling edge seen at `now_ms` (monotonic, wrapping)
    pub fn on_edge(&self, line: InputLine, now_ms: u32) {
        match line {
            InputLine::Primary => {
                if self.capture.is_running() {
                    // An edge during capture only ever means cancel
                    self.capture.request_cancel();
                    self.primary.last_accepted_ms.store(now_ms, Ordering::Relaxed);
                } else if self.primary.accept(now_ms) {
                    self.primary.pending.store(true, Ordering::Release);
                }
            }
            InputLine::Secondary => {
                if self.secondary.accept(now_ms) {
                    self.secondary.pending.store(true, Ordering::Release);
                }
            }
        }
    }

    /// Consume a pending primary press
    pub fn take_press(&self) -> bool {
        self.primary.pending.swap(false, Ordering::AcqRel)
    }

    /// Consume a pending secondary toggle
    pub fn take_toggle(&self) -> bool {
        self.secondary.pending.swap(false, Ordering::AcqRel)
    }
}
