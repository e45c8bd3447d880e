//! Cross-core shared state
//!
//! The controller on core 0 and the display and button tasks on core 1 only
//! meet here. The flags are lock-free atomics; the display snapshot goes
//! through a latest-value signal.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use imulog_core::capture::CaptureFlags;
use imulog_core::display::DisplayState;
use imulog_core::input::InputDebouncer;
use imulog_core::traits::StatusSink;

/// Capture running / cancel flags
pub static CAPTURE: CaptureFlags = CaptureFlags::new();

/// Debounced button state, fed by the button tasks
pub static INPUTS: InputDebouncer<'static> = InputDebouncer::new(&CAPTURE);

/// Latest display state published by the controller
pub static DISPLAY_STATE: Signal<CriticalSectionRawMutex, DisplayState> = Signal::new();

/// Controller-side handle publishing into [`DISPLAY_STATE`]
pub struct SignalSink;

impl StatusSink for SignalSink {
    fn publish(&mut self, state: &DisplayState) {
        DISPLAY_STATE.signal(state.clone());
    }
}
