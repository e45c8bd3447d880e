//! Button edge handling
//!
//! Edge handlers run in interrupt-like contexts and only store into atomics.
//! The controller drains the resulting flags once per tick.

mod debouncer;

pub use debouncer::{InputDebouncer, InputLine, DEBOUNCE_WINDOW_MS};
