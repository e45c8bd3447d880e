//! Collaborator traits
//!
//! These traits define the interface between the control core and the
//! external drivers: sensor register protocol, display pixels, filesystem,
//! tone generator, LEDs, real-time clock and the text console.

pub mod clock;
pub mod console;
pub mod display;
pub mod feedback;
pub mod sensor;
pub mod storage;

pub use clock::{ClockError, DateTime, RealTimeClock};
pub use console::Console;
pub use display::{DisplayError, StatusSink, TextDisplay};
pub use feedback::{Feedback, Rgb, Tone};
pub use sensor::{MotionSensor, RawMotion, SensorError};
pub use storage::{
    DirEntry, EntryKind, OpenMode, PathBuf, SpaceInfo, Storage, StorageError, MAX_PATH_LEN,
};
