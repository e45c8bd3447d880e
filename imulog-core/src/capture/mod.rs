//! Capture sessions
//!
//! One session samples the motion sensor into a freshly named CSV file,
//! flushing after every row so a cancelled or interrupted session always
//! leaves a valid prefix on the medium.

pub mod filename;
pub mod flags;
pub mod record;
pub mod session;

pub use filename::{log_name, next_free_name, LogName, MAX_LOG_FILES};
pub use flags::{CaptureFlags, CaptureGuard};
pub use record::{format_row, Celsius10, RowBuf, HEADER};
pub use session::{CaptureOutcome, CaptureReport, CaptureSession};

use core::fmt;

use crate::traits::{SensorError, StorageError};

/// Capture failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureError {
    /// Another session holds the capture slot
    AlreadyRunning,
    /// Every `log_NNN.csv` name is taken
    NamesExhausted,
    /// The record file could not be created
    Open(StorageError),
    /// The header row could not be written
    Header(StorageError),
    /// A data row could not be written or flushed
    Write(StorageError),
    /// The sensor did not deliver a sample
    Sensor(SensorError),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::AlreadyRunning => f.write_str("capture already running"),
            CaptureError::NamesExhausted => {
                write!(f, "no free file name left ({} files exist)", MAX_LOG_FILES)
            }
            CaptureError::Open(e) => {
                write!(f, "could not open the file for writing, mount the card ({})", e)
            }
            CaptureError::Header(e) => write!(f, "failed to write header ({})", e),
            CaptureError::Write(e) => write!(f, "failed to write to file ({})", e),
            CaptureError::Sensor(e) => write!(f, "sample failed ({})", e),
        }
    }
}
