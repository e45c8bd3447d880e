//! Record file naming

use core::fmt::Write;

use heapless::String;

use super::CaptureError;
use crate::traits::Storage;

/// Number of distinct `log_NNN.csv` names
pub const MAX_LOG_FILES: u16 = 1000;

/// Owned record file name, e.g. `log_007.csv`
pub type LogName = String<16>;

/// Build the name for counter `n` (0..=999)
pub fn log_name(n: u16) -> LogName {
    let mut name = LogName::new();
    // "log_" + 3 digits + ".csv" always fits
    let _ = write!(name, "log_{:03}.csv", n % MAX_LOG_FILES);
    name
}

/// First counter whose name is not reported as taken
///
/// Stops at the first lookup error.
pub fn first_unused<E>(
    mut taken: impl FnMut(&str) -> Result<bool, E>,
) -> Result<Option<LogName>, E> {
    for name in (0..MAX_LOG_FILES).map(log_name) {
        if !taken(name.as_str())? {
            return Ok(Some(name));
        }
    }
    Ok(None)
}

/// Look up the first unused record file name
///
/// Never reuses a name: with all 1000 names taken this is an error, and a
/// name whose lookup fails for any reason other than "not found" aborts
/// with `Open`.
pub fn next_free_name<S: Storage>(storage: &mut S) -> Result<LogName, CaptureError> {
    first_unused(|name| storage.exists(name))
        .map_err(CaptureError::Open)?
        .ok_or(CaptureError::NamesExhausted)
}
