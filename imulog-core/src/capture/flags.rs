//! Capture reentrancy guard and cancellation flag
//!
//! Shared between the controller (writer of `running`) and the edge
//! handlers (writer of `cancel_requested`), so both fields are atomics.

use portable_atomic::{AtomicBool, Ordering};

use super::CaptureError;

/// Process-wide capture state
pub struct CaptureFlags {
    running: AtomicBool,
    cancel_requested: AtomicBool,
}

impl CaptureFlags {
    pub const fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
            cancel_requested: AtomicBool::new(false),
        }
    }

    /// Claim the single capture slot
    ///
    /// Fails with `AlreadyRunning` without touching any state if a session
    /// holds the slot. Any stale cancel request is dropped on success.
    pub fn try_begin(&self) -> Result<CaptureGuard<'_>, CaptureError> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CaptureError::AlreadyRunning)?;
        self.cancel_requested.store(false, Ordering::Release);
        Ok(CaptureGuard { flags: self })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Ask the running session to stop at its next check point
    ///
    /// Ignored while idle.
    pub fn request_cancel(&self) {
        if self.is_running() {
            self.cancel_requested.store(true, Ordering::Release);
        }
    }

    pub fn cancel_requested(&self) -> bool {
        self.cancel_requested.load(Ordering::Acquire)
    }
}

impl Default for CaptureFlags {
    fn default() -> Self {
        Self::new()
    }
}

/// Held for the lifetime of one session; releases the slot on drop
pub struct CaptureGuard<'a> {
    flags: &'a CaptureFlags,
}

impl CaptureGuard<'_> {
    pub fn cancel_requested(&self) -> bool {
        self.flags.cancel_requested()
    }
}

impl Drop for CaptureGuard<'_> {
    fn drop(&mut self) {
        self.flags.cancel_requested.store(false, Ordering::Release);
        self.flags.running.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_slot() {
        let flags = CaptureFlags::new();
        let guard = flags.try_begin().unwrap();
        assert!(flags.is_running());
        assert_eq!(flags.try_begin().err(), Some(CaptureError::AlreadyRunning));
        drop(guard);
        assert!(!flags.is_running());
        assert!(flags.try_begin().is_ok());
    }

    #[test]
    fn test_cancel_ignored_while_idle() {
        let flags = CaptureFlags::new();
        flags.request_cancel();
        assert!(!flags.cancel_requested());
    }

    #[test]
    fn test_cancel_cleared_on_release() {
        let flags = CaptureFlags::new();
        {
            let guard = flags.try_begin().unwrap();
            flags.request_cancel();
            assert!(guard.cancel_requested());
        }
        assert!(!flags.cancel_requested());
        assert!(!flags.is_running());
    }
}
