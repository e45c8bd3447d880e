//! Cancellable capture loop

use embedded_hal_async::delay::DelayNs;

use super::filename::{next_free_name, LogName};
use super::flags::{CaptureFlags, CaptureGuard};
use super::record::{format_row, HEADER};
use super::CaptureError;
use crate::config::LoggerConfig;
use crate::traits::{MotionSensor, OpenMode, Storage};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureOutcome {
    /// All samples were written
    Completed,
    /// A cancel request stopped the session early
    Cancelled,
}

/// Result of a session that reached its end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureReport {
    pub outcome: CaptureOutcome,
    /// Data rows on the medium, header excluded
    pub rows: u16,
    pub name: LogName,
}

/// One bounded sampling run
///
/// `Idle -> Running -> {Completed, Cancelled} -> Idle`. The running slot in
/// [`CaptureFlags`] is held for the whole run and released on every exit
/// path, which also clears any pending cancel request.
pub struct CaptureSession<'a> {
    flags: &'a CaptureFlags,
    sample_interval_ms: u32,
    max_samples: u16,
}

impl<'a> CaptureSession<'a> {
    pub fn new(flags: &'a CaptureFlags, config: &LoggerConfig) -> Self {
        let config = config.sanitized();
        Self {
            flags,
            sample_interval_ms: config.sample_interval_ms,
            max_samples: config.max_samples,
        }
    }

    /// Run one session to completion, cancellation or failure
    ///
    /// Returns `AlreadyRunning` without creating a file when another
    /// session holds the slot.
    pub async fn run<S, M, D>(
        &self,
        storage: &mut S,
        sensor: &mut M,
        delay: &mut D,
    ) -> Result<CaptureReport, CaptureError>
    where
        S: Storage,
        M: MotionSensor,
        D: DelayNs,
    {
        let guard = self.flags.try_begin()?;
        let name = next_free_name(storage)?;

        let mut file = storage
            .open(&name, OpenMode::CreateTruncate)
            .map_err(CaptureError::Open)?;

        let written = self
            .write_rows(&guard, storage, &mut file, sensor, delay)
            .await;
        let closed = storage.close(file);
        drop(guard);

        let (outcome, rows) = written?;
        closed.map_err(CaptureError::Write)?;

        Ok(CaptureReport {
            outcome,
            rows,
            name,
        })
    }

    async fn write_rows<S, M, D>(
        &self,
        guard: &CaptureGuard<'_>,
        storage: &mut S,
        file: &mut S::File,
        sensor: &mut M,
        delay: &mut D,
    ) -> Result<(CaptureOutcome, u16), CaptureError>
    where
        S: Storage,
        M: MotionSensor,
        D: DelayNs,
    {
        storage
            .write(file, HEADER.as_bytes())
            .map_err(CaptureError::Header)?;
        storage.sync(file).map_err(CaptureError::Header)?;

        for index in 0..self.max_samples {
            if guard.cancel_requested() {
                storage.sync(file).map_err(CaptureError::Write)?;
                return Ok((CaptureOutcome::Cancelled, index));
            }

            let sample = sensor.read_raw().map_err(CaptureError::Sensor)?;
            let row = format_row(index, &sample);
            storage
                .write(file, row.as_bytes())
                .map_err(CaptureError::Write)?;
            storage.sync(file).map_err(CaptureError::Write)?;

            delay.delay_ms(self.sample_interval_ms).await;
        }

        Ok((CaptureOutcome::Completed, self.max_samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockDelay, MockSensor, RamStorage};
    use crate::traits::{SensorError, StorageError};
    use embassy_futures::block_on;
    use std::rc::Rc;

    fn lines(storage: &RamStorage, name: &str) -> std::vec::Vec<std::string::String> {
        let text = storage.contents(name).unwrap();
        text.lines().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_complete_session() {
        let flags = CaptureFlags::new();
        let session = CaptureSession::new(&flags, &LoggerConfig::default());
        let mut storage = RamStorage::mounted();
        let mut sensor = MockSensor::default();
        let mut delay = MockDelay::default();

        let report = block_on(session.run(&mut storage, &mut sensor, &mut delay)).unwrap();

        assert_eq!(report.outcome, CaptureOutcome::Completed);
        assert_eq!(report.rows, 128);
        assert_eq!(report.name.as_str(), "log_000.csv");
        let rows = lines(&storage, "log_000.csv");
        assert_eq!(rows.len(), 129);
        assert_eq!(rows[0], "id,ax,ay,az,gx,gy,gz,temp");
        assert!(rows[1].starts_with("1,"));
        assert!(rows[128].starts_with("128,"));
        assert_eq!(delay.total_ms, 128 * 100);
        assert!(!flags.is_running());
        assert!(storage.is_closed("log_000.csv"));
    }

    #[test]
    fn test_cancel_at_sample_k() {
        for k in [0usize, 1, 5, 127] {
            let flags = Rc::new(CaptureFlags::new());
            let session = CaptureSession::new(&flags, &LoggerConfig::default());
            let mut storage = RamStorage::mounted();
            // Header is write 1, row k is write k + 1
            storage.cancel_after_writes(Rc::clone(&flags), k + 1);
            let mut sensor = MockSensor::default();
            let mut delay = MockDelay::default();

            let report = block_on(session.run(&mut storage, &mut sensor, &mut delay)).unwrap();

            assert_eq!(report.outcome, CaptureOutcome::Cancelled);
            assert_eq!(report.rows as usize, k);
            let rows = lines(&storage, "log_000.csv");
            assert_eq!(rows.len(), k + 1);
            assert!(storage.contents("log_000.csv").unwrap().ends_with('\n'));
            assert!(!flags.cancel_requested());
            assert!(!flags.is_running());
        }
    }

    #[test]
    fn test_second_session_is_noop() {
        let flags = CaptureFlags::new();
        let session = CaptureSession::new(&flags, &LoggerConfig::default());
        let mut storage = RamStorage::mounted();
        let mut sensor = MockSensor::default();
        let mut delay = MockDelay::default();

        let _held = flags.try_begin().unwrap();
        let result = block_on(session.run(&mut storage, &mut sensor, &mut delay));

        assert_eq!(result, Err(CaptureError::AlreadyRunning));
        assert_eq!(storage.file_count(), 0);
        assert!(flags.is_running());
        assert_eq!(sensor.reads, 0);
    }

    #[test]
    fn test_picks_next_free_name() {
        let flags = CaptureFlags::new();
        let session = CaptureSession::new(&flags, &LoggerConfig::default());
        let mut storage = RamStorage::mounted();
        for n in 0..=5 {
            storage.insert(crate::capture::log_name(n).as_str(), "");
        }
        let mut sensor = MockSensor::default();
        let mut delay = MockDelay::default();

        let report = block_on(session.run(&mut storage, &mut sensor, &mut delay)).unwrap();
        assert_eq!(report.name.as_str(), "log_006.csv");
    }

    #[test]
    fn test_unreadable_existing_file_is_not_overwritten() {
        let flags = CaptureFlags::new();
        let session = CaptureSession::new(&flags, &LoggerConfig::default());
        let mut storage = RamStorage::mounted();
        storage.insert("log_000.csv", "precious\n");
        storage.fail_next_read_open = true;
        let mut sensor = MockSensor::default();
        let mut delay = MockDelay::default();

        let result = block_on(session.run(&mut storage, &mut sensor, &mut delay));

        assert_eq!(result, Err(CaptureError::Open(StorageError::Io)));
        assert_eq!(storage.contents("log_000.csv").as_deref(), Some("precious\n"));
        assert_eq!(storage.file_count(), 1);
        assert_eq!(sensor.reads, 0);
        assert!(!flags.is_running());
    }

    #[test]
    fn test_unmounted_storage_fails_open() {
        let flags = CaptureFlags::new();
        let session = CaptureSession::new(&flags, &LoggerConfig::default());
        let mut storage = RamStorage::default();
        let mut sensor = MockSensor::default();
        let mut delay = MockDelay::default();

        let result = block_on(session.run(&mut storage, &mut sensor, &mut delay));
        assert_eq!(result, Err(CaptureError::Open(StorageError::NotMounted)));
        assert!(!flags.is_running());
    }

    #[test]
    fn test_write_failure_aborts() {
        let flags = CaptureFlags::new();
        let session = CaptureSession::new(&flags, &LoggerConfig::default());
        let mut storage = RamStorage::mounted();
        storage.fail_writes_after = Some(3);
        let mut sensor = MockSensor::default();
        let mut delay = MockDelay::default();

        let result = block_on(session.run(&mut storage, &mut sensor, &mut delay));
        assert_eq!(result, Err(CaptureError::Write(StorageError::Io)));
        // Header plus two rows made it before the failure
        assert_eq!(lines(&storage, "log_000.csv").len(), 3);
        assert!(storage.is_closed("log_000.csv"));
        assert!(!flags.is_running());
    }

    #[test]
    fn test_sensor_fault_aborts() {
        let flags = CaptureFlags::new();
        let session = CaptureSession::new(&flags, &LoggerConfig::default());
        let mut storage = RamStorage::mounted();
        let mut sensor = MockSensor::default();
        sensor.fail_after = Some(2);
        let mut delay = MockDelay::default();

        let result = block_on(session.run(&mut storage, &mut sensor, &mut delay));
        assert_eq!(result, Err(CaptureError::Sensor(SensorError::Bus)));
        assert_eq!(lines(&storage, "log_000.csv").len(), 3);
    }

    #[test]
    fn test_configured_sample_count() {
        let flags = CaptureFlags::new();
        let mut config = LoggerConfig::default();
        config.max_samples = 4;
        config.sample_interval_ms = 10;
        let session = CaptureSession::new(&flags, &config);
        let mut storage = RamStorage::mounted();
        let mut sensor = MockSensor::default();
        let mut delay = MockDelay::default();

        let report = block_on(session.run(&mut storage, &mut sensor, &mut delay)).unwrap();
        assert_eq!(report.rows, 4);
        assert_eq!(delay.total_ms, 40);
    }
}
