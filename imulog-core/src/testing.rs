//! Host-side collaborator mocks for unit tests

use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use embedded_hal_async::delay::DelayNs;

use crate::capture::CaptureFlags;
use crate::display::DisplayState;
use crate::traits::*;

/// Open file in [`RamStorage`]
pub struct RamFile {
    name: String,
    pos: usize,
}

/// In-memory flat filesystem with one drive, `0:`
#[derive(Default)]
pub struct RamStorage {
    pub mounted: bool,
    pub fail_mount: bool,
    pub fail_unmount: bool,
    pub fail_writes_after: Option<usize>,
    /// Fail the next read-mode open with `Io`
    pub fail_next_read_open: bool,
    files: BTreeMap<String, Vec<u8>>,
    open: Vec<String>,
    writes: usize,
    cancel_hook: Option<(Rc<CaptureFlags>, usize)>,
}

impl RamStorage {
    pub fn mounted() -> Self {
        Self {
            mounted: true,
            ..Default::default()
        }
    }

    pub fn insert(&mut self, name: &str, contents: &str) {
        self.files.insert(name.into(), contents.as_bytes().to_vec());
    }

    pub fn contents(&self, name: &str) -> Option<String> {
        self.files
            .get(name)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn is_closed(&self, name: &str) -> bool {
        !self.open.iter().any(|n| n == name)
    }

    /// Request a capture cancel once `writes` writes have succeeded
    pub fn cancel_after_writes(&mut self, flags: Rc<CaptureFlags>, writes: usize) {
        self.cancel_hook = Some((flags, writes));
    }

    fn check_mounted(&self) -> Result<(), StorageError> {
        if self.mounted {
            Ok(())
        } else {
            Err(StorageError::NotMounted)
        }
    }
}

impl Storage for RamStorage {
    type File = RamFile;

    fn default_drive(&self) -> &str {
        "0:"
    }

    fn has_drive(&self, name: &str) -> bool {
        name == "0:"
    }

    fn mount(&mut self, _drive: &str) -> Result<(), StorageError> {
        if self.fail_mount {
            return Err(StorageError::Io);
        }
        self.mounted = true;
        Ok(())
    }

    fn unmount(&mut self, _drive: &str) -> Result<(), StorageError> {
        self.check_mounted()?;
        if self.fail_unmount {
            return Err(StorageError::Io);
        }
        self.mounted = false;
        Ok(())
    }

    fn format(&mut self, _drive: &str) -> Result<(), StorageError> {
        self.files.clear();
        Ok(())
    }

    fn free_space(&mut self, _drive: &str) -> Result<SpaceInfo, StorageError> {
        self.check_mounted()?;
        let used: usize = self.files.values().map(|f| f.len()).sum();
        Ok(SpaceInfo {
            total_kib: 1024,
            free_kib: 1024 - (used / 1024) as u32,
        })
    }

    fn current_dir(&mut self) -> Result<PathBuf, StorageError> {
        self.check_mounted()?;
        PathBuf::try_from("/").map_err(|_| StorageError::InvalidName)
    }

    fn list(
        &mut self,
        _dir: &str,
        visit: &mut dyn FnMut(&DirEntry<'_>),
    ) -> Result<(), StorageError> {
        self.check_mounted()?;
        for (name, data) in &self.files {
            visit(&DirEntry {
                name: name.as_str(),
                kind: EntryKind::WritableFile,
                size: data.len() as u64,
            });
        }
        Ok(())
    }

    fn open(&mut self, path: &str, mode: OpenMode) -> Result<RamFile, StorageError> {
        self.check_mounted()?;
        if mode == OpenMode::Read && self.fail_next_read_open {
            self.fail_next_read_open = false;
            return Err(StorageError::Io);
        }
        match mode {
            OpenMode::Read if !self.files.contains_key(path) => {
                return Err(StorageError::NotFound)
            }
            OpenMode::Read => {}
            OpenMode::CreateTruncate => {
                self.files.insert(path.into(), Vec::new());
            }
        }
        self.open.push(path.into());
        Ok(RamFile {
            name: path.into(),
            pos: 0,
        })
    }

    fn read(&mut self, file: &mut RamFile, buf: &mut [u8]) -> Result<usize, StorageError> {
        let data = self.files.get(&file.name).ok_or(StorageError::NotFound)?;
        let n = buf.len().min(data.len() - file.pos);
        buf[..n].copy_from_slice(&data[file.pos..file.pos + n]);
        file.pos += n;
        Ok(n)
    }

    fn write(&mut self, file: &mut RamFile, data: &[u8]) -> Result<(), StorageError> {
        if let Some(limit) = self.fail_writes_after {
            if self.writes >= limit {
                return Err(StorageError::Io);
            }
        }
        let contents = self.files.get_mut(&file.name).ok_or(StorageError::NotFound)?;
        contents.extend_from_slice(data);
        self.writes += 1;
        if let Some((flags, after)) = &self.cancel_hook {
            if self.writes == *after {
                flags.request_cancel();
            }
        }
        Ok(())
    }

    fn sync(&mut self, _file: &mut RamFile) -> Result<(), StorageError> {
        Ok(())
    }

    fn close(&mut self, file: RamFile) -> Result<(), StorageError> {
        if let Some(pos) = self.open.iter().position(|n| *n == file.name) {
            self.open.remove(pos);
        }
        Ok(())
    }
}

/// Sensor returning a counter-derived sample
#[derive(Default)]
pub struct MockSensor {
    pub reads: usize,
    pub resets: usize,
    pub fail_after: Option<usize>,
}

impl MotionSensor for MockSensor {
    fn reset(&mut self) -> Result<(), SensorError> {
        self.resets += 1;
        Ok(())
    }

    fn read_raw(&mut self) -> Result<RawMotion, SensorError> {
        if let Some(limit) = self.fail_after {
            if self.reads >= limit {
                return Err(SensorError::Bus);
            }
        }
        self.reads += 1;
        let n = self.reads as i16;
        Ok(RawMotion {
            accel: [n, -n, 16384],
            gyro: [0, n, -1],
            temp: 0,
        })
    }
}

/// Delay that returns immediately and records the requested time
#[derive(Default)]
pub struct MockDelay {
    pub total_ms: u32,
    pub calls: usize,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ms += ns / 1_000_000;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.calls += 1;
        self.total_ms += ms;
    }
}

/// Records draw calls
#[derive(Default)]
pub struct MockDisplay {
    pub clears: usize,
    pub flushes: usize,
    pub fail_next: bool,
    pub draws: Vec<(u8, u8, String)>,
}

impl MockDisplay {
    pub fn last_text(&self) -> Option<(u8, u8, &str)> {
        self.draws.last().map(|(x, y, t)| (*x, *y, t.as_str()))
    }
}

impl TextDisplay for MockDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        if self.fail_next {
            self.fail_next = false;
            return Err(DisplayError::Communication);
        }
        self.clears += 1;
        Ok(())
    }

    fn draw_text(&mut self, x: u8, y: u8, text: &str) -> Result<(), DisplayError> {
        self.draws.push((x, y, text.into()));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.flushes += 1;
        Ok(())
    }
}

/// Console fed from a byte queue, capturing all output
#[derive(Default)]
pub struct MockConsole {
    pub input: VecDeque<u8>,
    pub output: String,
}

impl MockConsole {
    pub fn type_str(&mut self, text: &str) {
        self.input.extend(text.bytes());
    }
}

impl core::fmt::Write for MockConsole {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.output.push_str(s);
        Ok(())
    }
}

impl Console for MockConsole {
    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }
}

#[derive(Default)]
pub struct MockClock {
    pub now: Option<DateTime>,
}

impl RealTimeClock for MockClock {
    fn now(&mut self) -> Result<DateTime, ClockError> {
        self.now.ok_or(ClockError::NotRunning)
    }

    fn set(&mut self, datetime: DateTime) -> Result<(), ClockError> {
        self.now = Some(datetime);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockFeedback {
    pub leds: Vec<Rgb>,
    pub beeps: Vec<Tone>,
}

impl Feedback for MockFeedback {
    fn set_leds(&mut self, rgb: Rgb) {
        self.leds.push(rgb);
    }

    fn beep(&mut self, tone: Tone) {
        self.beeps.push(tone);
    }
}

#[derive(Default)]
pub struct MockStatus {
    pub published: Vec<DisplayState>,
}

impl StatusSink for MockStatus {
    fn publish(&mut self, state: &DisplayState) {
        self.published.push(state.clone());
    }
}
