//! SD card storage adapter
//!
//! Maps the core's `Storage` trait onto an `embedded-sdmmc` volume
//! manager. One logical drive ("0:") backed by the first FAT partition.
//! Files live in the root directory; `ls` can descend one level.
//!
//! The card is brought up at [`INIT_HZ`] on every mount and switched to
//! [`DATA_HZ`] once the volume is open. Free space is read from the FAT
//! directly since the volume manager does not expose it. Formatting is not
//! available: `embedded-sdmmc` cannot write a new filesystem.

use core::fmt::Write;

use defmt::*;
use embedded_sdmmc::{
    Block, BlockDevice, BlockIdx, Error as SdError, Mode, RawDirectory, RawFile, RawVolume,
    TimeSource, Timestamp, VolumeIdx, VolumeManager,
};
use heapless::String;

use imulog_core::traits::{
    DirEntry, EntryKind, OpenMode, PathBuf, SpaceInfo, Storage, StorageError,
};
use imulog_drivers::storage::{self as fat, volume_usage};

/// The only registered drive
pub const DRIVE: &str = "0:";

/// SD cards must be initialized at 400 kHz or below
pub const INIT_HZ: u32 = 400_000;

/// Clock once the card is out of identification mode
pub const DATA_HZ: u32 = 12_000_000;

/// Timestamp source for new directory entries
///
/// The RTC belongs to the console's clock service, so files get a fixed
/// creation date.
pub struct FixedTime;

impl TimeSource for FixedTime {
    fn get_timestamp(&self) -> Timestamp {
        Timestamp {
            year_since_1970: 54,
            zero_indexed_month: 0,
            zero_indexed_day: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }
}

fn map_error<E: core::fmt::Debug>(e: SdError<E>) -> StorageError {
    match e {
        SdError::NotFound => StorageError::NotFound,
        SdError::FilenameError(_) => StorageError::InvalidName,
        SdError::NotEnoughSpace => StorageError::Full,
        SdError::ReadOnly => StorageError::Denied,
        SdError::DeviceError(ref inner) => {
            warn!("SD device error: {}", Debug2Format(inner));
            StorageError::Io
        }
        _ => StorageError::Io,
    }
}

/// Strip the leading slash; nested paths are not supported for files
fn root_name(path: &str) -> Result<&str, StorageError> {
    let name = path.trim_start_matches('/');
    if name.is_empty() || name.contains('/') {
        return Err(StorageError::InvalidName);
    }
    Ok(name)
}

/// Read one block for the FAT usage scan
fn read_block<D: BlockDevice>(
    device: &D,
    lba: u32,
    out: &mut fat::Block,
) -> Result<(), StorageError>
where
    D::Error: core::fmt::Debug,
{
    let mut blocks = [Block::new()];
    device.read(&mut blocks, BlockIdx(lba)).map_err(|e| {
        warn!("SD block {} read failed: {}", lba, Debug2Format(&e));
        StorageError::Io
    })?;
    out.copy_from_slice(&blocks[0].contents);
    Ok(())
}

pub struct SdStorage<D: BlockDevice> {
    volumes: VolumeManager<D, FixedTime>,
    mounted: Option<(RawVolume, RawDirectory)>,
    /// Sets the card's SPI clock in Hz
    set_clock: fn(&D, u32),
}

impl<D: BlockDevice> SdStorage<D> {
    pub fn new(device: D, set_clock: fn(&D, u32)) -> Self {
        Self {
            volumes: VolumeManager::new(device, FixedTime),
            mounted: None,
            set_clock,
        }
    }

    fn clock(&mut self, hz: u32) {
        let set_clock = self.set_clock;
        self.volumes.device(|device| set_clock(device, hz));
    }

    fn root(&self) -> Result<RawDirectory, StorageError> {
        self.mounted
            .map(|(_, root)| root)
            .ok_or(StorageError::NotMounted)
    }

    fn check_drive(&self, drive: &str) -> Result<(), StorageError> {
        if drive == DRIVE {
            Ok(())
        } else {
            Err(StorageError::NotFound)
        }
    }
}

impl<D: BlockDevice> Storage for SdStorage<D>
where
    D::Error: core::fmt::Debug,
{
    type File = RawFile;

    fn default_drive(&self) -> &str {
        DRIVE
    }

    fn has_drive(&self, name: &str) -> bool {
        name == DRIVE
    }

    fn mount(&mut self, drive: &str) -> Result<(), StorageError> {
        self.check_drive(drive)?;
        if self.mounted.is_some() {
            return Ok(());
        }
        self.clock(INIT_HZ);
        let volume = self
            .volumes
            .open_raw_volume(VolumeIdx(0))
            .map_err(map_error)?;
        let root = match self.volumes.open_root_dir(volume) {
            Ok(root) => root,
            Err(e) => {
                let _ = self.volumes.close_volume(volume);
                return Err(map_error(e));
            }
        };
        self.mounted = Some((volume, root));
        self.clock(DATA_HZ);
        info!("SD volume mounted");
        Ok(())
    }

    fn unmount(&mut self, drive: &str) -> Result<(), StorageError> {
        self.check_drive(drive)?;
        // Handles stay recorded until both are closed
        let Some((volume, root)) = self.mounted else {
            return Ok(());
        };
        self.volumes.close_dir(root).map_err(map_error)?;
        if let Err(e) = self.volumes.close_volume(volume) {
            // Open files pin the volume; give it its root back
            self.mounted = match self.volumes.open_root_dir(volume) {
                Ok(root) => Some((volume, root)),
                Err(_) => {
                    warn!("SD root directory could not be reopened");
                    None
                }
            };
            return Err(map_error(e));
        }
        self.mounted = None;
        info!("SD volume unmounted");
        Ok(())
    }

    fn format(&mut self, drive: &str) -> Result<(), StorageError> {
        self.check_drive(drive)?;
        Err(StorageError::Unsupported)
    }

    fn free_space(&mut self, drive: &str) -> Result<SpaceInfo, StorageError> {
        self.check_drive(drive)?;
        self.root()?;
        self.volumes
            .device(|device| volume_usage(|lba, block| read_block(device, lba, block)))
    }

    fn current_dir(&mut self) -> Result<PathBuf, StorageError> {
        self.root()?;
        PathBuf::try_from("/").map_err(|_| StorageError::InvalidName)
    }

    fn list(
        &mut self,
        dir: &str,
        visit: &mut dyn FnMut(&DirEntry<'_>),
    ) -> Result<(), StorageError> {
        let root = self.root()?;
        let sub = dir.trim_matches('/');
        let nested = !sub.is_empty();
        let target = if !nested {
            root
        } else {
            self.volumes.open_dir(root, sub).map_err(map_error)?
        };

        let result = self.volumes.iterate_dir(target, |entry| {
            let mut name: String<16> = String::new();
            let _ = write!(name, "{}", entry.name);
            let kind = if entry.attributes.is_directory() {
                EntryKind::Directory
            } else if entry.attributes.is_read_only() {
                EntryKind::ReadOnlyFile
            } else {
                EntryKind::WritableFile
            };
            visit(&DirEntry {
                name: name.as_str(),
                kind,
                size: entry.size as u64,
            });
        });

        if nested {
            let _ = self.volumes.close_dir(target);
        }
        result.map_err(map_error)
    }

    fn open(&mut self, path: &str, mode: OpenMode) -> Result<RawFile, StorageError> {
        let root = self.root()?;
        let name = root_name(path)?;
        let mode = match mode {
            OpenMode::Read => Mode::ReadOnly,
            OpenMode::CreateTruncate => Mode::ReadWriteCreateOrTruncate,
        };
        self.volumes
            .open_file_in_dir(root, name, mode)
            .map_err(map_error)
    }

    fn read(&mut self, file: &mut RawFile, buf: &mut [u8]) -> Result<usize, StorageError> {
        self.volumes.read(*file, buf).map_err(map_error)
    }

    fn write(&mut self, file: &mut RawFile, data: &[u8]) -> Result<(), StorageError> {
        self.volumes
            .write(*file, data)
            .map(|_| ())
            .map_err(map_error)
    }

    fn sync(&mut self, file: &mut RawFile) -> Result<(), StorageError> {
        self.volumes.flush_file(*file).map_err(map_error)
    }

    fn close(&mut self, file: RawFile) -> Result<(), StorageError> {
        self.volumes.close_file(file).map_err(map_error)
    }
}
