//! Removable storage (filesystem) trait

use core::fmt;

use heapless::String;

/// Maximum path length handled by the core
pub const MAX_PATH_LEN: usize = 64;

/// Owned, bounded path buffer
pub type PathBuf = String<MAX_PATH_LEN>;

/// Errors from the storage driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// No volume mounted on the drive
    NotMounted,
    /// File or directory does not exist
    NotFound,
    /// Name is not valid for the filesystem
    InvalidName,
    /// Write protected or opened in the wrong mode
    Denied,
    /// Volume is full
    Full,
    /// The driver does not implement this operation
    Unsupported,
    /// Low-level I/O failure on the medium
    Io,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            StorageError::NotMounted => "volume not mounted",
            StorageError::NotFound => "no such file or directory",
            StorageError::InvalidName => "invalid name",
            StorageError::Denied => "access denied",
            StorageError::Full => "volume full",
            StorageError::Unsupported => "operation not supported",
            StorageError::Io => "I/O error",
        };
        f.write_str(msg)
    }
}

/// How a file is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OpenMode {
    /// Existing file, read only
    Read,
    /// Create the file, truncating it if it already exists
    CreateTruncate,
}

/// Directory entry type as shown by `ls`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryKind {
    Directory,
    ReadOnlyFile,
    WritableFile,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Directory => "directory",
            EntryKind::ReadOnlyFile => "read only file",
            EntryKind::WritableFile => "writable file",
        }
    }
}

/// One entry yielded while listing a directory
#[derive(Debug, Clone, Copy)]
pub struct DirEntry<'a> {
    pub name: &'a str,
    pub kind: EntryKind,
    pub size: u64,
}

/// Volume capacity in KiB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpaceInfo {
    pub total_kib: u32,
    pub free_kib: u32,
}

/// Trait for the filesystem on removable storage
///
/// File handles are plain values owned by the caller; every file operation
/// goes back through the storage so a handle never borrows it.
pub trait Storage {
    /// Open file handle
    type File;

    /// Name of the first registered drive
    fn default_drive(&self) -> &str;

    /// Check whether a drive name is registered
    fn has_drive(&self, name: &str) -> bool;

    /// Mount the volume on a drive
    fn mount(&mut self, drive: &str) -> Result<(), StorageError>;

    /// Unmount the volume on a drive and mark the medium not initialized
    fn unmount(&mut self, drive: &str) -> Result<(), StorageError>;

    /// Create a fresh filesystem on a drive
    fn format(&mut self, drive: &str) -> Result<(), StorageError>;

    /// Report total and free space on a drive
    fn free_space(&mut self, drive: &str) -> Result<SpaceInfo, StorageError>;

    /// Current working directory
    fn current_dir(&mut self) -> Result<PathBuf, StorageError>;

    /// Visit every entry of a directory in order
    fn list(
        &mut self,
        dir: &str,
        visit: &mut dyn FnMut(&DirEntry<'_>),
    ) -> Result<(), StorageError>;

    /// Open a file
    fn open(&mut self, path: &str, mode: OpenMode) -> Result<Self::File, StorageError>;

    /// Read into `buf`, returning the byte count (0 at end of file)
    fn read(&mut self, file: &mut Self::File, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Append all of `data`
    fn write(&mut self, file: &mut Self::File, data: &[u8]) -> Result<(), StorageError>;

    /// Force buffered writes to the medium
    fn sync(&mut self, file: &mut Self::File) -> Result<(), StorageError>;

    /// Close a file, flushing it
    fn close(&mut self, file: Self::File) -> Result<(), StorageError>;

    /// Check whether a file exists by opening it for reading
    ///
    /// Only `NotFound` means "does not exist"; any other failure is
    /// returned.
    fn exists(&mut self, path: &str) -> Result<bool, StorageError> {
        match self.open(path, OpenMode::Read) {
            Ok(file) => {
                let _ = self.close(file);
                Ok(true)
            }
            Err(StorageError::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
