//! Storage, clock and console operations shared by commands and shortcuts

use core::fmt::Write;

use heapless::String;

use crate::capture::LogName;
use crate::console::{Command, CommandError, CommandHandler, COMMANDS};
use crate::traits::{
    Console, DateTime, DirEntry, OpenMode, PathBuf, RealTimeClock, Storage, StorageError,
};

/// Owned drive name
pub type DriveName = String<16>;

/// Digit shortcut summary printed by `help`
const SHORTCUT_HELP: [&str; 8] = [
    "Type '1' to mount the SD card",
    "Type '2' to unmount the SD card",
    "Type '3' to list files",
    "Type '4' to show the last captured file",
    "Type '5' to get free space on the SD card",
    "Type '6' to capture data and save it to a file",
    "Type '7' to format the SD card",
    "Type '8' to show available commands",
];

/// Collaborators reachable from the console
///
/// Holds the `mounted` flag and the last capture's file name so the
/// command, shortcut and button paths all see the same state.
pub struct Services<S, C, O> {
    pub(crate) storage: S,
    pub(crate) clock: C,
    pub(crate) console: O,
    pub(crate) mounted: bool,
    pub(crate) last_log: Option<LogName>,
}

impl<S, C, O> Services<S, C, O>
where
    S: Storage,
    C: RealTimeClock,
    O: Console,
{
    pub fn new(storage: S, clock: C, console: O) -> Self {
        Self {
            storage,
            clock,
            console,
            mounted: false,
            last_log: None,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn last_log(&self) -> Option<&str> {
        self.last_log.as_deref()
    }

    /// Pick the named drive or the storage's first one
    pub fn resolve_drive<'a>(&self, drive: Option<&'a str>) -> Result<DriveName, CommandError<'a>> {
        match drive {
            Some(name) if self.storage.has_drive(name) => {
                DriveName::try_from(name).map_err(|_| CommandError::UnknownDrive(name))
            }
            Some(name) => Err(CommandError::UnknownDrive(name)),
            None => DriveName::try_from(self.storage.default_drive())
                .map_err(|_| CommandError::Storage(StorageError::InvalidName)),
        }
    }

    pub fn mount<'a>(&mut self, drive: Option<&'a str>) -> Result<(), CommandError<'a>> {
        let drive = self.resolve_drive(drive)?;
        self.storage.mount(&drive)?;
        self.mounted = true;
        let _ = writeln!(self.console, "SD ( {} ) mounted", drive);
        Ok(())
    }

    /// Unmount; the volume counts as not mounted afterwards even on failure
    pub fn unmount<'a>(&mut self, drive: Option<&'a str>) -> Result<(), CommandError<'a>> {
        let drive = self.resolve_drive(drive)?;
        self.storage.unmount(&drive)?;
        self.mounted = false;
        let _ = writeln!(self.console, "SD ( {} ) unmounted", drive);
        Ok(())
    }

    pub fn format<'a>(&mut self, drive: Option<&'a str>) -> Result<(), CommandError<'a>> {
        let drive = self.resolve_drive(drive)?;
        self.storage.format(&drive)?;
        Ok(())
    }

    pub fn free_space<'a>(&mut self, drive: Option<&'a str>) -> Result<(), CommandError<'a>> {
        let drive = self.resolve_drive(drive)?;
        let space = self.storage.free_space(&drive)?;
        let _ = writeln!(
            self.console,
            "{:>10} KiB total drive space.\n{:>10} KiB available.",
            space.total_kib, space.free_kib
        );
        Ok(())
    }

    /// List `path`, or the current directory
    pub fn list(&mut self, path: Option<&str>) -> Result<(), StorageError> {
        let dir = match path {
            Some(path) => PathBuf::try_from(path).map_err(|_| StorageError::InvalidName)?,
            None => self.storage.current_dir()?,
        };
        let _ = writeln!(self.console, "Directory Listing: {}", dir);

        let Self {
            storage, console, ..
        } = self;
        storage.list(&dir, &mut |entry: &DirEntry<'_>| {
            let _ = writeln!(
                console,
                "{} [{}] [size={}]",
                entry.name,
                entry.kind.as_str(),
                entry.size
            );
        })
    }

    /// Stream a file to the console
    pub fn cat(&mut self, file: &str) -> Result<(), StorageError> {
        let handle = self.storage.open(file, OpenMode::Read)?;
        self.stream_and_close(handle)
    }

    /// Print the file written by the most recent capture
    ///
    /// Reports its own failures on the console.
    pub fn show_last(&mut self) -> Result<(), StorageError> {
        let Some(name) = self.last_log.clone() else {
            let _ = writeln!(self.console, "No capture has been made since power-on.");
            return Err(StorageError::NotFound);
        };
        let handle = match self.storage.open(&name, OpenMode::Read) {
            Ok(handle) => handle,
            Err(e) => {
                let _ = writeln!(
                    self.console,
                    "[ERROR] Could not open {} for reading. Check that the card is mounted and the file exists.",
                    name
                );
                return Err(e);
            }
        };
        let _ = writeln!(self.console, "Contents of {}:", name);
        self.stream_and_close(handle)?;
        let _ = writeln!(self.console, "\nFinished reading {}.\n", name);
        Ok(())
    }

    fn stream_and_close(&mut self, mut handle: S::File) -> Result<(), StorageError> {
        let mut buf = [0u8; 64];
        let streamed = loop {
            match self.storage.read(&mut handle, &mut buf) {
                Ok(0) => break Ok(()),
                Ok(n) => self.console.write_bytes(&buf[..n]),
                Err(e) => break Err(e),
            }
        };
        let closed = self.storage.close(handle);
        streamed.and(closed)
    }

    pub fn set_clock<'a>(&mut self, datetime: DateTime) -> Result<(), CommandError<'a>> {
        self.clock.set(datetime).map_err(CommandError::Clock)?;
        let _ = writeln!(self.console, "Clock set to {}", datetime);
        Ok(())
    }

    pub fn print_help(&mut self) {
        let _ = writeln!(self.console, "\nAvailable commands:\n");
        for line in SHORTCUT_HELP {
            let _ = writeln!(self.console, "{}", line);
        }
        let _ = writeln!(self.console);
        for spec in COMMANDS.iter() {
            let _ = writeln!(self.console, "{}", spec.help);
        }
    }
}

impl<S, C, O> CommandHandler for Services<S, C, O>
where
    S: Storage,
    C: RealTimeClock,
    O: Console,
{
    type Console = O;

    fn console(&mut self) -> &mut O {
        &mut self.console
    }

    fn execute<'a>(&mut self, command: Command<'a>) -> Result<(), CommandError<'a>> {
        match command {
            Command::SetRtc(datetime) => self.set_clock(datetime),
            Command::Format { drive } => self.format(drive),
            Command::Mount { drive } => self.mount(drive),
            Command::Unmount { drive } => self.unmount(drive),
            Command::GetFree { drive } => self.free_space(drive),
            Command::Ls { path } => Ok(self.list(path)?),
            Command::Cat { file } => Ok(self.cat(file)?),
            Command::Help => {
                self.print_help();
                Ok(())
            }
        }
    }
}
