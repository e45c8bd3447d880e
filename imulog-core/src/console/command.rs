//! Command table and typed commands

use core::fmt;

use super::Args;
use crate::traits::{ClockError, DateTime, StorageError};

/// Console command names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandKind {
    SetRtc,
    Format,
    Mount,
    Unmount,
    GetFree,
    Ls,
    Cat,
    Help,
}

/// One command table row
pub struct CommandSpec {
    pub name: &'static str,
    pub help: &'static str,
    pub kind: CommandKind,
}

/// Command table, matched by exact name in order
pub static COMMANDS: [CommandSpec; 8] = [
    CommandSpec {
        name: "setrtc",
        help: "setrtc <DD> <MM> <YY> <hh> <mm> <ss>: Set Real Time Clock",
        kind: CommandKind::SetRtc,
    },
    CommandSpec {
        name: "format",
        help: "format [<drive#:>]: Format the SD card",
        kind: CommandKind::Format,
    },
    CommandSpec {
        name: "mount",
        help: "mount [<drive#:>]: Mount the SD card",
        kind: CommandKind::Mount,
    },
    CommandSpec {
        name: "unmount",
        help: "unmount [<drive#:>]: Unmount the SD card",
        kind: CommandKind::Unmount,
    },
    CommandSpec {
        name: "getfree",
        help: "getfree [<drive#:>]: Free space",
        kind: CommandKind::GetFree,
    },
    CommandSpec {
        name: "ls",
        help: "ls [<path>]: List files",
        kind: CommandKind::Ls,
    },
    CommandSpec {
        name: "cat",
        help: "cat <filename>: Show file contents",
        kind: CommandKind::Cat,
    },
    CommandSpec {
        name: "help",
        help: "help: Show available commands",
        kind: CommandKind::Help,
    },
];

impl CommandKind {
    /// Look up a command by exact name
    pub fn lookup(name: &str) -> Option<CommandKind> {
        COMMANDS
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.kind)
    }
}

/// A parsed console command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    SetRtc(DateTime),
    Format { drive: Option<&'a str> },
    Mount { drive: Option<&'a str> },
    Unmount { drive: Option<&'a str> },
    GetFree { drive: Option<&'a str> },
    Ls { path: Option<&'a str> },
    Cat { file: &'a str },
    Help,
}

impl<'a> Command<'a> {
    /// Parse a whole line
    ///
    /// Returns `Ok(None)` for a blank line. Extra trailing tokens are ignored.
    pub fn parse(line: &'a str) -> Result<Option<Self>, CommandError<'a>> {
        let mut tokens = line.split_ascii_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(None);
        };
        let kind = CommandKind::lookup(name).ok_or(CommandError::UnknownCommand(name))?;
        Self::from_args(kind, Args::new(tokens)).map(Some)
    }

    /// Pull this command's arguments from `args`
    pub fn from_args(kind: CommandKind, mut args: Args<'a>) -> Result<Self, CommandError<'a>> {
        let command = match kind {
            CommandKind::SetRtc => {
                // Every field is read before the clock is touched
                let day = args.parse::<u8>()?;
                let month = args.parse::<u8>()?;
                let year = args.parse::<u8>()?;
                let hour = args.parse::<u8>()?;
                let minute = args.parse::<u8>()?;
                let second = args.parse::<u8>()?;
                let datetime = DateTime::new(2000 + year as u16, month, day, hour, minute, second)
                    .map_err(CommandError::Clock)?;
                Command::SetRtc(datetime)
            }
            CommandKind::Format => Command::Format {
                drive: args.next_token(),
            },
            CommandKind::Mount => Command::Mount {
                drive: args.next_token(),
            },
            CommandKind::Unmount => Command::Unmount {
                drive: args.next_token(),
            },
            CommandKind::GetFree => Command::GetFree {
                drive: args.next_token(),
            },
            CommandKind::Ls => Command::Ls {
                path: args.next_token(),
            },
            CommandKind::Cat => Command::Cat {
                file: args.require()?,
            },
            CommandKind::Help => Command::Help,
        };
        Ok(command)
    }
}

/// Console command failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError<'a> {
    /// A required argument was not given
    ArgumentMissing,
    /// An argument did not parse
    InvalidArgument(&'a str),
    /// First token matches no command
    UnknownCommand(&'a str),
    /// Drive name is not registered with the storage
    UnknownDrive(&'a str),
    /// The storage operation failed
    Storage(StorageError),
    /// The clock rejected the value
    Clock(ClockError),
}

impl From<StorageError> for CommandError<'_> {
    fn from(e: StorageError) -> Self {
        CommandError::Storage(e)
    }
}

impl fmt::Display for CommandError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::ArgumentMissing => f.write_str("Missing argument"),
            CommandError::InvalidArgument(arg) => write!(f, "Invalid argument \"{}\"", arg),
            CommandError::UnknownCommand(name) => write!(f, "Command \"{}\" not found", name),
            CommandError::UnknownDrive(name) => write!(f, "Unknown logical drive \"{}\"", name),
            CommandError::Storage(e) => write!(f, "Storage error: {}", e),
            CommandError::Clock(e) => write!(f, "Clock error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn test_setrtc_full() {
        let expected = DateTime::new(2024, 3, 15, 10, 30, 0).unwrap();
        assert_eq!(
            Command::parse("setrtc 15 03 24 10 30 00"),
            Ok(Some(Command::SetRtc(expected)))
        );
    }

    #[test]
    fn test_setrtc_missing_tokens() {
        assert_eq!(
            Command::parse("setrtc 15 03"),
            Err(CommandError::ArgumentMissing)
        );
    }

    #[test]
    fn test_setrtc_bad_values() {
        assert_eq!(
            Command::parse("setrtc 15 xx 24 10 30 00"),
            Err(CommandError::InvalidArgument("xx"))
        );
        assert_eq!(
            Command::parse("setrtc 15 13 24 10 30 00"),
            Err(CommandError::Clock(ClockError::InvalidDateTime))
        );
    }

    #[test]
    fn test_optional_drive() {
        assert_eq!(
            Command::parse("mount"),
            Ok(Some(Command::Mount { drive: None }))
        );
        assert_eq!(
            Command::parse("getfree 0:"),
            Ok(Some(Command::GetFree { drive: Some("0:") }))
        );
    }

    #[test]
    fn test_cat_requires_file() {
        assert_eq!(Command::parse("cat"), Err(CommandError::ArgumentMissing));
        assert_eq!(
            Command::parse("cat log_000.csv"),
            Ok(Some(Command::Cat { file: "log_000.csv" }))
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            Command::parse("rm -rf"),
            Err(CommandError::UnknownCommand("rm"))
        );
        // Exact match only
        assert_eq!(Command::parse("LS"), Err(CommandError::UnknownCommand("LS")));
    }

    #[test]
    fn test_every_table_entry_resolves() {
        for spec in COMMANDS.iter() {
            assert_eq!(CommandKind::lookup(spec.name), Some(spec.kind));
            assert!(spec.help.starts_with(spec.name));
        }
    }
}
