//! Serial console
//!
//! Bytes are edited into a line, the line is parsed into a typed
//! [`Command`] and handed to a [`CommandHandler`]. The handler owns the
//! collaborators; the dispatcher only owns the line buffer.

mod args;
mod command;
mod dispatcher;
mod editor;

pub use args::Args;
pub use command::{Command, CommandError, CommandKind, CommandSpec, COMMANDS};
pub use dispatcher::{CommandDispatcher, CommandHandler, PROMPT};
pub use editor::{Edit, LineEditor, MAX_LINE_LEN};
