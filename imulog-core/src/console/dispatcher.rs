//! Byte-at-a-time command dispatch

use core::fmt::Write;

use super::command::{Command, CommandError};
use super::editor::{Edit, LineEditor};
use crate::traits::Console;

/// Prompt printed before every new line
pub const PROMPT: &str = "> ";

/// Executes parsed commands
///
/// Implemented by whoever owns the collaborators the commands act on.
pub trait CommandHandler {
    type Console: Console;

    /// Console used for echo, prompts and error reports
    fn console(&mut self) -> &mut Self::Console;

    /// Run one command; errors are reported by the dispatcher
    fn execute<'a>(&mut self, command: Command<'a>) -> Result<(), CommandError<'a>>;
}

/// Line-oriented command dispatcher
pub struct CommandDispatcher {
    editor: LineEditor,
}

impl CommandDispatcher {
    pub const fn new() -> Self {
        Self {
            editor: LineEditor::new(),
        }
    }

    /// Whether no command text is being typed
    pub fn is_idle(&self) -> bool {
        self.editor.is_blank()
    }

    /// Consume one console byte
    ///
    /// Accepted bytes are echoed. On carriage return the line is parsed and
    /// dispatched, then the buffer is reset and the prompt printed again.
    pub fn on_byte<H: CommandHandler>(&mut self, byte: u8, handler: &mut H) {
        let edit = self.editor.feed(byte);
        if edit == Edit::Ignored {
            return;
        }
        let _ = handler.console().write_char(byte as char);
        if edit != Edit::Submit {
            return;
        }
        let _ = handler.console().write_char('\n');

        if self.editor.is_empty() {
            let _ = handler.console().write_str(PROMPT);
            return;
        }

        let result = match Command::parse(self.editor.line()) {
            Ok(Some(command)) => handler.execute(command),
            Ok(None) => Ok(()),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            let _ = writeln!(handler.console(), "{}", e);
        }

        self.editor.clear();
        let _ = write!(handler.console(), "\n{}", PROMPT);
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
