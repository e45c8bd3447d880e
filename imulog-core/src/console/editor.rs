//! Line buffer with backspace handling

use heapless::Vec;

/// Longest accepted command line
pub const MAX_LINE_LEN: usize = 255;

const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7F;
const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// What a byte did to the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edit {
    /// Control or non-ASCII byte, or the LF of a CR LF pair, dropped
    /// without echo
    Ignored,
    /// Accepted and applied (or a no-op on a full or empty line)
    Accepted,
    /// Carriage return
    Submit,
}

/// Accumulates console bytes into one command line
pub struct LineEditor {
    buf: Vec<u8, MAX_LINE_LEN>,
    after_cr: bool,
}

impl LineEditor {
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            after_cr: false,
        }
    }

    /// Apply one input byte
    pub fn feed(&mut self, byte: u8) -> Edit {
        let after_cr = core::mem::replace(&mut self.after_cr, byte == CR);
        match byte {
            CR => Edit::Submit,
            LF if after_cr => Edit::Ignored,
            BACKSPACE | DELETE => {
                self.buf.pop();
                Edit::Accepted
            }
            // Printable ASCII and whitespace (tab, LF, VT, FF)
            0x20..=0x7E | b'\t' | b'\n' | 0x0B | 0x0C => {
                // A full line silently drops further characters
                let _ = self.buf.push(byte);
                Edit::Accepted
            }
            _ => Edit::Ignored,
        }
    }

    /// Current line contents
    pub fn line(&self) -> &str {
        // Only ASCII is ever stored
        core::str::from_utf8(&self.buf).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Nothing but whitespace typed so far
    pub fn is_blank(&self) -> bool {
        self.buf.iter().all(u8::is_ascii_whitespace)
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new()
    }
}
