//! Text console trait

/// Trait for the serial text console
///
/// Output goes through [`core::fmt::Write`]; write errors are not
/// recoverable on a console and are ignored by callers.
pub trait Console: core::fmt::Write {
    /// Read one pending byte without blocking
    fn read_byte(&mut self) -> Option<u8>;

    /// Write raw bytes (file contents), replacing invalid UTF-8
    fn write_bytes(&mut self, bytes: &[u8]) {
        for chunk in bytes.utf8_chunks() {
            let _ = self.write_str(chunk.valid());
            if !chunk.invalid().is_empty() {
                let _ = self.write_char('?');
            }
        }
    }
}
