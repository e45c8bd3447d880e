//! UART text console
//!
//! Generic over the blocking `embedded-io` halves so it works with the
//! split embassy-rp `BufferedUart`. Reads never block: a byte is only taken
//! when the RX ring buffer reports data ready.

use core::fmt;

use embedded_io::{Read, ReadReady, Write};
use imulog_core::traits::Console;

pub struct UartConsole<R, W> {
    rx: R,
    tx: W,
}

impl<R, W> UartConsole<R, W>
where
    R: Read + ReadReady,
    W: Write,
{
    pub fn new(rx: R, tx: W) -> Self {
        Self { rx, tx }
    }
}

impl<R, W> fmt::Write for UartConsole<R, W>
where
    R: Read + ReadReady,
    W: Write,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.tx.write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

impl<R, W> Console for UartConsole<R, W>
where
    R: Read + ReadReady,
    W: Write,
{
    fn read_byte(&mut self) -> Option<u8> {
        match self.rx.read_ready() {
            Ok(true) => {}
            _ => return None,
        }
        let mut byte = [0u8; 1];
        match self.rx.read(&mut byte) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }
}
