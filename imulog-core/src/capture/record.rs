//! CSV record layout

use core::fmt::{self, Write};

use heapless::String;

use crate::traits::RawMotion;

/// First line of every record file
pub const HEADER: &str = "id,ax,ay,az,gx,gy,gz,temp\n";

/// One formatted data row
pub type RowBuf = String<64>;

/// Temperature in tenths of a degree, printed with one decimal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Celsius10(pub i16);

impl fmt::Display for Celsius10 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0 as i32;
        let sign = if v < 0 { "-" } else { "" };
        let abs = v.unsigned_abs();
        write!(f, "{}{}.{}", sign, abs / 10, abs % 10)
    }
}

/// Format data row `index` (0-based) as `id,ax,ay,az,gx,gy,gz,temp\n`
pub fn format_row(index: u16, sample: &RawMotion) -> RowBuf {
    let mut row = RowBuf::new();
    let [ax, ay, az] = sample.accel;
    let [gx, gy, gz] = sample.gyro;
    // Worst case is 7 six-char integers plus the temperature, well under 64
    let _ = writeln!(
        row,
        "{},{},{},{},{},{},{},{}",
        index + 1,
        ax,
        ay,
        az,
        gx,
        gy,
        gz,
        Celsius10(sample.temperature_x10())
    );
    row
}
