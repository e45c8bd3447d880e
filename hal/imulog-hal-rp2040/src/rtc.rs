//! On-chip real-time clock
//!
//! The RP2040 RTC needs a day of week, which the console's `setrtc`
//! command does not provide; it is derived from the date.

use embassy_rp::rtc::{DateTime as RpDateTime, DayOfWeek, Rtc, RtcError};
use imulog_core::traits::{ClockError, DateTime, RealTimeClock};

pub struct RpRtc<'d> {
    rtc: Rtc<'d, embassy_rp::peripherals::RTC>,
}

impl<'d> RpRtc<'d> {
    pub fn new(rtc: Rtc<'d, embassy_rp::peripherals::RTC>) -> Self {
        Self { rtc }
    }
}

/// Day of week for a Gregorian date, 0 = Sunday
pub fn weekday(year: u16, month: u8, day: u8) -> u8 {
    const OFFSETS: [u16; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let y = if month < 3 { year.saturating_sub(1) } else { year };
    let idx = (month.clamp(1, 12) - 1) as usize;
    ((y + y / 4 - y / 100 + y / 400 + OFFSETS[idx] + day as u16) % 7) as u8
}

fn day_of_week(n: u8) -> DayOfWeek {
    match n {
        0 => DayOfWeek::Sunday,
        1 => DayOfWeek::Monday,
        2 => DayOfWeek::Tuesday,
        3 => DayOfWeek::Wednesday,
        4 => DayOfWeek::Thursday,
        5 => DayOfWeek::Friday,
        _ => DayOfWeek::Saturday,
    }
}

fn map_error(e: RtcError) -> ClockError {
    match e {
        RtcError::NotRunning => ClockError::NotRunning,
        _ => ClockError::InvalidDateTime,
    }
}

impl RealTimeClock for RpRtc<'_> {
    fn now(&mut self) -> Result<DateTime, ClockError> {
        let t = self.rtc.now().map_err(map_error)?;
        DateTime::new(t.year, t.month, t.day, t.hour, t.minute, t.second)
    }

    fn set(&mut self, datetime: DateTime) -> Result<(), ClockError> {
        let t = RpDateTime {
            year: datetime.year,
            month: datetime.month,
            day: datetime.day,
            day_of_week: day_of_week(weekday(datetime.year, datetime.month, datetime.day)),
            hour: datetime.hour,
            minute: datetime.minute,
            second: datetime.second,
        };
        self.rtc.set_datetime(t).map_err(map_error)
    }
}
