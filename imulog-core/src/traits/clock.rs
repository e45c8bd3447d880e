//! Real-time clock trait and calendar type

use core::fmt;

/// Errors from the real-time clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Field outside its calendar range
    InvalidDateTime,
    /// Clock is not running
    NotRunning,
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockError::InvalidDateTime => f.write_str("invalid date/time"),
            ClockError::NotRunning => f.write_str("clock not running"),
        }
    }
}

/// Calendar date and wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTime {
    /// Build a date/time, checking each field's range
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, ClockError> {
        let valid = (1..=12).contains(&month)
            && (1..=31).contains(&day)
            && hour < 24
            && minute < 60
            && second < 60;
        if !valid {
            return Err(ClockError::InvalidDateTime);
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Trait for the battery-backed real-time clock
pub trait RealTimeClock {
    /// Read the current date/time
    fn now(&mut self) -> Result<DateTime, ClockError>;

    /// Set the clock
    fn set(&mut self, datetime: DateTime) -> Result<(), ClockError>;
}
