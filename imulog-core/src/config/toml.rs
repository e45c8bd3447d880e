//! Minimal TOML reader for `logger.toml`
//!
//! Handles only what the logger needs:
//! - a single `[logger]` section
//! - `key = integer` pairs
//! - `#` comments, whole-line or trailing
//!
//! Anything else is rejected rather than ignored.

use core::str::FromStr;

use super::types::LoggerConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Section other than `[logger]`
    InvalidSection,
    /// Line is not `key = value`
    InvalidLine,
    /// Key outside a section or not a known setting
    UnknownKey,
    /// Value is not an integer in range
    InvalidValue,
}

/// Parse TOML text into a sanitized `LoggerConfig`
///
/// Keys that are absent keep their defaults.
pub fn parse_config(input: &str) -> Result<LoggerConfig, ParseError> {
    let mut config = LoggerConfig::new();
    let mut in_logger = false;

    for line in input.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            if line[1..line.len() - 1].trim() != "logger" {
                return Err(ParseError::InvalidSection);
            }
            in_logger = true;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        if !in_logger {
            return Err(ParseError::UnknownKey);
        }

        match key {
            "tick_ms" => config.tick_ms = parse_int(value)?,
            "sample_interval_ms" => config.sample_interval_ms = parse_int(value)?,
            "max_samples" => config.max_samples = parse_int(value)?,
            "boot_settle_ms" => config.boot_settle_ms = parse_int(value)?,
            "mount_settle_ms" => config.mount_settle_ms = parse_int(value)?,
            "alert_row" => config.alert_row = parse_int(value)?,
            "display_refresh_ms" => config.display_refresh_ms = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        }
    }

    Ok(config.sanitized())
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn parse_int<T: FromStr>(value: &str) -> Result<T, ParseError> {
    // TOML allows `_` digit separators
    let mut digits: heapless::String<24> = heapless::String::new();
    for c in value.chars().filter(|c| *c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}
