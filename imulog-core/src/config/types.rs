//! Logger configuration types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hard limit on data rows per capture session
pub const MAX_SAMPLES: u16 = 128;

/// Logger tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoggerConfig {
    /// Main loop cadence
    pub tick_ms: u32,
    /// Wait between capture rows
    pub sample_interval_ms: u32,
    /// Data rows per capture session (1..=128)
    pub max_samples: u16,
    /// LED hold time at power-on before the sensor is reset
    pub boot_settle_ms: u32,
    /// Wait after a successful mount
    pub mount_settle_ms: u32,
    /// Display row for alert text
    pub alert_row: u8,
    /// Display redraw period when nothing changes
    pub display_refresh_ms: u32,
}

impl LoggerConfig {
    pub const fn new() -> Self {
        Self {
            tick_ms: 500,
            sample_interval_ms: 100,
            max_samples: MAX_SAMPLES,
            boot_settle_ms: 5000,
            mount_settle_ms: 100,
            alert_row: 25,
            display_refresh_ms: 1000,
        }
    }

    /// Clamp out-of-range values
    pub fn sanitized(mut self) -> Self {
        self.max_samples = self.max_samples.clamp(1, MAX_SAMPLES);
        self.tick_ms = self.tick_ms.max(1);
        self.display_refresh_ms = self.display_refresh_ms.max(1);
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.tick_ms, 500);
        assert_eq!(config.sample_interval_ms, 100);
        assert_eq!(config.max_samples, 128);
        assert_eq!(config.alert_row, 25);
    }

    #[test]
    fn test_sanitized_clamps_samples() {
        let mut config = LoggerConfig::new();
        config.max_samples = 500;
        assert_eq!(config.sanitized().max_samples, 128);
        config.max_samples = 0;
        assert_eq!(config.sanitized().max_samples, 1);
    }
}
