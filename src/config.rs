//! Scheduling configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_SLOT_DURATION_MINUTES: u32 = 30;
pub const DEFAULT_MAX_REASON_LENGTH: usize = 500;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Errors raised by [`SchedulingConfig::validate`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Slot duration must be between 1 and {max} minutes (got {minutes})")]
    InvalidSlotDuration { minutes: u32, max: u32 },
}

/// Tunables of the scheduling core.
///
/// Deserializes with defaults for missing fields so it can be embedded in a
/// larger application config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Length of every appointment slot.
    pub slot_duration_minutes: u32,
    /// Upper bound on the reason text a patient may attach to a request.
    pub max_reason_length: usize,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            slot_duration_minutes: DEFAULT_SLOT_DURATION_MINUTES,
            max_reason_length: DEFAULT_MAX_REASON_LENGTH,
        }
    }
}

impl SchedulingConfig {
    /// Read `APPOINTMENT_SLOT_MINUTES` and `APPOINTMENT_REASON_MAX_LENGTH`,
    /// falling back to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self {
            slot_duration_minutes: read_var(
                "APPOINTMENT_SLOT_MINUTES",
                DEFAULT_SLOT_DURATION_MINUTES,
            ),
            max_reason_length: read_var(
                "APPOINTMENT_REASON_MAX_LENGTH",
                DEFAULT_MAX_REASON_LENGTH,
            ),
        }
    }

    pub fn with_slot_duration(mut self, minutes: u32) -> Self {
        self.slot_duration_minutes = minutes;
        self
    }

    pub fn with_max_reason_length(mut self, length: usize) -> Self {
        self.max_reason_length = length;
        self
    }

    pub fn slot_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.slot_duration_minutes))
    }

    /// A slot must be at least a minute long and shorter than a day.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_duration_minutes == 0 || self.slot_duration_minutes >= MINUTES_PER_DAY {
            return Err(ConfigError::InvalidSlotDuration {
                minutes: self.slot_duration_minutes,
                max: MINUTES_PER_DAY - 1,
            });
        }
        Ok(())
    }
}

fn read_var<T: std::str::FromStr + std::fmt::Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(var = name, value = %raw, "unparsable value, using default {default}");
            default
        }),
        Err(_) => {
            warn!(var = name, "not set, using default {default}");
            default
        }
    }
}
