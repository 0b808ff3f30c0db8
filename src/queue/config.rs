/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Engine configuration.

use super::builder::QueueBuilder;
use super::time::MAX_UTC_OFFSET_MINUTES;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default capacity of the sequencer command channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 65536;

/// Errors raised while loading or validating a [`QueueConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON for [`QueueConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The UTC offset lies outside ±14h.
    #[error("utc offset of {0} minutes is out of range")]
    InvalidOffset(i32),

    /// The sequencer channel must hold at least one command.
    #[error("channel capacity must be greater than zero")]
    ZeroCapacity,
}

/// Tunables for the queue engine and its sequencer.
///
/// Every field has a default, so a partial JSON document is enough.
///
/// # Examples
///
/// ```
/// use turnqueue::QueueConfig;
///
/// let config = QueueConfig::from_json_str(r#"{ "utcOffsetMinutes": -180 }"#).unwrap();
/// assert_eq!(config.utc_offset_minutes, -180);
/// assert_eq!(config.recent_sales_limit, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueueConfig {
    /// Minutes east of UTC that define the local day boundary.
    pub utc_offset_minutes: i32,

    /// Name given to salespeople that only appear in sales.
    pub placeholder_name: String,

    /// Default number of sales returned by recent-sales listings.
    pub recent_sales_limit: usize,

    /// Default number of sales returned by history listings.
    pub history_limit: usize,

    /// Sequencer channel buffer size.
    pub channel_capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            placeholder_name: QueueBuilder::DEFAULT_PLACEHOLDER_NAME.to_string(),
            recent_sales_limit: 5,
            history_limit: 10,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl QueueConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed input, or a validation error.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`from_json_str`](Self::from_json_str).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOffset`] or [`ConfigError::ZeroCapacity`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.utc_offset_minutes.unsigned_abs() > MAX_UTC_OFFSET_MINUTES.unsigned_abs() {
            return Err(ConfigError::InvalidOffset(self.utc_offset_minutes));
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    /// Sets the local UTC offset.
    #[must_use]
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    /// Sets the placeholder name for unknown salespeople.
    #[must_use]
    pub fn with_placeholder_name(mut self, name: impl Into<String>) -> Self {
        self.placeholder_name = name.into();
        self
    }
}
