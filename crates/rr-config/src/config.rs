//! Router configuration types.
//!
//! These types match the JSON configuration file read at startup:
//!
//! ```json
//! {
//!   "logFilePath": "/var/log/player.log",
//!   "outputFiles": { "playback": "out/playback.log" },
//!   "eventFilters": { "playback": ["play", "resume"] },
//!   "batchInterval": "1m",
//!   "monitorPeriod": "5m"
//! }
//! ```
//!
//! Nothing is defaulted beyond empty values: a missing map decodes as an
//! empty map and a missing string as an empty string.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors from loading or interpreting the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error opening config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error decoding config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {field} {value:?}: {reason}")]
    InvalidDuration {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl From<ConfigError> for rr_common::Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidDuration { field, reason, .. } => {
                rr_common::Error::InvalidDuration {
                    field: field.to_string(),
                    reason,
                }
            }
            other => rr_common::Error::Config(other.to_string()),
        }
    }
}

/// Complete router configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouterConfig {
    /// Log file that is polled for new records.
    pub log_file_path: String,

    /// Event type name → destination file.
    pub output_files: BTreeMap<String, String>,

    /// Event type name → filter specification.
    ///
    /// Kept as raw JSON so that an unsupported shape only disables its own
    /// event type instead of failing the whole load.
    pub event_filters: BTreeMap<String, serde_json::Value>,

    /// Accepted for compatibility; not used by the pipeline.
    pub batch_interval: String,

    /// Polling interval, e.g. `"5m"`.
    pub monitor_period: String,
}

impl RouterConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Polling interval. Empty, unparseable, and zero values are rejected.
    pub fn monitor_period(&self) -> Result<Duration, ConfigError> {
        let period = parse_period("monitorPeriod", &self.monitor_period)?;
        if period.is_zero() {
            return Err(ConfigError::InvalidDuration {
                field: "monitorPeriod",
                value: self.monitor_period.clone(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(period)
    }

    /// Batch interval, if one is configured.
    pub fn batch_interval(&self) -> Result<Option<Duration>, ConfigError> {
        if self.batch_interval.trim().is_empty() {
            return Ok(None);
        }
        parse_period("batchInterval", &self.batch_interval).map(Some)
    }

    /// Source log path.
    pub fn log_path(&self) -> &Path {
        Path::new(&self.log_file_path)
    }
}

fn parse_period(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidDuration {
            field,
            value: value.to_string(),
            reason: "value is empty".to_string(),
        });
    }
    humantime::parse_duration(trimmed).map_err(|e| ConfigError::InvalidDuration {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
