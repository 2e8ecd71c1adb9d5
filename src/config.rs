//! Configuration module
//!
//! Reads `config.toml` (default `~/.config/dineconnect/config.toml`).
//! Every section is optional; missing keys fall back to defaults.

use std::path::{Path, PathBuf};

use chrono::{FixedOffset, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::DatabaseConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid booking configuration: {0}")]
    Booking(#[source] DomainError),
}

/// Default config location under the platform config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dineconnect")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSection,
    pub logging: LoggingSection,
    pub booking: BookingConfig,
    pub seed: SeedSection,
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url must not be empty".into()));
        }
        self.booking.validate().map_err(ConfigError::Booking)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// SeaORM connection URL, e.g. `sqlite://./dineconnect.db?mode=rwc`
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: DatabaseConfig::default().url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// `tracing` filter directive; `RUST_LOG` wins when set
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedSection {
    pub enabled: bool,
}

impl Default for SeedSection {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// How reservation ids are assigned on create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdAssignment {
    /// The store's own auto-increment
    #[default]
    Native,
    /// `IdentitySequencer` (max + 1), serialized inside the service
    Sequenced,
}

/// Booking hours and slot grid. Times are `HH:MM:SS` wall clock at
/// `utc_offset_minutes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
    pub slot_interval_minutes: i64,
    pub utc_offset_minutes: i32,
    pub id_assignment: IdAssignment,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            opening_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap_or_default(),
            closing_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or_default(),
            slot_interval_minutes: 30,
            utc_offset_minutes: 0,
            id_assignment: IdAssignment::Native,
        }
    }
}

impl BookingConfig {
    /// Reject hours and intervals that cannot produce a slot grid.
    pub fn validate(&self) -> DomainResult<()> {
        if self.slot_interval_minutes <= 0 {
            return Err(DomainError::ConfigurationGap(format!(
                "slot interval of {} minutes yields no slots",
                self.slot_interval_minutes
            )));
        }
        if self.opening_time > self.closing_time {
            return Err(DomainError::ConfigurationGap(format!(
                "opening time {} is after closing time {}",
                self.opening_time, self.closing_time
            )));
        }
        self.utc_offset().map(|_| ())
    }

    /// Offset the opening hours are expressed in.
    pub fn utc_offset(&self) -> DomainResult<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).ok_or_else(|| {
            DomainError::ConfigurationGap(format!(
                "UTC offset of {} minutes is out of range",
                self.utc_offset_minutes
            ))
        })
    }
}
