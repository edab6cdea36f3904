//! Dashboard configuration
//!
//! Optional TOML file; every field has a default and command line flags
//! take precedence over file values.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use dynres_model::DEFAULT_REMOVAL_COST;
use serde::{Deserialize, Serialize};

/// Default baseline emissions, tonnes CO2e
pub const DEFAULT_BASELINE_TONNES: f64 = 100_000.0;

/// Settings file errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Not valid TOML for this schema
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// Numeric field negative or not finite
    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidValue { field: &'static str, value: f64 },

    /// Unknown log format name
    #[error("unknown log format '{0}' (expected pretty or json)")]
    UnknownLogFormat(String),
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
        })
    }
}

impl FromStr for LogFormat {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(SettingsError::UnknownLogFormat(s.to_string())),
        }
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Reference data file; the shipped table when absent
    pub reference_data: Option<PathBuf>,
    /// Baseline emissions for impact analysis, tonnes CO2e
    pub baseline_tonnes: f64,
    /// Carbon removal price per tonne
    pub removal_cost: f64,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl DashboardConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and validate a TOML settings file
    ///
    /// # Errors
    /// Returns `SettingsError` on I/O, parse or validation failure
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded settings from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Parse and validate TOML text
    ///
    /// # Errors
    /// Returns `SettingsError` on parse or validation failure
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check numeric fields
    ///
    /// # Errors
    /// Returns `SettingsError::InvalidValue` for a negative or non-finite value
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [
            ("baseline_tonnes", self.baseline_tonnes),
            ("removal_cost", self.removal_cost),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::InvalidValue { field, value });
            }
        }
        Ok(())
    }

    /// With reference data file
    #[inline]
    #[must_use]
    pub fn with_reference_data(mut self, path: impl Into<PathBuf>) -> Self {
        self.reference_data = Some(path.into());
        self
    }

    /// With baseline emissions
    #[inline]
    #[must_use]
    pub fn with_baseline(mut self, tonnes: f64) -> Self {
        self.baseline_tonnes = tonnes;
        self
    }

    /// With removal price
    #[inline]
    #[must_use]
    pub fn with_removal_cost(mut self, cost: f64) -> Self {
        self.removal_cost = cost;
        self
    }

    /// With log filter directive
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// With log format
    #[inline]
    #[must_use]
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            reference_data: None,
            baseline_tonnes: DEFAULT_BASELINE_TONNES,
            removal_cost: DEFAULT_REMOVAL_COST,
            log_filter: "warn".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
