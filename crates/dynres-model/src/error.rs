//! Error types for the residual emissions model
//!
//! Two classes of failure exist:
//! - Invalid caller input (recoverable at the call boundary)
//! - Invalid reference data (fatal at startup)

use crate::types::{Industry, ScenarioClass};

/// Main model error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Bad caller-supplied parameters
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// Malformed reference data
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

impl ModelError {
    /// Check if the caller can recover by re-prompting
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if error stems from reference data
    #[inline]
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }
}

/// Caller input errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    /// Industry identifier not among the supported set
    #[error("unknown industry: {0}")]
    UnknownIndustry(String),

    /// Scenario class not among the supported set
    #[error("unknown scenario class: {0}")]
    UnknownScenario(String),

    /// Year outside the modelled horizon
    #[error("year {year} outside supported range {min}..={max}")]
    YearOutOfRange { year: i64, min: u16, max: u16 },

    /// Percentage outside [0, 100]
    #[error("{field} must lie in [0, 100], got {value}")]
    PercentageOutOfRange { field: &'static str, value: f64 },

    /// Baseline emissions below zero
    #[error("baseline emissions must be non-negative, got {0}")]
    NegativeBaseline(f64),

    /// Removal price below zero
    #[error("cost per tonne must be non-negative, got {0}")]
    NegativeCost(f64),

    /// NaN or infinite numeric input
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    /// Scenario builder reductions out of order or out of range
    #[error("invalid scenario reductions: {0}")]
    InvalidReductions(String),
}

/// Reference data errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    /// Extension not one of toml/json/yaml
    #[error("unsupported reference data format: {0}")]
    UnsupportedFormat(String),

    /// Document could not be deserialized
    #[error("failed to parse {format} reference data: {reason}")]
    Parse { format: &'static str, reason: String },

    /// Curve without anchor points
    #[error("{industry}/{scenario}: curve has no anchor points")]
    EmptyCurve {
        industry: Industry,
        scenario: ScenarioClass,
    },

    /// Anchor years not strictly increasing
    #[error("{industry}/{scenario}: anchor year {next} does not follow {previous}")]
    NonMonotonicYears {
        industry: Industry,
        scenario: ScenarioClass,
        previous: u16,
        next: u16,
    },

    /// Anchor value outside [0, 100] or not finite
    #[error("{industry}/{scenario}: anchor value {value} at {year} outside [0, 100]")]
    AnchorOutOfRange {
        industry: Industry,
        scenario: ScenarioClass,
        year: u16,
        value: f64,
    },

    /// Scope 3 share outside [0, 100] or not finite
    #[error("{industry}: scope 3 share {value} outside [0, 100]")]
    Scope3OutOfRange { industry: Industry, value: f64 },

    /// Supported industry absent from the table
    #[error("missing industry: {0}")]
    MissingIndustry(Industry),

    /// Industry listed more than once
    #[error("duplicate industry: {0}")]
    DuplicateIndustry(Industry),

    /// Scenario curve absent for an industry
    #[error("{industry}: missing {scenario} curve")]
    MissingScenario {
        industry: Industry,
        scenario: ScenarioClass,
    },

    /// Intervention range string not of the form "a-b"
    #[error("{industry}: malformed intervention {field} '{value}'")]
    MalformedIntervention {
        industry: Industry,
        field: &'static str,
        value: String,
    },
}
