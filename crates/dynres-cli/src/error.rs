//! Command errors and exit codes

use dynres_model::{ConfigError, InputError, ModelError};

use crate::config::SettingsError;

/// Exit code for rejected user input
pub const EXIT_INVALID_INPUT: i32 = 1;

/// Exit code for unusable settings or reference data
pub const EXIT_INVALID_CONFIGURATION: i32 = 2;

/// Command failure
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Model rejected input or reference data
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Settings file unusable
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// JSON output failed
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<InputError> for CliError {
    fn from(err: InputError) -> Self {
        Self::Model(err.into())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Model(err.into())
    }
}

impl CliError {
    /// Process exit code
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        let configuration = match self {
            Self::Model(e) => e.is_configuration(),
            Self::Settings(_) => true,
            Self::Serialize(_) => false,
        };
        if configuration {
            EXIT_INVALID_CONFIGURATION
        } else {
            EXIT_INVALID_INPUT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynres_model::Industry;

    #[test]
    fn exit_codes() {
        let input = CliError::from(InputError::UnknownIndustry("steel".into()));
        assert_eq!(input.exit_code(), EXIT_INVALID_INPUT);

        let config = CliError::from(ConfigError::MissingIndustry(Industry::Retail));
        assert_eq!(config.exit_code(), EXIT_INVALID_CONFIGURATION);

        let settings = CliError::from(SettingsError::UnknownLogFormat("xml".into()));
        assert_eq!(settings.exit_code(), EXIT_INVALID_CONFIGURATION);
    }
}
