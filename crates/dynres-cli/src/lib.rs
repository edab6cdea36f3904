//! Terminal front-end for the dynamic residual emissions model
//!
//! Settings, logging, command line definition and report rendering for
//! the `dynres` binary.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;

pub use config::{DashboardConfig, LogFormat, SettingsError};
pub use error::{CliError, EXIT_INVALID_CONFIGURATION, EXIT_INVALID_INPUT};
