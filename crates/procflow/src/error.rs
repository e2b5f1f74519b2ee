//! Error types for procflow operations.
//!
//! This module provides the main error type [`ProcflowError`] which wraps the
//! errors of the lower crates and of the configuration layer.

use std::io;

use thiserror::Error;

use procflow_core::{duration::DurationError, model::GraphError};
use procflow_lint::LintError;

use crate::{config::ConfigError, timer::TimerError};

/// The main error type for procflow operations.
#[derive(Debug, Error)]
pub enum ProcflowError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    #[error("Lint error: {0}")]
    Lint(#[from] LintError),

    #[error("Invalid duration: {0}")]
    Duration(#[from] DurationError),
}
