//! Configuration types and file discovery.
//!
//! All types implement [`serde::Deserialize`] and are loaded from TOML.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the lint and timer sections.
//! - [`LintConfig`] - Per-rule level overrides applied on top of the recommended registry.
//! - [`TimerConfig`] - Settings of the synthetic escalation tasks.
//! - [`load_config`] - Finds and loads the configuration file.
//!
//! # Example
//!
//! ```toml
//! [lint.rules]
//! fake-join = "off"
//! label-required = "warning"
//!
//! [timers]
//! delegate_expression = "${slaEscalationDelegate}"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use indexmap::IndexMap;
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use procflow_lint::{RuleLevel, RuleRegistry};

use crate::{ProcflowError, timer::DEFAULT_DELEGATE_EXPRESSION};

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Lint configuration section.
    #[serde(default)]
    lint: LintConfig,

    /// Timer configuration section.
    #[serde(default)]
    timers: TimerConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(lint: LintConfig, timers: TimerConfig) -> Self {
        Self { lint, timers }
    }

    /// Returns the lint configuration.
    pub fn lint(&self) -> &LintConfig {
        &self.lint
    }

    /// Returns the timer configuration.
    pub fn timers(&self) -> &TimerConfig {
        &self.timers
    }
}

/// Rule level overrides, keyed by rule name.
///
/// Values are `off`, `error`, `warn` or `warning`. Rules that are not listed
/// keep their recommended level.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LintConfig {
    #[serde(default)]
    rules: IndexMap<String, String>,
}

impl LintConfig {
    /// Creates a lint section from `(rule, level)` pairs.
    pub fn new<K, V>(rules: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            rules: rules
                .into_iter()
                .map(|(rule, level)| (rule.into(), level.into()))
                .collect(),
        }
    }

    /// Returns the configured overrides in file order.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules
            .iter()
            .map(|(rule, level)| (rule.as_str(), level.as_str()))
    }

    /// Applies the overrides to `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for an unknown rule name or an
    /// unrecognised level. The registry may be partially updated.
    pub fn apply(&self, registry: &mut RuleRegistry) -> Result<(), ConfigError> {
        for (rule, level) in self.rules() {
            let level: RuleLevel = level
                .parse()
                .map_err(|err| ConfigError::Validation(format!("rule `{rule}`: {err}")))?;
            registry
                .set_level(rule, level)
                .map_err(|err| ConfigError::Validation(err.to_string()))?;
            debug!(rule, level:% = level; "Applied rule level override");
        }
        Ok(())
    }
}

/// Settings of the synthetic escalation tasks.
#[derive(Debug, Clone, Deserialize)]
pub struct TimerConfig {
    /// Delegate expression of the `<boundary>_service` tasks.
    #[serde(default = "default_delegate_expression")]
    delegate_expression: String,
}

impl TimerConfig {
    pub fn new(delegate_expression: impl Into<String>) -> Self {
        Self {
            delegate_expression: delegate_expression.into(),
        }
    }

    pub fn delegate_expression(&self) -> &str {
        &self.delegate_expression
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DELEGATE_EXPRESSION)
    }
}

fn default_delegate_expression() -> String {
    DEFAULT_DELEGATE_EXPRESSION.to_owned()
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (procflow/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ProcflowError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("procflow/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "procflow", "procflow") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
pub fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, ProcflowError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok(config)
}
