//! Severity levels for diagnostics and rule configuration.
//!
//! A rule is configured with a level: either [`RuleLevel::Off`] or a
//! [`Severity`]. The severity becomes the category of every diagnostic the
//! rule reports.

use std::{fmt, str::FromStr};

use crate::error::LintError;

/// The category of a diagnostic.
///
/// Only [`Severity::Error`] fails a validation. `warn` and `warning` are two
/// spellings of an advisory finding and both are kept because configurations
/// use them interchangeably.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A structural defect; validation does not pass.
    Error,

    /// An advisory finding.
    Warn,

    /// An advisory finding.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` for either advisory spelling.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warn | Severity::Warning)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warn => "warn",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = LintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Severity::Error),
            "warn" => Ok(Severity::Warn),
            "warning" => Ok(Severity::Warning),
            _ => Err(LintError::InvalidLevel(s.to_owned())),
        }
    }
}

/// The configured level of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleLevel {
    /// The rule is not run.
    Off,

    /// The rule runs and reports with the given severity.
    On(Severity),
}

impl RuleLevel {
    /// The severity if the rule is enabled.
    pub fn severity(&self) -> Option<Severity> {
        match self {
            RuleLevel::Off => None,
            RuleLevel::On(severity) => Some(*severity),
        }
    }
}

impl From<Severity> for RuleLevel {
    fn from(severity: Severity) -> Self {
        RuleLevel::On(severity)
    }
}

impl fmt::Display for RuleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleLevel::Off => write!(f, "off"),
            RuleLevel::On(severity) => write!(f, "{severity}"),
        }
    }
}

impl FromStr for RuleLevel {
    type Err = LintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(RuleLevel::Off),
            other => other.parse().map(RuleLevel::On),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_is_error() {
        assert!(Severity::Error.is_error());
        assert!(!Severity::Warn.is_error());
        assert!(!Severity::Warning.is_error());
        assert!(Severity::Warn.is_warning());
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(format!("{}", Severity::Error), "error");
        assert_eq!(format!("{}", Severity::Warn), "warn");
        assert_eq!(format!("{}", Severity::Warning), "warning");
    }

    #[test]
    fn test_rule_level_from_str() {
        assert_eq!("off".parse::<RuleLevel>().unwrap(), RuleLevel::Off);
        assert_eq!(
            "warn".parse::<RuleLevel>().unwrap(),
            RuleLevel::On(Severity::Warn)
        );
        assert_eq!(
            "loud".parse::<RuleLevel>().unwrap_err(),
            LintError::InvalidLevel("loud".to_owned())
        );
    }
}
