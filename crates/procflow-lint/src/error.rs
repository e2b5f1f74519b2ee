//! Diagnostic types produced by the linter.
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single finding attached to an element id, tagged with the rule that
//! produced it, a [`RuleCode`] and a [`Severity`]. A [`LintReport`] groups the
//! diagnostics of one lint run by element id.
//!
//! # Example
//!
//! ```
//! # use procflow_core::identifier::Id;
//! # use procflow_lint::error::{Diagnostic, RuleCode, Severity};
//!
//! let diag = Diagnostic::new(
//!     Id::new("Process_1"),
//!     "end-event-required",
//!     RuleCode::L001,
//!     Severity::Error,
//!     "Process is missing end event",
//! );
//! assert_eq!(
//!     diag.to_string(),
//!     "error[L001] Process_1: Process is missing end event (end-event-required)"
//! );
//! ```

mod diagnostic;
mod report;
mod rule_code;
mod severity;

use procflow_core::{identifier::Id, model::GraphError};
use thiserror::Error;

pub use diagnostic::Diagnostic;
pub use report::LintReport;
pub use rule_code::RuleCode;
pub use severity::{RuleLevel, Severity};

/// Errors raised while configuring the linter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintError {
    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    #[error("invalid rule level `{0}`, expected one of off, error, warn, warning")]
    InvalidLevel(String),
}

/// A fault inside a rule implementation.
///
/// The linter turns these into `engine-error` diagnostics on the element
/// being checked and carries on with the remaining rules and elements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("element `{element}` is malformed: {reason}")]
    Malformed { element: Id, reason: String },
}
