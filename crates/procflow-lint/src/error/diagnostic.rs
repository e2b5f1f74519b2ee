//! The core diagnostic type.

use std::fmt;

use procflow_core::identifier::Id;

use crate::error::{RuleCode, Severity};

/// A single linter finding attached to a process element.
///
/// # Example
///
/// ```text
/// warning[L101] Task_1: Incoming flows do not join (fake-join)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    node_id: Id,
    rule: &'static str,
    code: RuleCode,
    category: Severity,
    message: String,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(
        node_id: Id,
        rule: &'static str,
        code: RuleCode,
        category: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            node_id,
            rule,
            code,
            category,
            message: message.into(),
        }
    }

    /// The id of the element the finding is attached to.
    pub fn node_id(&self) -> Id {
        self.node_id
    }

    /// The name of the rule that reported it.
    pub fn rule(&self) -> &'static str {
        self.rule
    }

    pub fn code(&self) -> RuleCode {
        self.code
    }

    /// The category, i.e. the severity the rule was configured with.
    pub fn category(&self) -> Severity {
        self.category
    }

    /// The (translated) message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] {}: {} ({})",
            self.category, self.code, self.node_id, self.message, self.rule
        )
    }
}
