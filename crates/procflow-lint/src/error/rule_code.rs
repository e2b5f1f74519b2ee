//! Rule codes for the procflow diagnostic system.
//!
//! Rule codes are organized by concern:
//! - `L0xx` - Scope rules (start/end events, event definitions)
//! - `L1xx` - Sequence flow rules
//! - `L2xx` - Gateway rules
//! - `L3xx` - Labelling, connectivity and duplicate flows
//! - `L4xx` - Required task fields
//! - `L9xx` - Linter faults

use std::fmt;

/// Codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCode {
    // =========================================================================
    // Scope Rules (L0xx)
    // =========================================================================
    /// Missing end event.
    ///
    /// A process or sub-process has no end event among its direct children.
    L001,

    /// Missing start event.
    ///
    /// A process or sub-process has no start event among its direct children.
    L002,

    /// Untyped start event in an event sub-process.
    L003,

    /// Typed start event in a normal sub-process.
    L004,

    /// Multiple blank start events.
    ///
    /// More than one start event without event definitions shares a scope.
    L005,

    /// Multiple event definitions on one event.
    L006,

    // =========================================================================
    // Sequence Flow Rules (L1xx)
    // =========================================================================
    /// Sequence flow is missing a condition.
    ///
    /// A conditionally forking node has an outgoing flow that is neither the
    /// default flow nor conditioned.
    L100,

    /// Fake join.
    ///
    /// A task or event has more than one incoming flow. Only gateways join.
    L101,

    /// Implicit split.
    ///
    /// A task or event has more than one unconditioned, non-default outgoing flow.
    L102,

    // =========================================================================
    // Gateway Rules (L2xx)
    // =========================================================================
    /// Gateway forks and joins at the same time.
    L200,

    /// Superfluous gateway with exactly one source and one target.
    L201,

    /// Disallowed complex gateway.
    L202,

    /// Disallowed inclusive gateway.
    L203,

    // =========================================================================
    // Labelling and Connectivity (L3xx)
    // =========================================================================
    /// Missing label.
    L300,

    /// Disconnected element.
    ///
    /// A structural node has no incoming or no outgoing sequence flow.
    L301,

    /// Duplicate sequence flow.
    ///
    /// Two flows share source, target and condition.
    L302,

    // =========================================================================
    // Required Task Fields (L4xx)
    // =========================================================================
    /// User task without a node type.
    L400,

    /// User task without an approval type.
    L401,

    /// User task with assignees but no assignment strategy.
    L402,

    // =========================================================================
    // Linter Faults (L9xx)
    // =========================================================================
    /// A rule failed on an unexpected element shape.
    L900,
}

impl RuleCode {
    /// Returns the code as a string (e.g., "L001").
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCode::L001 => "L001",
            RuleCode::L002 => "L002",
            RuleCode::L003 => "L003",
            RuleCode::L004 => "L004",
            RuleCode::L005 => "L005",
            RuleCode::L006 => "L006",
            RuleCode::L100 => "L100",
            RuleCode::L101 => "L101",
            RuleCode::L102 => "L102",
            RuleCode::L200 => "L200",
            RuleCode::L201 => "L201",
            RuleCode::L202 => "L202",
            RuleCode::L203 => "L203",
            RuleCode::L300 => "L300",
            RuleCode::L301 => "L301",
            RuleCode::L302 => "L302",
            RuleCode::L400 => "L400",
            RuleCode::L401 => "L401",
            RuleCode::L402 => "L402",
            RuleCode::L900 => "L900",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            RuleCode::L001 => "missing end event",
            RuleCode::L002 => "missing start event",
            RuleCode::L003 => "untyped event sub-process start event",
            RuleCode::L004 => "typed sub-process start event",
            RuleCode::L005 => "multiple blank start events",
            RuleCode::L006 => "multiple event definitions",
            RuleCode::L100 => "missing flow condition",
            RuleCode::L101 => "fake join",
            RuleCode::L102 => "implicit split",
            RuleCode::L200 => "gateway forks and joins",
            RuleCode::L201 => "superfluous gateway",
            RuleCode::L202 => "complex gateway",
            RuleCode::L203 => "inclusive gateway",
            RuleCode::L300 => "missing label",
            RuleCode::L301 => "disconnected element",
            RuleCode::L302 => "duplicate sequence flow",
            RuleCode::L400 => "missing node type",
            RuleCode::L401 => "missing approval type",
            RuleCode::L402 => "missing assignment strategy",
            RuleCode::L900 => "rule fault",
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
