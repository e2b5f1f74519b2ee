//! Timer kinds and the outcome of a timer change.

use std::fmt;

use procflow_core::{
    duration::DurationError,
    identifier::Id,
    model::{GraphError, TimerExpression},
};
use thiserror::Error;

/// Suffix of the escalation service task owned by a boundary event.
pub(crate) const SERVICE_SUFFIX: &str = "_service";

/// Suffix of the flow from a boundary event to its escalation task.
pub(crate) const SERVICE_FLOW_SUFFIX: &str = "_service_flow";

/// The three time limits of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Time allowed for the task.
    Deadline,
    /// Lead time before the deadline at which the first warning fires.
    FirstWarning,
    /// Period of the repeated warnings after the first one.
    LoopWarning,
}

impl TimerKind {
    pub const ALL: [TimerKind; 3] = [
        TimerKind::Deadline,
        TimerKind::FirstWarning,
        TimerKind::LoopWarning,
    ];

    /// The task attribute holding the raw value.
    pub fn attribute(&self) -> &'static str {
        match self {
            TimerKind::Deadline => "timeLimit:timeDuration",
            TimerKind::FirstWarning => "timeLimit:firstWarnDuration",
            TimerKind::LoopWarning => "timeLimit:loopWarnDuration",
        }
    }

    /// Suffix appended to the task id to name the boundary event.
    pub fn suffix(&self) -> &'static str {
        match self {
            TimerKind::Deadline => "_overtime",
            TimerKind::FirstWarning => "_timer",
            TimerKind::LoopWarning => "_timer_loop",
        }
    }

    /// The kind whose value this kind is derived from.
    pub fn prerequisite(&self) -> Option<TimerKind> {
        match self {
            TimerKind::Deadline => None,
            TimerKind::FirstWarning => Some(TimerKind::Deadline),
            TimerKind::LoopWarning => Some(TimerKind::FirstWarning),
        }
    }

    /// The kind derived from this kind's value.
    pub fn dependent(&self) -> Option<TimerKind> {
        match self {
            TimerKind::Deadline => Some(TimerKind::FirstWarning),
            TimerKind::FirstWarning => Some(TimerKind::LoopWarning),
            TimerKind::LoopWarning => None,
        }
    }

    /// Id of the boundary event of this kind for `task`.
    pub fn boundary_id(&self, task: Id) -> Id {
        task.with_suffix(self.suffix())
    }
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerKind::Deadline => write!(f, "deadline"),
            TimerKind::FirstWarning => write!(f, "first warning"),
            TimerKind::LoopWarning => write!(f, "loop warning"),
        }
    }
}

/// A derived timer, ready to be installed on a boundary event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSpec {
    kind: TimerKind,
    raw_value: String,
    expression: TimerExpression,
}

impl TimerSpec {
    pub(crate) fn new(kind: TimerKind, raw_value: impl Into<String>, expression: TimerExpression) -> Self {
        Self {
            kind,
            raw_value: raw_value.into(),
            expression,
        }
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    /// The value the timer was derived from, as entered.
    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }

    /// The derived expression.
    pub fn expression(&self) -> &TimerExpression {
        &self.expression
    }
}

/// Why a timer change left the graph untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("the {0} must be set first")]
    MissingPrerequisite(TimerKind),

    #[error(transparent)]
    InvalidDuration(#[from] DurationError),
}

/// The effect of a timer change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerOutcome {
    /// A timer was (re)installed.
    Installed(TimerSpec),
    /// The field was cleared and its timer removed.
    Removed,
    /// Nothing changed.
    Skipped(SkipReason),
}

impl TimerOutcome {
    pub fn is_installed(&self) -> bool {
        matches!(self, TimerOutcome::Installed(_))
    }
}

/// Misuse of the timer operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("unknown element `{0}`")]
    UnknownElement(Id),

    #[error("`{0}` is not an activity")]
    NotAnActivity(Id),

    #[error("`{0}` is not a start or intermediate catch event")]
    NotATimerEvent(Id),

    #[error("`{0}` is not part of a process")]
    Detached(Id),

    #[error("malformed cycle `{0}`, expected `R<n>/<period>`")]
    MalformedCycle(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
