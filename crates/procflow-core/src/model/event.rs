//! Event definitions.

use std::fmt;

/// The three forms a timer expression can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerExpressionKind {
    /// ISO-8601 duration, e.g. `PT1H30M`.
    TimeDuration,
    /// Fixed point in time.
    TimeDate,
    /// Repetition, e.g. `R4/PT15M`.
    TimeCycle,
}

impl TimerExpressionKind {
    /// The attribute name of this expression on a timer event definition.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerExpressionKind::TimeDuration => "timeDuration",
            TimerExpressionKind::TimeDate => "timeDate",
            TimerExpressionKind::TimeCycle => "timeCycle",
        }
    }
}

impl fmt::Display for TimerExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A timer expression: its kind plus the expression body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimerExpression {
    kind: TimerExpressionKind,
    body: String,
}

impl TimerExpression {
    /// Create a new timer expression.
    pub fn new(kind: TimerExpressionKind, body: impl Into<String>) -> Self {
        Self {
            kind,
            body: body.into(),
        }
    }

    /// Get the expression kind.
    pub fn kind(&self) -> TimerExpressionKind {
        self.kind
    }

    /// Borrow the expression body.
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl fmt::Display for TimerExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.kind, self.body)
    }
}

/// An event definition carried by an event node.
///
/// An event without any definition is a "blank" event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventDefinition {
    Timer(TimerExpression),
    Message,
    Signal,
    Error,
    Escalation,
    Conditional,
    Terminate,
}

impl EventDefinition {
    /// Returns the timer expression if this is a timer definition.
    pub fn as_timer(&self) -> Option<&TimerExpression> {
        match self {
            EventDefinition::Timer(expression) => Some(expression),
            _ => None,
        }
    }
}
