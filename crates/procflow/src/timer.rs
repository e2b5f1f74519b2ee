//! Task time limits and timer events.
//!
//! A task's SLA is configured through three raw attributes, each of which is
//! mirrored into a synthetic subgraph next to the task:
//!
//! ```text
//! Task ── attachedToRef ── Task_overtime ──> Task_overtime_service
//!                          (boundary event)  (escalation service task)
//! ```
//!
//! | kind | attribute | boundary id | expression |
//! |---|---|---|---|
//! | [`TimerKind::Deadline`] | `timeLimit:timeDuration` | `<task>_overtime` | `PT<deadline>` |
//! | [`TimerKind::FirstWarning`] | `timeLimit:firstWarnDuration` | `<task>_timer` | `PT<deadline - lead>` |
//! | [`TimerKind::LoopWarning`] | `timeLimit:loopWarnDuration` | `<task>_timer_loop` | `R<n>/PT<period>` |
//!
//! [`TimerAnnotator`] keeps the subgraphs in sync with the attributes and
//! [`configure_timer_event`] does the same for the timer definition of start
//! and intermediate catch events.

mod annotator;
mod spec;
mod start_event;

pub use annotator::{DEFAULT_DELEGATE_EXPRESSION, TimerAnnotator};
pub use spec::{SkipReason, TimerError, TimerKind, TimerOutcome, TimerSpec};
pub use start_event::{TimerEventField, configure_timer_event};
