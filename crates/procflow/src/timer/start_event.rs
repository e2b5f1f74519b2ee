//! Timer definitions of start and intermediate catch events.

use log::{debug, info};
use procflow_core::{
    identifier::Id,
    model::{
        Attributes, EventDefinition, EventKind, NodeKind, ProcessGraph, TimerExpression,
        TimerExpressionKind,
    },
};

use crate::timer::spec::TimerError;

/// The configurable parts of a timer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerEventField {
    /// Fixed point in time, `timeLimit:startTime`.
    StartDate,
    /// Wait time, `timeLimit:continuedTime`.
    Duration,
    /// Repetition `R<n>/<period>`, `timeLimit:loopTime`.
    Cycle,
}

impl TimerEventField {
    pub fn attribute(&self) -> &'static str {
        match self {
            TimerEventField::StartDate => "timeLimit:startTime",
            TimerEventField::Duration => "timeLimit:continuedTime",
            TimerEventField::Cycle => "timeLimit:loopTime",
        }
    }
}

/// Sets or clears one field of a timer event and rebuilds its definition.
///
/// The event ends up with at most one event definition. Setting a field makes
/// its expression the active one; a cycle is anchored at the stored start date
/// (`R<n>/<start>/<period>`) and a start date re-anchors a stored cycle.
/// Clearing a field falls back to the remaining fields, preferring the cycle,
/// then the start date, then the duration.
///
/// Returns the event's timer expression after the change.
///
/// # Errors
///
/// - [`TimerError::UnknownElement`] if `event` does not exist.
/// - [`TimerError::NotATimerEvent`] if it is not a start or intermediate
///   catch event.
/// - [`TimerError::MalformedCycle`] if a cycle is not of the form `R<n>/<period>`.
///
/// # Examples
///
/// ```
/// use procflow::timer::{TimerEventField, configure_timer_event};
/// use procflow_core::model::{EventKind, Node, NodeKind, ProcessGraph};
///
/// let mut graph = ProcessGraph::new("Process_1");
/// let root = graph.root_id();
/// graph
///     .add_node(root, Node::new("Start", NodeKind::Event(EventKind::Start)))
///     .unwrap();
///
/// let event = "Start".into();
/// configure_timer_event(&mut graph, event, TimerEventField::Cycle, Some("R3/PT1H")).unwrap();
/// let expression = configure_timer_event(
///     &mut graph,
///     event,
///     TimerEventField::StartDate,
///     Some("2026-03-01T09:00"),
/// )
/// .unwrap()
/// .unwrap();
///
/// assert_eq!(expression.body(), "R3/2026-03-01T09:00/PT1H");
/// ```
pub fn configure_timer_event(
    graph: &mut ProcessGraph,
    event: Id,
    field: TimerEventField,
    value: Option<&str>,
) -> Result<Option<TimerExpression>, TimerError> {
    let node = graph.node_mut(event).ok_or(TimerError::UnknownElement(event))?;
    if !matches!(
        node.kind(),
        NodeKind::Event(EventKind::Start | EventKind::IntermediateCatch)
    ) {
        return Err(TimerError::NotATimerEvent(event));
    }

    let value = value.map(str::trim).filter(|value| !value.is_empty());
    if let (TimerEventField::Cycle, Some(cycle)) = (field, value) {
        split_cycle(cycle)?;
    }

    let attributes = node.attributes_mut();
    let expression = match value {
        Some(raw) => {
            attributes.set(field.attribute(), raw);
            expression_for(attributes, field)
        }
        None => {
            attributes.remove(field.attribute());
            [
                TimerEventField::Cycle,
                TimerEventField::StartDate,
                TimerEventField::Duration,
            ]
            .into_iter()
            .find(|field| attributes.get_non_empty(field.attribute()).is_some())
            .and_then(|field| expression_for(attributes, field))
        }
    };

    let definitions = expression
        .iter()
        .cloned()
        .map(EventDefinition::Timer)
        .collect();
    node.set_event_definitions(definitions);

    match &expression {
        Some(expression) => {
            info!(event_id:% = event, expression:% = expression; "Configured timer event")
        }
        None => debug!(event_id:% = event; "Timer event has no timer left"),
    }
    Ok(expression)
}

/// Builds the expression `field` contributes, given the stored attributes.
fn expression_for(attributes: &Attributes, field: TimerEventField) -> Option<TimerExpression> {
    let start = attributes.get_non_empty(TimerEventField::StartDate.attribute());
    let cycle = attributes.get_non_empty(TimerEventField::Cycle.attribute());

    let expression = match field {
        TimerEventField::StartDate => {
            let start = start?;
            match cycle.and_then(|cycle| split_cycle(cycle).ok()) {
                Some((repeat, period)) => TimerExpression::new(
                    TimerExpressionKind::TimeCycle,
                    format!("{repeat}/{start}/{period}"),
                ),
                None => TimerExpression::new(TimerExpressionKind::TimeDate, start),
            }
        }
        TimerEventField::Duration => TimerExpression::new(
            TimerExpressionKind::TimeDuration,
            attributes.get_non_empty(field.attribute())?,
        ),
        TimerEventField::Cycle => {
            let cycle = cycle?;
            let body = match (start, split_cycle(cycle).ok()) {
                (Some(start), Some((repeat, period))) => format!("{repeat}/{start}/{period}"),
                _ => cycle.to_owned(),
            };
            TimerExpression::new(TimerExpressionKind::TimeCycle, body)
        }
    };
    Some(expression)
}

/// Splits `R<n>/<period>` into its repetition and period.
fn split_cycle(cycle: &str) -> Result<(&str, &str), TimerError> {
    match cycle.split_once('/') {
        Some((repeat, period))
            if repeat
                .strip_prefix('R')
                .is_some_and(|count| count.bytes().all(|b| b.is_ascii_digit()))
                && !period.is_empty()
                && !period.contains('/') =>
        {
            Ok((repeat, period))
        }
        _ => Err(TimerError::MalformedCycle(cycle.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procflow_core::model::{Node, TaskKind};

    fn graph_with_event(kind: EventKind) -> (ProcessGraph, Id) {
        let mut graph = ProcessGraph::new("Process_1");
        let root = graph.root_id();
        graph
            .add_node(root, Node::new("Timer_1", NodeKind::Event(kind)))
            .unwrap();
        (graph, Id::new("Timer_1"))
    }

    #[test]
    fn test_start_date_alone() {
        let (mut graph, event) = graph_with_event(EventKind::Start);

        let expression =
            configure_timer_event(&mut graph, event, TimerEventField::StartDate, Some("2026-01-05"))
                .unwrap()
                .unwrap();

        assert_eq!(expression.kind(), TimerExpressionKind::TimeDate);
        assert_eq!(expression.body(), "2026-01-05");
    }

    #[test]
    fn test_cycle_is_anchored_at_start_date() {
        let (mut graph, event) = graph_with_event(EventKind::Start);

        configure_timer_event(&mut graph, event, TimerEventField::StartDate, Some("2026-01-05"))
            .unwrap();
        let expression =
            configure_timer_event(&mut graph, event, TimerEventField::Cycle, Some("R2/P1D"))
                .unwrap()
                .unwrap();

        assert_eq!(expression.kind(), TimerExpressionKind::TimeCycle);
        assert_eq!(expression.body(), "R2/2026-01-05/P1D");
        assert_eq!(graph.node(event).unwrap().event_definitions().len(), 1);
    }

    #[test]
    fn test_duration_on_catch_event() {
        let (mut graph, event) = graph_with_event(EventKind::IntermediateCatch);

        let expression =
            configure_timer_event(&mut graph, event, TimerEventField::Duration, Some("PT15M"))
                .unwrap()
                .unwrap();

        assert_eq!(expression.kind(), TimerExpressionKind::TimeDuration);
        assert_eq!(expression.body(), "PT15M");
    }

    #[test]
    fn test_clearing_falls_back() {
        let (mut graph, event) = graph_with_event(EventKind::Start);

        configure_timer_event(&mut graph, event, TimerEventField::StartDate, Some("2026-01-05"))
            .unwrap();
        configure_timer_event(&mut graph, event, TimerEventField::Cycle, Some("R2/P1D")).unwrap();

        let expression = configure_timer_event(&mut graph, event, TimerEventField::Cycle, None)
            .unwrap()
            .unwrap();
        assert_eq!(expression.kind(), TimerExpressionKind::TimeDate);

        let expression =
            configure_timer_event(&mut graph, event, TimerEventField::StartDate, None).unwrap();
        assert_eq!(expression, None);
        assert!(graph.node(event).unwrap().event_definitions().is_empty());
    }

    #[test]
    fn test_malformed_cycle_leaves_event_untouched() {
        let (mut graph, event) = graph_with_event(EventKind::Start);

        for cycle in ["P1D", "X2/P1D", "R2/", "R2/a/b"] {
            assert_eq!(
                configure_timer_event(&mut graph, event, TimerEventField::Cycle, Some(cycle)),
                Err(TimerError::MalformedCycle(cycle.to_owned())),
                "Input: {cycle}"
            );
        }
        assert!(graph.node(event).unwrap().attributes().is_empty());
    }

    #[test]
    fn test_rejects_other_elements() {
        let mut graph = ProcessGraph::new("Process_1");
        let root = graph.root_id();
        graph
            .add_node(root, Node::new("Task_1", NodeKind::Task(TaskKind::Task)))
            .unwrap();
        graph
            .add_node(root, Node::new("End_1", NodeKind::Event(EventKind::End)))
            .unwrap();

        for id in ["Task_1", "End_1"] {
            assert_eq!(
                configure_timer_event(
                    &mut graph,
                    Id::new(id),
                    TimerEventField::Duration,
                    Some("PT1M")
                ),
                Err(TimerError::NotATimerEvent(Id::new(id)))
            );
        }
    }
}
