//! Synchronisation of task time limits with their synthetic subgraphs.

use log::{debug, info};
use procflow_core::{
    duration::{self, Duration, DurationError},
    identifier::Id,
    model::{
        EventDefinition, EventKind, Node, NodeKind, ProcessGraph, SequenceFlow, TaskKind,
        TimerExpression, TimerExpressionKind,
    },
};

use crate::timer::spec::{
    SERVICE_FLOW_SUFFIX, SERVICE_SUFFIX, SkipReason, TimerError, TimerKind, TimerOutcome,
    TimerSpec,
};

/// Delegate expression of the escalation service tasks unless configured otherwise.
pub const DEFAULT_DELEGATE_EXPRESSION: &str = "${executionTimerDelegate}";

/// Installs, re-derives and removes the boundary-event subgraphs that carry a
/// task's time limits.
///
/// The raw values live on the task as attributes (see [`TimerKind::attribute`]).
/// Every subgraph is a pure function of those values, so setting the same
/// value twice leaves the graph unchanged.
///
/// # Examples
///
/// ```
/// use procflow::timer::{TimerAnnotator, TimerKind, TimerOutcome};
/// use procflow_core::model::{Node, NodeKind, ProcessGraph, TaskKind};
///
/// let mut graph = ProcessGraph::new("Process_1");
/// let root = graph.root_id();
/// graph
///     .add_node(root, Node::new("Approve", NodeKind::Task(TaskKind::UserTask)))
///     .unwrap();
///
/// let annotator = TimerAnnotator::default();
/// let task = "Approve".into();
/// annotator
///     .set_timer_field(&mut graph, task, TimerKind::Deadline, Some("2H"))
///     .unwrap();
/// let outcome = annotator
///     .set_timer_field(&mut graph, task, TimerKind::FirstWarning, Some("30M"))
///     .unwrap();
///
/// let TimerOutcome::Installed(spec) = outcome else {
///     panic!("first warning should be installed");
/// };
/// assert_eq!(spec.expression().body(), "PT1H30M");
/// assert!(graph.contains("Approve_timer_service_flow".into()));
/// ```
#[derive(Debug, Clone)]
pub struct TimerAnnotator {
    delegate_expression: String,
}

impl TimerAnnotator {
    /// Creates an annotator whose escalation tasks call `delegate_expression`.
    pub fn new(delegate_expression: impl Into<String>) -> Self {
        Self {
            delegate_expression: delegate_expression.into(),
        }
    }

    pub fn delegate_expression(&self) -> &str {
        &self.delegate_expression
    }

    /// Sets or clears one time limit of `task`.
    ///
    /// A non-empty `value` is stored and its subgraph (re)installed, unless
    /// the value cannot be derived, in which case nothing is touched and
    /// [`TimerOutcome::Skipped`] is returned. Clearing removes the attribute,
    /// the subgraph and the subgraphs of every dependent limit, whose raw
    /// values are kept.
    ///
    /// Dependent limits are re-derived after every successful install.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError`] if `task` is unknown, is not an activity or has
    /// no container.
    pub fn set_timer_field(
        &self,
        graph: &mut ProcessGraph,
        task: Id,
        kind: TimerKind,
        value: Option<&str>,
    ) -> Result<TimerOutcome, TimerError> {
        let container = owning_container(graph, task)?;
        let value = value.map(str::trim).filter(|value| !value.is_empty());

        let Some(raw) = value else {
            if let Some(node) = graph.node_mut(task) {
                node.attributes_mut().remove(kind.attribute());
            }
            remove_subgraph(graph, kind.boundary_id(task))?;
            self.refresh_dependents(graph, container, task, kind, false)?;

            info!(task_id:% = task, kind:% = kind; "Cleared time limit");
            return Ok(TimerOutcome::Removed);
        };

        let spec = match derive(graph, task, kind, raw) {
            Ok(spec) => spec,
            Err(reason) => {
                debug!(task_id:% = task, kind:% = kind, reason:% = reason; "Skipped time limit");
                return Ok(TimerOutcome::Skipped(reason));
            }
        };

        if let Some(node) = graph.node_mut(task) {
            node.attributes_mut().set(kind.attribute(), raw);
        }
        self.install(graph, container, task, &spec)?;
        self.refresh_dependents(graph, container, task, kind, true)?;

        info!(
            task_id:% = task, kind:% = kind, expression:% = spec.expression();
            "Installed time limit",
        );
        Ok(TimerOutcome::Installed(spec))
    }

    /// Removes `task` together with the subgraphs of all its time limits.
    ///
    /// Returns the removed task, `None` if it did not exist.
    pub fn remove_task(
        &self,
        graph: &mut ProcessGraph,
        task: Id,
    ) -> Result<Option<Node>, TimerError> {
        for kind in TimerKind::ALL {
            remove_subgraph(graph, kind.boundary_id(task))?;
        }
        let removed = graph.remove_node(task)?;

        info!(task_id:% = task, removed = removed.is_some(); "Removed task");
        Ok(removed)
    }

    /// Removes every synthetic element from `graph`, regardless of owner.
    ///
    /// Task attributes are left in place. Returns the number of removed
    /// elements.
    pub fn clear_all(&self, graph: &mut ProcessGraph) -> Result<usize, TimerError> {
        let doomed_flows: Vec<Id> = graph
            .flows()
            .map(SequenceFlow::id)
            .filter(|id| id.ends_with(SERVICE_FLOW_SUFFIX))
            .collect();
        let doomed_nodes: Vec<Id> = graph
            .nodes()
            .filter(|node| is_synthetic(node))
            .map(Node::id)
            .collect();

        let mut removed = 0;
        for flow in doomed_flows {
            if graph.remove_flow(flow).is_some() {
                removed += 1;
            }
        }
        for node in doomed_nodes {
            if graph.remove_node(node)?.is_some() {
                removed += 1;
            }
        }

        info!(removed; "Cleared all time limits");
        Ok(removed)
    }

    fn install(
        &self,
        graph: &mut ProcessGraph,
        container: Id,
        task: Id,
        spec: &TimerSpec,
    ) -> Result<(), TimerError> {
        let boundary = spec.kind().boundary_id(task);
        remove_subgraph(graph, boundary)?;

        let service = boundary.with_suffix(SERVICE_SUFFIX);
        let flow = boundary.with_suffix(SERVICE_FLOW_SUFFIX);

        let event = Node::new(boundary, NodeKind::Event(EventKind::Boundary))
            .with_attribute("cancelActivity", "false")
            .with_attribute("attachedToRef", task.to_text())
            .with_event_definition(EventDefinition::Timer(spec.expression().clone()));
        let escalation = Node::new(service, NodeKind::Task(TaskKind::ServiceTask))
            .with_attribute("flowable:delegateExpression", self.delegate_expression.as_str());

        graph.add_node(container, event)?;
        graph.add_node(container, escalation)?;
        graph.add_flow(container, SequenceFlow::new(flow, boundary, service))?;

        debug!(task_id:% = task, boundary_id:% = boundary; "Installed timer subgraph");
        Ok(())
    }

    /// Walks the dependency chain below `kind`, reinstalling every limit that
    /// still derives and removing the rest.
    fn refresh_dependents(
        &self,
        graph: &mut ProcessGraph,
        container: Id,
        task: Id,
        kind: TimerKind,
        mut upstream_present: bool,
    ) -> Result<(), TimerError> {
        let mut current = kind;
        while let Some(dependent) = current.dependent() {
            let raw = graph
                .node(task)
                .and_then(|node| node.attributes().get_non_empty(dependent.attribute()))
                .map(str::to_owned);

            match raw.filter(|_| upstream_present) {
                Some(raw) => match derive(graph, task, dependent, &raw) {
                    Ok(spec) => self.install(graph, container, task, &spec)?,
                    Err(reason) => {
                        debug!(
                            task_id:% = task, kind:% = dependent, reason:% = reason;
                            "Dependent time limit no longer derives",
                        );
                        remove_subgraph(graph, dependent.boundary_id(task))?;
                        upstream_present = false;
                    }
                },
                None => {
                    remove_subgraph(graph, dependent.boundary_id(task))?;
                    upstream_present = false;
                }
            }
            current = dependent;
        }
        Ok(())
    }
}

impl Default for TimerAnnotator {
    fn default() -> Self {
        Self::new(DEFAULT_DELEGATE_EXPRESSION)
    }
}

/// Derives the timer of `kind` from `raw` and the task's stored limits.
fn derive(
    graph: &ProcessGraph,
    task: Id,
    kind: TimerKind,
    raw: &str,
) -> Result<TimerSpec, SkipReason> {
    let stored = |kind: TimerKind| {
        graph
            .node(task)
            .and_then(|node| node.attributes().get_non_empty(kind.attribute()))
            .ok_or(SkipReason::MissingPrerequisite(kind))
    };

    let expression = match kind {
        TimerKind::Deadline => {
            if Duration::parse(raw)?.total_minutes() == 0 {
                return Err(DurationError::NonPositive.into());
            }
            TimerExpression::new(TimerExpressionKind::TimeDuration, format!("PT{raw}"))
        }
        TimerKind::FirstWarning => {
            let deadline = stored(TimerKind::Deadline)?;
            let fires_after = duration::subtract(raw, deadline)?;
            TimerExpression::new(TimerExpressionKind::TimeDuration, format!("PT{fires_after}"))
        }
        TimerKind::LoopWarning => {
            let lead = stored(TimerKind::FirstWarning)?;
            let repeats = duration::divide(raw, lead)?;
            TimerExpression::new(TimerExpressionKind::TimeCycle, format!("R{repeats}/PT{raw}"))
        }
    };
    Ok(TimerSpec::new(kind, raw, expression))
}

/// Finds the container that synthetic nodes of `task` are added to.
fn owning_container(graph: &ProcessGraph, task: Id) -> Result<Id, TimerError> {
    let node = graph.node(task).ok_or(TimerError::UnknownElement(task))?;
    if !node.kind().is_activity() {
        return Err(TimerError::NotAnActivity(task));
    }
    node.parent().ok_or(TimerError::Detached(task))
}

fn remove_subgraph(graph: &mut ProcessGraph, boundary: Id) -> Result<(), TimerError> {
    graph.remove_flow(boundary.with_suffix(SERVICE_FLOW_SUFFIX));
    graph.remove_node(boundary.with_suffix(SERVICE_SUFFIX))?;
    graph.remove_node(boundary)?;
    Ok(())
}

fn is_synthetic(node: &Node) -> bool {
    match node.kind() {
        NodeKind::Event(EventKind::Boundary) => TimerKind::ALL
            .iter()
            .any(|kind| node.id().ends_with(kind.suffix())),
        NodeKind::Task(TaskKind::ServiceTask) => node.id().ends_with(SERVICE_SUFFIX),
        _ => false,
    }
}
