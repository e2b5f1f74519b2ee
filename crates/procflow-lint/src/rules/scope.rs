//! Rules about the content of a scope (process or sub-process).

use procflow_core::model::{Element, EventKind, NodeKind, ProcessGraph};

use crate::{
    error::{RuleCode, RuleError},
    reporter::Reporter,
    rules::{Rule, child_nodes, is_start_event, scope_label},
};

/// Every process and sub-process needs an end event.
#[derive(Debug, Default)]
pub struct EndEventRequired;

impl Rule for EndEventRequired {
    fn name(&self) -> &'static str {
        "end-event-required"
    }

    fn code(&self) -> RuleCode {
        RuleCode::L001
    }

    fn check(
        &mut self,
        element: Element<'_>,
        graph: &ProcessGraph,
        reporter: &mut Reporter<'_>,
    ) -> Result<(), RuleError> {
        let Some(node) = element.as_node().filter(|node| node.kind().is_container()) else {
            return Ok(());
        };

        let has_end = child_nodes(graph, node)
            .any(|child| child.kind() == NodeKind::Event(EventKind::End));
        if !has_end {
            let message = format!("{} is missing end event", scope_label(node.kind()));
            reporter.report(node.id(), &message);
        }
        Ok(())
    }
}

/// Every process and sub-process needs a start event.
#[derive(Debug, Default)]
pub struct StartEventRequired;

impl Rule for StartEventRequired {
    fn name(&self) -> &'static str {
        "start-event-required"
    }

    fn code(&self) -> RuleCode {
        RuleCode::L002
    }

    fn check(
        &mut self,
        element: Element<'_>,
        graph: &ProcessGraph,
        reporter: &mut Reporter<'_>,
    ) -> Result<(), RuleError> {
        let Some(node) = element.as_node().filter(|node| node.kind().is_container()) else {
            return Ok(());
        };

        if !child_nodes(graph, node).any(is_start_event) {
            let message = format!("{} is missing start event", scope_label(node.kind()));
            reporter.report(node.id(), &message);
        }
        Ok(())
    }
}

/// Start events of an event sub-process must say what triggers them.
#[derive(Debug, Default)]
pub struct EventSubProcessTypedStartEvent;

impl Rule for EventSubProcessTypedStartEvent {
    fn name(&self) -> &'static str {
        "event-sub-process-typed-start-event"
    }

    fn code(&self) -> RuleCode {
        RuleCode::L003
    }

    fn check(
        &mut self,
        element: Element<'_>,
        graph: &ProcessGraph,
        reporter: &mut Reporter<'_>,
    ) -> Result<(), RuleError> {
        let Some(node) = element
            .as_node()
            .filter(|node| node.kind().is_event_sub_process())
        else {
            return Ok(());
        };

        for start in child_nodes(graph, node).filter(|child| is_start_event(child)) {
            if start.event_definitions().is_empty() {
                reporter.report(start.id(), "Start event is missing event definition");
            }
        }
        Ok(())
    }
}

/// Start events of a normal sub-process must be blank.
#[derive(Debug, Default)]
pub struct SubProcessBlankStartEvent;

impl Rule for SubProcessBlankStartEvent {
    fn name(&self) -> &'static str {
        "sub-process-blank-start-event"
    }

    fn code(&self) -> RuleCode {
        RuleCode::L004
    }

    fn check(
        &mut self,
        element: Element<'_>,
        graph: &ProcessGraph,
        reporter: &mut Reporter<'_>,
    ) -> Result<(), RuleError> {
        let Some(node) = element.as_node().filter(|node| {
            node.kind()
                == NodeKind::SubProcess {
                    triggered_by_event: false,
                }
        }) else {
            return Ok(());
        };

        for start in child_nodes(graph, node).filter(|child| is_start_event(child)) {
            if !start.event_definitions().is_empty() {
                reporter.report(start.id(), "Start event must be blank");
            }
        }
        Ok(())
    }
}

/// At most one blank start event per scope.
#[derive(Debug, Default)]
pub struct SingleBlankStartEvent;

impl Rule for SingleBlankStartEvent {
    fn name(&self) -> &'static str {
        "single-blank-start-event"
    }

    fn code(&self) -> RuleCode {
        RuleCode::L005
    }

    fn check(
        &mut self,
        element: Element<'_>,
        graph: &ProcessGraph,
        reporter: &mut Reporter<'_>,
    ) -> Result<(), RuleError> {
        let Some(node) = element.as_node().filter(|node| node.kind().is_container()) else {
            return Ok(());
        };

        let blank_starts = child_nodes(graph, node)
            .filter(|child| is_start_event(child) && child.event_definitions().is_empty())
            .count();
        if blank_starts > 1 {
            let message = format!(
                "{} has multiple blank start events",
                scope_label(node.kind())
            );
            reporter.report(node.id(), &message);
        }
        Ok(())
    }
}

/// An event carries at most one event definition.
#[derive(Debug, Default)]
pub struct SingleEventDefinition;

impl Rule for SingleEventDefinition {
    fn name(&self) -> &'static str {
        "single-event-definition"
    }

    fn code(&self) -> RuleCode {
        RuleCode::L006
    }

    fn check(
        &mut self,
        element: Element<'_>,
        _graph: &ProcessGraph,
        reporter: &mut Reporter<'_>,
    ) -> Result<(), RuleError> {
        let Some(node) = element.as_node().filter(|node| node.kind().is_event()) else {
            return Ok(());
        };

        if node.event_definitions().len() > 1 {
            reporter.report(node.id(), "Event has multiple event definitions");
        }
        Ok(())
    }
}
