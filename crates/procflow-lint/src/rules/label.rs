//! Label rule.

use procflow_core::model::{Element, EventKind, GatewayKind, Node, NodeKind, ProcessGraph, TaskKind};

use crate::{
    error::{RuleCode, RuleError},
    reporter::Reporter,
    rules::Rule,
};

/// Flow nodes, participants, lanes and conditioned flows need a name.
///
/// Exempt are parallel and event-based gateways, gateways that do not fork,
/// boundary events, service tasks, start and end events, and sub-processes.
#[derive(Debug, Default)]
pub struct LabelRequired;

impl Rule for LabelRequired {
    fn name(&self) -> &'static str {
        "label-required"
    }

    fn code(&self) -> RuleCode {
        RuleCode::L300
    }

    fn check(
        &mut self,
        element: Element<'_>,
        _graph: &ProcessGraph,
        reporter: &mut Reporter<'_>,
    ) -> Result<(), RuleError> {
        let needs_label = match element {
            Element::Node(node) => node_needs_label(node),
            Element::Flow(flow) => flow.is_conditioned(),
        };
        if !needs_label {
            return Ok(());
        }

        let blank = element.name().is_none_or(|name| name.trim().is_empty());
        if blank {
            reporter.report(element.id(), "Element is missing label/name");
        }
        Ok(())
    }
}

fn node_needs_label(node: &Node) -> bool {
    match node.kind() {
        NodeKind::Gateway(GatewayKind::Parallel | GatewayKind::EventBased) => false,
        NodeKind::Gateway(_) => node.outgoing().len() > 1,
        NodeKind::Event(EventKind::Boundary | EventKind::Start | EventKind::End) => false,
        NodeKind::Task(TaskKind::ServiceTask) => false,
        NodeKind::SubProcess { .. } => false,
        NodeKind::Task(_)
        | NodeKind::CallActivity
        | NodeKind::Event(_)
        | NodeKind::Participant
        | NodeKind::Lane => true,
        NodeKind::Process | NodeKind::DataObject | NodeKind::TextAnnotation => false,
    }
}
