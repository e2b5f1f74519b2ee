//! Connectivity rule.

use procflow_core::model::{Element, GatewayKind, Node, NodeKind, ProcessGraph, TaskKind};

use crate::{
    error::{RuleCode, RuleError},
    reporter::Reporter,
    rules::Rule,
};

/// Structural nodes need both an incoming and an outgoing sequence flow.
///
/// A flow counts if it is in the rendered edge set or if a semantic reference
/// of the node resolves to it. Re-imported documents often lack the semantic
/// references altogether. Nodes inside an event sub-process are exempt.
#[derive(Debug, Default)]
pub struct NoDisconnected;

impl Rule for NoDisconnected {
    fn name(&self) -> &'static str {
        "no-disconnected"
    }

    fn code(&self) -> RuleCode {
        RuleCode::L301
    }

    fn check(
        &mut self,
        element: Element<'_>,
        graph: &ProcessGraph,
        reporter: &mut Reporter<'_>,
    ) -> Result<(), RuleError> {
        let Some(node) = element.as_node().filter(|node| is_structural(node)) else {
            return Ok(());
        };
        if in_event_scope(graph, node) {
            return Ok(());
        }

        let id = node.id();
        let left = node.incoming().iter().any(|flow| graph.flow(*flow).is_some())
            || graph.flows_into(id).next().is_some();
        let right = node.outgoing().iter().any(|flow| graph.flow(*flow).is_some())
            || graph.flows_from(id).next().is_some();

        if !left {
            let message = describe(node, "Element is not left connected");
            reporter.report(id, &message);
        }
        if !right {
            let message = describe(node, "Element is not right connected");
            reporter.report(id, &message);
        }
        Ok(())
    }
}

fn is_structural(node: &Node) -> bool {
    matches!(
        node.kind(),
        NodeKind::Task(TaskKind::UserTask)
            | NodeKind::CallActivity
            | NodeKind::SubProcess { .. }
            | NodeKind::Gateway(
                GatewayKind::Exclusive | GatewayKind::Parallel | GatewayKind::Inclusive
            )
    )
}

fn in_event_scope(graph: &ProcessGraph, node: &Node) -> bool {
    node.kind().is_event_sub_process()
        || graph
            .ancestors(node.id())
            .any(|ancestor| ancestor.kind().is_event_sub_process())
}

/// `UserTask Approve: <message>`, or `UserTask: <message>` when unnamed.
fn describe(node: &Node, message: &str) -> String {
    let label = node.kind().label();
    let kind = label.strip_prefix("bpmn:").unwrap_or(label);
    match node.name().map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("{kind} {name}: {message}"),
        None => format!("{kind}: {message}"),
    }
}
