//! The rule trait and the built-in rules.
//!
//! Every rule sees every element of the graph once per lint run, in pre-order,
//! and decides for itself whether the element is of interest. A rule instance
//! lives for a single run, so any state it keeps is scoped to that run.

mod connectivity;
mod duplicate_flows;
mod flow;
mod gateway;
mod label;
mod scope;

use procflow_core::model::{Element, EventKind, Node, NodeKind, ProcessGraph};

pub use connectivity::NoDisconnected;
pub use duplicate_flows::NoDuplicateSequenceFlows;
pub use flow::{ConditionalFlows, FakeJoin, NoImplicitSplit};
pub use gateway::{DisallowNodeType, NoGatewayJoinFork, SuperfluousGateway};
pub use label::LabelRequired;
pub use scope::{
    EndEventRequired, EventSubProcessTypedStartEvent, SingleBlankStartEvent,
    SingleEventDefinition, StartEventRequired, SubProcessBlankStartEvent,
};

use crate::{
    error::{RuleCode, RuleError},
    reporter::Reporter,
};

/// A structural check run against every element of a process graph.
pub trait Rule {
    /// The configuration name, e.g. `fake-join`.
    fn name(&self) -> &'static str;

    /// The code attached to the rule's diagnostics.
    fn code(&self) -> RuleCode;

    /// Check a single element, reporting findings to `reporter`.
    ///
    /// # Errors
    ///
    /// An error means the rule could not make sense of the element. It is
    /// reported as an `engine-error` diagnostic and does not stop the run.
    fn check(
        &mut self,
        element: Element<'_>,
        graph: &ProcessGraph,
        reporter: &mut Reporter<'_>,
    ) -> Result<(), RuleError>;
}

/// Direct child nodes of a container, flows excluded.
fn child_nodes<'g>(graph: &'g ProcessGraph, container: &Node) -> impl Iterator<Item = &'g Node> {
    graph
        .children(container.id())
        .filter_map(|child| child.as_node())
}

fn is_start_event(node: &Node) -> bool {
    node.kind() == NodeKind::Event(EventKind::Start)
}

/// The scope name used in messages: `Sub process` or `Process`.
fn scope_label(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::SubProcess { .. } => "Sub process",
        _ => "Process",
    }
}
