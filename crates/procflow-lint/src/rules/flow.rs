//! Rules about the sequence flows entering and leaving a node.

use procflow_core::model::{Element, Node, ProcessGraph, SequenceFlow};

use crate::{
    error::{RuleCode, RuleError},
    reporter::Reporter,
    rules::Rule,
};

/// Outgoing flows of a conditionally forking node need a condition or must
/// be the default flow.
///
/// A node forks conditionally once it has a default flow or any conditioned
/// outgoing flow.
#[derive(Debug, Default)]
pub struct ConditionalFlows;

impl Rule for ConditionalFlows {
    fn name(&self) -> &'static str {
        "conditional-flows"
    }

    fn code(&self) -> RuleCode {
        RuleCode::L100
    }

    fn check(
        &mut self,
        element: Element<'_>,
        graph: &ProcessGraph,
        reporter: &mut Reporter<'_>,
    ) -> Result<(), RuleError> {
        let Some(node) = element.as_node().filter(|node| !node.outgoing().is_empty()) else {
            return Ok(());
        };

        let outgoing = graph.outgoing(node.id())?;
        let forking = outgoing
            .iter()
            .any(|flow| flow.is_default() || flow.is_conditioned());
        if !forking {
            return Ok(());
        }

        for flow in outgoing.iter().filter(|flow| is_unguarded(flow)) {
            reporter.report(flow.id(), "Sequence flow is missing condition");
        }
        Ok(())
    }
}

/// Only gateways may join.
#[derive(Debug, Default)]
pub struct FakeJoin;

impl Rule for FakeJoin {
    fn name(&self) -> &'static str {
        "fake-join"
    }

    fn code(&self) -> RuleCode {
        RuleCode::L101
    }

    fn check(
        &mut self,
        element: Element<'_>,
        _graph: &ProcessGraph,
        reporter: &mut Reporter<'_>,
    ) -> Result<(), RuleError> {
        let Some(node) = element.as_node().filter(|node| is_task_or_event(node)) else {
            return Ok(());
        };

        if node.incoming().len() > 1 {
            reporter.report(node.id(), "Incoming flows do not join");
        }
        Ok(())
    }
}

/// Tasks and events must not split without conditions; a parallel gateway
/// has to be modelled instead.
#[derive(Debug, Default)]
pub struct NoImplicitSplit;

impl Rule for NoImplicitSplit {
    fn name(&self) -> &'static str {
        "no-implicit-split"
    }

    fn code(&self) -> RuleCode {
        RuleCode::L102
    }

    fn check(
        &mut self,
        element: Element<'_>,
        graph: &ProcessGraph,
        reporter: &mut Reporter<'_>,
    ) -> Result<(), RuleError> {
        let Some(node) = element.as_node().filter(|node| is_task_or_event(node)) else {
            return Ok(());
        };

        let unguarded = graph
            .outgoing(node.id())?
            .into_iter()
            .filter(|flow| is_unguarded(flow))
            .count();
        if unguarded > 1 {
            reporter.report(node.id(), "Flow splits implicitly");
        }
        Ok(())
    }
}

fn is_task_or_event(node: &Node) -> bool {
    node.kind().is_task() || node.kind().is_event()
}

fn is_unguarded(flow: &SequenceFlow) -> bool {
    !flow.is_conditioned() && !flow.is_default()
}
