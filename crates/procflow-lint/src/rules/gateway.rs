//! Gateway rules.

use procflow_core::model::{Element, GatewayKind, NodeKind, ProcessGraph};

use crate::{
    error::{RuleCode, RuleError},
    reporter::Reporter,
    rules::Rule,
};

/// A gateway either forks or joins, never both.
#[derive(Debug, Default)]
pub struct NoGatewayJoinFork;

impl Rule for NoGatewayJoinFork {
    fn name(&self) -> &'static str {
        "no-gateway-join-fork"
    }

    fn code(&self) -> RuleCode {
        RuleCode::L200
    }

    fn check(
        &mut self,
        element: Element<'_>,
        _graph: &ProcessGraph,
        reporter: &mut Reporter<'_>,
    ) -> Result<(), RuleError> {
        let Some(node) = element.as_node().filter(|node| node.kind().is_gateway()) else {
            return Ok(());
        };

        if node.incoming().len() > 1 && node.outgoing().len() > 1 {
            reporter.report(node.id(), "Gateway forks and joins");
        }
        Ok(())
    }
}

/// A gateway with one source and one target does nothing.
#[derive(Debug, Default)]
pub struct SuperfluousGateway;

impl Rule for SuperfluousGateway {
    fn name(&self) -> &'static str {
        "superfluous-gateway"
    }

    fn code(&self) -> RuleCode {
        RuleCode::L201
    }

    fn check(
        &mut self,
        element: Element<'_>,
        _graph: &ProcessGraph,
        reporter: &mut Reporter<'_>,
    ) -> Result<(), RuleError> {
        let Some(node) = element.as_node().filter(|node| node.kind().is_gateway()) else {
            return Ok(());
        };

        if node.incoming().len() == 1 && node.outgoing().len() == 1 {
            reporter.report(
                node.id(),
                "Gateway is superfluous. It only has one source and target.",
            );
        }
        Ok(())
    }
}

/// Rejects every node of one kind.
#[derive(Debug)]
pub struct DisallowNodeType {
    name: &'static str,
    code: RuleCode,
    kind: NodeKind,
}

impl DisallowNodeType {
    /// Create a rule named `name` that rejects nodes of `kind`.
    pub fn new(name: &'static str, code: RuleCode, kind: NodeKind) -> Self {
        Self { name, code, kind }
    }

    /// The `no-complex-gateway` rule.
    pub fn complex_gateway() -> Self {
        Self::new(
            "no-complex-gateway",
            RuleCode::L202,
            NodeKind::Gateway(GatewayKind::Complex),
        )
    }

    /// The `no-inclusive-gateway` rule.
    pub fn inclusive_gateway() -> Self {
        Self::new(
            "no-inclusive-gateway",
            RuleCode::L203,
            NodeKind::Gateway(GatewayKind::Inclusive),
        )
    }
}

impl Rule for DisallowNodeType {
    fn name(&self) -> &'static str {
        self.name
    }

    fn code(&self) -> RuleCode {
        self.code
    }

    fn check(
        &mut self,
        element: Element<'_>,
        _graph: &ProcessGraph,
        reporter: &mut Reporter<'_>,
    ) -> Result<(), RuleError> {
        let Some(node) = element.as_node().filter(|node| node.kind() == self.kind) else {
            return Ok(());
        };

        let message = format!("Element has disallowed type <{}>", self.kind.label());
        reporter.report(node.id(), &message);
        Ok(())
    }
}
