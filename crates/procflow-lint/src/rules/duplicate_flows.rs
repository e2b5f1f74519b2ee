//! Duplicate sequence flow rule.

use std::collections::{HashMap, HashSet};

use procflow_core::{
    identifier::Id,
    model::{Element, ProcessGraph},
};

use crate::{
    error::{RuleCode, RuleError},
    reporter::Reporter,
    rules::Rule,
};

/// Suffix of the flows connecting a timer boundary event to its escalation task.
const SERVICE_FLOW_SUFFIX: &str = "_service_flow";

/// Two flows must not share source, target and condition.
///
/// The first flow of a key is kept; every later one is reported, and so are
/// its source and target, once each per run.
#[derive(Debug, Default)]
pub struct NoDuplicateSequenceFlows {
    seen: HashMap<(Id, Id, String), Id>,
    outgoing_reported: HashSet<Id>,
    incoming_reported: HashSet<Id>,
}

impl Rule for NoDuplicateSequenceFlows {
    fn name(&self) -> &'static str {
        "no-duplicate-sequence-flows"
    }

    fn code(&self) -> RuleCode {
        RuleCode::L302
    }

    fn check(
        &mut self,
        element: Element<'_>,
        _graph: &ProcessGraph,
        reporter: &mut Reporter<'_>,
    ) -> Result<(), RuleError> {
        let Some(flow) = element.as_flow() else {
            return Ok(());
        };
        if flow.id().ends_with(SERVICE_FLOW_SUFFIX) {
            return Ok(());
        }

        let key = (
            flow.source(),
            flow.target(),
            flow.condition().unwrap_or_default().to_owned(),
        );
        if self.seen.contains_key(&key) {
            reporter.report(flow.id(), "SequenceFlow is a duplicate");

            if self.outgoing_reported.insert(flow.source()) {
                reporter.report(flow.source(), "Duplicate outgoing sequence flows");
            }
            if self.incoming_reported.insert(flow.target()) {
                reporter.report(flow.target(), "Duplicate incoming sequence flows");
            }
        } else {
            self.seen.insert(key, flow.id());
        }
        Ok(())
    }
}
