//! Checks for the mandatory configuration of user tasks.
//!
//! These run separately from the rule registry: a process can be
//! structurally sound while its tasks are still incompletely configured.

use log::debug;
use procflow_core::model::{Node, NodeKind, ProcessGraph, TaskKind};

use crate::{
    error::{LintReport, RuleCode, Severity},
    reporter::Reporter,
    translate::Translate,
};

/// Name stamped on required-field diagnostics.
pub const REQUIRED_FIELDS: &str = "required-fields";

/// Attribute holding the node type of a user task.
pub const NODE_TYPE: &str = "normal:nodeType";
/// Attribute holding the approval type of a user task.
pub const APPROVAL_TYPE: &str = "normal:type";
/// Attribute holding the configured assignees.
pub const ASSIGNEE_LIST: &str = "assignee:assigneeList";
/// Attribute holding the assignment strategy.
pub const ASSIGNMENT_STRATEGY: &str = "assignee:assign";

/// Report missing mandatory fields on every user task of `graph`.
///
/// - `normal:nodeType` and `normal:type` must be set.
/// - `assignee:assign` must be set once `assignee:assigneeList` is.
pub fn check_required_fields(graph: &ProcessGraph, translator: &dyn Translate) -> LintReport {
    let mut reporter = Reporter::new(translator);

    for task in graph
        .nodes()
        .filter(|node| node.kind() == NodeKind::Task(TaskKind::UserTask))
    {
        check_task(task, &mut reporter);
    }

    let report = reporter.finish();
    debug!(missing = report.len(); "Checked required user task fields");
    report
}

fn check_task(task: &Node, reporter: &mut Reporter<'_>) {
    let attributes = task.attributes();
    let name = task.name().unwrap_or_default();

    if attributes.get_non_empty(NODE_TYPE).is_none() {
        reporter.begin(REQUIRED_FIELDS, RuleCode::L400, Severity::Error);
        reporter.report(task.id(), &format!("User task {name}: node type is required"));
    }
    if attributes.get_non_empty(APPROVAL_TYPE).is_none() {
        reporter.begin(REQUIRED_FIELDS, RuleCode::L401, Severity::Error);
        reporter.report(
            task.id(),
            &format!("User task {name}: approval type is required"),
        );
    }
    if attributes.get_non_empty(ASSIGNEE_LIST).is_some()
        && attributes.get_non_empty(ASSIGNMENT_STRATEGY).is_none()
    {
        reporter.begin(REQUIRED_FIELDS, RuleCode::L402, Severity::Error);
        reporter.report(
            task.id(),
            &format!("User task {name}: assignees are configured, an assignment strategy is required"),
        );
    }
}
