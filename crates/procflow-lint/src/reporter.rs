//! Sink that rules report their findings to.

use procflow_core::identifier::Id;

use crate::{
    error::{Diagnostic, LintReport, RuleCode, Severity},
    translate::Translate,
};

/// Rule name stamped on diagnostics for faults inside a rule.
pub const ENGINE_ERROR: &str = "engine-error";

/// Collects the diagnostics of one lint run.
///
/// The linter points the reporter at the active rule before each check, so
/// rules only supply the element id and a message.
pub struct Reporter<'t> {
    translator: &'t dyn Translate,
    rule: &'static str,
    code: RuleCode,
    severity: Severity,
    report: LintReport,
}

impl<'t> Reporter<'t> {
    /// Create an empty reporter.
    pub fn new(translator: &'t dyn Translate) -> Self {
        Self {
            translator,
            rule: ENGINE_ERROR,
            code: RuleCode::L900,
            severity: Severity::Error,
            report: LintReport::new(),
        }
    }

    /// Attribute subsequent reports to `rule`.
    pub(crate) fn begin(&mut self, rule: &'static str, code: RuleCode, severity: Severity) {
        self.rule = rule;
        self.code = code;
        self.severity = severity;
    }

    /// Report a finding on `node_id` for the active rule.
    pub fn report(&mut self, node_id: Id, message: &str) {
        let message = self.translator.translate(message).into_owned();
        self.report.push(Diagnostic::new(
            node_id,
            self.rule,
            self.code,
            self.severity,
            message,
        ));
    }

    /// Report that the active rule failed on `node_id`.
    pub(crate) fn engine_error(&mut self, node_id: Id, reason: &str) {
        let message = format!(
            "{} ({}): {reason}",
            self.translator.translate("Rule failed on this element"),
            self.rule
        );
        self.report.push(Diagnostic::new(
            node_id,
            ENGINE_ERROR,
            RuleCode::L900,
            Severity::Error,
            message,
        ));
    }

    /// Finish collection and return the grouped diagnostics.
    pub fn finish(self) -> LintReport {
        self.report
    }
}
