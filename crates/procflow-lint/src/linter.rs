//! Traversal and aggregation.

use log::{debug, info, trace};
use procflow_core::model::{Element, ProcessGraph};

use crate::{
    error::{LintReport, Severity},
    registry::RuleRegistry,
    reporter::Reporter,
    rules::Rule,
    translate::{Translate, Untranslated},
};

/// Runs the rules of a [`RuleRegistry`] over process graphs.
///
/// Each call to [`Linter::lint`] opens a new [`LintSession`], so a linter can
/// be reused across graphs and calls without state carrying over.
pub struct Linter {
    registry: RuleRegistry,
    translator: Box<dyn Translate>,
}

impl Linter {
    /// Create a linter over `registry` with untranslated messages.
    pub fn new(registry: RuleRegistry) -> Self {
        Self {
            registry,
            translator: Box::new(Untranslated),
        }
    }

    /// Translate messages with `translator`.
    pub fn with_translator(mut self, translator: impl Translate + 'static) -> Self {
        self.translator = Box::new(translator);
        self
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    /// Lint `graph` and return its diagnostics grouped by element id.
    pub fn lint(&self, graph: &ProcessGraph) -> LintReport {
        let session = LintSession::new(&self.registry, self.translator.as_ref());
        let report = session.run(graph);

        info!(
            root:% = graph.root_id(), errors = report.error_count(), warnings = report.warning_count();
            "Linted process graph",
        );
        report
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new(RuleRegistry::recommended())
    }
}

/// The rule instances and reporter of a single lint run.
pub struct LintSession<'t> {
    rules: Vec<(Box<dyn Rule>, Severity)>,
    reporter: Reporter<'t>,
}

impl<'t> LintSession<'t> {
    /// Instantiate every enabled rule of `registry`.
    pub fn new(registry: &RuleRegistry, translator: &'t dyn Translate) -> Self {
        Self {
            rules: registry.instantiate(),
            reporter: Reporter::new(translator),
        }
    }

    /// Visit every element in pre-order, descending into processes and
    /// sub-processes, and return the collected diagnostics.
    pub fn run(mut self, graph: &ProcessGraph) -> LintReport {
        let mut stack = vec![Element::Node(graph.root())];

        while let Some(element) = stack.pop() {
            self.visit(element, graph);

            let Element::Node(node) = element else {
                continue;
            };
            if node.kind().is_container() {
                let children: Vec<Element<'_>> = graph.children(node.id()).collect();
                stack.extend(children.into_iter().rev());
            }
        }

        self.reporter.finish()
    }

    fn visit(&mut self, element: Element<'_>, graph: &ProcessGraph) {
        trace!(element:% = element.id(); "Visiting element");

        for (rule, severity) in &mut self.rules {
            self.reporter.begin(rule.name(), rule.code(), *severity);
            if let Err(err) = rule.check(element, graph, &mut self.reporter) {
                debug!(rule = rule.name(), element:% = element.id(), err:%; "Rule failed");
                self.reporter.engine_error(element.id(), &err.to_string());
            }
        }
    }
}
