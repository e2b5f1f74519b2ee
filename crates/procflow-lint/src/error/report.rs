//! Grouped diagnostics of one lint run.

use indexmap::IndexMap;
use procflow_core::identifier::Id;

use crate::error::Diagnostic;

/// Diagnostics grouped by the id of the element they are attached to.
///
/// Groups keep the order in which their first diagnostic was reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintReport {
    groups: IndexMap<Id, Vec<Diagnostic>>,
}

impl LintReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic to the group of its element.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.groups
            .entry(diagnostic.node_id())
            .or_default()
            .push(diagnostic);
    }

    /// Returns `true` iff no diagnostic has the `error` category.
    pub fn passed(&self) -> bool {
        !self.diagnostics().any(|diag| diag.category().is_error())
    }

    /// The diagnostics attached to `id`.
    pub fn get(&self, id: Id) -> &[Diagnostic] {
        self.groups.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterate over `(element id, diagnostics)` groups.
    pub fn groups(&self) -> impl Iterator<Item = (Id, &[Diagnostic])> {
        self.groups.iter().map(|(id, diags)| (*id, diags.as_slice()))
    }

    /// Iterate over all diagnostics, group by group.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.groups.values().flatten()
    }

    /// Iterate over the diagnostics reported by `rule`.
    pub fn by_rule<'a>(&'a self, rule: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.diagnostics().filter(move |diag| diag.rule() == rule)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics()
            .filter(|diag| diag.category().is_error())
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics()
            .filter(|diag| diag.category().is_warning())
            .count()
    }

    /// Total number of diagnostics.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Flatten into a list, group by group.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.groups.into_values().flatten().collect()
    }
}

impl Extend<Diagnostic> for LintReport {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        for diagnostic in iter {
            self.push(diagnostic);
        }
    }
}
