//! Procflow Lint
//!
//! A rule-based structural validator for process graphs. The [`Linter`]
//! walks a [`ProcessGraph`](procflow_core::model::ProcessGraph) in pre-order,
//! runs every enabled rule of its [`RuleRegistry`] on every element and
//! groups the findings by element id in a [`LintReport`].
//!
//! # Example
//!
//! ```
//! use procflow_core::model::{EventKind, Node, NodeKind, ProcessGraph};
//! use procflow_lint::Linter;
//!
//! let mut graph = ProcessGraph::new("Process_1");
//! let root = graph.root_id();
//! graph
//!     .add_node(root, Node::new("Start_1", NodeKind::Event(EventKind::Start)))
//!     .unwrap();
//!
//! let report = Linter::default().lint(&graph);
//! assert!(!report.passed());
//! assert_eq!(report.by_rule("end-event-required").count(), 1);
//! ```

pub mod error;
pub mod registry;
pub mod reporter;
pub mod required;
pub mod rules;
pub mod translate;

mod linter;

pub use error::{Diagnostic, LintError, LintReport, RuleCode, RuleError, RuleLevel, Severity};
pub use linter::{LintSession, Linter};
pub use registry::RuleRegistry;
pub use required::check_required_fields;
pub use translate::{Translate, Untranslated};
