//! Procflow - Validation and SLA timers for BPMN-style process graphs.
//!
//! A [`ProcessEditor`] lints a [`ProcessGraph`](model::ProcessGraph) against a
//! configurable rule set and keeps the synthetic boundary-event subgraphs that
//! implement task time limits in sync with the limits entered on each task.

pub mod config;
pub mod timer;

mod error;

pub use procflow_core::{duration, identifier, model};
pub use procflow_lint::{
    Diagnostic, LintReport, RuleCode, RuleLevel, RuleRegistry, Severity, Translate, Untranslated,
};

pub use error::ProcflowError;

use log::{debug, info};

use procflow_core::{
    identifier::Id,
    model::{IdError, Node, ProcessGraph, TimerExpression},
};
use procflow_lint::Linter;

use config::AppConfig;
use timer::{TimerAnnotator, TimerEventField, TimerKind, TimerOutcome};

/// The result of [`ProcessEditor::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// `true` if no diagnostic has category `error`.
    pub passed: bool,
    /// Every diagnostic, grouped by element in first-reported order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Entry point for validating process graphs and editing task time limits.
///
/// # Examples
///
/// ```
/// use procflow::{
///     ProcessEditor,
///     model::{EventKind, Node, NodeKind, ProcessGraph, SequenceFlow, TaskKind},
///     timer::TimerKind,
/// };
///
/// let mut graph = ProcessGraph::new("Process_1");
/// let root = graph.root_id();
/// graph.add_node(root, Node::new("Start", NodeKind::Event(EventKind::Start))).unwrap();
/// graph
///     .add_node(
///         root,
///         Node::new("Approve", NodeKind::Task(TaskKind::UserTask)).with_name("Approve"),
///     )
///     .unwrap();
/// graph.add_node(root, Node::new("End", NodeKind::Event(EventKind::End))).unwrap();
/// graph.add_flow(root, SequenceFlow::new("Flow_1", "Start", "Approve")).unwrap();
/// graph.add_flow(root, SequenceFlow::new("Flow_2", "Approve", "End")).unwrap();
///
/// let editor = ProcessEditor::default();
/// editor
///     .set_timer_field(&mut graph, "Approve".into(), TimerKind::Deadline, Some("2H"))
///     .unwrap();
///
/// let result = editor.validate(&graph);
/// assert!(result.passed);
/// assert!(result.diagnostics.is_empty());
/// ```
pub struct ProcessEditor {
    config: AppConfig,
    linter: Linter,
    annotator: TimerAnnotator,
}

impl ProcessEditor {
    /// Create an editor from `config`.
    ///
    /// The lint overrides of `config` are applied on top of
    /// [`RuleRegistry::recommended`].
    ///
    /// # Errors
    ///
    /// Returns [`ProcflowError::Config`] if a lint override names an unknown
    /// rule or an unknown level.
    ///
    /// # Examples
    ///
    /// ```
    /// use procflow::{
    ///     ProcessEditor, RuleLevel,
    ///     config::{AppConfig, LintConfig, TimerConfig},
    /// };
    ///
    /// let config = AppConfig::new(
    ///     LintConfig::new([("label-required", "off")]),
    ///     TimerConfig::default(),
    /// );
    /// let editor = ProcessEditor::new(config).unwrap();
    /// assert_eq!(editor.registry().level("label-required"), Some(RuleLevel::Off));
    /// ```
    pub fn new(config: AppConfig) -> Result<Self, ProcflowError> {
        let mut registry = RuleRegistry::recommended();
        config.lint().apply(&mut registry)?;

        let annotator = TimerAnnotator::new(config.timers().delegate_expression());
        Ok(Self {
            config,
            linter: Linter::new(registry),
            annotator,
        })
    }

    /// Use `translator` for diagnostic messages.
    pub fn with_translator(mut self, translator: impl Translate + 'static) -> Self {
        self.linter = self.linter.with_translator(translator);
        self
    }

    /// Returns the configuration the editor was built from.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the effective rule registry.
    pub fn registry(&self) -> &RuleRegistry {
        self.linter.registry()
    }

    /// Lint `graph` with the configured rules.
    ///
    /// Every call starts from fresh rule state, so linting an unchanged graph
    /// twice gives identical results.
    pub fn validate(&self, graph: &ProcessGraph) -> ValidationResult {
        info!(root:% = graph.root_id(); "Validating process");

        let report = self.linter.lint(graph);
        let passed = report.passed();
        let diagnostics = report.into_diagnostics();

        debug!(passed, diagnostics = diagnostics.len(); "Validation finished");
        ValidationResult {
            passed,
            diagnostics,
        }
    }

    /// Check the assignment fields of every user task.
    ///
    /// These checks are separate from [`ProcessEditor::validate`].
    pub fn check_required_fields(&self, graph: &ProcessGraph) -> ValidationResult {
        let report = procflow_lint::check_required_fields(graph, &Untranslated);
        ValidationResult {
            passed: report.passed(),
            diagnostics: report.into_diagnostics(),
        }
    }

    /// Set or clear a time limit of `task`. See [`TimerAnnotator::set_timer_field`].
    pub fn set_timer_field(
        &self,
        graph: &mut ProcessGraph,
        task: Id,
        kind: TimerKind,
        value: Option<&str>,
    ) -> Result<TimerOutcome, ProcflowError> {
        Ok(self.annotator.set_timer_field(graph, task, kind, value)?)
    }

    /// Remove every synthetic timer element from `graph`.
    ///
    /// Returns the number of removed elements.
    pub fn clear_all_timers(&self, graph: &mut ProcessGraph) -> Result<usize, ProcflowError> {
        Ok(self.annotator.clear_all(graph)?)
    }

    /// Remove `task` and its timer subgraphs.
    pub fn remove_task(
        &self,
        graph: &mut ProcessGraph,
        task: Id,
    ) -> Result<Option<Node>, ProcflowError> {
        Ok(self.annotator.remove_task(graph, task)?)
    }

    /// Set or clear a field of a timer start or catch event.
    /// See [`timer::configure_timer_event`].
    pub fn configure_timer_event(
        &self,
        graph: &mut ProcessGraph,
        event: Id,
        field: TimerEventField,
        value: Option<&str>,
    ) -> Result<Option<TimerExpression>, ProcflowError> {
        Ok(timer::configure_timer_event(graph, event, field, value)?)
    }

    /// Subtract `reduction` from `minuend`, e.g. `("30M", "2H")` gives `1H30M`.
    ///
    /// # Examples
    ///
    /// ```
    /// use procflow::ProcessEditor;
    ///
    /// let editor = ProcessEditor::default();
    /// assert_eq!(editor.compute_duration("30M", "2H").unwrap(), "1H30M");
    /// assert!(editor.compute_duration("3H", "2H").is_err());
    /// ```
    pub fn compute_duration(&self, reduction: &str, minuend: &str) -> Result<String, ProcflowError> {
        Ok(duration::subtract(reduction, minuend)?)
    }

    /// Count how many `divisor` periods fit in `dividend`.
    pub fn compute_cycle(&self, divisor: &str, dividend: &str) -> Result<u64, ProcflowError> {
        Ok(duration::divide(divisor, dividend)?)
    }

    /// Check whether `candidate` is a valid new id in `graph`.
    ///
    /// `element` is the element being renamed, if any.
    pub fn validate_id(
        &self,
        graph: &ProcessGraph,
        candidate: &str,
        element: Option<Id>,
    ) -> Result<(), IdError> {
        graph.validate_id(candidate, element)
    }
}

impl Default for ProcessEditor {
    fn default() -> Self {
        let config = AppConfig::default();
        let annotator = TimerAnnotator::new(config.timers().delegate_expression());
        Self {
            config,
            linter: Linter::default(),
            annotator,
        }
    }
}
