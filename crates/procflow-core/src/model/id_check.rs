//! Element id validation.
//!
//! An id must be unique, must not contain whitespace and must match
//! `[A-Za-z_][A-Za-z0-9_.-]*`. A namespaced id such as `bpmn:Task_1` is a
//! valid QName but is still rejected.

use thiserror::Error;

use crate::{identifier::Id, model::graph::ProcessGraph};

/// Reasons an element id is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("Element must have an unique id.")]
    NotUnique,

    #[error("Id must not contain spaces.")]
    ContainsSpace,

    #[error("Id must not contain prefix.")]
    Prefixed,

    #[error("Id must be a valid QName.")]
    InvalidQName,
}

impl ProcessGraph {
    /// Checks whether `candidate` can be used as the id of `element`.
    ///
    /// `element` is the element being renamed, if any; its own current id is
    /// not considered a clash.
    ///
    /// # Examples
    ///
    /// ```
    /// use procflow_core::model::{IdError, ProcessGraph};
    ///
    /// let graph = ProcessGraph::new("Process_1");
    /// assert_eq!(graph.validate_id("Task_1", None), Ok(()));
    /// assert_eq!(graph.validate_id("Process_1", None), Err(IdError::NotUnique));
    /// assert_eq!(graph.validate_id("bpmn:Task", None), Err(IdError::Prefixed));
    /// ```
    pub fn validate_id(&self, candidate: &str, element: Option<Id>) -> Result<(), IdError> {
        if candidate.is_empty() {
            return Err(IdError::NotUnique);
        }
        let id = Id::new(candidate);
        if self.contains(id) && element != Some(id) {
            return Err(IdError::NotUnique);
        }
        check_id_syntax(candidate)
    }
}

/// Checks the syntax of an id, ignoring uniqueness.
pub fn check_id_syntax(candidate: &str) -> Result<(), IdError> {
    if candidate.chars().any(char::is_whitespace) {
        return Err(IdError::ContainsSpace);
    }
    if is_ncname(candidate) {
        return Ok(());
    }

    match candidate.split_once(':') {
        Some((prefix, local)) if is_prefix(prefix) && is_ncname(local) => Err(IdError::Prefixed),
        _ => Err(IdError::InvalidQName),
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

fn is_ncname(value: &str) -> bool {
    let mut chars = value.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(is_name_char)
}

fn is_prefix(value: &str) -> bool {
    let mut chars = value.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic()) && chars.all(is_name_char)
}
