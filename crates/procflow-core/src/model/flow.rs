//! Sequence flows and the borrowed element view handed to rules.

use std::fmt;

use crate::{
    identifier::Id,
    model::node::{Attributes, Node},
};

/// A directed sequence flow between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceFlow {
    id: Id,
    name: Option<String>,
    source: Id,
    target: Id,
    condition: Option<String>,
    is_default: bool,
    parent: Option<Id>,
    attributes: Attributes,
}

impl SequenceFlow {
    /// Create a new unconditioned flow from `source` to `target`.
    pub fn new(id: impl Into<Id>, source: impl Into<Id>, target: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            name: None,
            source: source.into(),
            target: target.into(),
            condition: None,
            is_default: false,
            parent: None,
            attributes: Attributes::new(),
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a condition expression body.
    pub fn with_condition(mut self, body: impl Into<String>) -> Self {
        self.condition = Some(body.into());
        self
    }

    /// Mark this flow as the default flow of its source.
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Get the flow identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Borrow the name, if one was given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    /// Borrow the condition expression body.
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    /// Returns `true` if a condition expression is attached.
    pub fn is_conditioned(&self) -> bool {
        self.condition.is_some()
    }

    /// Returns `true` if this is the source's default flow.
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Get the owning container.
    pub fn parent(&self) -> Option<Id> {
        self.parent
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Id>) {
        self.parent = parent;
    }
}

impl fmt::Display for SequenceFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// A borrowed view of either a node or a sequence flow.
#[derive(Debug, Clone, Copy)]
pub enum Element<'a> {
    Node(&'a Node),
    Flow(&'a SequenceFlow),
}

impl<'a> Element<'a> {
    /// The element identifier.
    pub fn id(&self) -> Id {
        match self {
            Element::Node(node) => node.id(),
            Element::Flow(flow) => flow.id(),
        }
    }

    /// The element name.
    pub fn name(&self) -> Option<&'a str> {
        match self {
            Element::Node(node) => node.name(),
            Element::Flow(flow) => flow.name(),
        }
    }

    pub fn as_node(&self) -> Option<&'a Node> {
        match self {
            Element::Node(node) => Some(node),
            Element::Flow(_) => None,
        }
    }

    pub fn as_flow(&self) -> Option<&'a SequenceFlow> {
        match self {
            Element::Flow(flow) => Some(flow),
            Element::Node(_) => None,
        }
    }
}
