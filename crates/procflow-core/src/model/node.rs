//! Process graph nodes and their extension attributes.

use std::fmt;

use indexmap::IndexMap;

use crate::{
    identifier::Id,
    model::{event::EventDefinition, kind::NodeKind},
};

/// Namespaced extension attributes, e.g. `timeLimit:timeDuration`.
///
/// Insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    /// Create an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Get the value under `key` if it is present and not blank.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.trim().is_empty())
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Remove and return the value under `key`.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A node of a process graph.
///
/// Hierarchy (`parent`, `children`) is maintained by
/// [`ProcessGraph`](crate::model::ProcessGraph); a freshly built node is
/// detached until it is added to a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    kind: NodeKind,
    name: Option<String>,
    parent: Option<Id>,
    children: Vec<Id>,
    incoming: Vec<Id>,
    outgoing: Vec<Id>,
    event_definitions: Vec<EventDefinition>,
    attributes: Attributes,
}

impl Node {
    /// Create a new unnamed node.
    pub fn new(id: impl Into<Id>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            name: None,
            parent: None,
            children: Vec::new(),
            incoming: Vec::new(),
            outgoing: Vec::new(),
            event_definitions: Vec::new(),
            attributes: Attributes::new(),
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add an event definition.
    pub fn with_event_definition(mut self, definition: EventDefinition) -> Self {
        self.event_definitions.push(definition);
        self
    }

    /// Set an extension attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.set(key, value);
        self
    }

    /// Record an incoming flow reference without a matching flow.
    ///
    /// Imported documents can carry references that are stale or that point
    /// to flows which were never materialised.
    pub fn with_incoming(mut self, flow: impl Into<Id>) -> Self {
        self.incoming.push(flow.into());
        self
    }

    /// Record an outgoing flow reference without a matching flow.
    pub fn with_outgoing(mut self, flow: impl Into<Id>) -> Self {
        self.outgoing.push(flow.into());
        self
    }

    /// Get the node identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the node kind.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Borrow the name, if one was given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Replace the name.
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Get the owning container, `None` for the root and detached nodes.
    pub fn parent(&self) -> Option<Id> {
        self.parent
    }

    /// Ids of the direct children (nodes or flows), in insertion order.
    pub fn children(&self) -> &[Id] {
        &self.children
    }

    /// Semantic incoming flow references.
    pub fn incoming(&self) -> &[Id] {
        &self.incoming
    }

    /// Semantic outgoing flow references.
    pub fn outgoing(&self) -> &[Id] {
        &self.outgoing
    }

    /// Borrow the event definitions.
    pub fn event_definitions(&self) -> &[EventDefinition] {
        &self.event_definitions
    }

    /// Replace all event definitions.
    pub fn set_event_definitions(&mut self, definitions: Vec<EventDefinition>) {
        self.event_definitions = definitions;
    }

    /// Borrow the extension attributes.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Mutably borrow the extension attributes.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Id>) {
        self.parent = parent;
    }

    pub(crate) fn push_child(&mut self, child: Id) {
        self.children.push(child);
    }

    pub(crate) fn remove_child(&mut self, child: Id) {
        self.children.retain(|id| *id != child);
    }

    pub(crate) fn link_incoming(&mut self, flow: Id) {
        if !self.incoming.contains(&flow) {
            self.incoming.push(flow);
        }
    }

    pub(crate) fn link_outgoing(&mut self, flow: Id) {
        if !self.outgoing.contains(&flow) {
            self.outgoing.push(flow);
        }
    }

    pub(crate) fn unlink_flow(&mut self, flow: Id) {
        self.incoming.retain(|id| *id != flow);
        self.outgoing.retain(|id| *id != flow);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
