//! The owning process graph store.
//!
//! [`ProcessGraph`] keeps nodes and sequence flows in insertion-ordered maps
//! keyed by [`Id`], plus the containment hierarchy recorded on each node.
//!
//! Two views of connectivity are kept:
//! - The *semantic* references on each node ([`Node::incoming`],
//!   [`Node::outgoing`]), which may be stale or empty for re-imported
//!   documents.
//! - The *rendered* edge set ([`ProcessGraph::flows`]), which is
//!   authoritative for which flows actually exist.
//!
//! # Invariants
//!
//! - Ids are unique across nodes and flows.
//! - Every flow's source and target resolve to a node of the graph.
//! - Removing a node removes its descendants and every flow touching any of them.

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};
use thiserror::Error;

use crate::{
    identifier::Id,
    model::{
        flow::{Element, SequenceFlow},
        kind::NodeKind,
        node::Node,
    },
};

/// Errors raised by graph mutations and lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("an element with id `{0}` already exists")]
    DuplicateId(Id),

    #[error("unknown node `{0}`")]
    UnknownNode(Id),

    #[error("node `{0}` cannot contain other elements")]
    NotAContainer(Id),

    #[error("the root `{0}` cannot be removed")]
    RootRemoval(Id),

    #[error("node `{node}` references unknown flow `{flow}`")]
    UnresolvedFlow { node: Id, flow: Id },
}

/// A hierarchical process graph rooted at a process node.
#[derive(Debug, Clone)]
pub struct ProcessGraph {
    root: Id,
    nodes: IndexMap<Id, Node>,
    flows: IndexMap<Id, SequenceFlow>,
}

impl ProcessGraph {
    /// Creates a graph containing only a root process with the given id.
    pub fn new(root: impl Into<Id>) -> Self {
        let root = root.into();
        let mut nodes = IndexMap::new();
        nodes.insert(root, Node::new(root, NodeKind::Process));

        Self {
            root,
            nodes,
            flows: IndexMap::new(),
        }
    }

    /// Get the root process id.
    pub fn root_id(&self) -> Id {
        self.root
    }

    /// Borrow the root process node.
    pub fn root(&self) -> &Node {
        // The root can never be removed.
        &self.nodes[&self.root]
    }

    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: Id) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn flow(&self, id: Id) -> Option<&SequenceFlow> {
        self.flows.get(&id)
    }

    pub fn flow_mut(&mut self, id: Id) -> Option<&mut SequenceFlow> {
        self.flows.get_mut(&id)
    }

    /// Look up a node or a flow by id.
    pub fn element(&self, id: Id) -> Option<Element<'_>> {
        self.nodes
            .get(&id)
            .map(Element::Node)
            .or_else(|| self.flows.get(&id).map(Element::Flow))
    }

    /// Returns `true` if a node or a flow uses `id`.
    pub fn contains(&self, id: Id) -> bool {
        self.nodes.contains_key(&id) || self.flows.contains_key(&id)
    }

    /// Iterate over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterate over the rendered edge set in insertion order.
    pub fn flows(&self) -> impl Iterator<Item = &SequenceFlow> {
        self.flows.values()
    }

    /// Total number of nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn flow_count(&self) -> usize {
        self.flows.len()
    }

    /// Iterate over the direct children of `id` (nodes and flows).
    ///
    /// Returns an empty iterator for unknown ids and non-containers.
    pub fn children(&self, id: Id) -> impl Iterator<Item = Element<'_>> {
        self.nodes
            .get(&id)
            .into_iter()
            .flat_map(|node| node.children())
            .filter_map(|child| self.element(*child))
    }

    /// Iterate over the containers enclosing `id`, innermost first.
    pub fn ancestors(&self, id: Id) -> impl Iterator<Item = &Node> {
        let start = self.element(id).and_then(|element| match element {
            Element::Node(node) => node.parent(),
            Element::Flow(flow) => flow.parent(),
        });

        std::iter::successors(start.and_then(|id| self.nodes.get(&id)), |node| {
            node.parent().and_then(|parent| self.nodes.get(&parent))
        })
    }

    /// Resolve the semantic incoming references of `id`.
    ///
    /// # Errors
    ///
    /// Fails on an unknown node or on a reference without a matching flow.
    pub fn incoming(&self, id: Id) -> Result<Vec<&SequenceFlow>, GraphError> {
        let node = self.nodes.get(&id).ok_or(GraphError::UnknownNode(id))?;
        self.resolve_refs(id, node.incoming())
    }

    /// Resolve the semantic outgoing references of `id`.
    ///
    /// # Errors
    ///
    /// Fails on an unknown node or on a reference without a matching flow.
    pub fn outgoing(&self, id: Id) -> Result<Vec<&SequenceFlow>, GraphError> {
        let node = self.nodes.get(&id).ok_or(GraphError::UnknownNode(id))?;
        self.resolve_refs(id, node.outgoing())
    }

    /// Rendered flows whose target is `id`.
    pub fn flows_into(&self, id: Id) -> impl Iterator<Item = &SequenceFlow> {
        self.flows.values().filter(move |flow| flow.target() == id)
    }

    /// Rendered flows whose source is `id`.
    pub fn flows_from(&self, id: Id) -> impl Iterator<Item = &SequenceFlow> {
        self.flows.values().filter(move |flow| flow.source() == id)
    }

    /// Adds `node` as the last child of the container `parent`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::DuplicateId`] if the id is already used.
    /// - [`GraphError::UnknownNode`] if `parent` does not exist.
    /// - [`GraphError::NotAContainer`] if `parent` is not a process or sub-process.
    pub fn add_node(&mut self, parent: Id, mut node: Node) -> Result<(), GraphError> {
        let id = node.id();
        self.check_insert(parent, id)?;

        node.set_parent(Some(parent));
        self.attach_child(parent, id);
        self.nodes.insert(id, node);

        trace!(node_id:% = id, parent:% = parent; "Added node");
        Ok(())
    }

    /// Adds `flow` to `parent` and links it into the semantic references of
    /// its source and target.
    ///
    /// # Errors
    ///
    /// As [`ProcessGraph::add_node`], plus [`GraphError::UnknownNode`] if
    /// either endpoint does not exist.
    pub fn add_flow(&mut self, parent: Id, flow: SequenceFlow) -> Result<(), GraphError> {
        let (id, source, target) = (flow.id(), flow.source(), flow.target());
        self.insert_flow(parent, flow)?;

        if let Some(node) = self.nodes.get_mut(&source) {
            node.link_outgoing(id);
        }
        if let Some(node) = self.nodes.get_mut(&target) {
            node.link_incoming(id);
        }
        Ok(())
    }

    /// Adds `flow` to the rendered edge set only, leaving the semantic
    /// references of its endpoints untouched.
    ///
    /// This is the shape a re-imported document takes when it omits the
    /// `incoming`/`outgoing` lists.
    pub fn add_flow_unlinked(&mut self, parent: Id, flow: SequenceFlow) -> Result<(), GraphError> {
        self.insert_flow(parent, flow)
    }

    /// Removes a flow and every reference to it. Returns `None` if no such
    /// flow exists.
    pub fn remove_flow(&mut self, id: Id) -> Option<SequenceFlow> {
        let flow = self.flows.shift_remove(&id)?;

        for endpoint in [flow.source(), flow.target()] {
            if let Some(node) = self.nodes.get_mut(&endpoint) {
                node.unlink_flow(id);
            }
        }
        if let Some(parent) = flow.parent().and_then(|parent| self.nodes.get_mut(&parent)) {
            parent.remove_child(id);
        }

        trace!(flow_id:% = id; "Removed flow");
        Some(flow)
    }

    /// Removes a node together with its descendants and every flow touching
    /// any of them. Returns `Ok(None)` if no such node exists.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::RootRemoval`] when asked to remove the root.
    pub fn remove_node(&mut self, id: Id) -> Result<Option<Node>, GraphError> {
        if id == self.root {
            return Err(GraphError::RootRemoval(id));
        }
        if !self.nodes.contains_key(&id) {
            return Ok(None);
        }

        let doomed = self.subtree(id);

        let doomed_flows: Vec<Id> = self
            .flows
            .values()
            .filter(|flow| {
                doomed.contains(&flow.source())
                    || doomed.contains(&flow.target())
                    || flow.parent().is_some_and(|parent| doomed.contains(&parent))
            })
            .map(SequenceFlow::id)
            .collect();
        for flow in &doomed_flows {
            self.remove_flow(*flow);
        }

        let mut removed = None;
        for node_id in doomed.iter().rev() {
            let Some(node) = self.nodes.shift_remove(node_id) else {
                continue;
            };
            if let Some(parent) = node.parent().and_then(|parent| self.nodes.get_mut(&parent)) {
                parent.remove_child(*node_id);
            }
            if *node_id == id {
                removed = Some(node);
            }
        }

        debug!(
            node_id:% = id, nodes = doomed.len(), flows = doomed_flows.len();
            "Removed node subtree",
        );
        Ok(removed)
    }

    /// Pre-order ids of `id` and all nodes below it.
    fn subtree(&self, id: Id) -> IndexSet<Id> {
        let mut visited = IndexSet::new();
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(&current) else {
                continue;
            };
            if !visited.insert(current) {
                continue;
            }
            stack.extend(
                node.children()
                    .iter()
                    .rev()
                    .filter(|child| self.nodes.contains_key(*child)),
            );
        }

        visited
    }

    fn insert_flow(&mut self, parent: Id, mut flow: SequenceFlow) -> Result<(), GraphError> {
        let id = flow.id();
        self.check_insert(parent, id)?;
        for endpoint in [flow.source(), flow.target()] {
            if !self.nodes.contains_key(&endpoint) {
                return Err(GraphError::UnknownNode(endpoint));
            }
        }

        flow.set_parent(Some(parent));
        self.attach_child(parent, id);
        self.flows.insert(id, flow);

        trace!(flow_id:% = id, parent:% = parent; "Added flow");
        Ok(())
    }

    fn check_insert(&self, parent: Id, id: Id) -> Result<(), GraphError> {
        if self.contains(id) {
            return Err(GraphError::DuplicateId(id));
        }
        let container = self.nodes.get(&parent).ok_or(GraphError::UnknownNode(parent))?;
        if !container.kind().is_container() {
            return Err(GraphError::NotAContainer(parent));
        }
        Ok(())
    }

    fn attach_child(&mut self, parent: Id, child: Id) {
        if let Some(container) = self.nodes.get_mut(&parent) {
            container.push_child(child);
        }
    }

    fn resolve_refs(&self, node: Id, refs: &[Id]) -> Result<Vec<&SequenceFlow>, GraphError> {
        refs.iter()
            .map(|flow| {
                self.flows
                    .get(flow)
                    .ok_or(GraphError::UnresolvedFlow { node, flow: *flow })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::kind::{EventKind, GatewayKind, TaskKind};

    fn sample_graph() -> ProcessGraph {
        let mut graph = ProcessGraph::new("Process_1");
        let root = graph.root_id();

        graph
            .add_node(root, Node::new("Start", NodeKind::Event(EventKind::Start)))
            .unwrap();
        graph
            .add_node(root, Node::new("Task", NodeKind::Task(TaskKind::UserTask)))
            .unwrap();
        graph
            .add_flow(root, SequenceFlow::new("Flow_1", "Start", "Task"))
            .unwrap();
        graph
    }

    #[test]
    fn test_new_graph_has_root() {
        let graph = ProcessGraph::new("Process_1");

        assert_eq!(graph.root().id(), "Process_1");
        assert_eq!(graph.root().kind(), NodeKind::Process);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_add_flow_links_semantic_refs() {
        let graph = sample_graph();

        let start = graph.node(Id::new("Start")).unwrap();
        let task = graph.node(Id::new("Task")).unwrap();
        assert_eq!(start.outgoing(), &[Id::new("Flow_1")]);
        assert_eq!(task.incoming(), &[Id::new("Flow_1")]);
        assert_eq!(graph.outgoing(start.id()).unwrap().len(), 1);
        assert_eq!(graph.children(graph.root_id()).count(), 3);
    }

    #[test]
    fn test_add_flow_unlinked() {
        let mut graph = sample_graph();
        let root = graph.root_id();
        graph
            .add_node(root, Node::new("End", NodeKind::Event(EventKind::End)))
            .unwrap();
        graph
            .add_flow_unlinked(root, SequenceFlow::new("Flow_2", "Task", "End"))
            .unwrap();

        let task = Id::new("Task");
        assert!(graph.node(task).unwrap().outgoing().is_empty());
        assert_eq!(graph.flows_from(task).count(), 1);
        assert_eq!(graph.flows_into(Id::new("End")).count(), 1);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut graph = sample_graph();
        let root = graph.root_id();

        let err = graph
            .add_node(root, Node::new("Flow_1", NodeKind::Task(TaskKind::Task)))
            .unwrap_err();
        assert_eq!(err, GraphError::DuplicateId(Id::new("Flow_1")));

        let err = graph
            .add_flow(root, SequenceFlow::new("Task", "Start", "Task"))
            .unwrap_err();
        assert_eq!(err, GraphError::DuplicateId(Id::new("Task")));
    }

    #[test]
    fn test_flow_endpoints_must_exist() {
        let mut graph = sample_graph();
        let root = graph.root_id();

        let err = graph
            .add_flow(root, SequenceFlow::new("Flow_x", "Start", "Missing"))
            .unwrap_err();
        assert_eq!(err, GraphError::UnknownNode(Id::new("Missing")));
        assert!(graph.flow(Id::new("Flow_x")).is_none());
    }

    #[test]
    fn test_parent_must_be_container() {
        let mut graph = sample_graph();

        let err = graph
            .add_node(
                Id::new("Task"),
                Node::new("Nested", NodeKind::Task(TaskKind::Task)),
            )
            .unwrap_err();
        assert_eq!(err, GraphError::NotAContainer(Id::new("Task")));
    }

    #[test]
    fn test_remove_node_cascades() {
        let mut graph = sample_graph();
        let root = graph.root_id();

        let sub = Id::new("Sub");
        graph
            .add_node(
                root,
                Node::new(sub, NodeKind::SubProcess {
                    triggered_by_event: false,
                }),
            )
            .unwrap();
        graph
            .add_node(sub, Node::new("Inner", NodeKind::Event(EventKind::Start)))
            .unwrap();
        graph
            .add_node(
                sub,
                Node::new("InnerGw", NodeKind::Gateway(GatewayKind::Parallel)),
            )
            .unwrap();
        graph
            .add_flow(sub, SequenceFlow::new("Flow_in", "Inner", "InnerGw"))
            .unwrap();
        graph
            .add_flow(root, SequenceFlow::new("Flow_2", "Task", "Sub"))
            .unwrap();

        let removed = graph.remove_node(sub).unwrap();
        assert_eq!(removed.map(|node| node.id()), Some(sub));

        assert!(graph.node(Id::new("Inner")).is_none());
        assert!(graph.node(Id::new("InnerGw")).is_none());
        assert!(graph.flow(Id::new("Flow_in")).is_none());
        assert!(graph.flow(Id::new("Flow_2")).is_none());
        assert_eq!(
            graph.node(Id::new("Task")).unwrap().outgoing(),
            &[] as &[Id]
        );
        assert_eq!(graph.children(root).count(), 3);
    }

    #[test]
    fn test_remove_missing_and_root() {
        let mut graph = sample_graph();

        assert_eq!(graph.remove_node(Id::new("Nope")), Ok(None));
        assert_eq!(graph.remove_flow(Id::new("Nope")), None);
        assert_eq!(
            graph.remove_node(graph.root_id()),
            Err(GraphError::RootRemoval(Id::new("Process_1")))
        );
    }

    #[test]
    fn test_unresolved_refs() {
        let mut graph = sample_graph();
        let root = graph.root_id();
        graph
            .add_node(
                root,
                Node::new("Dangling", NodeKind::Task(TaskKind::Task)).with_outgoing("Flow_gone"),
            )
            .unwrap();

        let err = graph.outgoing(Id::new("Dangling")).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnresolvedFlow {
                node: Id::new("Dangling"),
                flow: Id::new("Flow_gone"),
            }
        );
    }

    #[test]
    fn test_ancestors() {
        let mut graph = sample_graph();
        let root = graph.root_id();
        let sub = Id::new("Sub_a");
        graph
            .add_node(
                root,
                Node::new(sub, NodeKind::SubProcess {
                    triggered_by_event: true,
                }),
            )
            .unwrap();
        graph
            .add_node(sub, Node::new("Deep", NodeKind::Task(TaskKind::UserTask)))
            .unwrap();

        let chain: Vec<Id> = graph.ancestors(Id::new("Deep")).map(Node::id).collect();
        assert_eq!(chain, vec![sub, root]);
    }
}
