//! Node type taxonomy.
//!
//! Every element of a process graph has exactly one [`NodeKind`]. Rules match
//! on it exhaustively instead of probing type names.

use std::fmt;

/// Task variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Task,
    UserTask,
    ServiceTask,
    ScriptTask,
    ManualTask,
    SendTask,
    ReceiveTask,
    BusinessRuleTask,
}

/// Gateway variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayKind {
    Exclusive,
    Parallel,
    Inclusive,
    Complex,
    EventBased,
}

/// Event variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Start,
    End,
    IntermediateCatch,
    IntermediateThrow,
    /// Attached to an activity; see the `attachedToRef` attribute.
    Boundary,
}

/// The type of a node in a process graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Process,
    SubProcess {
        /// `true` for an event sub-process, which is started by an event
        /// rather than by an incoming sequence flow.
        triggered_by_event: bool,
    },
    Task(TaskKind),
    CallActivity,
    Gateway(GatewayKind),
    Event(EventKind),
    Participant,
    Lane,
    DataObject,
    TextAnnotation,
}

impl NodeKind {
    /// Returns `true` for kinds whose children are traversed and linted.
    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Process | NodeKind::SubProcess { .. })
    }

    /// Returns `true` for nodes that take part in the sequence flow.
    pub fn is_flow_node(&self) -> bool {
        matches!(
            self,
            NodeKind::SubProcess { .. }
                | NodeKind::Task(_)
                | NodeKind::CallActivity
                | NodeKind::Gateway(_)
                | NodeKind::Event(_)
        )
    }

    /// Returns `true` for activities that can own boundary events.
    pub fn is_activity(&self) -> bool {
        matches!(
            self,
            NodeKind::Task(_) | NodeKind::CallActivity | NodeKind::SubProcess { .. }
        )
    }

    /// Returns `true` for any task variant.
    pub fn is_task(&self) -> bool {
        matches!(self, NodeKind::Task(_))
    }

    /// Returns `true` for any event variant.
    pub fn is_event(&self) -> bool {
        matches!(self, NodeKind::Event(_))
    }

    /// Returns `true` for any gateway variant.
    pub fn is_gateway(&self) -> bool {
        matches!(self, NodeKind::Gateway(_))
    }

    /// Returns `true` for an event sub-process.
    pub fn is_event_sub_process(&self) -> bool {
        matches!(
            self,
            NodeKind::SubProcess {
                triggered_by_event: true
            }
        )
    }

    /// The BPMN element name, as used in diagnostics (e.g. `bpmn:ComplexGateway`).
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Process => "bpmn:Process",
            NodeKind::SubProcess { .. } => "bpmn:SubProcess",
            NodeKind::Task(kind) => match kind {
                TaskKind::Task => "bpmn:Task",
                TaskKind::UserTask => "bpmn:UserTask",
                TaskKind::ServiceTask => "bpmn:ServiceTask",
                TaskKind::ScriptTask => "bpmn:ScriptTask",
                TaskKind::ManualTask => "bpmn:ManualTask",
                TaskKind::SendTask => "bpmn:SendTask",
                TaskKind::ReceiveTask => "bpmn:ReceiveTask",
                TaskKind::BusinessRuleTask => "bpmn:BusinessRuleTask",
            },
            NodeKind::CallActivity => "bpmn:CallActivity",
            NodeKind::Gateway(kind) => match kind {
                GatewayKind::Exclusive => "bpmn:ExclusiveGateway",
                GatewayKind::Parallel => "bpmn:ParallelGateway",
                GatewayKind::Inclusive => "bpmn:InclusiveGateway",
                GatewayKind::Complex => "bpmn:ComplexGateway",
                GatewayKind::EventBased => "bpmn:EventBasedGateway",
            },
            NodeKind::Event(kind) => match kind {
                EventKind::Start => "bpmn:StartEvent",
                EventKind::End => "bpmn:EndEvent",
                EventKind::IntermediateCatch => "bpmn:IntermediateCatchEvent",
                EventKind::IntermediateThrow => "bpmn:IntermediateThrowEvent",
                EventKind::Boundary => "bpmn:BoundaryEvent",
            },
            NodeKind::Participant => "bpmn:Participant",
            NodeKind::Lane => "bpmn:Lane",
            NodeKind::DataObject => "bpmn:DataObjectReference",
            NodeKind::TextAnnotation => "bpmn:TextAnnotation",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containers() {
        assert!(NodeKind::Process.is_container());
        assert!(
            NodeKind::SubProcess {
                triggered_by_event: true
            }
            .is_container()
        );
        assert!(!NodeKind::Participant.is_container());
        assert!(!NodeKind::Task(TaskKind::UserTask).is_container());
    }

    #[test]
    fn test_flow_nodes() {
        assert!(NodeKind::Gateway(GatewayKind::Parallel).is_flow_node());
        assert!(NodeKind::Event(EventKind::Boundary).is_flow_node());
        assert!(!NodeKind::Process.is_flow_node());
        assert!(!NodeKind::Lane.is_flow_node());
        assert!(!NodeKind::TextAnnotation.is_flow_node());
    }

    #[test]
    fn test_label() {
        assert_eq!(
            NodeKind::Gateway(GatewayKind::Complex).to_string(),
            "bpmn:ComplexGateway"
        );
        assert_eq!(
            NodeKind::Task(TaskKind::ServiceTask).label(),
            "bpmn:ServiceTask"
        );
    }
}
