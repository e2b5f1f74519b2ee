//! End-to-end tests of the recommended rule set.

use procflow_core::{
    identifier::Id,
    model::{
        EventDefinition, EventKind, GatewayKind, Node, NodeKind, ProcessGraph, SequenceFlow,
        TaskKind,
    },
};
use procflow_lint::{Linter, RuleLevel, RuleRegistry, Severity};

/// `Start -> Approve -> End`, all named.
fn linear_process(root_id: &str) -> ProcessGraph {
    let mut graph = ProcessGraph::new(root_id);
    let root = graph.root_id();

    graph
        .add_node(root, Node::new("Start", NodeKind::Event(EventKind::Start)))
        .unwrap();
    graph
        .add_node(
            root,
            Node::new("Approve", NodeKind::Task(TaskKind::UserTask)).with_name("Approve"),
        )
        .unwrap();
    graph
        .add_node(root, Node::new("End", NodeKind::Event(EventKind::End)))
        .unwrap();
    graph
        .add_flow(root, SequenceFlow::new("Flow_1", "Start", "Approve"))
        .unwrap();
    graph
        .add_flow(root, SequenceFlow::new("Flow_2", "Approve", "End"))
        .unwrap();
    graph
}

#[test]
fn test_well_formed_process_passes() {
    let graph = linear_process("Process_ok");

    let report = Linter::default().lint(&graph);

    assert!(report.passed(), "Unexpected diagnostics: {report:?}");
    assert!(report.is_empty());
}

#[test]
fn test_missing_end_event_reported_once_on_container() {
    let mut graph = linear_process("Process_no_end");
    graph.remove_node(Id::new("End")).unwrap();

    let report = Linter::default().lint(&graph);
    let end_diags: Vec<_> = report.by_rule("end-event-required").collect();

    assert_eq!(end_diags.len(), 1);
    assert_eq!(end_diags[0].node_id(), "Process_no_end");
    assert_eq!(end_diags[0].message(), "Process is missing end event");
    assert!(!report.passed());

    let root = graph.root_id();
    graph
        .add_node(root, Node::new("End_2", NodeKind::Event(EventKind::End)))
        .unwrap();
    let report = Linter::default().lint(&graph);
    assert_eq!(report.by_rule("end-event-required").count(), 0);
}

#[test]
fn test_sub_process_scopes_are_linted() {
    let mut graph = linear_process("Process_sub");
    let root = graph.root_id();
    let sub = Id::new("Sub_1");
    graph
        .add_node(
            root,
            Node::new(sub, NodeKind::SubProcess {
                triggered_by_event: false,
            }),
        )
        .unwrap();
    graph
        .add_node(
            sub,
            Node::new("SubStart", NodeKind::Event(EventKind::Start))
                .with_event_definition(EventDefinition::Message),
        )
        .unwrap();

    let report = Linter::default().lint(&graph);

    let end = &report.get(sub)[..];
    assert!(
        end.iter()
            .any(|diag| diag.message() == "Sub process is missing end event")
    );
    assert_eq!(
        report.get(Id::new("SubStart"))[0].message(),
        "Start event must be blank"
    );
}

#[test]
fn test_event_sub_process_start_must_be_typed() {
    let mut graph = linear_process("Process_event_sub");
    let root = graph.root_id();
    let sub = Id::new("EventSub_1");
    graph
        .add_node(
            root,
            Node::new(sub, NodeKind::SubProcess {
                triggered_by_event: true,
            }),
        )
        .unwrap();
    graph
        .add_node(sub, Node::new("Blank", NodeKind::Event(EventKind::Start)))
        .unwrap();
    graph
        .add_node(sub, Node::new("SubEnd", NodeKind::Event(EventKind::End)))
        .unwrap();

    let report = Linter::default().lint(&graph);

    assert_eq!(
        report
            .by_rule("event-sub-process-typed-start-event")
            .map(|diag| diag.node_id())
            .collect::<Vec<_>>(),
        vec![Id::new("Blank")]
    );
    assert_eq!(report.by_rule("no-disconnected").count(), 0);
}

#[test]
fn test_duplicate_flows_stable_across_runs() {
    let mut graph = linear_process("Process_dup");
    let root = graph.root_id();
    graph
        .add_flow(root, SequenceFlow::new("Flow_2_copy", "Approve", "End"))
        .unwrap();

    let linter = Linter::default();
    for _ in 0..2 {
        let report = linter.lint(&graph);
        // Groups are ordered by element; Approve and End already carry
        // split/join findings from the node visits.
        let duplicates: Vec<(Id, &str)> = report
            .by_rule("no-duplicate-sequence-flows")
            .map(|diag| (diag.node_id(), diag.message()))
            .collect();

        assert_eq!(
            duplicates,
            vec![
                (Id::new("Approve"), "Duplicate outgoing sequence flows"),
                (Id::new("End"), "Duplicate incoming sequence flows"),
                (Id::new("Flow_2_copy"), "SequenceFlow is a duplicate"),
            ]
        );
    }
}

#[test]
fn test_service_flows_are_not_duplicates() {
    let mut graph = linear_process("Process_service_flows");
    let root = graph.root_id();
    graph
        .add_flow(root, SequenceFlow::new("Approve_timer_service_flow", "Approve", "End"))
        .unwrap();

    let report = Linter::default().lint(&graph);
    assert_eq!(report.by_rule("no-duplicate-sequence-flows").count(), 0);
}

#[test]
fn test_warnings_do_not_fail_validation() {
    let mut graph = linear_process("Process_gateway");
    let root = graph.root_id();
    graph.remove_flow(Id::new("Flow_2"));
    graph
        .add_node(
            root,
            Node::new("Gw", NodeKind::Gateway(GatewayKind::Exclusive)).with_name("Check"),
        )
        .unwrap();
    graph
        .add_flow(root, SequenceFlow::new("Flow_3", "Approve", "Gw"))
        .unwrap();
    graph
        .add_flow(root, SequenceFlow::new("Flow_4", "Gw", "End"))
        .unwrap();

    let report = Linter::default().lint(&graph);
    let superfluous: Vec<_> = report.by_rule("superfluous-gateway").collect();

    assert_eq!(superfluous.len(), 1);
    assert_eq!(superfluous[0].category(), Severity::Warning);
    assert!(report.passed());
}

#[test]
fn test_disallowed_gateways() {
    let mut graph = linear_process("Process_disallowed");
    let root = graph.root_id();
    graph
        .add_node(root, Node::new("Cx", NodeKind::Gateway(GatewayKind::Complex)))
        .unwrap();
    graph
        .add_node(root, Node::new("Inc", NodeKind::Gateway(GatewayKind::Inclusive)))
        .unwrap();

    let report = Linter::default().lint(&graph);

    assert_eq!(
        report.by_rule("no-complex-gateway").next().unwrap().message(),
        "Element has disallowed type <bpmn:ComplexGateway>"
    );
    assert_eq!(
        report
            .by_rule("no-inclusive-gateway")
            .next()
            .unwrap()
            .node_id(),
        "Inc"
    );
}

#[test]
fn test_rule_fault_is_isolated() {
    let mut graph = linear_process("Process_fault");
    let root = graph.root_id();
    graph
        .add_node(
            root,
            Node::new("Broken", NodeKind::Task(TaskKind::UserTask))
                .with_name("Broken")
                .with_outgoing("Flow_missing"),
        )
        .unwrap();

    let report = Linter::default().lint(&graph);
    let faults: Vec<_> = report.by_rule("engine-error").collect();

    // conditional-flows and no-implicit-split both resolve outgoing flows.
    assert_eq!(faults.len(), 2);
    assert!(faults.iter().all(|diag| diag.node_id() == "Broken"));
    assert!(!report.passed());
    // The remaining rules still ran on the faulty node.
    assert_eq!(
        report.get(Id::new("Broken"))
            .iter()
            .filter(|diag| diag.rule() == "no-disconnected")
            .count(),
        2
    );
}

#[test]
fn test_configured_levels() {
    let mut graph = linear_process("Process_levels");
    graph.remove_node(Id::new("End")).unwrap();

    let mut registry = RuleRegistry::recommended();
    registry
        .set_level("end-event-required", RuleLevel::On(Severity::Warn))
        .unwrap();
    registry
        .set_level("no-disconnected", RuleLevel::Off)
        .unwrap();

    let report = Linter::new(registry).lint(&graph);

    assert!(report.passed(), "Unexpected errors: {report:?}");
    assert_eq!(report.warning_count(), 1);
}

#[test]
fn test_translated_messages() {
    let graph = ProcessGraph::new("Process_empty");
    let linter = Linter::default().with_translator(|text: &str| match text {
        "Process is missing end event" => "流程缺少结束事件".to_owned(),
        other => other.to_owned(),
    });

    let report = linter.lint(&graph);
    let messages: Vec<&str> = report
        .get(Id::new("Process_empty"))
        .iter()
        .map(|diag| diag.message())
        .collect();

    assert!(messages.contains(&"流程缺少结束事件"));
    assert!(messages.contains(&"Process is missing start event"));
}

#[test]
fn test_missing_start_event_reported_once_on_container() {
    let mut graph = linear_process("Process_no_start");
    graph.remove_node(Id::new("Start")).unwrap();

    let report = Linter::default().lint(&graph);
    let start_diags: Vec<_> = report.by_rule("start-event-required").collect();

    assert_eq!(start_diags.len(), 1);
    assert_eq!(start_diags[0].node_id(), "Process_no_start");
    assert_eq!(start_diags[0].message(), "Process is missing start event");
    assert!(!report.passed());
}

#[test]
fn test_multiple_blank_start_events() {
    let mut graph = linear_process("Process_two_starts");
    let root = graph.root_id();
    graph
        .add_node(root, Node::new("Start_2", NodeKind::Event(EventKind::Start)))
        .unwrap();
    graph
        .add_flow(root, SequenceFlow::new("Flow_3", "Start_2", "Approve"))
        .unwrap();

    let report = Linter::default().lint(&graph);
    let diags: Vec<_> = report.by_rule("single-blank-start-event").collect();

    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].node_id(), "Process_two_starts");
    assert_eq!(diags[0].message(), "Process has multiple blank start events");
}

#[test]
fn test_typed_second_start_event_is_allowed() {
    let mut graph = linear_process("Process_typed_start");
    let root = graph.root_id();
    graph
        .add_node(
            root,
            Node::new("Start_msg", NodeKind::Event(EventKind::Start))
                .with_event_definition(EventDefinition::Message),
        )
        .unwrap();

    let report = Linter::default().lint(&graph);
    assert_eq!(report.by_rule("single-blank-start-event").count(), 0);
}

#[test]
fn test_event_with_multiple_definitions() {
    let mut graph = linear_process("Process_defs");
    let root = graph.root_id();
    graph
        .add_node(
            root,
            Node::new("End_2", NodeKind::Event(EventKind::End))
                .with_event_definition(EventDefinition::Message)
                .with_event_definition(EventDefinition::Terminate),
        )
        .unwrap();

    let report = Linter::default().lint(&graph);
    let diags: Vec<_> = report.by_rule("single-event-definition").collect();

    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].node_id(), "End_2");
    assert_eq!(diags[0].message(), "Event has multiple event definitions");
    assert!(!report.passed());
}

#[test]
fn test_gateway_that_joins_and_forks() {
    let mut graph = ProcessGraph::new("Process_join_fork");
    let root = graph.root_id();

    graph
        .add_node(root, Node::new("Start", NodeKind::Event(EventKind::Start)))
        .unwrap();
    for task in ["A", "B", "C", "D"] {
        graph
            .add_node(
                root,
                Node::new(task, NodeKind::Task(TaskKind::UserTask)).with_name(task),
            )
            .unwrap();
    }
    graph
        .add_node(root, Node::new("Gw", NodeKind::Gateway(GatewayKind::Parallel)))
        .unwrap();
    graph
        .add_node(root, Node::new("End", NodeKind::Event(EventKind::End)))
        .unwrap();

    let flows = [
        ("Flow_1", "Start", "A"),
        ("Flow_2", "Start", "B"),
        ("Flow_3", "A", "Gw"),
        ("Flow_4", "B", "Gw"),
        ("Flow_5", "Gw", "C"),
        ("Flow_6", "Gw", "D"),
        ("Flow_7", "C", "End"),
        ("Flow_8", "D", "End"),
    ];
    for (id, source, target) in flows {
        graph
            .add_flow(root, SequenceFlow::new(id, source, target))
            .unwrap();
    }

    let report = Linter::default().lint(&graph);
    let diags: Vec<_> = report.by_rule("no-gateway-join-fork").collect();

    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].node_id(), "Gw");
    assert_eq!(diags[0].message(), "Gateway forks and joins");
}
