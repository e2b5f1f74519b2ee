//! Example: Building a process, adding time limits and linting it
//!
//! This example builds a small approval process with the model types,
//! attaches a deadline and a first warning to the approval task and prints
//! the lint findings before and after fixing them.

use procflow::{
    ProcessEditor,
    model::{EventKind, GatewayKind, Node, NodeKind, ProcessGraph, SequenceFlow, TaskKind},
    timer::{TimerKind, TimerOutcome},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building approval process...\n");

    let mut graph = ProcessGraph::new("Process_approval");
    let root = graph.root_id();

    graph.add_node(root, Node::new("Start", NodeKind::Event(EventKind::Start)))?;
    graph.add_node(
        root,
        Node::new("Approve", NodeKind::Task(TaskKind::UserTask)).with_name("Approve request"),
    )?;
    // Unnamed on purpose, an exclusive split needs a label.
    graph.add_node(root, Node::new("Decision", NodeKind::Gateway(GatewayKind::Exclusive)))?;
    graph.add_node(root, Node::new("Accepted", NodeKind::Event(EventKind::End)))?;
    graph.add_node(root, Node::new("Rejected", NodeKind::Event(EventKind::End)))?;

    graph.add_flow(root, SequenceFlow::new("Flow_1", "Start", "Approve"))?;
    graph.add_flow(root, SequenceFlow::new("Flow_2", "Approve", "Decision"))?;
    graph.add_flow(
        root,
        SequenceFlow::new("Flow_yes", "Decision", "Accepted")
            .with_name("approved")
            .with_condition("${approved}"),
    )?;
    graph.add_flow(
        root,
        SequenceFlow::new("Flow_no", "Decision", "Rejected").as_default(),
    )?;

    let editor = ProcessEditor::default();

    let result = editor.validate(&graph);
    println!("passed: {}", result.passed);
    for diagnostic in &result.diagnostics {
        println!("  {diagnostic}");
    }

    if let Some(decision) = graph.node_mut("Decision".into()) {
        decision.set_name(Some("Approved?".to_owned()));
    }

    let task = "Approve".into();
    editor.set_timer_field(&mut graph, task, TimerKind::Deadline, Some("8H"))?;
    let outcome = editor.set_timer_field(&mut graph, task, TimerKind::FirstWarning, Some("1H"))?;
    if let TimerOutcome::Installed(spec) = &outcome {
        println!("\nfirst warning fires at {}", spec.expression());
    }

    let result = editor.validate(&graph);
    println!("\npassed after fixes: {}", result.passed);
    println!("elements: {} nodes, {} flows", graph.node_count(), graph.flow_count());

    Ok(())
}
