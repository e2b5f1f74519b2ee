//! Process graph model types.
//!
//! This module contains the in-memory representation of a BPMN-style process:
//! a hierarchy of containers (processes, sub-processes) whose children are flow
//! nodes and the sequence flows connecting them.
//!
//! # Organization
//!
//! - [`kind`] - Closed node type taxonomy: [`NodeKind`], [`TaskKind`], [`GatewayKind`], [`EventKind`]
//! - [`event`] - Event definitions and timer expressions
//! - [`node`] - [`Node`] and its namespaced [`Attributes`]
//! - [`flow`] - [`SequenceFlow`], the edges of the graph
//! - [`graph`] - [`ProcessGraph`], the owning store with create/remove operations
//! - [`id_check`] - Element id validation

pub mod event;
pub mod flow;
pub mod graph;
pub mod id_check;
pub mod kind;
pub mod node;

pub use event::*;
pub use flow::*;
pub use graph::*;
pub use id_check::*;
pub use kind::*;
pub use node::*;
