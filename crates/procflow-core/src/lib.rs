//! Procflow Core Types and Definitions
//!
//! This crate provides the foundational types for procflow. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Model**: The process graph, its nodes and sequence flows ([`model`] module)
//! - **Durations**: Compound hour/minute arithmetic for time limits ([`duration`] module)

pub mod duration;
pub mod identifier;
pub mod model;
