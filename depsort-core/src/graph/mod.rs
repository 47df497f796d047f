//! Dependency Graph
//!
//! This module implements the node/edge data model that both analyzers in
//! [`crate::analysis`] consume.
//!
//! # Overview
//!
//! The graph is a directed graph where:
//!
//! - Nodes hold a caller value and are addressed by a [`NodeId`]
//! - Edges mean "depends on": if A depends on B, B must be ordered before A
//!
//! The graph may contain cycles. Detecting them is the analyzers' job, not
//! the graph's.
//!
//! # Design Decisions
//!
//! 1. Nodes live in an arena and refer to each other by index, so there are
//!    no reference cycles between nodes.
//!
//! 2. Node identity is the index. Two nodes holding equal values are still
//!    two nodes; use [`crate::DependencyMap`] to deduplicate by key.
//!
//! 3. We maintain both forward (dependencies) and reverse (dependents) edges
//!    so both analyzers get O(1) readiness checks.
//!
//! 4. Edge sets preserve insertion order, which keeps every analysis
//!    deterministic for a fixed construction order.

mod arena;
mod error;
mod node;

pub use arena::{Detached, Graph};
pub use error::{GraphError, GraphResult};
pub use node::{Node, NodeId};
