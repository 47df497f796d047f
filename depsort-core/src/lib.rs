//! Depsort Core
//!
//! This crate orders interdependent items so that every item comes after all
//! of the items it depends on, and detects when that is impossible because
//! of a circular dependency. It implements:
//!
//! - A node/edge data model with mirrored dependency and dependent sets
//! - Two ordering strategies behind one [`Analyzer`] interface
//! - Depth grouping of the ordered output
//! - Key-based graph construction
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `graph`: Node arena and edge mutation
//! - `analysis`: Ordering strategies, depth grouping and reports
//! - `builder`: Key-based construction of graphs
//!
//! # Example
//!
//! ```rust
//! use depsort_core::{Analyzer, Graph, LevelAnalyzer};
//!
//! let mut graph = Graph::new();
//! let parse = graph.add_node("parse");
//! let check = graph.add_node("check");
//! let emit = graph.add_node("emit");
//!
//! graph.add_dependency(emit, check).unwrap();
//! graph.add_dependency(check, parse).unwrap();
//!
//! let mut analyzer = LevelAnalyzer::new();
//! if analyzer.analyze(&graph) {
//!     assert_eq!(analyzer.ordered_values(), &["parse", "check", "emit"]);
//! } else {
//!     for node in analyzer.cycle_nodes() {
//!         eprintln!("unresolved: {}", graph[*node].value());
//!     }
//! }
//! ```

pub mod analysis;
pub mod builder;
pub mod graph;

pub use analysis::{AnalysisReport, Analyzer, LevelAnalyzer, QueueAnalyzer};
pub use builder::{DependencyMap, KeyedGraph};
pub use graph::{Graph, GraphError, GraphResult, Node, NodeId};
