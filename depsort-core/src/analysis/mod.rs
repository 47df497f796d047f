//! Dependency Analysis
//!
//! This module orders the nodes of a [`Graph`] so that every node comes after
//! all of its dependencies, and reports the nodes that cannot be ordered
//! because they sit on (or behind) a cycle.
//!
//! # Strategies
//!
//! Two strategies implement the same [`Analyzer`] interface:
//!
//! - [`LevelAnalyzer`] propagates depths round by round. It only reads the
//!   graph, so repeated runs give identical results.
//! - [`QueueAnalyzer`] runs Kahn's algorithm with a FIFO queue and strips the
//!   edges of every node it resolves. The graph is consumed by the run.
//!
//! Both produce the same ordering and depths for an acyclic graph built in a
//! fixed order.
//!
//! # Depth
//!
//! A node with no dependencies has depth 0. Any other node has depth
//! `1 + max(depth of its dependencies)`. Nodes of depth `n` depend only on
//! nodes of depth `< n`, so each depth group can be processed as a batch.
//!
//! # Example
//!
//! ```
//! use depsort_core::analysis::{Analyzer, LevelAnalyzer};
//! use depsort_core::graph::Graph;
//!
//! let mut graph = Graph::new();
//! let config = graph.add_node("config");
//! let db = graph.add_node("db");
//! let cache = graph.add_node("cache");
//! let server = graph.add_node("server");
//! graph.add_dependency(db, config).unwrap();
//! graph.add_dependency(cache, config).unwrap();
//! graph.add_dependency(server, db).unwrap();
//! graph.add_dependency(server, cache).unwrap();
//!
//! let mut analyzer = LevelAnalyzer::new();
//! assert!(analyzer.analyze(&graph));
//! assert_eq!(analyzer.ordered_values(), &["config", "db", "cache", "server"]);
//! assert_eq!(
//!     analyzer.depth_groups(),
//!     vec![vec!["config"], vec!["db", "cache"], vec!["server"]]
//! );
//! ```

mod level;
mod queue;
mod report;

pub use level::LevelAnalyzer;
pub use queue::QueueAnalyzer;
pub use report::AnalysisReport;

use crate::graph::{Graph, NodeId};

/// Common interface of the ordering strategies.
///
/// Every accessor reflects the most recent call to [`Analyzer::analyze`];
/// starting a new run or calling [`Analyzer::clear`] discards the previous
/// results.
pub trait Analyzer<T> {
    /// Analyze `graph`, returning `true` when every node could be ordered.
    ///
    /// Implementations that only read the graph still take `&mut` here so
    /// callers can switch strategies without changing call sites.
    fn analyze(&mut self, graph: &mut Graph<T>) -> bool;

    /// Discard all results of the previous run.
    fn clear(&mut self);

    /// Whether the last run ordered every node.
    fn is_valid(&self) -> bool;

    /// Whether the last run stopped on a cycle.
    fn is_cyclic(&self) -> bool {
        !self.is_valid()
    }

    /// Nodes in dependency order. On an invalid run this holds only the
    /// nodes that were placed before progress stopped.
    fn ordered_nodes(&self) -> &[NodeId];

    /// Values parallel to [`Analyzer::ordered_nodes`].
    fn ordered_values(&self) -> &[T];

    /// Nodes that could not be ordered, in input order.
    ///
    /// This includes every node on a cycle and every node that depends on
    /// one, directly or transitively.
    fn cycle_nodes(&self) -> &[NodeId];

    /// Number of nodes that could not be ordered.
    fn cycle_size(&self) -> usize {
        self.cycle_nodes().len()
    }

    /// Largest depth assigned in the last run.
    fn max_depth(&self) -> usize;

    /// Depth assigned to `node`, or `None` if it was never placed.
    fn depth(&self, node: NodeId) -> Option<usize>;

    /// Index of `node` in [`Analyzer::ordered_nodes`].
    fn position(&self, node: NodeId) -> Option<usize>;

    /// Ordered nodes bucketed by depth. Concatenating the buckets reproduces
    /// [`Analyzer::ordered_nodes`].
    fn depth_group_nodes(&self) -> Vec<Vec<NodeId>>;

    /// Ordered values bucketed by depth.
    fn depth_groups(&self) -> Vec<Vec<T>>
    where
        T: Clone,
    {
        let values = self.ordered_values();
        self.depth_group_nodes()
            .into_iter()
            .map(|group| {
                group
                    .into_iter()
                    .filter_map(|node| self.position(node))
                    .map(|index| values[index].clone())
                    .collect()
            })
            .collect()
    }
}

/// Bucket `nodes` by depth, growing the bucket list as deeper nodes appear.
///
/// Nodes without a depth are skipped.
pub(crate) fn group_by_depth<I>(nodes: I, depths: &[Option<usize>]) -> Vec<Vec<NodeId>>
where
    I: IntoIterator<Item = NodeId>,
{
    let mut groups: Vec<Vec<NodeId>> = Vec::new();

    for node in nodes {
        let Some(depth) = depths.get(node.index()).copied().flatten() else {
            continue;
        };
        if groups.len() <= depth {
            groups.resize_with(depth + 1, Vec::new);
        }
        groups[depth].push(node);
    }

    groups
}
