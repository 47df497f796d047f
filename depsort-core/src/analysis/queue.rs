//! Queue Analyzer
//!
//! Orders nodes with Kahn's algorithm, consuming the graph's edges.
//!
//! # Algorithm
//!
//! 1. Enqueue every node without dependencies at depth 0, in input order.
//! 2. While the queue is non-empty:
//!    a. Dequeue a node and append it to the output
//!    b. Detach it from all of its dependents, on both sides of each edge
//!    c. Enqueue every freed dependent that has no dependencies left, one
//!       level deeper than the dequeued node
//! 3. If the output is shorter than the input, the nodes never dequeued are
//!    on or behind a cycle.
//!
//! A node is freed once per incoming edge but only becomes ready when its
//! last dependency is detached, so it is enqueued at most once.
//!
//! # Side Effects
//!
//! Every dequeued node loses its dependent edges. After a valid run the graph
//! has no edges left, and analyzing it again puts every node at depth 0.

use std::collections::VecDeque;

use tracing::{debug, trace};

use super::{group_by_depth, Analyzer};
use crate::graph::{Graph, NodeId};

/// Destructive, queue-draining analyzer.
#[derive(Debug, Clone)]
pub struct QueueAnalyzer<T> {
    /// Dequeued nodes in dependency order.
    output_nodes: Vec<NodeId>,

    /// Values parallel to `output_nodes`.
    output: Vec<T>,

    /// Nodes never dequeued, in input order.
    cycle: Vec<NodeId>,

    /// Depth per node, indexed by `NodeId`. `None` means unplaced.
    depths: Vec<Option<usize>>,

    /// Output index per node, indexed by `NodeId`.
    positions: Vec<Option<usize>>,

    max_depth: usize,
    valid: bool,
}

impl<T: Clone> QueueAnalyzer<T> {
    /// Create an analyzer with no results.
    pub fn new() -> Self {
        Self {
            output_nodes: Vec::new(),
            output: Vec::new(),
            cycle: Vec::new(),
            depths: Vec::new(),
            positions: Vec::new(),
            max_depth: 0,
            valid: false,
        }
    }

    /// Analyze `graph`, returning `true` when every node could be ordered.
    ///
    /// Detaches the edges of every node that gets ordered.
    pub fn analyze(&mut self, graph: &mut Graph<T>) -> bool {
        let n = graph.len();
        self.reset(n);
        debug!(nodes = n, "analyzing dependency queue");

        let mut queue = VecDeque::new();
        for id in graph.node_ids() {
            if !graph.has_dependencies(id) {
                self.depths[id.index()] = Some(0);
                queue.push_back(id);
            }
        }

        if queue.is_empty() && n > 0 {
            debug!(nodes = n, "no node is free of dependencies");
            self.cycle.extend(graph.node_ids());
            return self.finish(false);
        }

        while let Some(node) = queue.pop_front() {
            let depth = self.depths[node.index()].unwrap_or_default();

            self.positions[node.index()] = Some(self.output_nodes.len());
            self.output_nodes.push(node);
            self.output.push(graph[node].value().clone());

            for dependent in graph.detach_dependents(node) {
                if graph.has_dependencies(dependent) {
                    continue;
                }
                self.depths[dependent.index()] = Some(depth + 1);
                self.max_depth = self.max_depth.max(depth + 1);
                trace!(node = %dependent, depth = depth + 1, "dependent ready");
                queue.push_back(dependent);
            }
        }

        if self.output_nodes.len() != n {
            let positions = &self.positions;
            self.cycle
                .extend(graph.node_ids().filter(|id| positions[id.index()].is_none()));
            debug!(remaining = self.cycle.len(), "queue drained early, cycle detected");
            return self.finish(false);
        }

        self.finish(true)
    }

    fn reset(&mut self, n: usize) {
        self.output_nodes.clear();
        self.output.clear();
        self.output_nodes.reserve(n);
        self.output.reserve(n);
        self.cycle.clear();
        self.depths.clear();
        self.depths.resize(n, None);
        self.positions.clear();
        self.positions.resize(n, None);
        self.max_depth = 0;
        self.valid = false;
    }

    fn finish(&mut self, valid: bool) -> bool {
        self.valid = valid;
        debug!(
            valid,
            ordered = self.output_nodes.len(),
            cyclic = self.cycle.len(),
            max_depth = self.max_depth,
            "queue analysis finished"
        );
        valid
    }

    /// Dequeued nodes of the last run, in dequeue order.
    pub fn output_nodes(&self) -> &[NodeId] {
        &self.output_nodes
    }

    /// Values of [`QueueAnalyzer::output_nodes`], in the same order.
    pub fn output(&self) -> &[T] {
        &self.output
    }

    /// Bucket an arbitrary list of nodes by the depths of the last run.
    ///
    /// Buckets grow as deeper nodes appear; nodes that were never placed are
    /// skipped.
    pub fn depth_group_nodes_of(&self, nodes: &[NodeId]) -> Vec<Vec<NodeId>> {
        group_by_depth(nodes.iter().copied(), &self.depths)
    }

    /// Like [`QueueAnalyzer::depth_group_nodes_of`], yielding values.
    pub fn depth_groups_of(&self, nodes: &[NodeId]) -> Vec<Vec<T>> {
        self.depth_group_nodes_of(nodes)
            .into_iter()
            .map(|group| {
                group
                    .into_iter()
                    .filter_map(|node| self.positions[node.index()])
                    .map(|index| self.output[index].clone())
                    .collect()
            })
            .collect()
    }
}

impl<T: Clone> Default for QueueAnalyzer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Analyzer<T> for QueueAnalyzer<T> {
    fn analyze(&mut self, graph: &mut Graph<T>) -> bool {
        QueueAnalyzer::analyze(self, graph)
    }

    fn clear(&mut self) {
        self.reset(0);
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn ordered_nodes(&self) -> &[NodeId] {
        &self.output_nodes
    }

    fn ordered_values(&self) -> &[T] {
        &self.output
    }

    fn cycle_nodes(&self) -> &[NodeId] {
        &self.cycle
    }

    fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn depth(&self, node: NodeId) -> Option<usize> {
        self.depths.get(node.index()).copied().flatten()
    }

    fn position(&self, node: NodeId) -> Option<usize> {
        self.positions.get(node.index()).copied().flatten()
    }

    fn depth_group_nodes(&self) -> Vec<Vec<NodeId>> {
        self.depth_group_nodes_of(&self.output_nodes)
    }
}
