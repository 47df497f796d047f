//! Level Analyzer
//!
//! Orders nodes by propagating depths in rounds.
//!
//! # Algorithm
//!
//! 1. Every node without dependencies is placed at depth 0, in input order.
//!    Every other node goes into the remainder.
//! 2. Each round scans the remainder in order. A node whose dependencies were
//!    all placed in earlier rounds is placed at `1 + max(dependency depths)`
//!    and appended to the output after the scan. Other nodes stay in the
//!    remainder, keeping their order.
//! 3. A round that places nothing means the remainder can never resolve: it
//!    contains a cycle and everything depending on one.
//!
//! Round `r` places exactly the nodes of depth `r`, so the output is sorted
//! by depth and each productive round shrinks the remainder: there are at
//! most N rounds.

use tracing::{debug, trace};

use super::Analyzer;
use crate::graph::{Graph, Node, NodeId};

/// Non-destructive, depth-propagating analyzer.
///
/// The graph is only read, so analyzing the same graph twice yields the same
/// ordering and depths.
#[derive(Debug, Clone)]
pub struct LevelAnalyzer<T> {
    /// Unresolved remainder. Empty after a valid run.
    cycle: Vec<NodeId>,

    /// Placed nodes in dependency order.
    ordered_nodes: Vec<NodeId>,

    /// Values parallel to `ordered_nodes`.
    ordered: Vec<T>,

    /// Depth per node, indexed by `NodeId`. `None` means unplaced.
    depths: Vec<Option<usize>>,

    /// Output index per node, indexed by `NodeId`.
    positions: Vec<Option<usize>>,

    max_depth: usize,
    valid: bool,
}

impl<T: Clone> LevelAnalyzer<T> {
    /// Create an analyzer with no results.
    pub fn new() -> Self {
        Self {
            cycle: Vec::new(),
            ordered_nodes: Vec::new(),
            ordered: Vec::new(),
            depths: Vec::new(),
            positions: Vec::new(),
            max_depth: 0,
            valid: false,
        }
    }

    /// Analyze `graph`, returning `true` when every node could be ordered.
    pub fn analyze(&mut self, graph: &Graph<T>) -> bool {
        let n = graph.len();
        self.reset(n);
        debug!(nodes = n, "analyzing dependency levels");

        for (id, node) in graph.iter() {
            if node.has_dependencies() {
                self.cycle.push(id);
            } else {
                self.place(id, 0, node.value());
            }
        }

        // Every node has a dependency, so all of them are on or behind a cycle.
        if n > 0 && self.ordered_nodes.is_empty() {
            debug!(nodes = n, "no node is free of dependencies");
            return self.finish(false);
        }

        let mut ready = Vec::new();
        while !self.cycle.is_empty() {
            let pending = self.cycle.len();
            let mut kept = 0;

            for i in 0..pending {
                let id = self.cycle[i];
                match self.ready_depth(&graph[id]) {
                    Some(depth) => ready.push((id, depth)),
                    None => {
                        self.cycle[kept] = id;
                        kept += 1;
                    }
                }
            }

            self.cycle.truncate(kept);

            if ready.is_empty() {
                debug!(remaining = kept, "no progress in round, cycle detected");
                return self.finish(false);
            }

            // Placed after the scan so a round only sees earlier rounds.
            for (id, depth) in ready.drain(..) {
                self.place(id, depth, graph[id].value());
            }
        }

        self.finish(true)
    }

    /// Depth for `node` if all of its dependencies are placed.
    fn ready_depth(&self, node: &Node<T>) -> Option<usize> {
        node.dependencies()
            .iter()
            .try_fold(0, |depth, dependency| {
                self.depths[dependency.index()].map(|d| depth.max(d + 1))
            })
    }

    fn place(&mut self, id: NodeId, depth: usize, value: &T) {
        let index = self.ordered_nodes.len();
        self.depths[id.index()] = Some(depth);
        self.positions[id.index()] = Some(index);
        self.ordered_nodes.push(id);
        self.ordered.push(value.clone());
        self.max_depth = self.max_depth.max(depth);
        trace!(node = %id, depth, index, "placed node");
    }

    fn reset(&mut self, n: usize) {
        self.cycle.clear();
        self.ordered_nodes.clear();
        self.ordered.clear();
        self.ordered_nodes.reserve(n);
        self.ordered.reserve(n);
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
            ordered = self.ordered_nodes.len(),
            cyclic = self.cycle.len(),
            max_depth = self.max_depth,
            "level analysis finished"
        );
        valid
    }

    /// Input nodes of the last run, in input order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeId> {
        (0..self.depths.len()).map(NodeId::from)
    }

    /// Ordered nodes bucketed by depth, one bucket for every depth from 0 to
    /// [`Analyzer::max_depth`] inclusive.
    pub fn level_nodes(&self) -> Vec<Vec<NodeId>> {
        let mut levels = vec![Vec::new(); self.max_depth + 1];

        for &node in &self.ordered_nodes {
            if let Some(depth) = self.depths[node.index()] {
                levels[depth].push(node);
            }
        }

        levels
    }

    /// Ordered values bucketed by depth, shaped like [`LevelAnalyzer::level_nodes`].
    pub fn levels(&self) -> Vec<Vec<T>> {
        let mut levels = vec![Vec::new(); self.max_depth + 1];

        for (node, value) in self.ordered_nodes.iter().zip(&self.ordered) {
            if let Some(depth) = self.depths[node.index()] {
                levels[depth].push(value.clone());
            }
        }

        levels
    }
}

impl<T: Clone> Default for LevelAnalyzer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Analyzer<T> for LevelAnalyzer<T> {
    fn analyze(&mut self, graph: &mut Graph<T>) -> bool {
        LevelAnalyzer::analyze(self, graph)
    }

    fn clear(&mut self) {
        self.reset(0);
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn ordered_nodes(&self) -> &[NodeId] {
        &self.ordered_nodes
    }

    fn ordered_values(&self) -> &[T] {
        &self.ordered
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
        self.level_nodes()
    }

    fn depth_groups(&self) -> Vec<Vec<T>> {
        self.levels()
    }
}
