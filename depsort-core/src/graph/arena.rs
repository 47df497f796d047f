//! Node Arena
//!
//! [`Graph`] owns every node and is the only place edges are mutated. Each
//! edge is written on both ends in the same call, so for any two nodes A and
//! B, B is a dependency of A exactly when A is a dependent of B.

use std::ops::Index;

use smallvec::SmallVec;
use tracing::trace;

use super::error::{GraphError, GraphResult};
use super::node::{Node, NodeId};

/// Ids detached from a node by [`Graph::clear_dependents`] or
/// [`Graph::clear_dependencies`], in their former insertion order.
pub type Detached = SmallVec<[NodeId; 8]>;

/// An arena of nodes connected by "depends on" edges.
///
/// # Example
///
/// ```
/// use depsort_core::graph::Graph;
///
/// let mut graph = Graph::new();
/// let config = graph.add_node("config");
/// let db = graph.add_node("db");
///
/// // db depends on config
/// graph.add_dependency(db, config).unwrap();
///
/// assert!(graph.has_dependencies(db));
/// assert!(graph.has_dependents(config));
/// ```
#[derive(Debug, Clone)]
pub struct Graph<T> {
    /// All nodes, indexed by `NodeId`.
    nodes: Vec<Node<T>>,
}

impl<T> Graph<T> {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create an empty graph with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Add a node holding `value` and return its id.
    pub fn add_node(&mut self, value: T) -> NodeId {
        let id = NodeId::from(self.nodes.len());
        self.nodes.push(Node::new(value));
        id
    }

    /// Get the total number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check whether `node_id` was issued by this graph.
    pub fn contains(&self, node_id: NodeId) -> bool {
        node_id.index() < self.nodes.len()
    }

    /// Get a reference to a node.
    pub fn node(&self, node_id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(node_id.index())
    }

    /// Get a node's value.
    pub fn value(&self, node_id: NodeId) -> Option<&T> {
        self.node(node_id).map(Node::value)
    }

    /// Get a mutable reference to a node's value.
    pub fn value_mut(&mut self, node_id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(node_id.index()).map(Node::value_mut)
    }

    /// Iterate over all node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::from)
    }

    /// Iterate over all nodes with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<T>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::from(index), node))
    }

    /// Get the number of dependency edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.dependencies().len()).sum()
    }

    fn check(&self, node_id: NodeId) -> GraphResult<()> {
        if self.contains(node_id) {
            Ok(())
        } else {
            Err(GraphError::node_not_found(node_id))
        }
    }

    fn check_edge(&self, from: NodeId, to: NodeId) -> GraphResult<()> {
        self.check(from)?;
        self.check(to)?;
        if from == to {
            return Err(GraphError::self_dependency(from));
        }
        Ok(())
    }

    /// Add a dependency edge: `node` depends on `dependency`.
    ///
    /// Adding an edge that already exists is a no-op.
    pub fn add_dependency(&mut self, node: NodeId, dependency: NodeId) -> GraphResult<()> {
        self.check_edge(node, dependency)?;
        self.nodes[node.index()].insert_dependency(dependency);
        self.nodes[dependency.index()].insert_dependent(node);
        Ok(())
    }

    /// Add a dependent edge: `dependent` depends on `node`.
    pub fn add_dependent(&mut self, node: NodeId, dependent: NodeId) -> GraphResult<()> {
        self.add_dependency(dependent, node)
    }

    /// Remove the edge `node` depends on `dependency`, if present.
    pub fn remove_dependency(&mut self, node: NodeId, dependency: NodeId) -> GraphResult<()> {
        self.check(node)?;
        self.check(dependency)?;
        self.nodes[node.index()].remove_dependency(dependency);
        self.nodes[dependency.index()].remove_dependent(node);
        Ok(())
    }

    /// Remove the edge `dependent` depends on `node`, if present.
    pub fn remove_dependent(&mut self, node: NodeId, dependent: NodeId) -> GraphResult<()> {
        self.remove_dependency(dependent, node)
    }

    /// Detach every dependent of `node`.
    ///
    /// Also removes `node` from each dependent's dependency set. Returns the
    /// ids that were detached.
    pub fn clear_dependents(&mut self, node: NodeId) -> GraphResult<Detached> {
        self.check(node)?;
        Ok(self.detach_dependents(node))
    }

    /// Detach every dependency of `node`.
    ///
    /// Also removes `node` from each dependency's dependent set. Returns the
    /// ids that were detached.
    pub fn clear_dependencies(&mut self, node: NodeId) -> GraphResult<Detached> {
        self.check(node)?;
        let detached: Detached = self.nodes[node.index()]
            .take_dependencies()
            .into_iter()
            .collect();
        for dependency in &detached {
            self.nodes[dependency.index()].remove_dependent(node);
        }
        Ok(detached)
    }

    /// Unchecked variant of [`Graph::clear_dependents`] for ids the caller
    /// already obtained from this graph.
    pub(crate) fn detach_dependents(&mut self, node: NodeId) -> Detached {
        let detached: Detached = self.nodes[node.index()]
            .take_dependents()
            .into_iter()
            .collect();
        for dependent in &detached {
            self.nodes[dependent.index()].remove_dependency(node);
        }
        trace!(%node, freed = detached.len(), "detached dependents");
        detached
    }

    /// Check whether `node` has any dependencies. Unknown ids have none.
    pub fn has_dependencies(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(Node::has_dependencies)
    }

    /// Check whether `node` has any dependents. Unknown ids have none.
    pub fn has_dependents(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(Node::has_dependents)
    }
}

/// Panics if `node_id` was not issued by this graph.
impl<T> Index<NodeId> for Graph<T> {
    type Output = Node<T>;

    fn index(&self, node_id: NodeId) -> &Self::Output {
        &self.nodes[node_id.index()]
    }
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}
