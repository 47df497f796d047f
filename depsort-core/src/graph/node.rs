//! Graph Nodes
//!
//! This module defines the node type stored in a [`Graph`](super::Graph) and
//! the handle used to address it.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Identifier for a node in a dependency graph.
///
/// A `NodeId` is the node's index in the graph's arena. Ids are assigned
/// sequentially from 0 by [`Graph::add_node`](super::Graph::add_node) and are
/// only meaningful for the graph that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    /// Get the raw arena index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the dependency graph.
///
/// A node carries a value and two mirrored edge sets. Edges can only be
/// changed through the owning [`Graph`](super::Graph), which keeps
/// `dependencies` and `dependents` symmetric across nodes.
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// The caller's value.
    value: T,

    /// Nodes that this node requires.
    dependencies: IndexSet<NodeId>,

    /// Nodes that require this node.
    dependents: IndexSet<NodeId>,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            value,
            dependencies: IndexSet::new(),
            dependents: IndexSet::new(),
        }
    }

    /// Get the node's value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Get a mutable reference to the node's value.
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Consume the node, returning its value.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Get all dependencies, in the order they were added.
    pub fn dependencies(&self) -> &IndexSet<NodeId> {
        &self.dependencies
    }

    /// Get all dependents, in the order they were added.
    pub fn dependents(&self) -> &IndexSet<NodeId> {
        &self.dependents
    }

    /// Check whether this node requires any other node.
    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }

    /// Check whether any other node requires this node.
    pub fn has_dependents(&self) -> bool {
        !self.dependents.is_empty()
    }

    pub(crate) fn insert_dependency(&mut self, node_id: NodeId) -> bool {
        self.dependencies.insert(node_id)
    }

    pub(crate) fn insert_dependent(&mut self, node_id: NodeId) -> bool {
        self.dependents.insert(node_id)
    }

    // shift_remove keeps the remaining edges in insertion order.
    pub(crate) fn remove_dependency(&mut self, node_id: NodeId) -> bool {
        self.dependencies.shift_remove(&node_id)
    }

    pub(crate) fn remove_dependent(&mut self, node_id: NodeId) -> bool {
        self.dependents.shift_remove(&node_id)
    }

    pub(crate) fn take_dependencies(&mut self) -> IndexSet<NodeId> {
        std::mem::take(&mut self.dependencies)
    }

    pub(crate) fn take_dependents(&mut self) -> IndexSet<NodeId> {
        std::mem::take(&mut self.dependents)
    }
}
