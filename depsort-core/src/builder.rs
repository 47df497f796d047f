//! Key-based graph construction
//!
//! [`DependencyMap`] lets callers declare nodes and edges by key instead of by
//! [`NodeId`], then materializes a fresh [`Graph`] on demand. Keys also act as
//! the deduplication point for values: one key, one node.

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::graph::{Graph, GraphError, GraphResult, NodeId};

/// Values and dependency declarations keyed by `K`.
///
/// # Example
///
/// ```
/// use depsort_core::analysis::{Analyzer, QueueAnalyzer};
/// use depsort_core::DependencyMap;
///
/// let mut map = DependencyMap::new();
/// map.add("server", 3);
/// map.add("db", 2);
/// map.add("config", 1);
/// map.add_dependency("server", "db").unwrap();
/// map.add_dependent("config", "db").unwrap();
///
/// let mut keyed = map.build().unwrap();
/// let mut analyzer = QueueAnalyzer::new();
/// assert!(analyzer.analyze(keyed.graph_mut()));
/// assert_eq!(analyzer.ordered_values(), &[1, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct DependencyMap<K, V> {
    /// Value per key, in first insertion order.
    values: IndexMap<K, V>,

    /// Keys each key depends on.
    dependencies: IndexMap<K, IndexSet<K>>,
}

impl<K, V> DependencyMap<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            values: IndexMap::new(),
            dependencies: IndexMap::new(),
        }
    }

    /// Set the value for `key`, returning the value it replaced.
    ///
    /// A replaced key keeps its original position.
    pub fn add(&mut self, key: K, value: V) -> Option<V> {
        self.values.insert(key, value)
    }

    /// Declare that `child` depends on `dependency`.
    ///
    /// Keys do not need values yet; they are resolved by [`DependencyMap::build`].
    pub fn add_dependency(&mut self, child: K, dependency: K) -> GraphResult<()> {
        if child == dependency {
            return Err(GraphError::self_dependent_key(&child));
        }
        self.dependencies
            .entry(child)
            .or_default()
            .insert(dependency);
        Ok(())
    }

    /// Declare that `dependent` depends on `parent`.
    pub fn add_dependent(&mut self, parent: K, dependent: K) -> GraphResult<()> {
        self.add_dependency(dependent, parent)
    }

    /// Get the value for `key`.
    pub fn value(&self, key: &K) -> Option<&V> {
        self.values.get(key)
    }

    /// Check whether `key` has a value.
    pub fn contains_key(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    /// Number of keys with a value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no key has a value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Materialize a new graph with one node per key.
    ///
    /// Nodes are created in key insertion order. Every call allocates fresh
    /// nodes, so analyzing one result never affects another.
    ///
    /// Fails with [`GraphError::UnknownKey`] if a declaration names a key
    /// that has no value.
    pub fn build(&self) -> GraphResult<KeyedGraph<K, V>> {
        let mut graph = Graph::with_capacity(self.values.len());
        let mut ids = IndexMap::with_capacity(self.values.len());

        for (key, value) in &self.values {
            ids.insert(key.clone(), graph.add_node(value.clone()));
        }

        for (child, dependencies) in &self.dependencies {
            let node = Self::lookup(&ids, child)?;
            for dependency in dependencies {
                graph.add_dependency(node, Self::lookup(&ids, dependency)?)?;
            }
        }

        debug!(
            nodes = graph.len(),
            edges = graph.edge_count(),
            "materialized dependency map"
        );

        Ok(KeyedGraph { graph, ids })
    }

    fn lookup(ids: &IndexMap<K, NodeId>, key: &K) -> GraphResult<NodeId> {
        ids.get(key)
            .copied()
            .ok_or_else(|| GraphError::unknown_key(key))
    }
}

impl<K, V> Default for DependencyMap<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// A graph built by [`DependencyMap::build`], with its key to id mapping.
#[derive(Debug, Clone)]
pub struct KeyedGraph<K, V> {
    graph: Graph<V>,
    ids: IndexMap<K, NodeId>,
}

impl<K: Eq + Hash, V> KeyedGraph<K, V> {
    /// Get the graph.
    pub fn graph(&self) -> &Graph<V> {
        &self.graph
    }

    /// Get the graph mutably, e.g. for a destructive analyzer.
    pub fn graph_mut(&mut self) -> &mut Graph<V> {
        &mut self.graph
    }

    /// Consume the wrapper, returning the graph.
    pub fn into_graph(self) -> Graph<V> {
        self.graph
    }

    /// Get the node created for `key`.
    pub fn id(&self, key: &K) -> Option<NodeId> {
        self.ids.get(key).copied()
    }

    /// Get the key a node was created for.
    pub fn key(&self, node: NodeId) -> Option<&K> {
        // Nodes were added in key order, so the id doubles as the map index.
        self.ids.get_index(node.index()).map(|(key, _)| key)
    }
}
