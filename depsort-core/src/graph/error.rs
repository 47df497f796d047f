//! Error types for graph construction
//!
//! A cycle is not an error: analyzers report it through their validity flag
//! and unresolved remainder. These errors cover malformed edges only.

use thiserror::Error;

use super::NodeId;

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur while building or mutating a graph
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    /// A node was asked to depend on itself
    #[error("node {node} cannot depend on itself")]
    SelfDependency {
        /// The node named on both ends of the edge
        node: NodeId,
    },

    /// A node id does not belong to the graph
    #[error("node {node} does not exist in this graph")]
    NodeNotFound {
        /// The unknown id
        node: NodeId,
    },

    /// A dependency declaration named a key that was never given a value
    #[error("key {key} has no value")]
    UnknownKey {
        /// Debug rendering of the key
        key: String,
    },

    /// A key was declared to depend on itself
    #[error("key {key} cannot depend on itself")]
    SelfDependentKey {
        /// Debug rendering of the key
        key: String,
    },
}

impl GraphError {
    /// Creates a self-dependency error
    pub fn self_dependency(node: NodeId) -> Self {
        Self::SelfDependency { node }
    }

    /// Creates a node not found error
    pub fn node_not_found(node: NodeId) -> Self {
        Self::NodeNotFound { node }
    }

    /// Creates an unknown key error
    pub fn unknown_key(key: &impl std::fmt::Debug) -> Self {
        Self::UnknownKey {
            key: format!("{key:?}"),
        }
    }

    /// Creates a self-dependent key error
    pub fn self_dependent_key(key: &impl std::fmt::Debug) -> Self {
        Self::SelfDependentKey {
            key: format!("{key:?}"),
        }
    }
}
