//! Serializable summary of an analysis run.

use serde::{Deserialize, Serialize};

use super::Analyzer;
use crate::graph::NodeId;

/// Snapshot of an analyzer's results, detached from the analyzer and graph.
///
/// Holds node ids only, so it serializes for any value type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Whether every node was ordered.
    pub valid: bool,

    /// Placed nodes in dependency order.
    pub ordered: Vec<NodeId>,

    /// Nodes left unresolved by a cycle, in input order.
    pub cycle: Vec<NodeId>,

    /// Deepest depth assigned to a placed node.
    pub max_depth: usize,

    /// Placed nodes bucketed by depth.
    pub depth_groups: Vec<Vec<NodeId>>,
}

impl AnalysisReport {
    /// Capture the results of `analyzer`'s last run.
    pub fn from_analyzer<T, A>(analyzer: &A) -> Self
    where
        A: Analyzer<T> + ?Sized,
    {
        Self {
            valid: analyzer.is_valid(),
            ordered: analyzer.ordered_nodes().to_vec(),
            cycle: analyzer.cycle_nodes().to_vec(),
            max_depth: analyzer.max_depth(),
            depth_groups: analyzer.depth_group_nodes(),
        }
    }

    /// Render the report as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a report rendered by [`AnalysisReport::to_json`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
