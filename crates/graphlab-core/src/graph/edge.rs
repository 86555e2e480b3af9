//! Graph edges.

use serde::{Deserialize, Serialize};

/// A directed edge.
///
/// Undirected graphs store both directions explicitly. For flow
/// algorithms `weight` is the capacity and `flow` the current flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node id.
    pub source: String,
    /// Target node id.
    pub target: String,
    /// Weight, or capacity for flow algorithms.
    #[serde(default = "unit_weight")]
    pub weight: f64,
    /// Flow currently carried (flow algorithms only).
    #[serde(default)]
    pub flow: f64,
    /// Set once a spanning tree algorithm has accepted this edge.
    #[serde(default)]
    pub selected: bool,
}

fn unit_weight() -> f64 {
    1.0
}

impl Edge {
    /// Creates an edge with the given weight.
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
            flow: 0.0,
            selected: false,
        }
    }

    /// Returns the edge id, `source->target`.
    #[must_use]
    pub fn id(&self) -> String {
        edge_id(&self.source, &self.target)
    }

    /// Returns true if this edge joins `a` and `b` in either direction.
    #[must_use]
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }

    /// Clears flow and selection state.
    pub fn reset_state(&mut self) {
        self.flow = 0.0;
        self.selected = false;
    }
}

/// Formats an edge id from its endpoints.
#[must_use]
pub fn edge_id(source: &str, target: &str) -> String {
    format!("{source}->{target}")
}
