//! Graph nodes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A node in a practice graph.
///
/// The `id` is the sole identity key. Coordinates are presentation data
/// carried through for rendering; only A* reads them, as its heuristic.
/// The remaining fields hold per-algorithm state shown in step snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique id within the graph.
    pub id: String,
    /// Horizontal screen coordinate.
    #[serde(default)]
    pub x: f64,
    /// Vertical screen coordinate.
    #[serde(default)]
    pub y: f64,
    /// Set once the algorithm has reached (or settled) this node.
    #[serde(default)]
    pub visited: bool,
    /// Set once a depth-first traversal has returned from this node.
    #[serde(default)]
    pub backtracked: bool,
    /// The node the algorithm is currently working on.
    #[serde(default)]
    pub current: bool,
    /// Tentative distance from the start; infinite until reached.
    #[serde(default = "unreached", with = "distance_serde")]
    pub distance: f64,
    /// Free-form node weight.
    #[serde(default)]
    pub weight: f64,
    /// Component id (union-find root index) for spanning tree algorithms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<usize>,
    /// Set on the step whose relaxation improved this node's distance.
    #[serde(default)]
    pub recently_updated: bool,
    /// A* cost labels, once the node has been reached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub astar: Option<AStarLabels>,
}

/// A* cost labels for a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AStarLabels {
    /// Estimated total cost `g + h`.
    pub f: f64,
    /// Path cost from the start.
    pub g: f64,
    /// Straight-line distance to the goal.
    pub h: f64,
}

fn unreached() -> f64 {
    f64::INFINITY
}

impl Node {
    /// Creates a node at the origin.
    pub fn new(id: impl Into<String>) -> Self {
        Self::at(id, 0.0, 0.0)
    }

    /// Creates a node at the given coordinates.
    pub fn at(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            visited: false,
            backtracked: false,
            current: false,
            distance: f64::INFINITY,
            weight: 0.0,
            component: None,
            recently_updated: false,
            astar: None,
        }
    }

    /// Euclidean distance between two nodes' coordinates.
    #[must_use]
    pub fn distance_to(&self, other: &Node) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Clears all algorithm state, keeping id, coordinates and weight.
    pub fn reset_state(&mut self) {
        self.visited = false;
        self.backtracked = false;
        self.current = false;
        self.distance = f64::INFINITY;
        self.component = None;
        self.recently_updated = false;
        self.astar = None;
    }
}

/// JSON has no infinity, so unreached distances travel as `null`.
mod distance_serde {
    use super::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(distance: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if distance.is_finite() {
            serializer.serialize_some(distance)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}
