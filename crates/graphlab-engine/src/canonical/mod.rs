//! Canonical execution rules shared by the tracer and the validator.
//!
//! Each algorithm is expressed here as a small stepping state. The trace
//! generator drives one instance to completion while recording steps;
//! the move validator drives its own instance one learner move at a
//! time. The two never share an instance, but because they share these
//! rules they agree on every tie-break.

mod priority;
mod residual;
mod spanning;
mod traversal;
mod union_find;

pub use priority::{BestFirst, BestFirstEntry, PrimEntry, Relaxation};
pub use residual::{AugmentStrategy, ResidualNetwork};
pub use spanning::{Consideration, KruskalState, PrimState, kruskal_order, undirected_edges};
pub use traversal::{BfsState, DfsState};
pub use union_find::UnionFind;

use graphlab_common::utils::error::{GraphValidationError, Result};
use graphlab_core::graph::{AdjacencyIndex, Graph, edge_id};

/// Immutable, index-based view of a validated graph.
///
/// Holds the adjacency index plus the per-edge and per-node numbers the
/// algorithms read, so no algorithm ever compares node objects.
#[derive(Debug, Clone)]
pub struct GraphView {
    index: AdjacencyIndex,
    endpoints: Vec<(usize, usize)>,
    weights: Vec<f64>,
    positions: Vec<(f64, f64)>,
}

impl GraphView {
    /// Validates `graph` and builds its view.
    pub fn new(graph: &Graph) -> Result<Self> {
        let index = AdjacencyIndex::build(graph)?;
        let endpoints = graph
            .edges
            .iter()
            .map(|e| {
                // build() already rejected dangling endpoints
                let src = index.index_of(&e.source).unwrap_or_default();
                let dst = index.index_of(&e.target).unwrap_or_default();
                (src, dst)
            })
            .collect();
        Ok(Self {
            index,
            endpoints,
            weights: graph.edges.iter().map(|e| e.weight).collect(),
            positions: graph.nodes.iter().map(|n| (n.x, n.y)).collect(),
        })
    }

    /// Returns the adjacency index.
    #[must_use]
    pub fn index(&self) -> &AdjacencyIndex {
        &self.index
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.endpoints.len()
    }

    /// Returns the id of node `index`.
    #[must_use]
    pub fn id(&self, index: usize) -> &str {
        self.index.id(index)
    }

    /// Returns the ids of several nodes.
    #[must_use]
    pub fn ids(&self, nodes: impl IntoIterator<Item = usize>) -> Vec<String> {
        nodes.into_iter().map(|n| self.id(n).to_string()).collect()
    }

    /// Returns `(source, target)` node indices of an edge.
    #[must_use]
    pub fn endpoints(&self, edge: usize) -> (usize, usize) {
        self.endpoints[edge]
    }

    /// Returns the weight (or capacity) of an edge.
    #[must_use]
    pub fn weight(&self, edge: usize) -> f64 {
        self.weights[edge]
    }

    /// Returns the `source->target` id of an edge.
    #[must_use]
    pub fn edge_id(&self, edge: usize) -> String {
        let (src, dst) = self.endpoints[edge];
        edge_id(self.id(src), self.id(dst))
    }

    /// Straight-line distance between two nodes in screen coordinates.
    #[must_use]
    pub fn euclidean(&self, a: usize, b: usize) -> f64 {
        let (ax, ay) = self.positions[a];
        let (bx, by) = self.positions[b];
        (ax - bx).hypot(ay - by)
    }

    /// Heuristic table `h(v) = euclidean(v, goal)` for every node.
    #[must_use]
    pub fn heuristic_to(&self, goal: usize) -> Vec<f64> {
        (0..self.node_count())
            .map(|v| self.euclidean(v, goal))
            .collect()
    }

    /// Finds the first edge joining `a` and `b` in either direction.
    #[must_use]
    pub fn find_edge_between(&self, a: usize, b: usize) -> Option<usize> {
        self.endpoints
            .iter()
            .position(|&(s, t)| (s == a && t == b) || (s == b && t == a))
    }

    /// Rejects negative edge weights.
    pub fn ensure_non_negative(&self) -> Result<()> {
        for (edge, &weight) in self.weights.iter().enumerate() {
            if weight < 0.0 {
                let (src, dst) = self.endpoints[edge];
                return Err(GraphValidationError::NegativeWeight {
                    from: self.id(src).to_string(),
                    to: self.id(dst).to_string(),
                    weight,
                }
                .into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphlab_core::graph::Node;

    #[test]
    fn test_view_lookup() {
        let mut graph = Graph::from_undirected_edges(&[("A", "B", 2.0), ("B", "C", 5.0)]);
        graph.nodes[0].x = 3.0;
        graph.nodes[0].y = 4.0;
        let view = GraphView::new(&graph).unwrap();
        assert_eq!(view.node_count(), 3);
        assert_eq!(view.edge_count(), 4);
        assert_eq!(view.edge_id(3), "C->B");
        assert_eq!(view.weight(2), 5.0);
        assert_eq!(view.euclidean(0, 1), 5.0);
        assert_eq!(view.find_edge_between(2, 1), Some(2));
        assert_eq!(view.find_edge_between(0, 2), None);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("A")).add_node(Node::new("B"));
        graph.add_edge("A", "B", -1.0);
        let view = GraphView::new(&graph).unwrap();
        assert!(view.ensure_non_negative().unwrap_err().is_graph_validation());
    }
}
