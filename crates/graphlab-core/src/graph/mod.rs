//! The graph value type.
//!
//! A [`Graph`] is plain data: an ordered node list and an ordered edge
//! list. Node order is the tie-break order for every algorithm, and edge
//! order fixes neighbor order. Cloning a graph is a deep copy, which is
//! what step snapshots rely on.

mod adjacency;
mod edge;
mod node;

pub use adjacency::{AdjacencyIndex, Neighbor};
pub use edge::{Edge, edge_id};
pub use node::{AStarLabels, Node};

use graphlab_common::utils::error::{GraphValidationError, Result};
use serde::{Deserialize, Serialize};

/// A practice graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// Nodes in insertion order.
    pub nodes: Vec<Node>,
    /// Directed edges in insertion order.
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from directed `(source, target, weight)` triples.
    ///
    /// Nodes are created in order of first appearance.
    #[must_use]
    pub fn from_directed_edges(edges: &[(&str, &str, f64)]) -> Self {
        let mut graph = Self::new();
        for &(source, target, weight) in edges {
            graph.ensure_node(source);
            graph.ensure_node(target);
            graph.add_edge(source, target, weight);
        }
        graph
    }

    /// Builds a graph from undirected `(a, b, weight)` triples, storing
    /// `a->b` immediately followed by `b->a` for each.
    #[must_use]
    pub fn from_undirected_edges(edges: &[(&str, &str, f64)]) -> Self {
        let mut graph = Self::new();
        for &(a, b, weight) in edges {
            graph.ensure_node(a);
            graph.ensure_node(b);
            graph.add_undirected_edge(a, b, weight);
        }
        graph
    }

    /// Appends a node.
    pub fn add_node(&mut self, node: Node) -> &mut Self {
        self.nodes.push(node);
        self
    }

    /// Appends a directed edge.
    pub fn add_edge(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        weight: f64,
    ) -> &mut Self {
        self.edges.push(Edge::new(source, target, weight));
        self
    }

    /// Appends `a->b` and `b->a` with the same weight.
    pub fn add_undirected_edge(&mut self, a: &str, b: &str, weight: f64) -> &mut Self {
        self.add_edge(a, b, weight);
        self.add_edge(b, a, weight)
    }

    fn ensure_node(&mut self, id: &str) {
        if !self.contains(id) {
            self.nodes.push(Node::new(id));
        }
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if a node with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Looks up a node by id, mutably.
    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Returns true if any edge joins `a` and `b` in either direction.
    #[must_use]
    pub fn has_edge_between(&self, a: &str, b: &str) -> bool {
        self.edges.iter().any(|e| e.connects(a, b))
    }

    /// Successor ids of `node_id`, in edge insertion order.
    ///
    /// Algorithms use [`AdjacencyIndex`] instead, which yields the same
    /// order without rescanning.
    #[must_use]
    pub fn adjacency(&self, node_id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.source == node_id)
            .map(|e| e.target.as_str())
            .collect()
    }

    /// Builds the adjacency index for this graph.
    pub fn index(&self) -> Result<AdjacencyIndex> {
        AdjacencyIndex::build(self)
    }

    /// Checks id uniqueness and edge endpoints.
    pub fn validate(&self) -> Result<()> {
        self.index().map(|_| ())
    }

    /// Returns true if every node is reachable from the first one when
    /// edges are followed in both directions.
    ///
    /// Malformed graphs report false; the empty graph is connected.
    #[must_use]
    pub fn validate_connectivity(&self) -> bool {
        match self.index() {
            Ok(index) => index.is_empty() || index.reachable_from(0, true).iter().all(|&r| r),
            Err(_) => false,
        }
    }

    /// Validates the graph and requires it to be connected.
    pub fn ensure_connected(&self) -> Result<()> {
        let index = self.index()?;
        if index.is_empty() {
            return Ok(());
        }
        let reachable = index
            .reachable_from(0, true)
            .into_iter()
            .filter(|&r| r)
            .count();
        if reachable == index.len() {
            Ok(())
        } else {
            Err(GraphValidationError::Disconnected {
                reachable,
                total: index.len(),
            }
            .into())
        }
    }

    /// Clears all algorithm state on nodes and edges.
    pub fn reset_state(&mut self) {
        self.nodes.iter_mut().for_each(Node::reset_state);
        self.edges.iter_mut().for_each(Edge::reset_state);
    }
}
