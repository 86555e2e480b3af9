//! Id-keyed adjacency index.
//!
//! Built once per graph by scanning edges in stored order. Neighbor
//! order is edge insertion order and is authoritative for every
//! tie-break in the trace generator and the move validator. Node
//! positions in the index are insertion positions in `Graph::nodes`.

use std::collections::VecDeque;

use graphlab_common::utils::error::{GraphValidationError, Result};
use indexmap::IndexSet;
use smallvec::SmallVec;

use super::Graph;

/// An adjacency entry: the node on the other end and the edge position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    /// Insertion index of the neighboring node.
    pub node: usize,
    /// Position of the edge in `Graph::edges`.
    pub edge: usize,
}

/// Adjacency lists keyed by node insertion index.
#[derive(Debug, Clone)]
pub struct AdjacencyIndex {
    /// Node ids in insertion order.
    ids: IndexSet<String>,
    /// Outgoing entries per node, in edge order.
    outgoing: Vec<SmallVec<[Neighbor; 4]>>,
    /// Incoming entries per node, in edge order.
    incoming: Vec<SmallVec<[Neighbor; 4]>>,
}

impl AdjacencyIndex {
    /// Builds the index, rejecting duplicate ids and dangling edges.
    pub fn build(graph: &Graph) -> Result<Self> {
        let mut ids = IndexSet::with_capacity(graph.nodes.len());
        for node in &graph.nodes {
            if !ids.insert(node.id.clone()) {
                return Err(GraphValidationError::DuplicateNode {
                    id: node.id.clone(),
                }
                .into());
            }
        }

        let mut outgoing = vec![SmallVec::new(); ids.len()];
        let mut incoming = vec![SmallVec::new(); ids.len()];

        for (position, edge) in graph.edges.iter().enumerate() {
            let lookup = |id: &str| {
                ids.get_index_of(id)
                    .ok_or_else(|| GraphValidationError::DanglingEdge {
                        from: edge.source.clone(),
                        to: edge.target.clone(),
                        missing: id.to_string(),
                    })
            };
            let src = lookup(&edge.source)?;
            let dst = lookup(&edge.target)?;
            outgoing[src].push(Neighbor {
                node: dst,
                edge: position,
            });
            incoming[dst].push(Neighbor {
                node: src,
                edge: position,
            });
        }

        Ok(Self {
            ids,
            outgoing,
            incoming,
        })
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the insertion index of a node id.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.get_index_of(id)
    }

    /// Resolves a required node parameter.
    pub fn resolve(&self, role: &'static str, id: &str) -> Result<usize> {
        self.index_of(id).ok_or_else(|| {
            GraphValidationError::MissingNode {
                role,
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Returns the id of the node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn id(&self, index: usize) -> &str {
        &self.ids[index]
    }

    /// Outgoing entries of a node, in edge insertion order.
    #[must_use]
    pub fn outgoing(&self, index: usize) -> &[Neighbor] {
        &self.outgoing[index]
    }

    /// Incoming entries of a node, in edge insertion order.
    #[must_use]
    pub fn incoming(&self, index: usize) -> &[Neighbor] {
        &self.incoming[index]
    }

    /// Successor indices of a node, in edge insertion order.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.outgoing[index].iter().map(|n| n.node)
    }

    /// Successor ids of a node, in edge insertion order.
    #[must_use]
    pub fn neighbor_ids(&self, index: usize) -> Vec<&str> {
        self.neighbors(index).map(|n| self.id(n)).collect()
    }

    /// Marks every node reachable from `start`.
    ///
    /// With `undirected` set, edges are followed in both directions.
    #[must_use]
    pub fn reachable_from(&self, start: usize, undirected: bool) -> Vec<bool> {
        let mut seen = vec![false; self.len()];
        let mut queue = VecDeque::new();
        seen[start] = true;
        queue.push_back(start);

        while let Some(node) = queue.pop_front() {
            let backward = if undirected {
                self.incoming[node].as_slice()
            } else {
                &[]
            };
            for next in self.outgoing[node].iter().chain(backward) {
                if !seen[next.node] {
                    seen[next.node] = true;
                    queue.push_back(next.node);
                }
            }
        }

        seen
    }

    /// Counts nodes reachable from `start` following edge direction.
    #[must_use]
    pub fn reachable_count(&self, start: usize) -> usize {
        self.reachable_from(start, false)
            .into_iter()
            .filter(|&r| r)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};
    use graphlab_common::Error;

    fn sample() -> Graph {
        Graph::from_undirected_edges(&[("A", "B", 1.0), ("A", "C", 1.0), ("B", "D", 1.0)])
    }

    #[test]
    fn test_neighbor_order_follows_edges() {
        let graph = sample();
        let index = AdjacencyIndex::build(&graph).unwrap();
        let a = index.index_of("A").unwrap();
        let b = index.index_of("B").unwrap();
        assert_eq!(index.neighbor_ids(a), vec!["B", "C"]);
        assert_eq!(index.neighbor_ids(b), vec!["A", "D"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("A"));
        graph.add_node(Node::new("A"));
        let err = AdjacencyIndex::build(&graph).unwrap_err();
        assert_eq!(
            err,
            Error::GraphValidation(GraphValidationError::DuplicateNode {
                id: "A".to_string()
            })
        );
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("A"));
        graph.edges.push(Edge::new("A", "Z", 1.0));
        let err = AdjacencyIndex::build(&graph).unwrap_err();
        assert!(matches!(
            err,
            Error::GraphValidation(GraphValidationError::DanglingEdge { ref missing, .. }) if missing == "Z"
        ));
    }

    #[test]
    fn test_reachability_respects_direction() {
        let graph = Graph::from_directed_edges(&[("A", "B", 1.0), ("C", "B", 1.0)]);
        let index = AdjacencyIndex::build(&graph).unwrap();
        let a = index.index_of("A").unwrap();
        assert_eq!(index.reachable_count(a), 2);
        assert!(index.reachable_from(a, true).iter().all(|&r| r));
    }

    #[test]
    fn test_resolve_missing() {
        let index = AdjacencyIndex::build(&sample()).unwrap();
        assert!(index.resolve("start", "A").is_ok());
        assert!(index.resolve("goal", "Q").unwrap_err().is_graph_validation());
    }
}
