//! Minimum spanning tree state (Kruskal and Prim).

use std::collections::BinaryHeap;

use graphlab_common::utils::hash::FxHashSet;

use super::priority::in_pop_order;
use super::{GraphView, PrimEntry, UnionFind};

/// Edges of the undirected view: for every unordered endpoint pair only
/// the first stored edge is kept. Self-loops are dropped.
#[must_use]
pub fn undirected_edges(view: &GraphView) -> Vec<usize> {
    let mut seen = FxHashSet::default();
    (0..view.edge_count())
        .filter(|&edge| {
            let (a, b) = view.endpoints(edge);
            a != b && seen.insert((a.min(b), a.max(b)))
        })
        .collect()
}

/// Undirected edges sorted by weight; equal weights keep insertion order.
#[must_use]
pub fn kruskal_order(view: &GraphView) -> Vec<usize> {
    let mut edges = undirected_edges(view);
    edges.sort_by(|&a, &b| view.weight(a).total_cmp(&view.weight(b)));
    edges
}

/// Kruskal scan state.
#[derive(Debug, Clone)]
pub struct KruskalState {
    order: Vec<usize>,
    cursor: usize,
    components: UnionFind,
    accepted: usize,
    target: usize,
}

/// Outcome of considering one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Consideration {
    /// Edge position in the graph.
    pub edge: usize,
    /// Whether the edge joined two components.
    pub accepted: bool,
}

impl KruskalState {
    /// Sorts the edges and creates one component per node.
    #[must_use]
    pub fn new(view: &GraphView) -> Self {
        let n = view.node_count();
        Self {
            order: kruskal_order(view),
            cursor: 0,
            components: UnionFind::new(n),
            accepted: 0,
            target: n.saturating_sub(1),
        }
    }

    /// Considers the next edge in sorted order.
    pub fn consider(&mut self, view: &GraphView) -> Option<Consideration> {
        if self.is_finished() {
            return None;
        }
        let edge = self.order[self.cursor];
        self.cursor += 1;
        let (a, b) = view.endpoints(edge);
        let accepted = self.components.union(a, b);
        if accepted {
            self.accepted += 1;
        }
        Some(Consideration { edge, accepted })
    }

    /// Skips edges that would close a cycle, so the cursor rests on the
    /// next edge Kruskal will accept.
    pub fn skip_rejected(&mut self, view: &GraphView) {
        while !self.is_finished() {
            let (a, b) = view.endpoints(self.order[self.cursor]);
            if !self.components.connected(a, b) {
                break;
            }
            self.cursor += 1;
        }
    }

    /// The edge under the cursor.
    #[must_use]
    pub fn peek(&self) -> Option<usize> {
        if self.is_finished() {
            None
        } else {
            Some(self.order[self.cursor])
        }
    }

    /// Edges not considered yet, in sorted order.
    #[must_use]
    pub fn remaining(&self) -> &[usize] {
        &self.order[self.cursor.min(self.order.len())..]
    }

    /// Returns true if the two nodes are already in one component.
    #[must_use]
    pub fn connected(&self, a: usize, b: usize) -> bool {
        self.components.connected(a, b)
    }

    /// Component representative of a node.
    #[must_use]
    pub fn component(&self, node: usize) -> usize {
        self.components.root(node)
    }

    /// Number of accepted edges.
    #[must_use]
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// True once `n - 1` edges are accepted or the edges run out.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.accepted >= self.target || self.cursor >= self.order.len()
    }
}

/// Prim growth state.
#[derive(Debug, Clone)]
pub struct PrimState {
    in_tree: Vec<bool>,
    heap: BinaryHeap<PrimEntry>,
    seq: usize,
}

impl PrimState {
    /// Starts a tree containing only `start`.
    #[must_use]
    pub fn new(view: &GraphView, start: usize) -> Self {
        let mut state = Self {
            in_tree: vec![false; view.node_count()],
            heap: BinaryHeap::new(),
            seq: 0,
        };
        state.in_tree[start] = true;
        state.push_edges(view, start);
        state
    }

    fn push_edges(&mut self, view: &GraphView, node: usize) {
        for neighbor in view.index().outgoing(node) {
            if self.in_tree[neighbor.node] {
                continue;
            }
            self.heap.push(PrimEntry {
                weight: view.weight(neighbor.edge),
                source: node,
                target: neighbor.node,
                edge: neighbor.edge,
                seq: self.seq,
            });
            self.seq += 1;
        }
    }

    /// The candidate edge that will be admitted next.
    #[must_use]
    pub fn peek(&self) -> Option<PrimEntry> {
        self.heap
            .iter()
            .filter(|e| !self.in_tree[e.target])
            .max()
            .copied()
    }

    /// Admits the lightest crossing edge and its outside endpoint.
    /// Entries whose target already joined the tree are discarded.
    pub fn admit(&mut self, view: &GraphView) -> Option<PrimEntry> {
        while let Some(entry) = self.heap.pop() {
            if self.in_tree[entry.target] {
                continue;
            }
            self.in_tree[entry.target] = true;
            self.push_edges(view, entry.target);
            return Some(entry);
        }
        None
    }

    /// Returns true if the node is in the tree.
    #[must_use]
    pub fn in_tree(&self, node: usize) -> bool {
        self.in_tree[node]
    }

    /// Live candidate edges in pop order.
    #[must_use]
    pub fn candidates(&self) -> Vec<PrimEntry> {
        in_pop_order(&self.heap)
            .into_iter()
            .filter(|e| !self.in_tree[e.target])
            .collect()
    }

    /// True once no crossing edge remains.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.peek().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphlab_core::graph::Graph;

    fn square() -> Graph {
        Graph::from_undirected_edges(&[
            ("A", "B", 2.0),
            ("B", "C", 1.0),
            ("C", "D", 2.0),
            ("D", "A", 3.0),
            ("A", "C", 1.0),
        ])
    }

    #[test]
    fn test_undirected_view_keeps_first_direction() {
        let view = GraphView::new(&square()).unwrap();
        let edges = undirected_edges(&view);
        assert_eq!(edges, vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_kruskal_order_is_stable() {
        let view = GraphView::new(&square()).unwrap();
        let ids: Vec<_> = kruskal_order(&view)
            .into_iter()
            .map(|e| view.edge_id(e))
            .collect();
        assert_eq!(ids, vec!["B->C", "A->C", "A->B", "C->D", "D->A"]);
    }

    #[test]
    fn test_kruskal_accepts_and_rejects() {
        let view = GraphView::new(&square()).unwrap();
        let mut kruskal = KruskalState::new(&view);
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();
        while let Some(c) = kruskal.consider(&view) {
            if c.accepted {
                accepted.push(view.edge_id(c.edge));
            } else {
                rejected.push(view.edge_id(c.edge));
            }
        }
        assert_eq!(accepted, vec!["B->C", "A->C", "C->D"]);
        assert_eq!(rejected, vec!["A->B"]);
        assert!(kruskal.is_finished());
    }

    #[test]
    fn test_kruskal_skip_rejected() {
        let view = GraphView::new(&square()).unwrap();
        let mut kruskal = KruskalState::new(&view);
        kruskal.consider(&view);
        kruskal.consider(&view);
        kruskal.skip_rejected(&view);
        assert_eq!(kruskal.peek().map(|e| view.edge_id(e)).as_deref(), Some("C->D"));
    }

    #[test]
    fn test_prim_growth() {
        let view = GraphView::new(&square()).unwrap();
        let mut prim = PrimState::new(&view, 0);
        let mut admitted = Vec::new();
        while let Some(entry) = prim.admit(&view) {
            admitted.push(view.edge_id(entry.edge));
        }
        assert_eq!(admitted, vec!["A->C", "C->B", "C->D"]);
        assert!(prim.is_finished());
    }

    #[test]
    fn test_prim_candidates_ordered() {
        let view = GraphView::new(&square()).unwrap();
        let prim = PrimState::new(&view, 0);
        let ids: Vec<_> = prim
            .candidates()
            .into_iter()
            .map(|e| view.edge_id(e.edge))
            .collect();
        assert_eq!(ids, vec!["A->C", "A->B", "A->D"]);
    }
}
