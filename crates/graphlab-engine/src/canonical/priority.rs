//! Priority ordering and best-first search state.
//!
//! `BinaryHeap` is a max-heap, so the `Ord` impls below are reversed:
//! the "greatest" entry is the one the algorithm pops next.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::GraphView;

/// A best-first queue entry, ordered by `f`, then `h`, then node index.
///
/// Dijkstra uses `h = 0`, which reduces the order to distance then node
/// insertion index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestFirstEntry {
    /// Priority `g + h`.
    pub f: f64,
    /// Heuristic part of the priority.
    pub h: f64,
    /// Path cost at push time.
    pub g: f64,
    /// Node insertion index.
    pub node: usize,
}

impl Eq for BestFirstEntry {}

impl Ord for BestFirstEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for BestFirstEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A Prim candidate edge, ordered by weight, then target index, then
/// push order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimEntry {
    /// Edge weight.
    pub weight: f64,
    /// Tree-side endpoint.
    pub source: usize,
    /// Endpoint outside the tree at push time.
    pub target: usize,
    /// Edge position in the graph.
    pub edge: usize,
    /// Push sequence number.
    pub seq: usize,
}

impl Eq for PrimEntry {}

impl Ord for PrimEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.target.cmp(&self.target))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for PrimEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Heap contents from next-to-pop to last.
pub(crate) fn in_pop_order<T: Ord + Copy>(heap: &BinaryHeap<T>) -> Vec<T> {
    let mut entries: Vec<T> = heap.iter().copied().collect();
    entries.sort_by(|a, b| b.cmp(a));
    entries
}

/// A distance improvement produced by relaxing one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relaxation {
    /// Node whose distance improved.
    pub node: usize,
    /// Settled node the improvement came through.
    pub via: usize,
    /// Edge position used.
    pub edge: usize,
    /// New path cost.
    pub distance: f64,
}

/// Dijkstra / A* search state.
#[derive(Debug, Clone)]
pub struct BestFirst {
    dist: Vec<f64>,
    settled: Vec<bool>,
    pred: Vec<Option<usize>>,
    heuristic: Vec<f64>,
    heap: BinaryHeap<BestFirstEntry>,
    goal: Option<usize>,
    goal_settled: bool,
}

impl BestFirst {
    /// Dijkstra from `start`.
    #[must_use]
    pub fn dijkstra(view: &GraphView, start: usize) -> Self {
        Self::with_heuristic(view.node_count(), start, vec![0.0; view.node_count()], None)
    }

    /// A* from `start` towards `goal` with the Euclidean heuristic.
    #[must_use]
    pub fn astar(view: &GraphView, start: usize, goal: usize) -> Self {
        Self::with_heuristic(view.node_count(), start, view.heuristic_to(goal), Some(goal))
    }

    fn with_heuristic(n: usize, start: usize, heuristic: Vec<f64>, goal: Option<usize>) -> Self {
        let mut dist = vec![f64::INFINITY; n];
        dist[start] = 0.0;
        let mut heap = BinaryHeap::new();
        heap.push(BestFirstEntry {
            f: heuristic[start],
            h: heuristic[start],
            g: 0.0,
            node: start,
        });
        Self {
            dist,
            settled: vec![false; n],
            pred: vec![None; n],
            heuristic,
            heap,
            goal,
            goal_settled: false,
        }
    }

    fn is_live(&self, entry: &BestFirstEntry) -> bool {
        !self.settled[entry.node] && entry.g <= self.dist[entry.node]
    }

    /// Returns the entry that will be settled next, skipping stale ones.
    #[must_use]
    pub fn peek(&self) -> Option<BestFirstEntry> {
        self.heap.iter().filter(|e| self.is_live(e)).max().copied()
    }

    /// Pops and settles the next node. Stale entries are discarded.
    pub fn settle(&mut self) -> Option<BestFirstEntry> {
        while let Some(entry) = self.heap.pop() {
            if !self.is_live(&entry) {
                continue;
            }
            self.settled[entry.node] = true;
            if Some(entry.node) == self.goal {
                self.goal_settled = true;
            }
            return Some(entry);
        }
        None
    }

    /// Relaxes every outgoing edge of the settled node `u`, in adjacency
    /// order, and returns the improvements made.
    pub fn relax(&mut self, view: &GraphView, u: usize) -> Vec<Relaxation> {
        let mut improved = Vec::new();
        for neighbor in view.index().outgoing(u) {
            let v = neighbor.node;
            if self.settled[v] {
                continue;
            }
            let candidate = self.dist[u] + view.weight(neighbor.edge);
            if candidate < self.dist[v] {
                self.dist[v] = candidate;
                self.pred[v] = Some(u);
                self.heap.push(BestFirstEntry {
                    f: candidate + self.heuristic[v],
                    h: self.heuristic[v],
                    g: candidate,
                    node: v,
                });
                improved.push(Relaxation {
                    node: v,
                    via: u,
                    edge: neighbor.edge,
                    distance: candidate,
                });
            }
        }
        improved
    }

    /// Returns true once the goal is settled or nothing live remains.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.goal_settled || self.peek().is_none()
    }

    /// Returns true if the goal has been settled.
    #[must_use]
    pub fn goal_reached(&self) -> bool {
        self.goal_settled
    }

    /// Live frontier nodes in pop order, without duplicates.
    #[must_use]
    pub fn frontier(&self) -> Vec<usize> {
        let mut nodes = Vec::new();
        for entry in in_pop_order(&self.heap) {
            if self.is_live(&entry) && !nodes.contains(&entry.node) {
                nodes.push(entry.node);
            }
        }
        nodes
    }

    /// Current best path cost of a node.
    #[must_use]
    pub fn distance(&self, node: usize) -> f64 {
        self.dist[node]
    }

    /// All best path costs, by node index.
    #[must_use]
    pub fn distances(&self) -> &[f64] {
        &self.dist
    }

    /// Heuristic value of a node.
    #[must_use]
    pub fn heuristic(&self, node: usize) -> f64 {
        self.heuristic[node]
    }

    /// Returns true if the node has been settled.
    #[must_use]
    pub fn is_settled(&self, node: usize) -> bool {
        self.settled[node]
    }

    /// Reconstructs the path from the start to `target`.
    #[must_use]
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        if self.dist[target].is_infinite() {
            return None;
        }
        let mut path = vec![target];
        let mut node = target;
        while let Some(prev) = self.pred[node] {
            path.push(prev);
            node = prev;
        }
        path.reverse();
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphlab_core::graph::Graph;

    #[test]
    fn test_tie_break_by_insertion_index() {
        let mut heap = BinaryHeap::new();
        for node in [3, 1, 2] {
            heap.push(BestFirstEntry {
                f: 5.0,
                h: 0.0,
                g: 5.0,
                node,
            });
        }
        heap.push(BestFirstEntry {
            f: 4.0,
            h: 0.0,
            g: 4.0,
            node: 9,
        });
        let order: Vec<_> = in_pop_order(&heap).iter().map(|e| e.node).collect();
        assert_eq!(order, vec![9, 1, 2, 3]);
    }

    #[test]
    fn test_astar_prefers_lower_h_on_equal_f() {
        let a = BestFirstEntry {
            f: 10.0,
            h: 4.0,
            g: 6.0,
            node: 0,
        };
        let b = BestFirstEntry {
            f: 10.0,
            h: 2.0,
            g: 8.0,
            node: 1,
        };
        assert!(b > a);
    }

    #[test]
    fn test_prim_tie_break_by_target() {
        let a = PrimEntry {
            weight: 1.0,
            source: 0,
            target: 4,
            edge: 0,
            seq: 0,
        };
        let b = PrimEntry {
            weight: 1.0,
            source: 2,
            target: 3,
            edge: 5,
            seq: 1,
        };
        assert!(b > a);
    }

    #[test]
    fn test_stale_entries_skipped() {
        // Direct A->C is expensive; going through B improves C.
        let graph =
            Graph::from_directed_edges(&[("A", "C", 10.0), ("A", "B", 1.0), ("B", "C", 1.0)]);
        let view = GraphView::new(&graph).unwrap();
        let mut search = BestFirst::dijkstra(&view, 0);

        let a = search.settle().unwrap();
        assert_eq!(a.node, 0);
        assert_eq!(search.relax(&view, 0).len(), 2);

        let b = search.settle().unwrap();
        assert_eq!(view.id(b.node), "B");
        let improved = search.relax(&view, b.node);
        assert_eq!(improved.len(), 1);
        assert_eq!(improved[0].distance, 2.0);

        let c = search.settle().unwrap();
        assert_eq!(c.g, 2.0);
        assert!(search.settle().is_none());
        assert!(search.is_finished());
        assert_eq!(search.path_to(c.node).unwrap(), vec![0, 2, 1]);
    }
}
