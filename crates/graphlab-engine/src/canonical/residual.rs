//! Residual network for augmenting-path maximum flow.
//!
//! Arc `2k` is the forward arc of stored edge `k` with the edge's
//! capacity; arc `2k + 1` is its reverse with capacity zero. Pushing `x`
//! units along an arc adds `x` to its flow and subtracts `x` from its
//! twin, so the residual capacity of either is `capacity - flow`.

use std::collections::VecDeque;

use smallvec::SmallVec;

use super::GraphView;

/// Smallest residual capacity treated as positive.
const EPSILON: f64 = 1e-9;

/// How augmenting paths are located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AugmentStrategy {
    /// Depth-first search in adjacency order (Ford-Fulkerson).
    DepthFirst,
    /// Breadth-first search, fewest edges first (Edmonds-Karp).
    BreadthFirst,
}

#[derive(Debug, Clone, Copy)]
struct Arc {
    from: usize,
    to: usize,
    capacity: f64,
    flow: f64,
}

/// Residual graph over a flow network.
#[derive(Debug, Clone)]
pub struct ResidualNetwork {
    arcs: Vec<Arc>,
    adjacency: Vec<SmallVec<[usize; 8]>>,
}

impl ResidualNetwork {
    /// Builds a zero-flow residual network from the stored edges.
    #[must_use]
    pub fn new(view: &GraphView) -> Self {
        let mut arcs = Vec::with_capacity(view.edge_count() * 2);
        let mut adjacency = vec![SmallVec::new(); view.node_count()];
        for edge in 0..view.edge_count() {
            let (u, v) = view.endpoints(edge);
            adjacency[u].push(arcs.len());
            arcs.push(Arc {
                from: u,
                to: v,
                capacity: view.weight(edge),
                flow: 0.0,
            });
            adjacency[v].push(arcs.len());
            arcs.push(Arc {
                from: v,
                to: u,
                capacity: 0.0,
                flow: 0.0,
            });
        }
        Self { arcs, adjacency }
    }

    /// Residual capacity of an arc.
    #[must_use]
    pub fn residual(&self, arc: usize) -> f64 {
        self.arcs[arc].capacity - self.arcs[arc].flow
    }

    fn has_room(&self, arc: usize) -> bool {
        self.residual(arc) > EPSILON
    }

    /// The first arc from `u` to `v`, in adjacency order, with positive
    /// residual capacity. Path search always discovers `v` from `u`
    /// through this arc.
    #[must_use]
    pub fn find_arc(&self, u: usize, v: usize) -> Option<usize> {
        self.adjacency[u]
            .iter()
            .copied()
            .find(|&a| self.arcs[a].to == v && self.has_room(a))
    }

    /// Finds an augmenting path from `source` to `sink`, as arcs.
    #[must_use]
    pub fn find_path(
        &self,
        strategy: AugmentStrategy,
        source: usize,
        sink: usize,
    ) -> Option<Vec<usize>> {
        match strategy {
            AugmentStrategy::BreadthFirst => self.bfs_path(source, sink),
            AugmentStrategy::DepthFirst => self.dfs_path(source, sink),
        }
    }

    fn bfs_path(&self, source: usize, sink: usize) -> Option<Vec<usize>> {
        if source == sink {
            return None;
        }
        let mut parent: Vec<Option<usize>> = vec![None; self.adjacency.len()];
        let mut seen = vec![false; self.adjacency.len()];
        let mut queue = VecDeque::from([source]);
        seen[source] = true;

        while let Some(u) = queue.pop_front() {
            for &arc in &self.adjacency[u] {
                let v = self.arcs[arc].to;
                if seen[v] || !self.has_room(arc) {
                    continue;
                }
                seen[v] = true;
                parent[v] = Some(arc);
                if v == sink {
                    return Some(self.unwind(&parent, sink));
                }
                queue.push_back(v);
            }
        }
        None
    }

    fn dfs_path(&self, source: usize, sink: usize) -> Option<Vec<usize>> {
        if source == sink {
            return None;
        }
        let mut parent: Vec<Option<usize>> = vec![None; self.adjacency.len()];
        let mut seen = vec![false; self.adjacency.len()];
        // (node, position in its arc list)
        let mut stack = vec![(source, 0usize)];
        seen[source] = true;

        while let Some(frame) = stack.last_mut() {
            let (u, cursor) = *frame;
            let Some(&arc) = self.adjacency[u].get(cursor) else {
                stack.pop();
                continue;
            };
            frame.1 += 1;
            let v = self.arcs[arc].to;
            if seen[v] || !self.has_room(arc) {
                continue;
            }
            seen[v] = true;
            parent[v] = Some(arc);
            if v == sink {
                return Some(self.unwind(&parent, sink));
            }
            stack.push((v, 0));
        }
        None
    }

    fn unwind(&self, parent: &[Option<usize>], sink: usize) -> Vec<usize> {
        let mut path = Vec::new();
        let mut node = sink;
        while let Some(arc) = parent[node] {
            path.push(arc);
            node = self.arcs[arc].from;
        }
        path.reverse();
        path
    }

    /// Number of edges on a shortest augmenting path, if any.
    #[must_use]
    pub fn shortest_path_len(&self, source: usize, sink: usize) -> Option<usize> {
        self.bfs_path(source, sink).map(|p| p.len())
    }

    /// Resolves a node sequence into arcs, failing at the first hop with
    /// no residual capacity. The error carries the failing hop.
    pub fn arcs_for_nodes(&self, nodes: &[usize]) -> Result<Vec<usize>, (usize, usize)> {
        nodes
            .windows(2)
            .map(|hop| self.find_arc(hop[0], hop[1]).ok_or((hop[0], hop[1])))
            .collect()
    }

    /// Node sequence of an arc path, starting at its first tail.
    #[must_use]
    pub fn path_nodes(&self, path: &[usize]) -> Vec<usize> {
        let mut nodes = Vec::with_capacity(path.len() + 1);
        if let Some(&first) = path.first() {
            nodes.push(self.arcs[first].from);
        }
        nodes.extend(path.iter().map(|&a| self.arcs[a].to));
        nodes
    }

    /// Minimum residual capacity along a path.
    #[must_use]
    pub fn bottleneck(&self, path: &[usize]) -> f64 {
        path.iter()
            .map(|&a| self.residual(a))
            .fold(f64::INFINITY, f64::min)
    }

    /// Pushes `amount` units along every arc of `path`.
    pub fn augment(&mut self, path: &[usize], amount: f64) {
        for &arc in path {
            self.arcs[arc].flow += amount;
            self.arcs[arc ^ 1].flow -= amount;
        }
    }

    /// Flow carried by stored edge `edge`.
    #[must_use]
    pub fn edge_flow(&self, edge: usize) -> f64 {
        self.arcs[2 * edge].flow
    }

    /// Net flow out of `source` over the stored edges.
    #[must_use]
    pub fn flow_value(&self, source: usize) -> f64 {
        self.outflow(source) - self.inflow(source)
    }

    /// Total flow on stored edges leaving `node`.
    #[must_use]
    pub fn outflow(&self, node: usize) -> f64 {
        self.arcs
            .iter()
            .step_by(2)
            .filter(|a| a.from == node)
            .map(|a| a.flow)
            .sum()
    }

    /// Total flow on stored edges entering `node`.
    #[must_use]
    pub fn inflow(&self, node: usize) -> f64 {
        self.arcs
            .iter()
            .step_by(2)
            .filter(|a| a.to == node)
            .map(|a| a.flow)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphlab_core::graph::Graph;

    fn network() -> Graph {
        Graph::from_directed_edges(&[
            ("S", "A", 16.0),
            ("S", "C", 13.0),
            ("A", "B", 12.0),
            ("B", "T", 20.0),
            ("C", "A", 4.0),
            ("C", "T", 14.0),
        ])
    }

    fn run(strategy: AugmentStrategy) -> (ResidualNetwork, usize) {
        let graph = network();
        let view = GraphView::new(&graph).unwrap();
        let s = view.index().index_of("S").unwrap();
        let t = view.index().index_of("T").unwrap();
        let mut net = ResidualNetwork::new(&view);
        let mut rounds = 0;
        while let Some(path) = net.find_path(strategy, s, t) {
            let b = net.bottleneck(&path);
            net.augment(&path, b);
            rounds += 1;
        }
        (net, rounds)
    }

    #[test]
    fn test_bfs_max_flow() {
        let (net, rounds) = run(AugmentStrategy::BreadthFirst);
        assert_eq!(net.flow_value(0), 25.0);
        assert_eq!(rounds, 2);
    }

    #[test]
    fn test_dfs_max_flow() {
        let (net, _) = run(AugmentStrategy::DepthFirst);
        assert_eq!(net.flow_value(0), 25.0);
        for edge in 0..6 {
            assert!(net.edge_flow(edge) >= 0.0);
        }
    }

    #[test]
    fn test_arcs_for_nodes() {
        let graph = network();
        let view = GraphView::new(&graph).unwrap();
        let net = ResidualNetwork::new(&view);
        let nodes: Vec<_> = ["S", "A", "B", "T"]
            .iter()
            .map(|id| view.index().index_of(id).unwrap())
            .collect();
        let arcs = net.arcs_for_nodes(&nodes).unwrap();
        assert_eq!(net.bottleneck(&arcs), 12.0);
        assert_eq!(net.path_nodes(&arcs), nodes);

        // No residual capacity from B back to A before any flow moves.
        let b = nodes[2];
        let a = nodes[1];
        assert_eq!(net.arcs_for_nodes(&[b, a]), Err((b, a)));
    }
}
