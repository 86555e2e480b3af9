//! Depth-first and breadth-first traversal tracers.

use graphlab_common::Algorithm;

use super::{Endpoints, StepRecorder, StepTracer, TraceOutcome};
use crate::canonical::{BfsState, DfsState, GraphView};
use crate::moves::Move;

const DFS_INIT: usize = 1;
const DFS_VISIT: usize = 3;
const DFS_BACKTRACK: usize = 6;

const BFS_INIT: usize = 1;
const BFS_DEQUEUE: usize = 3;
const BFS_ENQUEUE: usize = 5;
const BFS_DONE: usize = 6;

pub(super) struct DfsTracer;

impl StepTracer for DfsTracer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dfs
    }

    fn run(&self, view: &GraphView, endpoints: Endpoints, rec: &mut StepRecorder) -> TraceOutcome {
        let start = endpoints.start;
        let mut dfs = DfsState::new(view, start);
        rec.emit(
            DFS_INIT,
            format!("Start a depth-first search from {}", view.id(start)),
            vec![view.id(start).to_string()],
        );

        let mut order = Vec::new();
        loop {
            let Some(&next) = dfs.eligible(view).first() else {
                break;
            };
            let parent = dfs.current();
            let mut stack = dfs.stack().to_vec();
            stack.push(next);
            let finished = dfs.visit(view, next);

            order.push(next);
            rec.record_move(Move::node(view.id(next)));
            rec.node_mut(next).visited = true;
            rec.set_current(Some(next));
            let explanation = match parent {
                Some(p) => format!("Visit {} from {}", view.id(next), view.id(p)),
                None => format!("Visit {}", view.id(next)),
            };
            rec.emit(DFS_VISIT, explanation, view.ids(stack.iter().copied()));

            for done in finished {
                stack.pop();
                rec.node_mut(done).backtracked = true;
                let back_to = stack.last().copied();
                rec.set_current(back_to);
                let explanation = match back_to {
                    Some(p) => format!(
                        "{} has no unvisited neighbors; backtrack to {}",
                        view.id(done),
                        view.id(p)
                    ),
                    None => format!("{} has no unvisited neighbors; search ends", view.id(done)),
                };
                rec.emit(DFS_BACKTRACK, explanation, view.ids(stack.iter().copied()));
            }
        }

        TraceOutcome::Traversal {
            order: view.ids(order),
        }
    }
}

pub(super) struct BfsTracer;

impl StepTracer for BfsTracer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bfs
    }

    fn run(&self, view: &GraphView, endpoints: Endpoints, rec: &mut StepRecorder) -> TraceOutcome {
        let start = endpoints.start;
        let mut bfs = BfsState::new(view, start);
        rec.node_mut(start).visited = true;
        rec.emit(
            BFS_INIT,
            format!("Mark {} visited and enqueue it", view.id(start)),
            view.ids(bfs.queue()),
        );

        let mut order = Vec::new();
        while let Some((u, enqueued)) = bfs.advance(view) {
            order.push(u);
            rec.record_move(Move::node(view.id(u)));
            rec.set_current(Some(u));
            for &v in &enqueued {
                rec.node_mut(v).visited = true;
            }
            let (line, explanation) = if enqueued.is_empty() {
                (
                    BFS_DEQUEUE,
                    format!("Dequeue {}; no unvisited neighbors", view.id(u)),
                )
            } else {
                (
                    BFS_ENQUEUE,
                    format!(
                        "Dequeue {}; enqueue {}",
                        view.id(u),
                        view.ids(enqueued.iter().copied()).join(", ")
                    ),
                )
            };
            rec.emit(line, explanation, view.ids(bfs.queue()));
        }

        rec.set_current(None);
        rec.emit(
            BFS_DONE,
            format!("Queue empty; visited {} of {} nodes", order.len(), view.node_count()),
            Vec::new(),
        );
        TraceOutcome::Traversal {
            order: view.ids(order),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{TraceParams, trace};
    use graphlab_common::Algorithm;
    use graphlab_core::graph::Graph;

    fn tree() -> Graph {
        Graph::from_undirected_edges(&[
            ("A", "B", 1.0),
            ("A", "C", 1.0),
            ("B", "D", 1.0),
            ("B", "E", 1.0),
            ("C", "F", 1.0),
            ("D", "G", 1.0),
        ])
    }

    #[test]
    fn test_dfs_order() {
        let trace = trace(&tree(), Algorithm::Dfs, &TraceParams::new("A")).unwrap();
        let order = trace.outcome.order().unwrap();
        assert_eq!(order, ["A", "B", "D", "G", "E", "C", "F"]);
    }

    #[test]
    fn test_dfs_backtracks_everything() {
        let trace = trace(&tree(), Algorithm::Dfs, &TraceParams::new("A")).unwrap();
        let last = trace.last().unwrap();
        assert!(last.graph.nodes.iter().all(|n| n.visited && n.backtracked));
        assert!(last.frontier.is_empty());
        assert!(last.graph.nodes.iter().all(|n| !n.current));
    }

    #[test]
    fn test_bfs_order() {
        let trace = trace(&tree(), Algorithm::Bfs, &TraceParams::new("A")).unwrap();
        let order = trace.outcome.order().unwrap();
        assert_eq!(order, ["A", "B", "C", "D", "E", "F", "G"]);
        assert_eq!(trace.steps[1].frontier, ["B", "C"]);
    }

    #[test]
    fn test_bfs_unreachable_stays_unvisited() {
        let mut graph = Graph::from_directed_edges(&[("A", "B", 1.0)]);
        graph.add_node(graphlab_core::graph::Node::new("Z"));
        let trace = trace(&graph, Algorithm::Bfs, &TraceParams::new("A")).unwrap();
        assert_eq!(trace.outcome.order().unwrap(), ["A", "B"]);
        assert!(!trace.last().unwrap().graph.nodes[2].visited);
    }

    #[test]
    fn test_single_node() {
        let mut graph = Graph::new();
        graph.add_node(graphlab_core::graph::Node::new("A"));
        let dfs = trace(&graph, Algorithm::Dfs, &TraceParams::new("A")).unwrap();
        assert_eq!(dfs.outcome.order().unwrap(), ["A"]);
        let bfs = trace(&graph, Algorithm::Bfs, &TraceParams::new("A")).unwrap();
        assert_eq!(bfs.outcome.order().unwrap(), ["A"]);
    }
}
