//! Dijkstra and A* tracers.
//!
//! Both drive the same [`BestFirst`] search. A* differs only in its
//! heuristic, the labels it shows on nodes, and stopping when the goal is
//! popped.

use graphlab_common::Algorithm;
use graphlab_core::graph::AStarLabels;

use super::{Endpoints, StepRecorder, StepTracer, TraceOutcome, fmt_cost};
use crate::canonical::{BestFirst, GraphView};
use crate::moves::Move;

struct Lines {
    init: usize,
    settle: usize,
    relax: usize,
    exhausted: usize,
    goal: usize,
}

const DIJKSTRA_LINES: Lines = Lines {
    init: 1,
    settle: 4,
    relax: 6,
    exhausted: 7,
    goal: 4,
};

const ASTAR_LINES: Lines = Lines {
    init: 1,
    settle: 5,
    relax: 7,
    exhausted: 8,
    goal: 4,
};

pub(super) struct DijkstraTracer;

impl StepTracer for DijkstraTracer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dijkstra
    }

    fn run(&self, view: &GraphView, endpoints: Endpoints, rec: &mut StepRecorder) -> TraceOutcome {
        let search = BestFirst::dijkstra(view, endpoints.start);
        run_best_first(view, endpoints, search, rec, false)
    }
}

pub(super) struct AStarTracer;

impl StepTracer for AStarTracer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::AStar
    }

    fn run(&self, view: &GraphView, endpoints: Endpoints, rec: &mut StepRecorder) -> TraceOutcome {
        let goal = endpoints.goal.unwrap_or(endpoints.start);
        let search = BestFirst::astar(view, endpoints.start, goal);
        run_best_first(view, endpoints, search, rec, true)
    }
}

fn labels(search: &BestFirst, node: usize) -> AStarLabels {
    let g = search.distance(node);
    let h = search.heuristic(node);
    AStarLabels { f: g + h, g, h }
}

fn run_best_first(
    view: &GraphView,
    endpoints: Endpoints,
    mut search: BestFirst,
    rec: &mut StepRecorder,
    astar: bool,
) -> TraceOutcome {
    let lines = if astar { &ASTAR_LINES } else { &DIJKSTRA_LINES };
    let start = endpoints.start;

    rec.node_mut(start).distance = 0.0;
    if astar {
        rec.node_mut(start).astar = Some(labels(&search, start));
    }
    rec.emit(
        lines.init,
        format!(
            "Set the distance of {} to 0; every other node starts at infinity",
            view.id(start)
        ),
        view.ids(search.frontier()),
    );

    while let Some(entry) = search.settle() {
        let u = entry.node;
        rec.record_move(Move::node(view.id(u)));
        rec.clear_recent();
        rec.node_mut(u).visited = true;
        rec.set_current(Some(u));

        if astar && search.goal_reached() {
            let path = search.path_to(u).unwrap_or_default();
            rec.emit(
                lines.goal,
                format!(
                    "Pop goal {} with f = {}; path {} costs {}",
                    view.id(u),
                    fmt_cost(entry.f),
                    view.ids(path).join(" -> "),
                    fmt_cost(entry.g)
                ),
                view.ids(search.frontier()),
            );
            break;
        }

        let explanation = if astar {
            format!(
                "Close {} (f = {}, g = {}, h = {})",
                view.id(u),
                fmt_cost(entry.f),
                fmt_cost(entry.g),
                fmt_cost(entry.h)
            )
        } else {
            format!("Settle {} at distance {}", view.id(u), fmt_cost(entry.g))
        };
        rec.emit(lines.settle, explanation, view.ids(search.frontier()));

        for relaxed in search.relax(view, u) {
            let v = relaxed.node;
            rec.clear_recent();
            let node = rec.node_mut(v);
            node.distance = relaxed.distance;
            node.recently_updated = true;
            if astar {
                node.astar = Some(labels(&search, v));
            }
            rec.emit(
                lines.relax,
                format!(
                    "Relax {} -> {} (weight {}): distance of {} improves to {}",
                    view.id(u),
                    view.id(v),
                    fmt_cost(view.weight(relaxed.edge)),
                    view.id(v),
                    fmt_cost(relaxed.distance)
                ),
                view.ids(search.frontier()),
            );
        }
    }

    let goal = if astar { endpoints.goal } else { None };
    if !search.goal_reached() {
        rec.clear_recent();
        rec.set_current(None);
        let explanation = match goal {
            Some(g) => format!("Open set empty; {} is unreachable", view.id(g)),
            None => "Priority queue empty; every reachable node is settled".to_string(),
        };
        rec.emit(lines.exhausted, explanation, Vec::new());
    }

    let distances = (0..view.node_count())
        .map(|i| (view.id(i).to_string(), search.distance(i)))
        .collect();
    let path = goal
        .filter(|_| search.goal_reached())
        .and_then(|g| search.path_to(g))
        .map(|p| view.ids(p));
    TraceOutcome::ShortestPath {
        distances,
        goal: goal.map(|g| view.id(g).to_string()),
        path,
    }
}

#[cfg(test)]
mod tests {
    use super::super::{TraceOutcome, TraceParams, trace};
    use graphlab_common::{Algorithm, Error, GraphValidationError};
    use graphlab_core::graph::{Graph, Node};

    fn weighted() -> Graph {
        Graph::from_directed_edges(&[
            ("A", "B", 4.0),
            ("A", "C", 1.0),
            ("C", "B", 2.0),
            ("B", "D", 1.0),
        ])
    }

    #[test]
    fn test_dijkstra_distances() {
        let trace = trace(&weighted(), Algorithm::Dijkstra, &TraceParams::new("A")).unwrap();
        assert_eq!(trace.outcome.distance("A"), Some(0.0));
        assert_eq!(trace.outcome.distance("B"), Some(3.0));
        assert_eq!(trace.outcome.distance("C"), Some(1.0));
        assert_eq!(trace.outcome.distance("D"), Some(4.0));
    }

    #[test]
    fn test_dijkstra_marks_relaxations() {
        let trace = trace(&weighted(), Algorithm::Dijkstra, &TraceParams::new("A")).unwrap();
        let improved: Vec<_> = trace
            .steps
            .iter()
            .filter(|s| s.graph.nodes.iter().any(|n| n.recently_updated))
            .collect();
        // A->B, A->C, C->B, B->D
        assert_eq!(improved.len(), 4);
        for step in improved {
            assert_eq!(step.graph.nodes.iter().filter(|n| n.recently_updated).count(), 1);
        }
    }

    #[test]
    fn test_dijkstra_settle_order() {
        let trace = trace(&weighted(), Algorithm::Dijkstra, &TraceParams::new("A")).unwrap();
        let moves: Vec<String> = trace.canonical_moves.iter().map(ToString::to_string).collect();
        assert_eq!(moves, ["A", "C", "B", "D"]);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let graph = Graph::from_directed_edges(&[("A", "B", -1.0)]);
        let err = trace(&graph, Algorithm::Dijkstra, &TraceParams::new("A")).unwrap_err();
        assert!(matches!(
            err,
            Error::GraphValidation(GraphValidationError::NegativeWeight { .. })
        ));
    }

    fn grid() -> Graph {
        let mut graph = Graph::new();
        graph
            .add_node(Node::at("S", 0.0, 0.0))
            .add_node(Node::at("A", 3.0, 0.0))
            .add_node(Node::at("B", 0.0, 4.0))
            .add_node(Node::at("G", 3.0, 4.0));
        graph
            .add_edge("S", "A", 3.0)
            .add_edge("S", "B", 4.0)
            .add_edge("A", "G", 4.0)
            .add_edge("B", "G", 3.0);
        graph
    }

    #[test]
    fn test_astar_path() {
        let params = TraceParams::new("S").with_goal("G");
        let trace = trace(&grid(), Algorithm::AStar, &params).unwrap();
        match &trace.outcome {
            TraceOutcome::ShortestPath { goal, path, .. } => {
                assert_eq!(goal.as_deref(), Some("G"));
                // B wins the f = 7 tie against A on its smaller heuristic.
                assert_eq!(path.clone().unwrap(), ["S", "B", "G"]);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(trace.outcome.distance("G"), Some(7.0));
        let last = trace.last().unwrap();
        assert_eq!(last.pseudocode_line, 4);
        let g = last.graph.node("G").unwrap();
        assert!(g.visited);
        assert_eq!(g.astar.unwrap().h, 0.0);
    }

    #[test]
    fn test_astar_unreachable_goal() {
        let mut graph = grid();
        graph.add_node(Node::at("Z", 9.0, 9.0));
        let params = TraceParams::new("S").with_goal("Z");
        let trace = trace(&graph, Algorithm::AStar, &params).unwrap();
        assert_eq!(trace.last().unwrap().pseudocode_line, 8);
        assert_eq!(trace.outcome.distance("Z"), Some(f64::INFINITY));
    }
}
