//! Kruskal and Prim tracers.

use graphlab_common::Algorithm;

use super::{Endpoints, StepRecorder, StepTracer, TraceOutcome, fmt_cost};
use crate::canonical::{GraphView, KruskalState, PrimState};
use crate::moves::Move;

const KRUSKAL_INIT: usize = 1;
const KRUSKAL_ACCEPT: usize = 5;
const KRUSKAL_REJECT: usize = 6;
const KRUSKAL_DONE: usize = 7;

const PRIM_INIT: usize = 1;
const PRIM_ADMIT: usize = 5;
const PRIM_DONE: usize = 7;

fn completion(view: &GraphView, accepted: usize, total: f64) -> String {
    let kind = if accepted + 1 == view.node_count() {
        "Spanning tree"
    } else {
        "Spanning forest"
    };
    format!("{kind} complete: {accepted} edges, total weight {}", fmt_cost(total))
}

pub(super) struct KruskalTracer;

impl StepTracer for KruskalTracer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Kruskal
    }

    fn run(&self, view: &GraphView, _endpoints: Endpoints, rec: &mut StepRecorder) -> TraceOutcome {
        let mut kruskal = KruskalState::new(view);
        let remaining = |k: &KruskalState| -> Vec<String> {
            k.remaining().iter().map(|&e| view.edge_id(e)).collect()
        };
        for node in 0..view.node_count() {
            rec.node_mut(node).component = Some(node);
        }
        rec.emit(
            KRUSKAL_INIT,
            format!(
                "Sort {} edges by weight; every node starts in its own component",
                kruskal.remaining().len()
            ),
            remaining(&kruskal),
        );

        let mut tree = Vec::new();
        let mut total = 0.0;
        while let Some(considered) = kruskal.consider(view) {
            let edge = considered.edge;
            let (a, b) = view.endpoints(edge);
            let weight = view.weight(edge);
            if considered.accepted {
                tree.push(view.edge_id(edge));
                total += weight;
                rec.edge_mut(edge).selected = true;
                rec.node_mut(a).visited = true;
                rec.node_mut(b).visited = true;
                for node in 0..view.node_count() {
                    rec.node_mut(node).component = Some(kruskal.component(node));
                }
                rec.record_move(Move::edge(view.id(a), view.id(b)));
                rec.emit(
                    KRUSKAL_ACCEPT,
                    format!(
                        "Add {}-{} (weight {}): it joins two components",
                        view.id(a),
                        view.id(b),
                        fmt_cost(weight)
                    ),
                    remaining(&kruskal),
                );
            } else {
                rec.emit(
                    KRUSKAL_REJECT,
                    format!(
                        "Skip {}-{} (weight {}): {} and {} are already connected",
                        view.id(a),
                        view.id(b),
                        fmt_cost(weight),
                        view.id(a),
                        view.id(b)
                    ),
                    remaining(&kruskal),
                );
            }
        }

        rec.emit(KRUSKAL_DONE, completion(view, tree.len(), total), Vec::new());
        TraceOutcome::SpanningTree {
            edges: tree,
            total_weight: total,
        }
    }
}

pub(super) struct PrimTracer;

impl StepTracer for PrimTracer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Prim
    }

    fn run(&self, view: &GraphView, endpoints: Endpoints, rec: &mut StepRecorder) -> TraceOutcome {
        let start = endpoints.start;
        let mut prim = PrimState::new(view, start);
        let candidates = |p: &PrimState| -> Vec<String> {
            p.candidates().iter().map(|e| view.edge_id(e.edge)).collect()
        };
        rec.node_mut(start).visited = true;
        rec.set_current(Some(start));
        rec.emit(
            PRIM_INIT,
            format!("Start the tree at {} and queue its edges", view.id(start)),
            candidates(&prim),
        );

        let mut tree = Vec::new();
        let mut total = 0.0;
        while let Some(entry) = prim.admit(view) {
            tree.push(view.edge_id(entry.edge));
            total += entry.weight;
            rec.edge_mut(entry.edge).selected = true;
            rec.node_mut(entry.target).visited = true;
            rec.set_current(Some(entry.target));
            rec.record_move(Move::edge(view.id(entry.source), view.id(entry.target)));
            rec.emit(
                PRIM_ADMIT,
                format!(
                    "Add {} -> {} (weight {}); {} joins the tree",
                    view.id(entry.source),
                    view.id(entry.target),
                    fmt_cost(entry.weight),
                    view.id(entry.target)
                ),
                candidates(&prim),
            );
        }

        rec.set_current(None);
        rec.emit(PRIM_DONE, completion(view, tree.len(), total), Vec::new());
        TraceOutcome::SpanningTree {
            edges: tree,
            total_weight: total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{TraceParams, trace};
    use graphlab_common::Algorithm;
    use graphlab_core::graph::Graph;

    fn square() -> Graph {
        Graph::from_undirected_edges(&[
            ("A", "B", 1.0),
            ("B", "C", 2.0),
            ("C", "D", 3.0),
            ("D", "A", 4.0),
            ("A", "C", 5.0),
        ])
    }

    #[test]
    fn test_kruskal_tree() {
        let trace = trace(&square(), Algorithm::Kruskal, &TraceParams::new("A")).unwrap();
        assert_eq!(trace.outcome.total_weight(), Some(6.0));
        assert_eq!(trace.canonical_moves.len(), 3);
        let last = trace.last().unwrap();
        let components: Vec<_> = last.graph.nodes.iter().map(|n| n.component).collect();
        assert!(components.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_kruskal_stops_at_n_minus_one() {
        let trace = trace(&square(), Algorithm::Kruskal, &TraceParams::new("A")).unwrap();
        // init + three accepts + done; the two heavy edges are never reached
        assert_eq!(trace.len(), 5);
    }

    #[test]
    fn test_kruskal_reject_step() {
        let graph = Graph::from_undirected_edges(&[
            ("A", "B", 1.0),
            ("B", "C", 1.0),
            ("A", "C", 2.0),
            ("C", "D", 3.0),
        ]);
        let trace = trace(&graph, Algorithm::Kruskal, &TraceParams::new("A")).unwrap();
        let rejected: Vec<_> = trace.steps.iter().filter(|s| s.pseudocode_line == 6).collect();
        assert_eq!(rejected.len(), 1);
        assert!(rejected[0].explanation.contains("A-C"));
        assert_eq!(trace.outcome.total_weight(), Some(5.0));
    }

    #[test]
    fn test_prim_matches_kruskal() {
        let prim = trace(&square(), Algorithm::Prim, &TraceParams::new("C")).unwrap();
        assert_eq!(prim.outcome.total_weight(), Some(6.0));
        let last = prim.last().unwrap();
        assert!(last.graph.nodes.iter().all(|n| n.visited));
        assert_eq!(last.graph.edges.iter().filter(|e| e.selected).count(), 3);
    }

    #[test]
    fn test_forest_on_disconnected_graph() {
        let graph = Graph::from_undirected_edges(&[("A", "B", 1.0), ("C", "D", 2.0)]);
        let trace = trace(&graph, Algorithm::Kruskal, &TraceParams::new("A")).unwrap();
        assert_eq!(trace.outcome.total_weight(), Some(3.0));
        assert!(trace.last().unwrap().explanation.starts_with("Spanning forest"));
    }
}
