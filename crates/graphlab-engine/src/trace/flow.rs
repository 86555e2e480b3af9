//! Ford-Fulkerson and Edmonds-Karp tracers.
//!
//! One step per augmentation. The `start` parameter is the source and
//! the `goal` parameter the sink.

use graphlab_common::Algorithm;

use super::{Endpoints, StepRecorder, StepTracer, TraceOutcome, fmt_cost};
use crate::canonical::{AugmentStrategy, GraphView, ResidualNetwork};
use crate::moves::Move;

const FLOW_INIT: usize = 1;
const FLOW_AUGMENT: usize = 4;
const FLOW_DONE: usize = 5;

pub(super) struct FordFulkersonTracer;

impl StepTracer for FordFulkersonTracer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::FordFulkerson
    }

    fn run(&self, view: &GraphView, endpoints: Endpoints, rec: &mut StepRecorder) -> TraceOutcome {
        run_flow(view, endpoints, rec, AugmentStrategy::DepthFirst)
    }
}

pub(super) struct EdmondsKarpTracer;

impl StepTracer for EdmondsKarpTracer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::EdmondsKarp
    }

    fn run(&self, view: &GraphView, endpoints: Endpoints, rec: &mut StepRecorder) -> TraceOutcome {
        run_flow(view, endpoints, rec, AugmentStrategy::BreadthFirst)
    }
}

fn run_flow(
    view: &GraphView,
    endpoints: Endpoints,
    rec: &mut StepRecorder,
    strategy: AugmentStrategy,
) -> TraceOutcome {
    let source = endpoints.start;
    let sink = endpoints.goal.unwrap_or(source);
    let mut network = ResidualNetwork::new(view);
    let search = match strategy {
        AugmentStrategy::DepthFirst => "depth-first",
        AugmentStrategy::BreadthFirst => "breadth-first",
    };

    rec.emit(
        FLOW_INIT,
        format!(
            "Every edge starts with zero flow; search {} -> {} paths {search}",
            view.id(source),
            view.id(sink)
        ),
        Vec::new(),
    );

    while let Some(path) = network.find_path(strategy, source, sink) {
        let amount = network.bottleneck(&path);
        network.augment(&path, amount);

        for &arc in &path {
            let edge = arc / 2;
            rec.edge_mut(edge).flow = network.edge_flow(edge);
        }
        let nodes = view.ids(network.path_nodes(&path));
        for node in 0..view.node_count() {
            rec.node_mut(node).visited = false;
        }
        for &node in &network.path_nodes(&path) {
            rec.node_mut(node).visited = true;
        }
        rec.record_move(Move::path(nodes.iter().cloned()));
        rec.emit(
            FLOW_AUGMENT,
            format!(
                "Augment {} by {}; total flow is now {}",
                nodes.join(" -> "),
                fmt_cost(amount),
                fmt_cost(network.flow_value(source))
            ),
            nodes,
        );
    }

    for node in 0..view.node_count() {
        rec.node_mut(node).visited = false;
    }
    let value = network.flow_value(source);
    rec.emit(
        FLOW_DONE,
        format!("No augmenting path remains; maximum flow is {}", fmt_cost(value)),
        Vec::new(),
    );

    TraceOutcome::MaxFlow {
        value,
        edge_flows: (0..view.edge_count())
            .map(|edge| (view.edge_id(edge), network.edge_flow(edge)))
            .collect(),
    }
}
