//! Step trace generation.
//!
//! [`trace`] runs one algorithm to completion on a private copy of the
//! graph and returns every intermediate state as an immutable [`Step`].
//! Each step owns a deep copy of the graph, so scrubbing back and forth
//! through a trace can never corrupt an earlier frame.
//!
//! ## Variants
//!
//! Every [`Algorithm`] has one [`StepTracer`] implementation:
//!
//! - traversal - DFS and BFS
//! - shortest paths - Dijkstra and A*
//! - spanning trees - Kruskal and Prim
//! - maximum flow - Ford-Fulkerson and Edmonds-Karp

mod flow;
mod pseudocode;
mod recorder;
mod shortest_path;
mod spanning;
mod traversal;

pub use pseudocode::pseudocode;
pub use recorder::StepRecorder;

use graphlab_common::Algorithm;
use graphlab_common::utils::error::{GraphValidationError, Result};
use graphlab_core::graph::Graph;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::canonical::GraphView;
use crate::moves::Move;

/// One immutable frame of a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Graph state at this instant.
    pub graph: Graph,
    /// Natural-language explanation of what just happened.
    pub explanation: String,
    /// Index into the algorithm's [`pseudocode`].
    pub pseudocode_line: usize,
    /// Candidate set: queue, stack, priority order, or augmenting path.
    pub frontier: Vec<String>,
}

/// Start and goal parameters for a trace or a play session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceParams {
    /// Start node (flow source for flow variants).
    pub start: String,
    /// Goal node for A*, sink for flow variants.
    #[serde(default)]
    pub goal: Option<String>,
}

impl TraceParams {
    /// Parameters with only a start node.
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: None,
        }
    }

    /// Sets the goal (or sink) node.
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }
}

/// Parameters resolved to node indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    /// Start (or source) index.
    pub start: usize,
    /// Goal (or sink) index, for variants that need one.
    pub goal: Option<usize>,
}

/// Validates `graph` for `algorithm` and resolves the parameters.
pub(crate) fn prepare(
    graph: &Graph,
    algorithm: Algorithm,
    params: &TraceParams,
) -> Result<(GraphView, Endpoints)> {
    let view = GraphView::new(graph)?;
    let start = view.index().resolve("start", &params.start)?;
    let goal = if algorithm.requires_goal() {
        let role = if algorithm.is_flow() { "sink" } else { "goal" };
        let id = params
            .goal
            .as_deref()
            .ok_or_else(|| GraphValidationError::MissingNode {
                role,
                id: String::new(),
            })?;
        Some(view.index().resolve(role, id)?)
    } else {
        None
    };
    if matches!(algorithm, Algorithm::Dijkstra | Algorithm::AStar) || algorithm.is_flow() {
        view.ensure_non_negative()?;
    }
    Ok((view, Endpoints { start, goal }))
}

/// What a finished trace computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TraceOutcome {
    /// Visit order of a traversal.
    Traversal {
        /// Node ids in visit order.
        order: Vec<String>,
    },
    /// Final labels of a shortest-path search.
    ShortestPath {
        /// `(id, distance)` for every node; unreached nodes are infinite.
        distances: Vec<(String, f64)>,
        /// Goal node, for A*.
        goal: Option<String>,
        /// Path to the goal, if it was reached.
        path: Option<Vec<String>>,
    },
    /// Accepted spanning tree (or forest) edges.
    SpanningTree {
        /// Edge ids in acceptance order.
        edges: Vec<String>,
        /// Sum of accepted edge weights.
        total_weight: f64,
    },
    /// Maximum flow result.
    MaxFlow {
        /// Total flow leaving the source.
        value: f64,
        /// `(edge id, flow)` for every stored edge.
        edge_flows: Vec<(String, f64)>,
    },
}

impl TraceOutcome {
    /// Visit order, for traversals.
    #[must_use]
    pub fn order(&self) -> Option<&[String]> {
        match self {
            TraceOutcome::Traversal { order } => Some(order),
            _ => None,
        }
    }

    /// Final distance of a node, for shortest-path searches.
    #[must_use]
    pub fn distance(&self, id: &str) -> Option<f64> {
        match self {
            TraceOutcome::ShortestPath { distances, .. } => distances
                .iter()
                .find(|(node, _)| node == id)
                .map(|&(_, d)| d),
            _ => None,
        }
    }

    /// Total weight, for spanning trees.
    #[must_use]
    pub fn total_weight(&self) -> Option<f64> {
        match self {
            TraceOutcome::SpanningTree { total_weight, .. } => Some(*total_weight),
            _ => None,
        }
    }

    /// Flow value, for maximum flow.
    #[must_use]
    pub fn max_flow(&self) -> Option<f64> {
        match self {
            TraceOutcome::MaxFlow { value, .. } => Some(*value),
            _ => None,
        }
    }
}

/// A complete step trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    /// The traced algorithm.
    pub algorithm: Algorithm,
    /// Frames in execution order.
    pub steps: Vec<Step>,
    /// Final result.
    pub outcome: TraceOutcome,
    /// The moves the algorithm made, in the notation the validator grades.
    pub canonical_moves: Vec<Move>,
}

impl Trace {
    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the trace has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step at `index`.
    #[must_use]
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Final step.
    #[must_use]
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Pseudocode the steps point into.
    #[must_use]
    pub fn pseudocode(&self) -> &'static [&'static str] {
        pseudocode(self.algorithm)
    }

    /// Consumes the trace, keeping only the steps.
    #[must_use]
    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

/// The contract every algorithm variant implements.
pub trait StepTracer: Sync {
    /// The variant implemented.
    fn algorithm(&self) -> Algorithm;

    /// Pseudocode the emitted steps index into.
    fn pseudocode(&self) -> &'static [&'static str] {
        pseudocode(self.algorithm())
    }

    /// Runs to completion, emitting steps into `recorder`.
    fn run(
        &self,
        view: &GraphView,
        endpoints: Endpoints,
        recorder: &mut StepRecorder,
    ) -> TraceOutcome;
}

/// Returns the tracer for a variant.
#[must_use]
pub fn tracer_for(algorithm: Algorithm) -> &'static dyn StepTracer {
    match algorithm {
        Algorithm::Dfs => &traversal::DfsTracer,
        Algorithm::Bfs => &traversal::BfsTracer,
        Algorithm::Dijkstra => &shortest_path::DijkstraTracer,
        Algorithm::AStar => &shortest_path::AStarTracer,
        Algorithm::Kruskal => &spanning::KruskalTracer,
        Algorithm::Prim => &spanning::PrimTracer,
        Algorithm::FordFulkerson => &flow::FordFulkersonTracer,
        Algorithm::EdmondsKarp => &flow::EdmondsKarpTracer,
    }
}

/// Traces `algorithm` on `graph`.
///
/// # Errors
///
/// Returns a graph validation error if the graph is malformed, the start
/// node (or the goal/sink where required) is missing, or a shortest-path
/// or flow variant meets a negative weight.
pub fn trace(graph: &Graph, algorithm: Algorithm, params: &TraceParams) -> Result<Trace> {
    let (view, endpoints) = prepare(graph, algorithm, params)?;
    let mut recorder = StepRecorder::new(graph);
    let outcome = tracer_for(algorithm).run(&view, endpoints, &mut recorder);
    let trace = recorder.finish(algorithm, outcome);
    debug!(
        %algorithm,
        nodes = view.node_count(),
        edges = view.edge_count(),
        steps = trace.len(),
        "trace complete"
    );
    Ok(trace)
}

/// Traces the algorithm named by a variant key such as `"bfs"`.
///
/// # Errors
///
/// Returns [`AlgorithmUnsupported`](graphlab_common::Error::AlgorithmUnsupported)
/// for an unknown key, otherwise as [`trace`].
pub fn trace_by_key(graph: &Graph, key: &str, params: &TraceParams) -> Result<Trace> {
    trace(graph, key.parse()?, params)
}

/// Formats a cost without a trailing `.0` for whole numbers.
pub(crate) fn fmt_cost(value: f64) -> String {
    if value.is_infinite() {
        "inf".to_string()
    } else if value.fract() == 0.0 {
        format!("{value}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphlab_common::Error;

    fn sample() -> Graph {
        Graph::from_undirected_edges(&[("A", "B", 1.0), ("B", "C", 2.0)])
    }

    #[test]
    fn test_unknown_key() {
        let err = trace_by_key(&sample(), "bogosort", &TraceParams::new("A")).unwrap_err();
        assert_eq!(err, Error::AlgorithmUnsupported("bogosort".to_string()));
    }

    #[test]
    fn test_missing_start() {
        let err = trace(&sample(), Algorithm::Bfs, &TraceParams::new("Z")).unwrap_err();
        assert_eq!(
            err,
            Error::GraphValidation(GraphValidationError::MissingNode {
                role: "start",
                id: "Z".to_string()
            })
        );
    }

    #[test]
    fn test_astar_requires_goal() {
        let err = trace(&sample(), Algorithm::AStar, &TraceParams::new("A")).unwrap_err();
        assert!(err.is_graph_validation());
        let err = trace(
            &sample(),
            Algorithm::EdmondsKarp,
            &TraceParams::new("A").with_goal("Q"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::GraphValidation(GraphValidationError::MissingNode {
                role: "sink",
                id: "Q".to_string()
            })
        );
    }

    #[test]
    fn test_every_variant_has_a_tracer() {
        for algorithm in Algorithm::ALL {
            let tracer = tracer_for(algorithm);
            assert_eq!(tracer.algorithm(), algorithm);
            assert!(!tracer.pseudocode().is_empty());
        }
    }

    #[test]
    fn test_lines_within_pseudocode() {
        let graph = sample();
        for algorithm in Algorithm::ALL {
            let params = TraceParams::new("A").with_goal("C");
            let trace = trace(&graph, algorithm, &params).unwrap();
            assert!(!trace.is_empty());
            for step in &trace.steps {
                assert!(step.pseudocode_line < trace.pseudocode().len());
            }
        }
    }

    #[test]
    fn test_steps_do_not_alias() {
        let trace = trace(&sample(), Algorithm::Bfs, &TraceParams::new("A")).unwrap();
        let mut steps = trace.into_steps();
        let before = steps[1].clone();
        steps[0].graph.nodes[1].visited = false;
        steps[0].graph.nodes[1].distance = 99.0;
        assert_eq!(steps[1], before);
    }

    #[test]
    fn test_fmt_cost() {
        assert_eq!(fmt_cost(3.0), "3");
        assert_eq!(fmt_cost(2.5), "2.50");
        assert_eq!(fmt_cost(f64::INFINITY), "inf");
    }
}
