use graphlab_common::Algorithm;
use graphlab_core::graph::{Edge, Graph, Node};

use super::{Step, Trace, TraceOutcome};
use crate::moves::Move;

/// Working graph plus the steps emitted so far.
///
/// Tracers mutate the working graph through the recorder and call
/// [`emit`](Self::emit) to freeze the current state into a new step. The
/// caller's graph is never touched.
#[derive(Debug)]
pub struct StepRecorder {
    graph: Graph,
    current: Option<usize>,
    steps: Vec<Step>,
    moves: Vec<Move>,
}

impl StepRecorder {
    /// Starts recording on a reset copy of `graph`.
    #[must_use]
    pub fn new(graph: &Graph) -> Self {
        let mut graph = graph.clone();
        graph.reset_state();
        Self {
            graph,
            current: None,
            steps: Vec::new(),
            moves: Vec::new(),
        }
    }

    /// The working graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable access to a node by index.
    pub fn node_mut(&mut self, index: usize) -> &mut Node {
        &mut self.graph.nodes[index]
    }

    /// Mutable access to an edge by index.
    pub fn edge_mut(&mut self, edge: usize) -> &mut Edge {
        &mut self.graph.edges[edge]
    }

    /// Moves the `current` marker, clearing it from the previous node.
    pub fn set_current(&mut self, node: Option<usize>) {
        if let Some(prev) = self.current.take() {
            self.graph.nodes[prev].current = false;
        }
        if let Some(next) = node {
            self.graph.nodes[next].current = true;
        }
        self.current = node;
    }

    /// Clears every `recently_updated` flag.
    pub fn clear_recent(&mut self) {
        for node in &mut self.graph.nodes {
            node.recently_updated = false;
        }
    }

    /// Freezes the working graph into a new step.
    pub fn emit(&mut self, line: usize, explanation: impl Into<String>, frontier: Vec<String>) {
        self.steps.push(Step {
            graph: self.graph.clone(),
            explanation: explanation.into(),
            pseudocode_line: line,
            frontier,
        });
    }

    /// Records a move the algorithm made.
    pub fn record_move(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// Number of steps emitted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub(crate) fn finish(self, algorithm: Algorithm, outcome: TraceOutcome) -> Trace {
        Trace {
            algorithm,
            steps: self.steps,
            outcome,
            canonical_moves: self.moves,
        }
    }
}
