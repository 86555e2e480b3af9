//! Move validator.
//!
//! A [`MoveValidator`] grades a learner's manual play one move at a time
//! against the canonical order the tracer would follow. It owns its own
//! view of the graph and its own stepping state, so sessions never
//! interfere with each other or with a trace.
//!
//! Incorrect moves are ordinary traffic: they come back as a
//! [`Verdict`] with `correct: false` and leave the session state as it
//! was, so the learner can retry.

mod rules;
mod scoring;

pub use scoring::ScoringPolicy;

use std::time::Instant;

use graphlab_common::utils::error::Result;
use graphlab_common::{Algorithm, Difficulty};
use graphlab_core::graph::Graph;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::canonical::GraphView;
use crate::moves::Move;
use crate::trace::{Endpoints, TraceParams, prepare};
use rules::{MoveRule, rule_for};

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// No move accepted yet.
    NotStarted,
    /// At least one move accepted.
    InProgress,
    /// Termination condition reached.
    Completed,
}

/// Result of grading one move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the move matched the canonical choice.
    pub correct: bool,
    /// Diagnostic or confirmation text.
    pub reason: String,
    /// Score change caused by this move.
    pub score_delta: i64,
}

/// Snapshot of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorState {
    /// Lifecycle phase.
    pub phase: Phase,
    /// Confirmed moves in acceptance order.
    pub visited_order: Vec<String>,
    /// Candidates currently open to the learner.
    pub frontier: Vec<String>,
    /// Running score.
    pub score: i64,
}

/// Summary handed to a scoring collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// The graded algorithm.
    pub algorithm: Algorithm,
    /// Difficulty the session was scored at.
    pub difficulty: Difficulty,
    /// Score at the time of the summary.
    pub final_score: i64,
    /// Moves submitted before completion, correct or not.
    pub move_count: usize,
    /// Milliseconds from the first accepted move to completion (or now).
    pub elapsed_ms: u64,
}

/// Grades learner moves for one algorithm on one graph.
pub struct MoveValidator {
    view: GraphView,
    algorithm: Algorithm,
    endpoints: Endpoints,
    difficulty: Difficulty,
    policy: ScoringPolicy,
    rule: Box<dyn MoveRule>,
    state: ValidatorState,
    move_count: usize,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
}

impl MoveValidator {
    /// Creates a session in [`Phase::NotStarted`].
    ///
    /// If the algorithm has nothing to do (a one-node spanning tree, a
    /// sink unreachable from the source) the session starts completed.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`crate::trace::trace`].
    pub fn new(graph: &Graph, algorithm: Algorithm, params: &TraceParams) -> Result<Self> {
        let (view, endpoints) = prepare(graph, algorithm, params)?;
        let rule = rule_for(algorithm, &view, endpoints);
        let mut validator = Self {
            view,
            algorithm,
            endpoints,
            difficulty: Difficulty::default(),
            policy: ScoringPolicy::default(),
            rule,
            state: ValidatorState {
                phase: Phase::NotStarted,
                visited_order: Vec::new(),
                frontier: Vec::new(),
                score: 0,
            },
            move_count: 0,
            started_at: None,
            finished_at: None,
        };
        validator.refresh();
        Ok(validator)
    }

    /// Uses a custom scoring policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the difficulty used for score multipliers.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    fn refresh(&mut self) {
        self.state.frontier = self.rule.frontier(&self.view);
        if self.rule.is_complete() {
            self.state.phase = Phase::Completed;
        }
    }

    /// Grades one move.
    pub fn submit_move(&mut self, mv: impl Into<Move>) -> Verdict {
        let mv = mv.into();
        if self.state.phase == Phase::Completed {
            return Verdict {
                correct: false,
                reason: "session already completed".to_string(),
                score_delta: 0,
            };
        }
        self.move_count += 1;

        let verdict = match self.rule.submit(&self.view, &mv) {
            Ok(accepted) => {
                if self.state.phase == Phase::NotStarted {
                    self.state.phase = Phase::InProgress;
                    self.started_at = Some(Instant::now());
                }
                self.state.visited_order.push(accepted.confirmed);
                let mut delta = self.policy.reward(self.difficulty);
                self.refresh();
                let mut reason = accepted.reason;
                if self.state.phase == Phase::Completed {
                    self.finished_at = Some(Instant::now());
                    delta += self.policy.bonus(self.difficulty);
                    reason.push_str("; session complete");
                }
                Verdict {
                    correct: true,
                    reason,
                    score_delta: delta,
                }
            }
            Err(reason) => Verdict {
                correct: false,
                reason,
                score_delta: self.policy.penalty(),
            },
        };
        self.state.score += verdict.score_delta;
        debug!(
            algorithm = %self.algorithm,
            %mv,
            correct = verdict.correct,
            score = self.state.score,
            "move graded"
        );
        verdict
    }

    /// Restarts the session on the same graph, keeping policy and
    /// difficulty.
    pub fn reset(&mut self) {
        self.rule = rule_for(self.algorithm, &self.view, self.endpoints);
        self.state = ValidatorState {
            phase: Phase::NotStarted,
            visited_order: Vec::new(),
            frontier: Vec::new(),
            score: 0,
        };
        self.move_count = 0;
        self.started_at = None;
        self.finished_at = None;
        self.refresh();
    }

    /// Current session snapshot.
    #[must_use]
    pub fn state(&self) -> &ValidatorState {
        &self.state
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Running score.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.state.score
    }

    /// Candidates currently open to the learner.
    #[must_use]
    pub fn frontier(&self) -> &[String] {
        &self.state.frontier
    }

    /// The graded algorithm.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Summary for the scoring collaborator.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        let elapsed = match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => start.elapsed(),
            _ => std::time::Duration::ZERO,
        };
        SessionSummary {
            algorithm: self.algorithm,
            difficulty: self.difficulty,
            final_score: self.state.score,
            move_count: self.move_count,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl std::fmt::Debug for MoveValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveValidator")
            .field("algorithm", &self.algorithm)
            .field("difficulty", &self.difficulty)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::trace;

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
    fn test_bfs_session() {
        let mut v = MoveValidator::new(&tree(), Algorithm::Bfs, &TraceParams::new("A")).unwrap();
        assert_eq!(v.phase(), Phase::NotStarted);
        assert_eq!(v.frontier(), ["A"]);

        let verdict = v.submit_move("A");
        assert!(verdict.correct);
        assert_eq!(verdict.score_delta, 10);
        assert_eq!(v.phase(), Phase::InProgress);
        assert_eq!(v.frontier(), ["B", "C"]);

        let verdict = v.submit_move("C");
        assert!(!verdict.correct);
        assert!(verdict.reason.contains("not at the head"));
        assert_eq!(verdict.score_delta, -5);
        assert_eq!(v.frontier(), ["B", "C"]);
        assert_eq!(v.state().visited_order, ["A"]);

        for id in ["B", "C", "D", "E", "F"] {
            assert!(v.submit_move(id).correct);
        }
        let last = v.submit_move("G");
        assert!(last.correct);
        assert_eq!(last.score_delta, 60);
        assert_eq!(v.phase(), Phase::Completed);
        assert_eq!(v.score(), 7 * 10 - 5 + 50);
    }

    #[test]
    fn test_completed_session_ignores_moves() {
        let graph = Graph::from_undirected_edges(&[("A", "B", 1.0)]);
        let mut v = MoveValidator::new(&graph, Algorithm::Dfs, &TraceParams::new("A")).unwrap();
        assert!(v.submit_move("A").correct);
        assert!(v.submit_move("B").correct);
        assert_eq!(v.phase(), Phase::Completed);
        let before = v.summary();
        let verdict = v.submit_move("A");
        assert!(!verdict.correct);
        assert_eq!(verdict.reason, "session already completed");
        assert_eq!(verdict.score_delta, 0);
        assert_eq!(v.summary().move_count, before.move_count);
        assert_eq!(v.score(), before.final_score);
    }

    #[test]
    fn test_dfs_accepts_any_open_branch() {
        let mut v = MoveValidator::new(&tree(), Algorithm::Dfs, &TraceParams::new("A")).unwrap();
        assert!(v.submit_move("A").correct);
        assert!(v.submit_move("C").correct);
        assert!(v.submit_move("F").correct);
        // F and C are exhausted, so the search is back at A.
        assert_eq!(v.frontier(), ["B"]);
        assert!(!v.submit_move("D").correct);
    }

    #[test]
    fn test_difficulty_multiplier() {
        let graph = Graph::from_undirected_edges(&[("A", "B", 1.0)]);
        let mut v = MoveValidator::new(&graph, Algorithm::Bfs, &TraceParams::new("A"))
            .unwrap()
            .with_difficulty(Difficulty::Hard);
        assert_eq!(v.submit_move("A").score_delta, 30);
        assert_eq!(v.submit_move("Z").score_delta, -5);
        assert_eq!(v.submit_move("B").score_delta, 30 + 150);
        let summary = v.summary();
        assert_eq!(summary.difficulty, Difficulty::Hard);
        assert_eq!(summary.move_count, 3);
        assert_eq!(summary.final_score, 205);
    }

    #[test]
    fn test_reset() {
        let mut v = MoveValidator::new(&tree(), Algorithm::Bfs, &TraceParams::new("A")).unwrap();
        v.submit_move("A");
        v.submit_move("B");
        v.reset();
        assert_eq!(v.phase(), Phase::NotStarted);
        assert_eq!(v.score(), 0);
        assert_eq!(v.frontier(), ["A"]);
        assert_eq!(v.summary().move_count, 0);
    }

    #[test]
    fn test_kruskal_either_orientation() {
        let graph = Graph::from_undirected_edges(&[
            ("A", "B", 2.0),
            ("B", "C", 1.0),
            ("A", "C", 3.0),
        ]);
        let mut v =
            MoveValidator::new(&graph, Algorithm::Kruskal, &TraceParams::new("A")).unwrap();
        assert!(!v.submit_move("A->B").correct);
        assert!(v.submit_move("C->B").correct);
        assert!(v.submit_move("A->B").correct);
        assert_eq!(v.phase(), Phase::Completed);
    }

    #[test]
    fn test_prim_node_or_edge() {
        let graph = Graph::from_undirected_edges(&[
            ("A", "B", 2.0),
            ("B", "C", 1.0),
            ("A", "C", 3.0),
        ]);
        let mut v = MoveValidator::new(&graph, Algorithm::Prim, &TraceParams::new("A")).unwrap();
        assert!(!v.submit_move("C").correct);
        assert!(v.submit_move("B").correct);
        assert!(!v.submit_move("A->C").correct);
        assert!(v.submit_move("C->B").correct);
        assert_eq!(v.phase(), Phase::Completed);
    }

    #[test]
    fn test_dijkstra_tie_break() {
        let graph = Graph::from_undirected_edges(&[("S", "A", 1.0), ("S", "B", 1.0)]);
        let mut v =
            MoveValidator::new(&graph, Algorithm::Dijkstra, &TraceParams::new("S")).unwrap();
        assert!(v.submit_move("S").correct);
        // Equal distances: the lower insertion index wins.
        assert!(!v.submit_move("B").correct);
        assert!(v.submit_move("A").correct);
        assert!(v.submit_move("B").correct);
        assert_eq!(v.phase(), Phase::Completed);
    }

    #[test]
    fn test_flow_paths() {
        let graph = Graph::from_directed_edges(&[
            ("s", "a", 3.0),
            ("a", "t", 2.0),
            ("s", "t", 1.0),
        ]);
        let params = TraceParams::new("s").with_goal("t");
        let mut v = MoveValidator::new(&graph, Algorithm::EdmondsKarp, &params).unwrap();
        assert!(!v.submit_move("s->a->t").correct);
        assert!(!v.submit_move("a->t").correct);
        assert!(v.submit_move("s->t").correct);
        assert!(!v.submit_move("s->t").correct);
        assert!(v.submit_move("s->a->t").correct);
        assert_eq!(v.phase(), Phase::Completed);

        let mut ff = MoveValidator::new(&graph, Algorithm::FordFulkerson, &params).unwrap();
        assert!(ff.submit_move("s->a->t").correct);
        assert!(!ff.submit_move("s->a->t").correct);
        assert!(ff.submit_move("s->t").correct);
        assert_eq!(ff.phase(), Phase::Completed);
    }

    #[test]
    fn test_replay_canonical_moves() {
        let graph = tree();
        for algorithm in Algorithm::ALL {
            let params = TraceParams::new("A").with_goal("G");
            let trace = trace(&graph, algorithm, &params).unwrap();
            let mut v = MoveValidator::new(&graph, algorithm, &params).unwrap();
            for mv in &trace.canonical_moves {
                let verdict = v.submit_move(mv.clone());
                assert!(verdict.correct, "{algorithm}: {mv} rejected: {}", verdict.reason);
            }
            assert_eq!(v.phase(), Phase::Completed, "{algorithm}");
        }
    }

    #[test]
    fn test_starts_completed_when_nothing_to_do() {
        let mut graph = Graph::from_directed_edges(&[("s", "a", 1.0)]);
        graph.add_node(graphlab_core::graph::Node::new("t"));
        let params = TraceParams::new("s").with_goal("t");
        let v = MoveValidator::new(&graph, Algorithm::EdmondsKarp, &params).unwrap();
        assert_eq!(v.phase(), Phase::Completed);
        assert!(v.frontier().is_empty());
    }
}
