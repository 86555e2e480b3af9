//! # Graphlab
//!
//! Step-by-step graph algorithm traces and move grading, for tools that
//! teach graph algorithms interactively.
//!
//! Start with [`trace()`] to run an algorithm and get every intermediate
//! state back as a [`Step`], or with [`MoveValidator`] to grade a learner
//! who plays the algorithm by hand. [`GraphGenerator`] builds connected
//! practice graphs from a seeded RNG.
//!
//! ## Algorithms
//!
//! | Key | Algorithm | Parameters |
//! | --- | --------- | ---------- |
//! | `dfs` | Depth-first search | start |
//! | `bfs` | Breadth-first search | start |
//! | `dijkstra` | Dijkstra | start |
//! | `astar` | A* (Euclidean heuristic) | start, goal |
//! | `kruskal` | Kruskal | - |
//! | `prim` | Prim | start |
//! | `ford-fulkerson` | Ford-Fulkerson (DFS paths) | source, sink |
//! | `edmonds-karp` | Edmonds-Karp (BFS paths) | source, sink |
//!
//! ## Quick Start
//!
//! ```rust
//! use graphlab::{Algorithm, Graph, MoveValidator, TraceParams, trace};
//!
//! let graph = Graph::from_undirected_edges(&[("A", "B", 1.0), ("A", "C", 2.0)]);
//! let params = TraceParams::new("A");
//!
//! let bfs = trace(&graph, Algorithm::Bfs, &params)?;
//! assert_eq!(bfs.outcome.order().unwrap(), ["A", "B", "C"]);
//!
//! let mut session = MoveValidator::new(&graph, Algorithm::Bfs, &params)?;
//! assert!(session.submit_move("A").correct);
//! assert!(!session.submit_move("C").correct);
//! # Ok::<(), graphlab::Error>(())
//! ```

// Traces and grading
pub use graphlab_engine::{
    Move, MoveValidator, Phase, ScoringPolicy, SessionSummary, Step, Trace, TraceOutcome,
    TraceParams, ValidatorState, Verdict, pseudocode, trace, trace_by_key,
};

// Graph model and generation
pub use graphlab_core::{
    DifficultyProfile, Edge, GeneratorConfig, Graph, GraphGenerator, Node, generate,
};

// Tags and errors
pub use graphlab_common::{Algorithm, Difficulty, Error, GraphValidationError, Result};
