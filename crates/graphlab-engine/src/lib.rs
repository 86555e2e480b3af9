//! # graphlab-engine
//!
//! Algorithm layer for Graphlab: step traces and move grading.
//!
//! [`trace`](trace::trace) runs an algorithm to completion and returns
//! every intermediate state; a [`MoveValidator`] grades a learner's
//! manual play against the same canonical order. Both are built on the
//! stepping states in [`canonical`], which fix every tie-break.
//!
//! ## Modules
//!
//! - [`canonical`] - Graph view, priority keys, union-find, residual network
//! - [`moves`] - Node, edge, and path moves with their text notation
//! - [`trace`] - Step traces and pseudocode
//! - [`validator`] - Move grading, scoring, and session summaries

#![warn(missing_docs)]

pub mod canonical;
pub mod moves;
pub mod trace;
pub mod validator;

pub use canonical::GraphView;
pub use moves::Move;
pub use trace::{
    Endpoints, Step, StepRecorder, StepTracer, Trace, TraceOutcome, TraceParams, pseudocode,
    trace, trace_by_key, tracer_for,
};
pub use validator::{MoveValidator, Phase, ScoringPolicy, SessionSummary, ValidatorState, Verdict};
