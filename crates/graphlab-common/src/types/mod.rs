//! Core tag types shared by every Graphlab crate.
//!
//! - [`Algorithm`] - the closed set of algorithm variants that can be traced and graded
//! - [`Difficulty`] - practice graph difficulty levels

mod algorithm;
mod difficulty;

pub use algorithm::Algorithm;
pub use difficulty::Difficulty;
