//! # graphlab-core
//!
//! Core layer for Graphlab: the graph value type and the practice graph
//! generator.
//!
//! This crate depends only on `graphlab-common`.
//!
//! ## Modules
//!
//! - [`graph`] - Nodes, edges, graphs, and the id-keyed adjacency index
//! - [`generator`] - Seedable random generation of connected practice graphs

#![warn(missing_docs)]

pub mod generator;
pub mod graph;

pub use generator::{DifficultyProfile, GeneratorConfig, GraphGenerator, generate};
pub use graph::{AStarLabels, AdjacencyIndex, Edge, Graph, Neighbor, Node};
