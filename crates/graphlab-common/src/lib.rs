//! # graphlab-common
//!
//! Foundation layer for Graphlab: shared tags, errors, and small utilities.
//!
//! This crate has no internal dependencies and should be kept minimal.
//!
//! ## Modules
//!
//! - [`types`] - Algorithm and difficulty tags
//! - [`utils`] - Error types and hashing aliases

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod types;
pub mod utils;

pub use types::{Algorithm, Difficulty};
pub use utils::error::{Error, GraphValidationError, Result};
