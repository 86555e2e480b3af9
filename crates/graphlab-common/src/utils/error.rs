//! Error types for Graphlab.
//!
//! Only configuration and input problems are errors. A learner's wrong
//! guess is an ordinary verdict, and an exhausted search is an ordinary
//! end of trace.

use thiserror::Error;

/// Result type alias for Graphlab operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The graph is malformed or lacks a required node.
    #[error("graph validation failed: {0}")]
    GraphValidation(#[from] GraphValidationError),

    /// The algorithm key does not name a supported variant.
    #[error("unsupported algorithm: '{0}'")]
    AlgorithmUnsupported(String),

    /// A parameter is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Reasons a graph fails validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphValidationError {
    /// Two nodes share an id.
    #[error("duplicate node id '{id}'")]
    DuplicateNode {
        /// The repeated id.
        id: String,
    },

    /// An edge endpoint is not in the node set.
    #[error("edge {from}->{to} references missing node '{missing}'")]
    DanglingEdge {
        /// Edge source id.
        from: String,
        /// Edge target id.
        to: String,
        /// The endpoint that does not exist.
        missing: String,
    },

    /// The graph is required to be connected but is not.
    #[error("graph is disconnected: {reachable} of {total} nodes reachable")]
    Disconnected {
        /// Nodes reached from the first node.
        reachable: usize,
        /// Total node count.
        total: usize,
    },

    /// A start, goal, or sink parameter names a node that does not exist.
    #[error("{role} node '{id}' is not in the graph")]
    MissingNode {
        /// Which parameter was missing ("start", "goal", "sink").
        role: &'static str,
        /// The requested id.
        id: String,
    },

    /// A weighted algorithm was given a negative weight or capacity.
    #[error("edge {from}->{to} has negative weight {weight}")]
    NegativeWeight {
        /// Edge source id.
        from: String,
        /// Edge target id.
        to: String,
        /// The offending weight.
        weight: f64,
    },
}

impl Error {
    /// Returns true if this is a graph validation failure.
    #[must_use]
    pub fn is_graph_validation(&self) -> bool {
        matches!(self, Error::GraphValidation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err: Error = GraphValidationError::MissingNode {
            role: "start",
            id: "Z".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "graph validation failed: start node 'Z' is not in the graph"
        );
        assert!(err.is_graph_validation());
    }
}
