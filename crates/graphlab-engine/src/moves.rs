//! Learner moves.
//!
//! Text notation: `A` selects a node, `A->B` an edge, and `S->A->B->T`
//! a path (flow algorithms).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A node, edge, or path selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Move {
    /// Select a node.
    Node(String),
    /// Select an edge.
    Edge {
        /// Source node id.
        source: String,
        /// Target node id.
        target: String,
    },
    /// Propose an augmenting path.
    Path(Vec<String>),
}

impl Move {
    /// A node selection.
    pub fn node(id: impl Into<String>) -> Self {
        Move::Node(id.into())
    }

    /// An edge selection.
    pub fn edge(source: impl Into<String>, target: impl Into<String>) -> Self {
        Move::Edge {
            source: source.into(),
            target: target.into(),
        }
    }

    /// A path proposal.
    pub fn path<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Move::Path(ids.into_iter().map(Into::into).collect())
    }

    /// The move as a node sequence. Edges are two-node paths; a single
    /// node is not a path.
    #[must_use]
    pub fn as_path(&self) -> Option<Vec<&str>> {
        match self {
            Move::Node(_) => None,
            Move::Edge { source, target } => Some(vec![source.as_str(), target.as_str()]),
            Move::Path(ids) => Some(ids.iter().map(String::as_str).collect()),
        }
    }

    /// Short kind label used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Move::Node(_) => "node",
            Move::Edge { .. } => "edge",
            Move::Path(_) => "path",
        }
    }
}

impl From<&str> for Move {
    fn from(text: &str) -> Self {
        let parts: Vec<&str> = text.split("->").map(str::trim).collect();
        match parts.as_slice() {
            [node] => Move::node(*node),
            [source, target] => Move::edge(*source, *target),
            _ => Move::path(parts),
        }
    }
}

impl From<String> for Move {
    fn from(text: String) -> Self {
        Move::from(text.as_str())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Node(id) => f.write_str(id),
            Move::Edge { source, target } => write!(f, "{source}->{target}"),
            Move::Path(ids) => f.write_str(&ids.join("->")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_notation() {
        assert_eq!(Move::from("A"), Move::node("A"));
        assert_eq!(Move::from("A -> B"), Move::edge("A", "B"));
        assert_eq!(Move::from("S->A->T"), Move::path(["S", "A", "T"]));
    }

    #[test]
    fn test_display_inverts_parse() {
        for text in ["A", "A->B", "S->A->B->T"] {
            assert_eq!(Move::from(text).to_string(), text);
        }
    }

    #[test]
    fn test_as_path() {
        assert_eq!(Move::edge("A", "B").as_path(), Some(vec!["A", "B"]));
        assert_eq!(Move::node("A").as_path(), None);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&Move::edge("A", "B")).unwrap();
        assert_eq!(json, r#"{"kind":"edge","value":{"source":"A","target":"B"}}"#);
    }
}
