//! Algorithm variant tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::error::Error;

/// A supported graph algorithm.
///
/// The set is closed: every variant has exactly one trace implementation
/// and one move-grading rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Depth-first traversal.
    Dfs,
    /// Breadth-first traversal.
    Bfs,
    /// Dijkstra's single-source shortest paths.
    Dijkstra,
    /// A* search towards a goal node.
    #[serde(rename = "astar")]
    AStar,
    /// Kruskal's minimum spanning tree.
    Kruskal,
    /// Prim's minimum spanning tree.
    Prim,
    /// Ford-Fulkerson maximum flow (depth-first augmenting paths).
    FordFulkerson,
    /// Edmonds-Karp maximum flow (breadth-first augmenting paths).
    EdmondsKarp,
}

impl Algorithm {
    /// All variants, in display order.
    pub const ALL: [Algorithm; 8] = [
        Algorithm::Dfs,
        Algorithm::Bfs,
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::Kruskal,
        Algorithm::Prim,
        Algorithm::FordFulkerson,
        Algorithm::EdmondsKarp,
    ];

    /// Returns the canonical variant key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Algorithm::Dfs => "dfs",
            Algorithm::Bfs => "bfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
            Algorithm::Kruskal => "kruskal",
            Algorithm::Prim => "prim",
            Algorithm::FordFulkerson => "ford-fulkerson",
            Algorithm::EdmondsKarp => "edmonds-karp",
        }
    }

    /// Returns a human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Algorithm::Dfs => "Depth-First Search",
            Algorithm::Bfs => "Breadth-First Search",
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::AStar => "A*",
            Algorithm::Kruskal => "Kruskal",
            Algorithm::Prim => "Prim",
            Algorithm::FordFulkerson => "Ford-Fulkerson",
            Algorithm::EdmondsKarp => "Edmonds-Karp",
        }
    }

    /// Returns true for the unweighted traversals (DFS, BFS).
    #[must_use]
    pub const fn is_traversal(self) -> bool {
        matches!(self, Algorithm::Dfs | Algorithm::Bfs)
    }

    /// Returns true for the maximum-flow variants.
    #[must_use]
    pub const fn is_flow(self) -> bool {
        matches!(self, Algorithm::FordFulkerson | Algorithm::EdmondsKarp)
    }

    /// Returns true if the variant needs a goal (A*) or sink (flow) node.
    #[must_use]
    pub const fn requires_goal(self) -> bool {
        matches!(
            self,
            Algorithm::AStar | Algorithm::FordFulkerson | Algorithm::EdmondsKarp
        )
    }

    /// Returns true if the variant reads edge weights.
    #[must_use]
    pub const fn is_weighted(self) -> bool {
        !self.is_traversal()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "dfs" => Ok(Algorithm::Dfs),
            "bfs" => Ok(Algorithm::Bfs),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" | "a-star" => Ok(Algorithm::AStar),
            "kruskal" => Ok(Algorithm::Kruskal),
            "prim" => Ok(Algorithm::Prim),
            "ford-fulkerson" | "fordfulkerson" => Ok(Algorithm::FordFulkerson),
            "edmonds-karp" | "edmondskarp" => Ok(Algorithm::EdmondsKarp),
            _ => Err(Error::AlgorithmUnsupported(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.key().parse::<Algorithm>().unwrap(), algorithm);
        }
        assert_eq!("A*".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert_eq!(
            "Edmonds_Karp".parse::<Algorithm>().unwrap(),
            Algorithm::EdmondsKarp
        );
    }

    #[test]
    fn test_unknown_key() {
        let err = "bellman-ford".parse::<Algorithm>().unwrap_err();
        assert_eq!(err, Error::AlgorithmUnsupported("bellman-ford".to_string()));
    }

    #[test]
    fn test_classification() {
        assert!(Algorithm::Dfs.is_traversal());
        assert!(!Algorithm::Dfs.is_weighted());
        assert!(Algorithm::EdmondsKarp.is_flow());
        assert!(Algorithm::AStar.requires_goal());
        assert!(!Algorithm::Dijkstra.requires_goal());
    }

    #[test]
    fn test_serde_key() {
        let json = serde_json::to_string(&Algorithm::FordFulkerson).unwrap();
        assert_eq!(json, "\"ford-fulkerson\"");
        let parsed: Algorithm = serde_json::from_str("\"astar\"").unwrap();
        assert_eq!(parsed, Algorithm::AStar);
    }
}
