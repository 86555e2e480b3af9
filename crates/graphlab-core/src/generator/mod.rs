//! Random practice graph generation.
//!
//! Nodes are placed evenly on a circle and joined into a bidirectional
//! ring, which makes every generated graph connected by construction.
//! Extra chords are then drawn at random, rejecting self-loops and pairs
//! that already exist in either direction. Randomness is always passed
//! in, so a seeded RNG reproduces the same graph.

mod config;

pub use config::{DifficultyProfile, GeneratorConfig};

use std::f64::consts::{FRAC_PI_2, TAU};

use graphlab_common::Difficulty;
use graphlab_common::utils::error::{Error, Result};
use graphlab_common::utils::hash::FxHashSet;
use rand::Rng;
use tracing::{debug, warn};

use crate::graph::{Graph, Node};

/// Generates connected, duplicate-free practice graphs.
#[derive(Debug, Clone, Default)]
pub struct GraphGenerator {
    config: GeneratorConfig,
}

impl GraphGenerator {
    /// Creates a generator with the given configuration.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a graph with `node_count` nodes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `node_count < 2` or the
    /// weight range is invalid.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        node_count: usize,
        difficulty: Difficulty,
    ) -> Result<Graph> {
        if node_count < 2 {
            return Err(Error::InvalidParameter(format!(
                "node count must be at least 2, got {node_count}"
            )));
        }
        self.config.validate()?;

        let profile = self.config.profile(difficulty);
        let mut graph = Graph::new();
        let (cx, cy) = self.config.center;
        for i in 0..node_count {
            let angle = TAU * i as f64 / node_count as f64 - FRAC_PI_2;
            graph.add_node(Node::at(
                i.to_string(),
                cx + self.config.radius * angle.cos(),
                cy + self.config.radius * angle.sin(),
            ));
        }

        let mut pairs = FxHashSet::default();

        // Ring backbone. With two nodes the closing pair is the only pair.
        for i in 0..node_count - 1 {
            self.link(&mut graph, rng, &mut pairs, i, i + 1);
        }
        if node_count > 2 {
            self.link(&mut graph, rng, &mut pairs, node_count - 1, 0);
        }

        let target = profile.extra_edges;
        let max_attempts = target.saturating_mul(self.config.attempts_per_edge);
        let mut accepted = 0;
        let mut attempts = 0;
        while accepted < target && attempts < max_attempts {
            attempts += 1;
            let a = rng.gen_range(0..node_count);
            let b = rng.gen_range(0..node_count);
            if a == b || pairs.contains(&pair_key(a, b)) {
                continue;
            }
            self.link(&mut graph, rng, &mut pairs, a, b);
            accepted += 1;
        }
        if accepted < target {
            warn!(
                node_count,
                requested = target,
                accepted,
                attempts,
                "extra edge attempts exhausted"
            );
        }

        if profile.jitter > 0.0 {
            for node in &mut graph.nodes {
                node.x += rng.gen_range(-profile.jitter..=profile.jitter);
                node.y += rng.gen_range(-profile.jitter..=profile.jitter);
            }
        }

        debug!(
            node_count,
            edge_count = graph.edge_count(),
            %difficulty,
            "generated practice graph"
        );
        Ok(graph)
    }

    fn link<R: Rng + ?Sized>(
        &self,
        graph: &mut Graph,
        rng: &mut R,
        pairs: &mut FxHashSet<(usize, usize)>,
        a: usize,
        b: usize,
    ) {
        let weight = if self.config.weighted {
            f64::from(rng.gen_range(self.config.min_weight..=self.config.max_weight))
        } else {
            1.0
        };
        pairs.insert(pair_key(a, b));
        let (source, target) = (a.to_string(), b.to_string());
        graph.add_undirected_edge(&source, &target, weight);
    }
}

fn pair_key(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

/// Generates a graph with the default configuration.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    node_count: usize,
    difficulty: Difficulty,
) -> Result<Graph> {
    GraphGenerator::default().generate(rng, node_count, difficulty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Each unordered pair must be stored exactly twice: once per direction.
    fn has_duplicate(edges: &[Edge]) -> bool {
        let mut counts = std::collections::HashMap::new();
        for e in edges {
            let key = if e.source < e.target {
                (e.source.clone(), e.target.clone())
            } else {
                (e.target.clone(), e.source.clone())
            };
            *counts.entry(key).or_insert(0) += 1;
        }
        counts.values().any(|&c| c != 2)
    }

    #[test]
    fn test_rejects_single_node() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            generate(&mut rng, 1, Difficulty::Easy),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_two_nodes() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = generate(&mut rng, 2, Difficulty::Hard).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.validate_connectivity());
    }

    #[test]
    fn test_five_node_easy() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = generate(&mut rng, 5, Difficulty::Easy).unwrap();
            assert_eq!(graph.node_count(), 5);
            assert!(
                graph.edge_count() == 10 || graph.edge_count() == 12,
                "unexpected edge count {}",
                graph.edge_count()
            );
            assert!(graph.validate_connectivity());
            assert!(!has_duplicate(&graph.edges));
        }
    }

    #[test]
    fn test_weights_positive_and_symmetric() {
        let mut rng = StdRng::seed_from_u64(42);
        let graph = generate(&mut rng, 8, Difficulty::Hard).unwrap();
        for pair in graph.edges.chunks(2) {
            assert!(pair[0].weight >= 1.0 && pair[0].weight <= 10.0);
            assert_eq!(pair[0].weight, pair[1].weight);
            assert_eq!(pair[0].source, pair[1].target);
        }
    }

    #[test]
    fn test_unweighted() {
        let generator = GraphGenerator::new(GeneratorConfig::default().with_weighted(false));
        let mut rng = StdRng::seed_from_u64(3);
        let graph = generator.generate(&mut rng, 6, Difficulty::Medium).unwrap();
        assert!(graph.edges.iter().all(|e| e.weight == 1.0));
    }

    #[test]
    fn test_seed_reproducible() {
        let a = generate(&mut StdRng::seed_from_u64(9), 7, Difficulty::Medium).unwrap();
        let b = generate(&mut StdRng::seed_from_u64(9), 7, Difficulty::Medium).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_saturated_graph_returns_as_is() {
        // A triangle is complete after the ring, so every extra draw is rejected.
        let mut rng = StdRng::seed_from_u64(5);
        let graph = generate(&mut rng, 3, Difficulty::Hard).unwrap();
        assert_eq!(graph.edge_count(), 6);
        assert!(!has_duplicate(&graph.edges));
    }

    #[test]
    fn test_easy_layout_on_circle() {
        let mut rng = StdRng::seed_from_u64(0);
        let graph = generate(&mut rng, 4, Difficulty::Easy).unwrap();
        for node in &graph.nodes {
            let r = (node.x - 300.0).hypot(node.y - 300.0);
            assert!((r - 200.0).abs() < 1e-9);
        }
    }

    proptest! {
        #[test]
        fn prop_connected_and_duplicate_free(
            seed in any::<u64>(),
            node_count in 2usize..24,
            difficulty in prop_oneof![
                Just(Difficulty::Easy),
                Just(Difficulty::Medium),
                Just(Difficulty::Hard),
            ],
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = generate(&mut rng, node_count, difficulty).unwrap();
            prop_assert!(graph.validate_connectivity());
            prop_assert!(!has_duplicate(&graph.edges));
            prop_assert!(graph.edges.iter().all(|e| e.source != e.target));
            prop_assert!(graph.edges.iter().all(|e| e.weight > 0.0));
        }
    }
}
