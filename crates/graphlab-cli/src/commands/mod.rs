//! CLI command implementations.

pub mod generate;
pub mod play;
pub mod pseudocode;
pub mod trace;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use graphlab::{Difficulty, GeneratorConfig, Graph, GraphGenerator};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Where a command gets its graph from: a JSON file, or the generator.
#[derive(Args, Debug, Clone)]
pub struct GraphSource {
    /// Load the graph from a JSON file instead of generating one
    #[arg(long)]
    pub graph: Option<PathBuf>,

    /// Number of nodes to generate
    #[arg(long, default_value_t = 7)]
    pub nodes: usize,

    /// Difficulty (easy, medium, hard)
    #[arg(long, default_value = "easy")]
    pub difficulty: Difficulty,

    /// Seed for reproducible generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Give every generated edge weight 1
    #[arg(long)]
    pub unweighted: bool,
}

impl GraphSource {
    /// Loads or generates the graph.
    pub fn load(&self) -> Result<Graph> {
        if let Some(path) = &self.graph {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let graph: Graph = serde_json::from_str(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            graph.validate()?;
            tracing::info!(path = %path.display(), nodes = graph.node_count(), "loaded graph");
            return Ok(graph);
        }

        let generator =
            GraphGenerator::new(GeneratorConfig::default().with_weighted(!self.unweighted));
        let seed = self.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = generator.generate(&mut rng, self.nodes, self.difficulty)?;
        tracing::info!(seed, nodes = self.nodes, difficulty = %self.difficulty, "generated graph");
        Ok(graph)
    }
}
