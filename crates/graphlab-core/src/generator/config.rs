//! Generator configuration.

use graphlab_common::Difficulty;
use graphlab_common::utils::error::{Error, Result};

/// Per-difficulty generation knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    /// Extra undirected edges requested on top of the ring backbone.
    pub extra_edges: usize,
    /// Maximum positional jitter, in screen units.
    pub jitter: f64,
}

/// Configuration for [`GraphGenerator`](super::GraphGenerator).
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Draw random edge weights. When false every weight is 1.
    pub weighted: bool,
    /// Smallest edge weight (inclusive, at least 1).
    pub min_weight: u32,
    /// Largest edge weight (inclusive).
    pub max_weight: u32,
    /// Centre of the node circle.
    pub center: (f64, f64),
    /// Radius of the node circle.
    pub radius: f64,
    /// Draws allowed per requested extra edge before giving up.
    pub attempts_per_edge: usize,
    /// Profile for [`Difficulty::Easy`].
    pub easy: DifficultyProfile,
    /// Profile for [`Difficulty::Medium`].
    pub medium: DifficultyProfile,
    /// Profile for [`Difficulty::Hard`].
    pub hard: DifficultyProfile,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            weighted: true,
            min_weight: 1,
            max_weight: 10,
            center: (300.0, 300.0),
            radius: 200.0,
            attempts_per_edge: 32,
            easy: DifficultyProfile {
                extra_edges: 1,
                jitter: 0.0,
            },
            medium: DifficultyProfile {
                extra_edges: 3,
                jitter: 6.0,
            },
            hard: DifficultyProfile {
                extra_edges: 6,
                jitter: 12.0,
            },
        }
    }
}

impl GeneratorConfig {
    /// Returns the profile for a difficulty.
    #[must_use]
    pub fn profile(&self, difficulty: Difficulty) -> DifficultyProfile {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    /// Number of extra edges requested for a difficulty.
    #[must_use]
    pub fn max_extra_edges(&self, difficulty: Difficulty) -> usize {
        self.profile(difficulty).extra_edges
    }

    /// Enables or disables random weights.
    pub fn with_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Sets the inclusive weight range.
    pub fn with_weight_range(mut self, min: u32, max: u32) -> Self {
        self.min_weight = min;
        self.max_weight = max;
        self
    }

    /// Sets the circle layout.
    pub fn with_layout(mut self, center: (f64, f64), radius: f64) -> Self {
        self.center = center;
        self.radius = radius;
        self
    }

    /// Sets the attempt budget per requested extra edge.
    pub fn with_attempts_per_edge(mut self, attempts: usize) -> Self {
        self.attempts_per_edge = attempts;
        self
    }

    /// Replaces the profile of one difficulty.
    pub fn with_profile(mut self, difficulty: Difficulty, profile: DifficultyProfile) -> Self {
        match difficulty {
            Difficulty::Easy => self.easy = profile,
            Difficulty::Medium => self.medium = profile,
            Difficulty::Hard => self.hard = profile,
        }
        self
    }

    /// Checks that weights stay positive and the range is ordered.
    pub fn validate(&self) -> Result<()> {
        if self.min_weight == 0 {
            return Err(Error::InvalidParameter(
                "edge weights must be positive".to_string(),
            ));
        }
        if self.min_weight > self.max_weight {
            return Err(Error::InvalidParameter(format!(
                "weight range {}..={} is empty",
                self.min_weight, self.max_weight
            )));
        }
        Ok(())
    }
}
