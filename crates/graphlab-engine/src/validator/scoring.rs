//! Scoring policy.

use graphlab_common::Difficulty;
use serde::{Deserialize, Serialize};

/// Point values for a play session.
///
/// Rewards for correct moves and completion are scaled by the
/// difficulty multiplier. The incorrect-move value is applied as is.
/// Missing fields fall back to the defaults when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    /// Points for a correct move.
    pub correct_move: i64,
    /// Points for an incorrect move (usually negative).
    pub incorrect_move: i64,
    /// Points for completing the session.
    pub completion_bonus: i64,
    /// Multiplier on easy graphs.
    pub easy_multiplier: i64,
    /// Multiplier on medium graphs.
    pub medium_multiplier: i64,
    /// Multiplier on hard graphs.
    pub hard_multiplier: i64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            correct_move: 10,
            incorrect_move: -5,
            completion_bonus: 50,
            easy_multiplier: 1,
            medium_multiplier: 2,
            hard_multiplier: 3,
        }
    }
}

impl ScoringPolicy {
    /// Multiplier for a difficulty.
    #[must_use]
    pub fn multiplier(&self, difficulty: Difficulty) -> i64 {
        match difficulty {
            Difficulty::Easy => self.easy_multiplier,
            Difficulty::Medium => self.medium_multiplier,
            Difficulty::Hard => self.hard_multiplier,
        }
    }

    /// Points for a correct move at a difficulty.
    #[must_use]
    pub fn reward(&self, difficulty: Difficulty) -> i64 {
        self.correct_move * self.multiplier(difficulty)
    }

    /// Completion bonus at a difficulty.
    #[must_use]
    pub fn bonus(&self, difficulty: Difficulty) -> i64 {
        self.completion_bonus * self.multiplier(difficulty)
    }

    /// Points for an incorrect move.
    #[must_use]
    pub fn penalty(&self) -> i64 {
        self.incorrect_move
    }
}
