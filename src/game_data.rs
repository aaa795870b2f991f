//! Per-playthrough score, lives and level.

use crate::constants::{LEVEL_SCORE_STEP, STARTING_LIVES};

/// Session data shared by the collision rules, progression and the HUD.
///
/// `high_score` outlives [`GameData::reset`]; everything else starts over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameData {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub high_score: u32,
}

impl GameData {
    pub fn new(high_score: u32) -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            high_score,
        }
    }

    /// Start a new playthrough, keeping the high score.
    pub fn reset(&mut self) {
        *self = Self::new(self.high_score);
    }

    /// Add points.  Score only ever grows between resets.
    #[inline]
    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Score that ends the current level.
    #[inline]
    pub fn next_level_score(&self, score_step: u32) -> u32 {
        self.level.saturating_mul(score_step)
    }

    /// Whether the current score has crossed the threshold for `level`.
    #[inline]
    pub fn level_up_due(&self, score_step: u32) -> bool {
        self.score >= self.next_level_score(score_step)
    }

    /// Record the final score; returns `true` if it beat the high score.
    pub fn commit_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }
}

impl Default for GameData {
    fn default() -> Self {
        Self::new(0)
    }
}
