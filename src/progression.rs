//! Stage and level progression.
//!
//! ```text
//! Normal(l) ──score ≥ l·step──▶ Normal(l+1)
//!     │ (l+1 == 5)
//!     ▼
//! BossIntro ──boss spawned──▶ BossFight ──boss defeated──▶ BossVictory
//!                                                               │ delay
//!                                                               ▼
//!                                                           Normal(6)
//! ```
//!
//! [`Progression`] only owns the state and the level number; the session
//! carries out the side effects each returned [`LevelChange`] calls for.

use crate::constants::{BOSS_LEVEL, THEMED_ARC_FIRST_LEVEL};
use crate::game_data::GameData;
use crate::spawner::is_themed_level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Normal,
    BossIntro,
    BossFight,
    BossVictory,
}

impl Stage {
    /// Asteroid, UFO and power-up spawning only runs in normal play.
    #[inline]
    pub fn spawning_enabled(self) -> bool {
        self == Stage::Normal
    }

    /// Score thresholds only move the level in normal play.
    #[inline]
    pub fn levels_up_on_score(self) -> bool {
        self == Stage::Normal
    }
}

/// A level transition the session must now carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelChange {
    /// A regular level; `themed` marks the post-boss arc.
    Normal { level: u32, themed: bool },
    /// Clear the field and bring in the boss.
    BossIntro { level: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Progression {
    pub stage: Stage,
    /// Level changes so far this playthrough.
    pub level_ups: u32,
}

impl Progression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score-driven level-up.  Does nothing outside normal play.
    pub fn level_up(&mut self, data: &mut GameData) -> Option<LevelChange> {
        if !self.stage.levels_up_on_score() {
            return None;
        }
        let next = data.level + 1;
        data.level = next;
        self.level_ups += 1;
        if next == BOSS_LEVEL {
            self.stage = Stage::BossIntro;
            Some(LevelChange::BossIntro { level: next })
        } else {
            Some(LevelChange::Normal {
                level: next,
                themed: is_themed_level(next),
            })
        }
    }

    /// The boss has been placed in the arena.
    pub fn boss_spawned(&mut self) -> bool {
        if self.stage != Stage::BossIntro {
            return false;
        }
        self.stage = Stage::BossFight;
        true
    }

    /// The boss has been beaten.
    pub fn boss_defeated(&mut self) -> bool {
        if self.stage != Stage::BossFight {
            return false;
        }
        self.stage = Stage::BossVictory;
        true
    }

    /// The victory sequence is over: continue with the themed arc.
    pub fn finish_boss_stage(&mut self, data: &mut GameData) -> Option<LevelChange> {
        if self.stage != Stage::BossVictory {
            return None;
        }
        self.stage = Stage::Normal;
        data.level = THEMED_ARC_FIRST_LEVEL;
        self.level_ups += 1;
        Some(LevelChange::Normal {
            level: THEMED_ARC_FIRST_LEVEL,
            themed: true,
        })
    }
}
