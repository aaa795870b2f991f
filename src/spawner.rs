//! Spawn timers and difficulty formulas.
//!
//! Three accumulators run side by side.  When one reaches its interval a
//! single spawn is requested and the accumulator restarts from zero; any
//! overshoot is dropped.

use crate::config::GameConfig;
use crate::constants::{
    INITIAL_ASTEROIDS_BASE, THEMED_ARC_FIRST_LEVEL, THEMED_ARC_LAST_LEVEL, UFO_MIN_LEVEL,
};

/// Something the spawner wants created this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnRequest {
    Asteroid,
    PowerUp,
    Ufo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    pub asteroid_timer_ms: f32,
    pub power_up_timer_ms: f32,
    pub ufo_timer_ms: f32,
    pub asteroid_interval_ms: f32,
    pub power_up_interval_ms: f32,
    /// `None` while UFOs are locked for the current level.
    pub ufo_interval_ms: Option<f32>,
    base_asteroid_ms: f32,
    asteroid_step_ms: f32,
    asteroid_min_ms: f32,
    base_power_up_ms: f32,
    base_ufo_ms: f32,
}

impl Spawner {
    pub fn new(config: &GameConfig) -> Self {
        let mut spawner = Self {
            asteroid_timer_ms: 0.0,
            power_up_timer_ms: 0.0,
            ufo_timer_ms: 0.0,
            asteroid_interval_ms: config.asteroid_spawn_interval_ms,
            power_up_interval_ms: config.power_up_spawn_interval_ms,
            ufo_interval_ms: None,
            base_asteroid_ms: config.asteroid_spawn_interval_ms,
            asteroid_step_ms: config.asteroid_spawn_interval_step_ms,
            asteroid_min_ms: config.asteroid_spawn_interval_min_ms,
            base_power_up_ms: config.power_up_spawn_interval_ms,
            base_ufo_ms: config.ufo_spawn_interval_ms,
        };
        spawner.apply_level(1);
        spawner
    }

    /// Recompute every interval for `level`.
    ///
    /// The asteroid interval loses one step per level above 1.
    pub fn apply_level(&mut self, level: u32) {
        self.asteroid_interval_ms = asteroid_interval_ms(
            level,
            self.base_asteroid_ms,
            self.asteroid_step_ms,
            self.asteroid_min_ms,
        );
        self.power_up_interval_ms = power_up_interval_ms(level, self.base_power_up_ms);
        self.ufo_interval_ms = ufo_interval_ms(level, self.base_ufo_ms);
    }

    /// Zero all accumulators.
    pub fn reset_timers(&mut self) {
        self.asteroid_timer_ms = 0.0;
        self.power_up_timer_ms = 0.0;
        self.ufo_timer_ms = 0.0;
    }

    /// Advance the accumulators and collect due spawns.
    pub fn tick(&mut self, delta_ms: f32) -> Vec<SpawnRequest> {
        let mut due = Vec::new();

        self.asteroid_timer_ms += delta_ms;
        if self.asteroid_timer_ms >= self.asteroid_interval_ms {
            self.asteroid_timer_ms = 0.0;
            due.push(SpawnRequest::Asteroid);
        }

        self.power_up_timer_ms += delta_ms;
        if self.power_up_timer_ms >= self.power_up_interval_ms {
            self.power_up_timer_ms = 0.0;
            due.push(SpawnRequest::PowerUp);
        }

        if let Some(interval) = self.ufo_interval_ms {
            self.ufo_timer_ms += delta_ms;
            if self.ufo_timer_ms >= interval {
                self.ufo_timer_ms = 0.0;
                due.push(SpawnRequest::Ufo);
            }
        }

        due
    }
}

/// Levels 6–10, the themed stretch after the boss.
#[inline]
pub fn is_themed_level(level: u32) -> bool {
    (THEMED_ARC_FIRST_LEVEL..=THEMED_ARC_LAST_LEVEL).contains(&level)
}

pub fn asteroid_interval_ms(level: u32, base: f32, step: f32, min: f32) -> f32 {
    (base - level.saturating_sub(1) as f32 * step).max(min)
}

/// UFO interval for `level`, or `None` below the UFO level.
///
/// * levels 2–3: `max(5000, base − (level−2)·500)`
/// * levels 6–10: `max(6000, base − (level−6)·400)`
/// * everything else: `max(3000, base − 1000 − (level−4)·750)`
pub fn ufo_interval_ms(level: u32, base: f32) -> Option<f32> {
    if level < UFO_MIN_LEVEL {
        return None;
    }
    let interval = if level <= 3 {
        (base - (level - 2) as f32 * 500.0).max(5000.0)
    } else if is_themed_level(level) {
        (base - (level - THEMED_ARC_FIRST_LEVEL) as f32 * 400.0).max(6000.0)
    } else {
        (base - 1000.0 - level.saturating_sub(4) as f32 * 750.0).max(3000.0)
    };
    Some(interval)
}

/// Power-up interval: constant except in the themed arc.
pub fn power_up_interval_ms(level: u32, base: f32) -> f32 {
    if is_themed_level(level) {
        (base - (level - THEMED_ARC_FIRST_LEVEL) as f32 * 400.0).max(6000.0)
    } else {
        base
    }
}

/// Asteroids placed when a level loads.
#[inline]
pub fn initial_asteroid_count(level: u32) -> u32 {
    INITIAL_ASTEROIDS_BASE + level / 2
}
