//! Runtime gameplay configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors the tunable constants in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about.
//!
//! ## Usage
//!
//! Systems read it through `Res<GameConfig>`; the simulation core receives a
//! clone when a [`crate::session::GameSession`] is created, so edits take
//! effect on the next playthrough.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use std::path::Path;

use crate::constants::*;
use crate::error::{validate_positive, validate_range, GameError, GameResult};
use bevy::prelude::*;
use serde::Deserialize;

/// Default location of the tuning file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/game.toml";

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── World Bounds ─────────────────────────────────────────────────────────
    pub world_width: f32,
    pub world_height: f32,

    // ── Progression ──────────────────────────────────────────────────────────
    pub level_score_step: u32,

    // ── Spaceship ────────────────────────────────────────────────────────────
    pub ship_max_speed: f32,
    pub ship_fire_rate_ms: f32,
    pub ship_rapid_fire_rate_ms: f32,
    pub ship_invulnerable_ms: f32,
    pub ship_entrance_ms: f32,
    pub bullet_speed: f32,
    pub bullet_lifetime_ms: f32,

    // ── Power-ups ────────────────────────────────────────────────────────────
    pub power_up_lifetime_ms: f32,
    pub rapid_fire_ms: f32,
    pub shield_ms: f32,
    pub triple_shot_ms: f32,
    pub speed_boost_ms: f32,
    pub strong_laser_ms: f32,
    pub support_ships_ms: f32,
    /// When false, new power-up kinds never pause the game for a tutorial.
    pub tutorials_enabled: bool,

    // ── Spawning ─────────────────────────────────────────────────────────────
    pub asteroid_spawn_interval_ms: f32,
    pub asteroid_spawn_interval_step_ms: f32,
    pub asteroid_spawn_interval_min_ms: f32,
    pub power_up_spawn_interval_ms: f32,
    pub ufo_spawn_interval_ms: f32,

    // ── Boss ─────────────────────────────────────────────────────────────────
    pub boss_max_hp: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // World Bounds
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            // Progression
            level_score_step: LEVEL_SCORE_STEP,
            // Spaceship
            ship_max_speed: SHIP_MAX_SPEED,
            ship_fire_rate_ms: SHIP_FIRE_RATE_MS,
            ship_rapid_fire_rate_ms: SHIP_RAPID_FIRE_RATE_MS,
            ship_invulnerable_ms: SHIP_INVULNERABLE_MS,
            ship_entrance_ms: SHIP_ENTRANCE_MS,
            bullet_speed: BULLET_SPEED,
            bullet_lifetime_ms: BULLET_LIFETIME_MS,
            // Power-ups
            power_up_lifetime_ms: POWER_UP_LIFETIME_MS,
            rapid_fire_ms: RAPID_FIRE_MS,
            shield_ms: SHIELD_MS,
            triple_shot_ms: TRIPLE_SHOT_MS,
            speed_boost_ms: SPEED_BOOST_MS,
            strong_laser_ms: STRONG_LASER_MS,
            support_ships_ms: SUPPORT_SHIPS_MS,
            tutorials_enabled: true,
            // Spawning
            asteroid_spawn_interval_ms: ASTEROID_SPAWN_INTERVAL_MS,
            asteroid_spawn_interval_step_ms: ASTEROID_SPAWN_INTERVAL_STEP_MS,
            asteroid_spawn_interval_min_ms: ASTEROID_SPAWN_INTERVAL_MIN_MS,
            power_up_spawn_interval_ms: POWER_UP_SPAWN_INTERVAL_MS,
            ufo_spawn_interval_ms: UFO_SPAWN_INTERVAL_MS,
            // Boss
            boss_max_hp: BOSS_MAX_HP,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) TOML document on top of the defaults.
    pub fn from_toml_str(path: &Path, contents: &str) -> GameResult<Self> {
        toml::from_str::<GameConfig>(contents).map_err(|e| GameError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Read the tuning file at `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load_from_path(path: &Path) -> GameResult<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let loaded = Self::from_toml_str(path, &contents)?;
                loaded.validate()?;
                Ok(Some(loaded))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(GameError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Reject values that would stall or break the simulation.
    pub fn validate(&self) -> GameResult<()> {
        validate_positive("world_width", self.world_width)?;
        validate_positive("world_height", self.world_height)?;
        validate_positive("level_score_step", self.level_score_step as f32)?;
        validate_positive("ship_max_speed", self.ship_max_speed)?;
        validate_positive("ship_fire_rate_ms", self.ship_fire_rate_ms)?;
        validate_range(
            "ship_rapid_fire_rate_ms",
            self.ship_rapid_fire_rate_ms,
            1.0,
            self.ship_fire_rate_ms,
            "[1.0, ship_fire_rate_ms]",
        )?;
        validate_positive("bullet_speed", self.bullet_speed)?;
        validate_positive("bullet_lifetime_ms", self.bullet_lifetime_ms)?;
        validate_positive("power_up_lifetime_ms", self.power_up_lifetime_ms)?;
        validate_positive("asteroid_spawn_interval_ms", self.asteroid_spawn_interval_ms)?;
        validate_positive(
            "asteroid_spawn_interval_min_ms",
            self.asteroid_spawn_interval_min_ms,
        )?;
        validate_positive("power_up_spawn_interval_ms", self.power_up_spawn_interval_ms)?;
        validate_positive("ufo_spawn_interval_ms", self.ufo_spawn_interval_ms)?;
        validate_positive("boss_max_hp", self.boss_max_hp as f32)?;
        Ok(())
    }

    /// Playfield size as a vector.
    #[inline]
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  Parse or validation errors
/// are reported but do not abort the game.  A missing file is silently
/// ignored (defaults are already in place from `insert_resource`).
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = Path::new(CONFIG_PATH);
    match GameConfig::load_from_path(path) {
        Ok(Some(loaded)) => {
            *config = loaded;
            println!("✓ Loaded game config from {CONFIG_PATH}");
        }
        Ok(None) => {
            println!("ℹ No {CONFIG_PATH} found; using compiled defaults");
        }
        Err(e) => {
            eprintln!("⚠ {e}; using defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = GameConfig::from_toml_str(
            Path::new("test.toml"),
            "ship_max_speed = 250.0\ntutorials_enabled = false\n",
        )
        .unwrap();
        assert_eq!(cfg.ship_max_speed, 250.0);
        assert!(!cfg.tutorials_enabled);
        assert_eq!(cfg.bullet_speed, BULLET_SPEED);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = GameConfig::from_toml_str(Path::new("bad.toml"), "ship_max_speed = [")
            .unwrap_err();
        assert!(matches!(err, GameError::Parse { .. }));
    }

    #[test]
    fn rapid_fire_slower_than_base_is_rejected() {
        let cfg = GameConfig {
            ship_rapid_fire_rate_ms: 500.0,
            ..GameConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn missing_file_yields_none() {
        let got = GameConfig::load_from_path(Path::new("definitely/not/here.toml")).unwrap();
        assert!(got.is_none());
    }
}
