//! Centralised gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::GameConfig`] mirrors the ones worth tuning at runtime and
//! uses these as its defaults.
//!
//! ## Units
//!
//! Distances are screen units on an 800 × 600 playfield (origin top-left,
//! +y downward).  Speeds are units per second.  Durations and intervals are
//! milliseconds of simulated time.

// ── World Bounds ──────────────────────────────────────────────────────────────

/// Playfield width in screen units.
pub const WORLD_WIDTH: f32 = 800.0;

/// Playfield height in screen units.
pub const WORLD_HEIGHT: f32 = 600.0;

/// Distance outside the screen edge where asteroids and UFOs are spawned.
///
/// Also used as the wrap margin for asteroids and the off-screen kill margin
/// for bullets, UFOs and boss rockets.
pub const OFFSCREEN_MARGIN: f32 = 50.0;

/// Wider off-screen kill margin used by directed boss bullets.
pub const BOSS_BULLET_MARGIN: f32 = 100.0;

// ── Session ───────────────────────────────────────────────────────────────────

/// Lives (and ship health) at the start of every playthrough.
pub const STARTING_LIVES: u32 = 3;

/// Score needed per level: a level-up is due once `score ≥ level × this`.
pub const LEVEL_SCORE_STEP: u32 = 1000;

// ── Spaceship ─────────────────────────────────────────────────────────────────

pub const SHIP_RADIUS: f32 = 12.0;
pub const SHIP_MAX_HEALTH: u32 = 3;

/// Invulnerability window after a non-fatal hit.
pub const SHIP_INVULNERABLE_MS: f32 = 1000.0;

/// Base top speed.  Speed boost doubles it while active.
pub const SHIP_MAX_SPEED: f32 = 200.0;

/// Velocity multiplier applied each frame while the ship is controllable.
pub const SHIP_FRICTION: f32 = 0.95;

/// Minimum time between shots without rapid fire.
pub const SHIP_FIRE_RATE_MS: f32 = 200.0;

/// Minimum time between shots while rapid fire is active.
pub const SHIP_RAPID_FIRE_RATE_MS: f32 = 100.0;

/// Distance above the ship centre where bullets appear.
pub const SHIP_MUZZLE_OFFSET: f32 = 20.0;

/// Duration of the scripted entrance animation; input is ignored meanwhile.
pub const SHIP_ENTRANCE_MS: f32 = 1500.0;

/// Resting position of the ship above the bottom edge once the entrance ends.
pub const SHIP_SPAWN_BOTTOM_OFFSET: f32 = 100.0;

/// Triple shot spread angles (degrees, 0 = straight up).
pub const TRIPLE_SHOT_ANGLES_DEG: [f32; 3] = [-25.0, 0.0, 25.0];

/// Horizontal muzzle spacing between triple-shot bullets.
pub const TRIPLE_SHOT_SPACING: f32 = 12.0;

/// Horizontal distance of each support-ship escort from the player.
pub const SUPPORT_SHIP_OFFSET: f32 = 40.0;

// ── Bullets ───────────────────────────────────────────────────────────────────

pub const BULLET_SPEED: f32 = 400.0;
pub const BULLET_LIFETIME_MS: f32 = 3000.0;
pub const BULLET_RADIUS: f32 = 6.0;

/// Strong-laser bullets are larger and use the pass-through collision rules.
pub const STRONG_BULLET_RADIUS: f32 = 8.0;

// ── Asteroids ─────────────────────────────────────────────────────────────────

/// Speed range for split offspring, fired in a random direction.
pub const ASTEROID_CHILD_SPEED_MIN: f32 = 50.0;
pub const ASTEROID_CHILD_SPEED_MAX: f32 = 150.0;

/// Speed range for freshly spawned asteroids before level scaling.
pub const ASTEROID_SPAWN_SPEED_MIN: f32 = 50.0;
pub const ASTEROID_SPAWN_SPEED_MAX: f32 = 150.0;

/// Per-level speed bonus: spawn speed is multiplied by `1 + level × this`.
pub const ASTEROID_SPEED_PER_LEVEL: f32 = 0.1;

/// How long an asteroid flashes after taking non-fatal damage.
pub const ASTEROID_FLASH_MS: f32 = 100.0;

// ── Power-ups ─────────────────────────────────────────────────────────────────

pub const POWER_UP_RADIUS: f32 = 8.0;
pub const POWER_UP_LIFETIME_MS: f32 = 10_000.0;

/// Inset from every screen edge for power-up spawn positions.
pub const POWER_UP_SPAWN_INSET: f32 = 50.0;

/// Vertical bob amplitude (units per second at peak).
pub const POWER_UP_BOB_AMOUNT: f32 = 10.0;

/// Level from which napalm and support ships join the catalog.
pub const POWER_UP_EXPANDED_LEVEL: u32 = 3;

pub const RAPID_FIRE_MS: f32 = 10_000.0;
pub const SHIELD_MS: f32 = 20_000.0;
pub const TRIPLE_SHOT_MS: f32 = 20_000.0;
pub const SPEED_BOOST_MS: f32 = 20_000.0;
pub const STRONG_LASER_MS: f32 = 20_000.0;
pub const SUPPORT_SHIPS_MS: f32 = 15_000.0;

/// Delay between a new power-up kind spawning and its tutorial opening.
pub const TUTORIAL_DELAY_MS: f32 = 500.0;

// ── UFOs ──────────────────────────────────────────────────────────────────────

pub const UFO_RADIUS: f32 = 12.0;
pub const UFO_HEALTH: u32 = 2;
pub const UFO_SCORE: u32 = 200;
pub const UFO_SPEED: f32 = 150.0;

/// Length of one horizontal sweep before the UFO turns or re-aims.
pub const UFO_MOVE_PHASE_MS: f32 = 5000.0;

/// Probability that a UFO re-aims toward the far side instead of reversing.
pub const UFO_REAIM_CHANCE: f64 = 0.3;

pub const UFO_BOB_AMOUNT: f32 = 20.0;

/// UFOs never spawn below this level.
pub const UFO_MIN_LEVEL: u32 = 2;

// ── Spawning ──────────────────────────────────────────────────────────────────

pub const ASTEROID_SPAWN_INTERVAL_MS: f32 = 2000.0;

/// Asteroid interval reduction applied on every level-up.
pub const ASTEROID_SPAWN_INTERVAL_STEP_MS: f32 = 100.0;

/// The asteroid interval never drops below this floor.
pub const ASTEROID_SPAWN_INTERVAL_MIN_MS: f32 = 500.0;

pub const POWER_UP_SPAWN_INTERVAL_MS: f32 = 8000.0;
pub const UFO_SPAWN_INTERVAL_MS: f32 = 10_000.0;

/// Asteroids placed at every stage load: `base + level / 2`.
pub const INITIAL_ASTEROIDS_BASE: u32 = 5;

// ── Stage Progression ─────────────────────────────────────────────────────────

/// Reaching this level starts the boss stage instead of a normal level.
pub const BOSS_LEVEL: u32 = 5;

/// First and last level of the themed arc that follows the boss.
pub const THEMED_ARC_FIRST_LEVEL: u32 = 6;
pub const THEMED_ARC_LAST_LEVEL: u32 = 10;

/// Total span over which actors fade out when the boss intro starts.
pub const BOSS_INTRO_FADE_MS: f32 = 1500.0;

/// Delay between the boss intro starting and the boss spawning.
pub const BOSS_INTRO_DELAY_MS: f32 = 2000.0;

/// Delay between the boss dying and the themed arc starting.
pub const BOSS_VICTORY_DELAY_MS: f32 = 3000.0;

/// Fade duration for asteroids cleared by a level change.
pub const LEVEL_FADE_MS: f32 = 500.0;

/// Stagger between consecutive asteroids in a level-change fade wave.
pub const LEVEL_FADE_STAGGER_MS: f32 = 50.0;

// ── Boss ──────────────────────────────────────────────────────────────────────

pub const BOSS_MAX_HP: u32 = 30;
pub const BOSS_RADIUS: f32 = 40.0;

/// Aggressive phase begins once `current_hp ≤ max_hp × this`.
pub const BOSS_AGGRESSIVE_HP_FRACTION: f32 = 0.25;

pub const BOSS_APPEAR_MS: f32 = 3000.0;
pub const BOSS_APPEAR_START_Y: f32 = -100.0;

/// The boss settles this far above the screen's vertical centre.
pub const BOSS_HOVER_OFFSET: f32 = 100.0;

/// Points for every bullet that lands on the boss.
pub const BOSS_HIT_SCORE: u32 = 10;

/// Bonus for defeating the boss.
pub const BOSS_DEFEAT_SCORE: u32 = 1000;

/// Delay between defeat and the boss being removed.
pub const BOSS_DEATH_MS: f32 = 3000.0;

/// Movement is applied on a fixed tick rather than per frame.
pub const BOSS_MOVE_TICK_MS: f32 = 100.0;

/// Segment-timer progress per movement tick.
pub const BOSS_SEGMENT_TICK: f32 = 16.0;
pub const BOSS_SEGMENT_COUNT: u32 = 4;

/// Horizontal travel bounds, inset from both screen edges.
pub const BOSS_BOUNDS_INSET_X: f32 = 100.0;
pub const BOSS_MIN_Y: f32 = 100.0;

pub const BOSS_ROCKET_RADIUS: f32 = 8.0;
pub const BOSS_BULLET_RADIUS: f32 = 16.0;
pub const BOSS_BULLET_SPEED: f32 = 200.0;

/// Points for shooting down a boss projectile.
pub const BOSS_PROJECTILE_SCORE: u32 = 50;
