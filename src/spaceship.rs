//! The player's ship: movement, firing, health and power-up timers.
//!
//! Health is the only source of truth for lives; the session copies it into
//! [`crate::game_data::GameData::lives`] after every damage or heal event.

use crate::actor::{Body, PowerUpKind};
use crate::config::GameConfig;
use crate::constants::*;
use crate::effects;
use crate::timer::EffectTimer;
use bevy::math::Vec2;

/// Independent timers for every timed power-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PowerUpTimers {
    pub rapid_fire: EffectTimer,
    pub shield: EffectTimer,
    pub speed_boost: EffectTimer,
    pub strong_laser: EffectTimer,
    pub triple_shot: EffectTimer,
    pub support_ships: EffectTimer,
}

/// Outcome of [`Spaceship::take_damage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageResult {
    /// Invulnerable or already destroyed; nothing changed.
    Ignored,
    /// Health dropped but the ship survives.
    Damaged,
    /// Health reached zero.
    Destroyed,
}

/// A bullet the ship wants spawned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub pos: Vec2,
    pub vel: Vec2,
    pub strong_laser: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Entrance {
    elapsed_ms: f32,
    duration_ms: f32,
    from: Vec2,
    to: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spaceship {
    pub body: Body,
    pub health: u32,
    pub max_health: u32,
    /// Invulnerability time left; the ship ignores damage while positive.
    pub invulnerable_ms: f32,
    /// False while the entrance animation plays.
    pub can_control: bool,
    pub base_max_speed: f32,
    pub max_speed: f32,
    pub base_fire_rate_ms: f32,
    pub fire_rate_ms: f32,
    pub bullet_speed: f32,
    pub bullet_lifetime_ms: f32,
    pub timers: PowerUpTimers,
    invulnerable_window_ms: f32,
    last_shot_at: Option<f64>,
    entrance: Option<Entrance>,
}

impl Spaceship {
    /// A ship below the bottom edge, about to fly in.
    pub fn new(config: &GameConfig) -> Self {
        let world = config.world_size();
        let to = Vec2::new(world.x * 0.5, world.y - SHIP_SPAWN_BOTTOM_OFFSET);
        let from = Vec2::new(world.x * 0.5, world.y + OFFSCREEN_MARGIN);
        let entrance = (config.ship_entrance_ms > 0.0).then_some(Entrance {
            elapsed_ms: 0.0,
            duration_ms: config.ship_entrance_ms,
            from,
            to,
        });
        Self {
            body: Body::new(if entrance.is_some() { from } else { to }, Vec2::ZERO, SHIP_RADIUS),
            health: SHIP_MAX_HEALTH,
            max_health: SHIP_MAX_HEALTH,
            invulnerable_ms: 0.0,
            can_control: entrance.is_none(),
            base_max_speed: config.ship_max_speed,
            max_speed: config.ship_max_speed,
            base_fire_rate_ms: config.ship_fire_rate_ms,
            fire_rate_ms: config.ship_fire_rate_ms,
            bullet_speed: config.bullet_speed,
            bullet_lifetime_ms: config.bullet_lifetime_ms,
            timers: PowerUpTimers::default(),
            invulnerable_window_ms: config.ship_invulnerable_ms,
            last_shot_at: None,
            entrance,
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.body.is_dead()
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ms > 0.0
    }

    #[inline]
    pub fn in_entrance(&self) -> bool {
        self.entrance.is_some()
    }

    #[inline]
    pub fn shield_active(&self) -> bool {
        self.timers.shield.is_active()
    }

    #[inline]
    pub fn rapid_fire_active(&self) -> bool {
        self.timers.rapid_fire.is_active()
    }

    #[inline]
    pub fn strong_laser_active(&self) -> bool {
        self.timers.strong_laser.is_active()
    }

    #[inline]
    pub fn triple_shot_active(&self) -> bool {
        self.timers.triple_shot.is_active()
    }

    #[inline]
    pub fn support_ships_active(&self) -> bool {
        self.timers.support_ships.is_active()
    }

    /// Lose `amount` health unless invulnerable or already destroyed.
    ///
    /// A surviving ship becomes invulnerable for the configured window.
    pub fn take_damage(&mut self, amount: u32) -> DamageResult {
        if self.is_dead() || self.is_invulnerable() {
            return DamageResult::Ignored;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.body.destroy();
            DamageResult::Destroyed
        } else {
            self.invulnerable_ms = self.invulnerable_window_ms;
            DamageResult::Damaged
        }
    }

    /// Restore health, clamped to the maximum.
    pub fn heal(&mut self, amount: u32) {
        if self.is_dead() {
            return;
        }
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    /// Per-frame bookkeeping: invulnerability, entrance, friction, effect expiry.
    ///
    /// Returns the power-ups that ran out this frame.
    pub fn update(&mut self, now: f64, delta_ms: f32) -> Vec<PowerUpKind> {
        if self.is_dead() {
            return Vec::new();
        }
        self.invulnerable_ms = (self.invulnerable_ms - delta_ms).max(0.0);

        if let Some(entrance) = self.entrance.as_mut() {
            entrance.elapsed_ms += delta_ms;
            let t = (entrance.elapsed_ms / entrance.duration_ms).clamp(0.0, 1.0);
            self.body.pos = entrance.from.lerp(entrance.to, t);
            self.body.vel = Vec2::ZERO;
            if t >= 1.0 {
                self.entrance = None;
                self.can_control = true;
            }
        } else if self.can_control {
            self.body.vel *= SHIP_FRICTION;
        }

        effects::expire(self, now)
    }

    /// Turn directional intent into a velocity command.
    ///
    /// Left wins over right and up over down.  Ignored without control.
    pub fn steer(&mut self, up: bool, down: bool, left: bool, right: bool) {
        if !self.can_control || self.is_dead() {
            return;
        }
        if left {
            self.body.vel.x = -self.max_speed;
        } else if right {
            self.body.vel.x = self.max_speed;
        }
        if up {
            self.body.vel.y = -self.max_speed;
        } else if down {
            self.body.vel.y = self.max_speed;
        }
    }

    /// Keep the ship fully inside the playfield.
    pub fn clamp_to_world(&mut self, world: Vec2) {
        if self.in_entrance() {
            return;
        }
        let r = self.body.radius;
        self.body.pos = self
            .body
            .pos
            .clamp(Vec2::splat(r), (world - Vec2::splat(r)).max(Vec2::splat(r)));
    }

    /// Fire if the rate limit allows; returns the bullets to spawn.
    pub fn fire(&mut self, now: f64) -> Vec<Shot> {
        if self.is_dead() || !self.can_control {
            return Vec::new();
        }
        if let Some(last) = self.last_shot_at {
            if now - last < self.fire_rate_ms as f64 {
                return Vec::new();
            }
        }
        self.last_shot_at = Some(now);

        let strong = self.strong_laser_active();
        let muzzle = self.body.pos - Vec2::new(0.0, SHIP_MUZZLE_OFFSET);
        let mut shots = Vec::with_capacity(5);
        if self.triple_shot_active() {
            for (i, angle) in TRIPLE_SHOT_ANGLES_DEG.iter().enumerate() {
                let offset = (i as f32 - 1.0) * TRIPLE_SHOT_SPACING;
                shots.push(Shot {
                    pos: muzzle + Vec2::new(offset, 0.0),
                    vel: heading(*angle) * self.bullet_speed,
                    strong_laser: strong,
                });
            }
        } else {
            shots.push(Shot {
                pos: muzzle,
                vel: heading(0.0) * self.bullet_speed,
                strong_laser: strong,
            });
        }
        if self.support_ships_active() {
            for side in [-1.0, 1.0] {
                shots.push(Shot {
                    pos: muzzle + Vec2::new(side * SUPPORT_SHIP_OFFSET, 0.0),
                    vel: heading(0.0) * self.bullet_speed,
                    strong_laser: false,
                });
            }
        }
        shots
    }

    /// Escort positions while support ships are active.
    pub fn support_positions(&self) -> Option<[Vec2; 2]> {
        self.support_ships_active().then(|| {
            [
                self.body.pos - Vec2::new(SUPPORT_SHIP_OFFSET, 0.0),
                self.body.pos + Vec2::new(SUPPORT_SHIP_OFFSET, 0.0),
            ]
        })
    }
}

/// Unit vector for a firing angle in degrees, 0 = straight up (-y).
fn heading(angle_deg: f32) -> Vec2 {
    let a = angle_deg.to_radians();
    Vec2::new(a.sin(), -a.cos())
}
