//! Collision resolution rules.
//!
//! Each function decides what an overlap between two actors *means*; it does
//! not touch any state.  The session checks both participants are still live,
//! asks the matching rule for an outcome and applies it in full before the
//! next pair is looked at.
//!
//! | Pair | Outcome |
//! |------|---------|
//! | ship × asteroid/UFO, shielded | enemy destroyed, no damage |
//! | ship × asteroid/UFO | enemy destroyed, ship −1 |
//! | normal bullet × asteroid | bullet consumed, asteroid −1 |
//! | strong bullet × large asteroid | bullet survives, asteroid destroyed |
//! | strong bullet × small/medium asteroid | bullet survives, asteroid −1, velocity kept |
//! | normal bullet × UFO | bullet consumed, UFO −1 |
//! | strong bullet × UFO | bullet survives, UFO destroyed |
//! | bullet × boss | bullet consumed, boss −1, hit points awarded |
//! | ship × boss projectile | projectile destroyed, ship −1 unless shielded |
//! | bullet × boss projectile | both destroyed, points awarded |

use crate::actor::AsteroidSize;
use crate::constants::{BOSS_HIT_SCORE, BOSS_PROJECTILE_SCORE};

/// What happens to the player's bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletFate {
    Consumed,
    PassesThrough,
}

/// What happens to the thing the bullet hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetHit {
    /// Subtract health; the target dies if it reaches zero.
    Damage(u32),
    /// Destroy regardless of remaining health.
    Destroy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulletOutcome {
    pub bullet: BulletFate,
    pub target: TargetHit,
    /// Points awarded for the hit itself, independent of any kill.
    pub hit_score: u32,
    /// The target's velocity must be the same after the hit as before.
    pub preserve_velocity: bool,
}

/// Outcome of the ship touching something hostile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RamOutcome {
    /// Damage to deal to the ship (it may still ignore it while invulnerable).
    pub ship_damage: u32,
    /// The shield took the hit.
    pub shield_absorbed: bool,
    /// The hostile is destroyed.
    pub destroy_other: bool,
}

pub fn bullet_vs_asteroid(strong_laser: bool, size: AsteroidSize) -> BulletOutcome {
    match (strong_laser, size) {
        (true, AsteroidSize::Large) => BulletOutcome {
            bullet: BulletFate::PassesThrough,
            target: TargetHit::Destroy,
            hit_score: 0,
            preserve_velocity: false,
        },
        (true, _) => BulletOutcome {
            bullet: BulletFate::PassesThrough,
            target: TargetHit::Damage(1),
            hit_score: 0,
            preserve_velocity: true,
        },
        (false, _) => BulletOutcome {
            bullet: BulletFate::Consumed,
            target: TargetHit::Damage(1),
            hit_score: 0,
            preserve_velocity: false,
        },
    }
}

pub fn bullet_vs_ufo(strong_laser: bool) -> BulletOutcome {
    if strong_laser {
        BulletOutcome {
            bullet: BulletFate::PassesThrough,
            target: TargetHit::Destroy,
            hit_score: 0,
            preserve_velocity: false,
        }
    } else {
        BulletOutcome {
            bullet: BulletFate::Consumed,
            target: TargetHit::Damage(1),
            hit_score: 0,
            preserve_velocity: false,
        }
    }
}

/// Every bullet is stopped by the boss, strong laser included.
pub fn bullet_vs_boss() -> BulletOutcome {
    BulletOutcome {
        bullet: BulletFate::Consumed,
        target: TargetHit::Damage(1),
        hit_score: BOSS_HIT_SCORE,
        preserve_velocity: false,
    }
}

pub fn bullet_vs_boss_projectile() -> BulletOutcome {
    BulletOutcome {
        bullet: BulletFate::Consumed,
        target: TargetHit::Destroy,
        hit_score: BOSS_PROJECTILE_SCORE,
        preserve_velocity: false,
    }
}

/// Ship rams an asteroid or UFO.
pub fn ship_vs_enemy(shield_active: bool) -> RamOutcome {
    RamOutcome {
        ship_damage: if shield_active { 0 } else { 1 },
        shield_absorbed: shield_active,
        destroy_other: true,
    }
}

/// Ship is struck by a boss rocket or bullet.
pub fn ship_vs_boss_projectile(shield_active: bool) -> RamOutcome {
    ship_vs_enemy(shield_active)
}
