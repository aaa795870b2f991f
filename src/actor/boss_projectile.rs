//! Projectiles fired by the boss.

use super::{Body, UpdateCtx};
use crate::constants::{BOSS_BULLET_MARGIN, BOSS_BULLET_RADIUS, BOSS_ROCKET_RADIUS, OFFSCREEN_MARGIN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BossProjectileKind {
    /// Falls straight down.
    Rocket,
    /// Aimed at the ship when fired.
    Bullet,
}

impl BossProjectileKind {
    pub fn radius(self) -> f32 {
        match self {
            BossProjectileKind::Rocket => BOSS_ROCKET_RADIUS,
            BossProjectileKind::Bullet => BOSS_BULLET_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BossProjectile {
    pub kind: BossProjectileKind,
}

impl BossProjectile {
    pub fn new(kind: BossProjectileKind) -> Self {
        Self { kind }
    }

    pub(super) fn update(&mut self, body: &mut Body, ctx: &mut UpdateCtx) {
        let gone = match self.kind {
            BossProjectileKind::Rocket => body.pos.y > ctx.world.y + OFFSCREEN_MARGIN,
            BossProjectileKind::Bullet => body.is_outside(ctx.world, BOSS_BULLET_MARGIN),
        };
        if gone {
            body.destroy();
        }
    }
}
