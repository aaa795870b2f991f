//! Player bullets.

use super::{Body, UpdateCtx};
use crate::constants::{BULLET_RADIUS, OFFSCREEN_MARGIN, STRONG_BULLET_RADIUS};

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub lifetime_ms: f32,
    /// Strong-laser rounds pass through smaller asteroids and UFOs.
    pub strong_laser: bool,
}

impl Bullet {
    pub fn new(lifetime_ms: f32, strong_laser: bool) -> Self {
        Self {
            lifetime_ms,
            strong_laser,
        }
    }

    /// Collision radius for this round.
    #[inline]
    pub fn radius(&self) -> f32 {
        if self.strong_laser {
            STRONG_BULLET_RADIUS
        } else {
            BULLET_RADIUS
        }
    }

    pub(super) fn update(&mut self, body: &mut Body, ctx: &mut UpdateCtx) {
        self.lifetime_ms -= ctx.delta_ms;
        if self.lifetime_ms <= 0.0 || body.is_outside(ctx.world, OFFSCREEN_MARGIN) {
            body.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tick(bullet: &mut Bullet, body: &mut Body, delta_ms: f32) {
        let mut rng = StdRng::seed_from_u64(0);
        let mut ctx = UpdateCtx {
            now: 0.0,
            delta_ms,
            world: Vec2::new(800.0, 600.0),
            rng: &mut rng,
        };
        bullet.update(body, &mut ctx);
    }

    #[test]
    fn expires_after_lifetime() {
        let mut bullet = Bullet::new(100.0, false);
        let mut body = Body::new(Vec2::new(400.0, 300.0), Vec2::ZERO, bullet.radius());
        tick(&mut bullet, &mut body, 60.0);
        assert!(!body.is_dead());
        tick(&mut bullet, &mut body, 60.0);
        assert!(body.is_dead());
    }

    #[test]
    fn destroyed_past_margin() {
        let mut bullet = Bullet::new(3000.0, true);
        let mut body = Body::new(Vec2::new(400.0, -51.0), Vec2::ZERO, bullet.radius());
        tick(&mut bullet, &mut body, 16.0);
        assert!(body.is_dead());
        assert_eq!(bullet.radius(), STRONG_BULLET_RADIUS);
    }
}
