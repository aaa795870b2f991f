//! Tagged-variant actor model.
//!
//! Every non-player, non-boss object in the playfield is an [`Actor`]: a
//! shared [`Body`] (position, velocity, collision radius, liveness) plus an
//! [`ActorKind`] payload holding the kind-specific state.  Per-frame
//! behaviour is dispatched by matching on the kind.
//!
//! ## Lifecycle
//!
//! | Step | Owner |
//! |------|-------|
//! | spawn | [`crate::session::GameSession`] / [`crate::spawner`] |
//! | `update` (lifetime, wrap, off-screen) | the kind module |
//! | position integration | [`Body::integrate`], called by the session |
//! | destroy | `Body::destroy`, idempotent, takes effect immediately |
//! | removal | session cleanup at the end of the frame |

pub mod asteroid;
pub mod boss_projectile;
pub mod bullet;
pub mod power_up;
pub mod ufo;

use bevy::math::Vec2;
use rand::rngs::StdRng;

pub use asteroid::{Asteroid, AsteroidSize};
pub use boss_projectile::{BossProjectile, BossProjectileKind};
pub use bullet::Bullet;
pub use power_up::{PowerUp, PowerUpKind};
pub use ufo::Ufo;

/// Stable handle for an actor within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u32);

/// Fade-out in progress: the actor is inert and disappears when it ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    /// Time left before the fade starts.
    pub delay_ms: f32,
    /// Time left in the fade itself.
    pub remaining_ms: f32,
    pub duration_ms: f32,
}

impl Fade {
    pub fn new(delay_ms: f32, duration_ms: f32) -> Self {
        Self {
            delay_ms: delay_ms.max(0.0),
            remaining_ms: duration_ms.max(0.0),
            duration_ms: duration_ms.max(0.0),
        }
    }

    /// Advance the fade; returns `true` once it has finished.
    pub fn advance(&mut self, delta_ms: f32) -> bool {
        let mut left = delta_ms;
        if self.delay_ms > 0.0 {
            let used = left.min(self.delay_ms);
            self.delay_ms -= used;
            left -= used;
        }
        self.remaining_ms = (self.remaining_ms - left).max(0.0);
        self.delay_ms <= 0.0 && self.remaining_ms <= 0.0
    }

    /// Render opacity, 1 → 0 over the fade.
    pub fn alpha(&self) -> f32 {
        if self.delay_ms > 0.0 || self.duration_ms <= 0.0 {
            1.0
        } else {
            self.remaining_ms / self.duration_ms
        }
    }
}

/// Transform and physics state shared by every actor kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Sprite rotation in radians (visual only).
    pub rotation: f32,
    pub fade: Option<Fade>,
    dead: bool,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            rotation: 0.0,
            fade: None,
            dead: false,
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Mark the body dead.  Safe to call more than once.
    #[inline]
    pub fn destroy(&mut self) {
        self.dead = true;
    }

    /// Alive and not fading out.
    #[inline]
    pub fn is_collidable(&self) -> bool {
        !self.dead && self.fade.is_none()
    }

    /// Start fading out unless a fade is already running.
    pub fn fade_out(&mut self, delay_ms: f32, duration_ms: f32) {
        if self.fade.is_none() {
            self.fade = Some(Fade::new(delay_ms, duration_ms));
        }
    }

    /// Circle-vs-circle overlap test.
    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        let reach = self.radius + other.radius;
        self.pos.distance_squared(other.pos) <= reach * reach
    }

    /// Move by the current velocity over `delta_ms`.
    #[inline]
    pub fn integrate(&mut self, delta_ms: f32) {
        self.pos += self.vel * (delta_ms / 1000.0);
    }

    /// True once the body is further than `margin` outside the playfield.
    pub fn is_outside(&self, world: Vec2, margin: f32) -> bool {
        self.pos.x < -margin
            || self.pos.x > world.x + margin
            || self.pos.y < -margin
            || self.pos.y > world.y + margin
    }
}

/// Frame inputs handed to every actor update.
pub struct UpdateCtx<'a> {
    /// Session clock (ms) at the start of the frame.
    pub now: f64,
    pub delta_ms: f32,
    /// Playfield size.
    pub world: Vec2,
    pub rng: &'a mut StdRng,
}

impl UpdateCtx<'_> {
    #[inline]
    pub fn delta_secs(&self) -> f32 {
        self.delta_ms / 1000.0
    }
}

/// Kind-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ActorKind {
    Asteroid(Asteroid),
    Bullet(Bullet),
    PowerUp(PowerUp),
    Ufo(Ufo),
    BossProjectile(BossProjectile),
}

/// Payload-free discriminant, handy for counting and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorTag {
    Asteroid,
    Bullet,
    PowerUp,
    Ufo,
    BossProjectile,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub id: ActorId,
    pub body: Body,
    pub kind: ActorKind,
}

impl Actor {
    pub fn tag(&self) -> ActorTag {
        match self.kind {
            ActorKind::Asteroid(_) => ActorTag::Asteroid,
            ActorKind::Bullet(_) => ActorTag::Bullet,
            ActorKind::PowerUp(_) => ActorTag::PowerUp,
            ActorKind::Ufo(_) => ActorTag::Ufo,
            ActorKind::BossProjectile(_) => ActorTag::BossProjectile,
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.body.is_dead()
    }

    /// Per-frame behaviour.  A dead actor does nothing.
    pub fn update(&mut self, ctx: &mut UpdateCtx) {
        if self.body.is_dead() {
            return;
        }
        if let Some(fade) = self.body.fade.as_mut() {
            if fade.advance(ctx.delta_ms) {
                self.body.destroy();
                return;
            }
        }
        match &mut self.kind {
            ActorKind::Asteroid(asteroid) => asteroid.update(&mut self.body, ctx),
            ActorKind::Bullet(bullet) => bullet.update(&mut self.body, ctx),
            ActorKind::PowerUp(power_up) => power_up.update(&mut self.body, ctx),
            ActorKind::Ufo(ufo) => ufo.update(&mut self.body, ctx),
            ActorKind::BossProjectile(projectile) => projectile.update(&mut self.body, ctx),
        }
    }

    pub fn as_asteroid(&self) -> Option<&Asteroid> {
        match &self.kind {
            ActorKind::Asteroid(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_bullet(&self) -> Option<&Bullet> {
        match &self.kind {
            ActorKind::Bullet(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_power_up(&self) -> Option<&PowerUp> {
        match &self.kind {
            ActorKind::PowerUp(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_ufo(&self) -> Option<&Ufo> {
        match &self.kind {
            ActorKind::Ufo(u) => Some(u),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn destroy_is_idempotent_and_blocks_collisions() {
        let mut body = Body::new(Vec2::ZERO, Vec2::ZERO, 5.0);
        assert!(body.is_collidable());
        body.destroy();
        body.destroy();
        assert!(body.is_dead());
        assert!(!body.is_collidable());
    }

    #[test]
    fn overlap_uses_radius_sum() {
        let a = Body::new(Vec2::ZERO, Vec2::ZERO, 5.0);
        let b = Body::new(Vec2::new(10.0, 0.0), Vec2::ZERO, 5.0);
        let c = Body::new(Vec2::new(10.1, 0.0), Vec2::ZERO, 5.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn fade_waits_for_delay_then_finishes() {
        let mut fade = Fade::new(100.0, 200.0);
        assert!(!fade.advance(100.0));
        assert_eq!(fade.alpha(), 1.0);
        assert!(!fade.advance(100.0));
        assert!((fade.alpha() - 0.5).abs() < 1e-6);
        assert!(fade.advance(100.0));
    }

    #[test]
    fn fading_actor_is_inert_then_removed() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut actor = Actor {
            id: ActorId(1),
            body: Body::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 12.0),
            kind: ActorKind::Asteroid(Asteroid::new(AsteroidSize::Small, &mut rng)),
        };
        actor.body.fade_out(0.0, 50.0);
        assert!(!actor.body.is_collidable());
        let mut ctx = UpdateCtx {
            now: 0.0,
            delta_ms: 60.0,
            world: Vec2::new(800.0, 600.0),
            rng: &mut rng,
        };
        actor.update(&mut ctx);
        assert!(actor.is_dead());
    }
}
