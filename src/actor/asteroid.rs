//! Asteroids: three sizes, split on destruction, wrap around the screen.

use super::{Body, UpdateCtx};
use crate::constants::*;
use bevy::math::Vec2;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    pub const ALL: [AsteroidSize; 3] = [AsteroidSize::Large, AsteroidSize::Medium, AsteroidSize::Small];

    pub fn radius(self) -> f32 {
        match self {
            AsteroidSize::Large => 24.0,
            AsteroidSize::Medium => 16.0,
            AsteroidSize::Small => 12.0,
        }
    }

    pub fn max_health(self) -> u32 {
        match self {
            AsteroidSize::Large => 3,
            AsteroidSize::Medium => 2,
            AsteroidSize::Small => 1,
        }
    }

    /// Points for destroying one.  Smaller targets pay more.
    pub fn score(self) -> u32 {
        match self {
            AsteroidSize::Large => 20,
            AsteroidSize::Medium => 50,
            AsteroidSize::Small => 100,
        }
    }

    /// Spin magnitude in radians per second.
    pub fn spin_speed(self) -> f32 {
        match self {
            AsteroidSize::Large => 1.5,
            AsteroidSize::Medium => 2.5,
            AsteroidSize::Small => 0.0,
        }
    }

    /// Size and number of the pieces left behind on destruction.
    pub fn offspring(self) -> Option<(AsteroidSize, usize)> {
        match self {
            AsteroidSize::Large => Some((AsteroidSize::Medium, 2)),
            AsteroidSize::Medium => Some((AsteroidSize::Small, 1)),
            AsteroidSize::Small => None,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub size: AsteroidSize,
    pub health: u32,
    /// Signed spin in radians per second.
    pub spin: f32,
    /// Damage flash time left, for the renderer.
    pub flash_ms: f32,
}

impl Asteroid {
    pub fn new(size: AsteroidSize, rng: &mut impl Rng) -> Self {
        let speed = size.spin_speed();
        let spin = if speed > 0.0 && rng.gen_bool(0.5) {
            -speed
        } else {
            speed
        };
        Self {
            size,
            health: size.max_health(),
            spin,
            flash_ms: 0.0,
        }
    }

    /// Subtract `amount` health; returns `true` if this killed the asteroid.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        if self.health > 0 {
            self.flash_ms = ASTEROID_FLASH_MS;
        }
        self.health == 0
    }

    pub(super) fn update(&mut self, body: &mut Body, ctx: &mut UpdateCtx) {
        body.rotation += self.spin * ctx.delta_secs();
        self.flash_ms = (self.flash_ms - ctx.delta_ms).max(0.0);
        wrap(body, ctx.world, OFFSCREEN_MARGIN);
    }
}

/// Teleport a body that left the playfield (plus `margin`) to the far side.
pub fn wrap(body: &mut Body, world: Vec2, margin: f32) {
    if body.pos.x < -margin {
        body.pos.x = world.x + margin;
    } else if body.pos.x > world.x + margin {
        body.pos.x = -margin;
    }
    if body.pos.y < -margin {
        body.pos.y = world.y + margin;
    } else if body.pos.y > world.y + margin {
        body.pos.y = -margin;
    }
}

/// Position, velocity and size of each piece a destroyed asteroid leaves.
///
/// Pieces start at the parent's position and fly off in a random direction.
pub fn split(size: AsteroidSize, pos: Vec2, rng: &mut impl Rng) -> Vec<(Vec2, Vec2, AsteroidSize)> {
    let Some((child, count)) = size.offspring() else {
        return Vec::new();
    };
    (0..count)
        .map(|_| {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = rng.gen_range(ASTEROID_CHILD_SPEED_MIN..=ASTEROID_CHILD_SPEED_MAX);
            (pos, Vec2::from_angle(angle) * speed, child)
        })
        .collect()
}

/// Entry point and velocity for a freshly spawned asteroid.
///
/// Asteroids enter from just beyond the top, left or right edge and head for
/// the centre of the screen, faster on higher levels.
pub fn spawn_trajectory(world: Vec2, level: u32, rng: &mut impl Rng) -> (Vec2, Vec2) {
    let pos = match rng.gen_range(0..3) {
        0 => Vec2::new(rng.gen_range(0.0..=world.x), -OFFSCREEN_MARGIN),
        1 => Vec2::new(-OFFSCREEN_MARGIN, rng.gen_range(0.0..=world.y)),
        _ => Vec2::new(world.x + OFFSCREEN_MARGIN, rng.gen_range(0.0..=world.y)),
    };
    let speed = rng.gen_range(ASTEROID_SPAWN_SPEED_MIN..=ASTEROID_SPAWN_SPEED_MAX)
        * (1.0 + level as f32 * ASTEROID_SPEED_PER_LEVEL);
    let heading = (world * 0.5 - pos).normalize_or_zero();
    (pos, heading * speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn split_sizes_follow_the_chain() {
        let mut rng = StdRng::seed_from_u64(7);
        let pos = Vec2::new(300.0, 200.0);

        let large = split(AsteroidSize::Large, pos, &mut rng);
        assert_eq!(large.len(), 2);
        assert!(large.iter().all(|(p, v, s)| *p == pos && *s == AsteroidSize::Medium && v.length() > 0.0));

        let medium = split(AsteroidSize::Medium, pos, &mut rng);
        assert_eq!(medium.len(), 1);
        assert_eq!(medium[0].2, AsteroidSize::Small);

        assert!(split(AsteroidSize::Small, pos, &mut rng).is_empty());
    }

    #[test]
    fn child_speed_within_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            for (_, vel, _) in split(AsteroidSize::Large, Vec2::ZERO, &mut rng) {
                let speed = vel.length();
                assert!(speed >= ASTEROID_CHILD_SPEED_MIN - 1e-3);
                assert!(speed <= ASTEROID_CHILD_SPEED_MAX + 1e-3);
            }
        }
    }

    #[test]
    fn damage_flashes_until_death() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut asteroid = Asteroid::new(AsteroidSize::Large, &mut rng);
        assert!(!asteroid.take_damage(1));
        assert_eq!(asteroid.health, 2);
        assert!(asteroid.flash_ms > 0.0);
        assert!(!asteroid.take_damage(1));
        assert!(asteroid.take_damage(1));
        assert_eq!(asteroid.health, 0);
    }

    #[test]
    fn wrap_moves_to_opposite_edge() {
        let world = Vec2::new(800.0, 600.0);
        let mut body = Body::new(Vec2::new(-51.0, 300.0), Vec2::ZERO, 24.0);
        wrap(&mut body, world, 50.0);
        assert_eq!(body.pos.x, 850.0);

        let mut edge = Body::new(Vec2::new(-50.0, -50.0), Vec2::ZERO, 24.0);
        wrap(&mut edge, world, 50.0);
        assert_eq!(edge.pos, Vec2::new(-50.0, -50.0), "spawn points sit on the margin");
    }

    #[test]
    fn spawn_heads_toward_centre_and_scales_with_level() {
        let world = Vec2::new(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let (pos, vel) = spawn_trajectory(world, 4, &mut rng);
            let to_centre = (world * 0.5 - pos).normalize();
            assert!(vel.normalize().dot(to_centre) > 0.99);
            assert!(vel.length() >= ASTEROID_SPAWN_SPEED_MIN * 1.4 - 1e-3);
            assert!(pos.y <= world.y);
        }
    }
}
