//! Power-up pickups and the weighted kind catalog.

use super::{Body, UpdateCtx};
use crate::constants::*;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PowerUpKind {
    Health,
    RapidFire,
    Shield,
    TripleShot,
    SpeedBoost,
    StrongLaser,
    NapalmBomb,
    SupportShips,
}

/// Kinds available from level 1, equal weight.
const BASE_CATALOG: [(PowerUpKind, u32); 6] = [
    (PowerUpKind::Health, 1),
    (PowerUpKind::RapidFire, 1),
    (PowerUpKind::Shield, 1),
    (PowerUpKind::TripleShot, 1),
    (PowerUpKind::SpeedBoost, 1),
    (PowerUpKind::StrongLaser, 1),
];

/// Full catalog from [`POWER_UP_EXPANDED_LEVEL`]; support ships are triple-weighted.
const EXPANDED_CATALOG: [(PowerUpKind, u32); 8] = [
    (PowerUpKind::Health, 1),
    (PowerUpKind::RapidFire, 1),
    (PowerUpKind::Shield, 1),
    (PowerUpKind::TripleShot, 1),
    (PowerUpKind::SpeedBoost, 1),
    (PowerUpKind::StrongLaser, 1),
    (PowerUpKind::NapalmBomb, 1),
    (PowerUpKind::SupportShips, 3),
];

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 8] = [
        PowerUpKind::Health,
        PowerUpKind::RapidFire,
        PowerUpKind::Shield,
        PowerUpKind::TripleShot,
        PowerUpKind::SpeedBoost,
        PowerUpKind::StrongLaser,
        PowerUpKind::NapalmBomb,
        PowerUpKind::SupportShips,
    ];

    /// Weighted kinds that may spawn on `level`.
    pub fn catalog(level: u32) -> &'static [(PowerUpKind, u32)] {
        if level >= POWER_UP_EXPANDED_LEVEL {
            &EXPANDED_CATALOG
        } else {
            &BASE_CATALOG
        }
    }

    /// Draw a kind for `level` according to the catalog weights.
    pub fn roll(level: u32, rng: &mut impl Rng) -> Self {
        let catalog = Self::catalog(level);
        let total: u32 = catalog.iter().map(|(_, w)| w).sum();
        let mut pick = rng.gen_range(0..total);
        for &(kind, weight) in catalog {
            if pick < weight {
                return kind;
            }
            pick -= weight;
        }
        PowerUpKind::Health
    }

    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::Health => "HEALTH",
            PowerUpKind::RapidFire => "RAPID FIRE",
            PowerUpKind::Shield => "SHIELD",
            PowerUpKind::TripleShot => "TRIPLE SHOT",
            PowerUpKind::SpeedBoost => "SPEED BOOST",
            PowerUpKind::StrongLaser => "STRONG LASER",
            PowerUpKind::NapalmBomb => "NAPALM BOMB",
            PowerUpKind::SupportShips => "SUPPORT SHIPS",
        }
    }

    /// One-line description shown by the tutorial overlay.
    pub fn explanation(self) -> &'static str {
        match self {
            PowerUpKind::Health => "Restores one point of hull. Never exceeds the maximum.",
            PowerUpKind::RapidFire => "Your guns fire on their own at double rate.",
            PowerUpKind::Shield => "Rams destroy asteroids and UFOs without taking damage.",
            PowerUpKind::TripleShot => "Every shot fans out into three bullets.",
            PowerUpKind::SpeedBoost => "Doubles your top speed.",
            PowerUpKind::StrongLaser => {
                "Heavy rounds punch through small rocks and destroy large ones outright."
            }
            PowerUpKind::NapalmBomb => "Wipes out every asteroid and UFO on screen at once.",
            PowerUpKind::SupportShips => "Two escorts fly beside you and fire with you.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub lifetime_ms: f32,
    pub max_lifetime_ms: f32,
    /// Phase of the vertical bob, radians.
    pub bob_phase: f32,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, lifetime_ms: f32) -> Self {
        Self {
            kind,
            lifetime_ms,
            max_lifetime_ms: lifetime_ms,
            bob_phase: 0.0,
        }
    }

    /// Remaining lifetime as a fraction of the total.
    pub fn life_fraction(&self) -> f32 {
        if self.max_lifetime_ms <= 0.0 {
            0.0
        } else {
            (self.lifetime_ms / self.max_lifetime_ms).clamp(0.0, 1.0)
        }
    }

    /// Pickup radius: shrinks linearly to half size as the pickup ages.
    pub fn radius(&self) -> f32 {
        POWER_UP_RADIUS * (0.5 + 0.5 * self.life_fraction())
    }

    pub(super) fn update(&mut self, body: &mut Body, ctx: &mut UpdateCtx) {
        self.lifetime_ms -= ctx.delta_ms;
        if self.lifetime_ms <= 0.0 {
            body.destroy();
            return;
        }
        let dt = ctx.delta_secs();
        self.bob_phase += dt * 3.0;
        body.pos.y += self.bob_phase.sin() * POWER_UP_BOB_AMOUNT * dt;
        body.radius = self.radius();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn early_levels_only_roll_base_kinds() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let kind = PowerUpKind::roll(2, &mut rng);
            assert!(!matches!(kind, PowerUpKind::NapalmBomb | PowerUpKind::SupportShips));
        }
    }

    #[test]
    fn support_ships_are_triple_weighted() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut counts: HashMap<PowerUpKind, u32> = HashMap::new();
        for _ in 0..11_000 {
            *counts.entry(PowerUpKind::roll(3, &mut rng)).or_default() += 1;
        }
        let support = counts[&PowerUpKind::SupportShips] as f32;
        let napalm = counts[&PowerUpKind::NapalmBomb] as f32;
        let ratio = support / napalm;
        assert!(ratio > 2.4 && ratio < 3.6, "ratio {ratio}");
    }

    #[test]
    fn expires_and_shrinks() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut power_up = PowerUp::new(PowerUpKind::Shield, 1000.0);
        let mut body = Body::new(Vec2::new(100.0, 100.0), Vec2::ZERO, power_up.radius());
        let mut ctx = UpdateCtx {
            now: 0.0,
            delta_ms: 500.0,
            world: Vec2::new(800.0, 600.0),
            rng: &mut rng,
        };
        power_up.update(&mut body, &mut ctx);
        assert!(!body.is_dead());
        assert!((body.radius - POWER_UP_RADIUS * 0.75).abs() < 1e-4);
        power_up.update(&mut body, &mut ctx);
        assert!(body.is_dead());
    }
}
