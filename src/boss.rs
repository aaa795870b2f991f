//! Boss encounter.
//!
//! ```text
//! Appearing ──3 s──▶ Active(Normal) ──hp ≤ 25 %──▶ Active(Aggressive) ──hp 0──▶ Defeated
//! ```
//!
//! The phase change is one-way.  Movement runs on a fixed 100 ms tick; a
//! segment counter advanced by each tick flips the horizontal direction on
//! entering segment 0 and the vertical direction on entering segment 2.

use crate::actor::{BossProjectileKind, Body};
use crate::constants::*;
use bevy::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BossPhase {
    #[default]
    Normal,
    Aggressive,
}

/// Per-phase behaviour numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseTuning {
    pub move_speed: f32,
    pub vertical_speed: f32,
    /// Segment length in segment-timer units (the timer gains 16 per tick).
    pub segment_length: f32,
    pub rotation_deg_per_tick: f32,
    pub shoot_interval_ms: f32,
    pub rocket_speed: f32,
    pub volley_offsets: &'static [f32],
}

const NORMAL_TUNING: PhaseTuning = PhaseTuning {
    move_speed: 100.0,
    vertical_speed: 50.0,
    segment_length: 800.0,
    rotation_deg_per_tick: 0.5,
    shoot_interval_ms: 1800.0,
    rocket_speed: 250.0,
    volley_offsets: &[-30.0, 0.0, 30.0],
};

const AGGRESSIVE_TUNING: PhaseTuning = PhaseTuning {
    move_speed: 150.0,
    vertical_speed: 80.0,
    segment_length: 500.0,
    rotation_deg_per_tick: 1.2,
    shoot_interval_ms: 1000.0,
    rocket_speed: 350.0,
    volley_offsets: &[-40.0, -20.0, 0.0, 20.0, 40.0],
};

impl BossPhase {
    pub fn tuning(self) -> &'static PhaseTuning {
        match self {
            BossPhase::Normal => &NORMAL_TUNING,
            BossPhase::Aggressive => &AGGRESSIVE_TUNING,
        }
    }

    /// 1 or 2, for display.
    pub fn number(self) -> u8 {
        match self {
            BossPhase::Normal => 1,
            BossPhase::Aggressive => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BossState {
    /// Flying in; untargetable and silent.
    Appearing { elapsed_ms: f32 },
    Active,
    /// Dying; removed once the death sequence ends.
    Defeated { elapsed_ms: f32 },
}

/// Result of [`Boss::take_damage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossHit {
    /// The boss was already defeated.
    Ignored,
    Damaged { phase_changed: bool },
    Defeated,
}

/// A projectile the boss wants spawned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossShot {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: BossProjectileKind,
}

/// What happened during one boss update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BossFrame {
    pub shots: Vec<BossShot>,
    pub became_active: bool,
    pub phase_changed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Boss {
    pub body: Body,
    pub max_hp: u32,
    pub current_hp: u32,
    pub phase: BossPhase,
    pub state: BossState,
    /// Render opacity.
    pub alpha: f32,
    /// Render scale.
    pub scale: f32,
    world: Vec2,
    move_tick_ms: f32,
    segment_timer: f32,
    segment: u32,
    dir_x: f32,
    dir_y: f32,
    shoot_timer_ms: f32,
}

impl Boss {
    /// A boss just above the screen, starting its entrance.
    pub fn new(max_hp: u32, world: Vec2) -> Self {
        Self {
            body: Body::new(
                Vec2::new(world.x * 0.5, BOSS_APPEAR_START_Y),
                Vec2::ZERO,
                BOSS_RADIUS,
            ),
            max_hp,
            current_hp: max_hp,
            phase: BossPhase::Normal,
            state: BossState::Appearing { elapsed_ms: 0.0 },
            alpha: 0.0,
            scale: 0.5,
            world,
            move_tick_ms: 0.0,
            segment_timer: 0.0,
            segment: 0,
            dir_x: 1.0,
            dir_y: 1.0,
            shoot_timer_ms: 0.0,
        }
    }

    /// Where the entrance ends.
    pub fn hover_point(&self) -> Vec2 {
        Vec2::new(self.world.x * 0.5, self.world.y * 0.5 - BOSS_HOVER_OFFSET)
    }

    /// Only an active boss can be hit.
    #[inline]
    pub fn is_targetable(&self) -> bool {
        self.state == BossState::Active
    }

    #[inline]
    pub fn is_defeated(&self) -> bool {
        matches!(self.state, BossState::Defeated { .. })
    }

    /// The death sequence has finished and the boss can be dropped.
    pub fn is_finished(&self) -> bool {
        matches!(self.state, BossState::Defeated { elapsed_ms } if elapsed_ms >= BOSS_DEATH_MS)
    }

    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.current_hp as f32 / self.max_hp as f32
        }
    }

    /// Lose `amount` hit points.  No effect while appearing or once defeated.
    pub fn take_damage(&mut self, amount: u32) -> BossHit {
        if matches!(self.state, BossState::Appearing { .. }) || self.is_defeated() {
            return BossHit::Ignored;
        }
        self.current_hp = self.current_hp.saturating_sub(amount);
        if self.current_hp == 0 {
            self.state = BossState::Defeated { elapsed_ms: 0.0 };
            self.body.vel = Vec2::ZERO;
            return BossHit::Defeated;
        }
        BossHit::Damaged {
            phase_changed: self.check_phase(),
        }
    }

    /// Enter the aggressive phase once health is low enough.  Never reverts.
    fn check_phase(&mut self) -> bool {
        if self.phase == BossPhase::Normal
            && self.current_hp as f32 <= self.max_hp as f32 * BOSS_AGGRESSIVE_HP_FRACTION
        {
            self.phase = BossPhase::Aggressive;
            return true;
        }
        false
    }

    /// Advance the encounter by `delta_ms`.  `target` is the ship, if alive.
    pub fn update(&mut self, delta_ms: f32, target: Option<Vec2>) -> BossFrame {
        let mut frame = BossFrame::default();
        match self.state {
            BossState::Appearing { elapsed_ms } => {
                let elapsed_ms = elapsed_ms + delta_ms;
                let t = (elapsed_ms / BOSS_APPEAR_MS).clamp(0.0, 1.0);
                let start = Vec2::new(self.world.x * 0.5, BOSS_APPEAR_START_Y);
                self.body.pos = start.lerp(self.hover_point(), t);
                self.alpha = t;
                self.scale = 0.5 + 0.5 * t;
                if t >= 1.0 {
                    self.state = BossState::Active;
                    frame.became_active = true;
                } else {
                    self.state = BossState::Appearing { elapsed_ms };
                }
            }
            BossState::Active => {
                frame.phase_changed = self.check_phase();
                self.move_tick_ms += delta_ms;
                while self.move_tick_ms >= BOSS_MOVE_TICK_MS {
                    self.move_tick_ms -= BOSS_MOVE_TICK_MS;
                    self.movement_tick();
                }
                self.shoot_timer_ms += delta_ms;
                if self.shoot_timer_ms >= self.phase.tuning().shoot_interval_ms {
                    self.shoot_timer_ms = 0.0;
                    frame.shots = self.volley(target);
                }
            }
            BossState::Defeated { elapsed_ms } => {
                let elapsed_ms = elapsed_ms + delta_ms;
                self.alpha = (1.0 - elapsed_ms / BOSS_DEATH_MS).clamp(0.0, 1.0);
                self.state = BossState::Defeated { elapsed_ms };
            }
        }
        frame
    }

    fn movement_tick(&mut self) {
        let tuning = self.phase.tuning();

        self.segment_timer += BOSS_SEGMENT_TICK;
        if self.segment_timer >= tuning.segment_length {
            self.segment_timer = 0.0;
            self.segment = (self.segment + 1) % BOSS_SEGMENT_COUNT;
            match self.segment {
                0 => self.dir_x = -self.dir_x,
                2 => self.dir_y = -self.dir_y,
                _ => {}
            }
        }

        let tick_secs = BOSS_MOVE_TICK_MS / 1000.0;
        self.body.pos.x += tuning.move_speed * self.dir_x * tick_secs;
        self.body.pos.y += tuning.vertical_speed * self.dir_y * tick_secs * 0.5;

        let min_x = BOSS_BOUNDS_INSET_X;
        let max_x = self.world.x - BOSS_BOUNDS_INSET_X;
        if self.body.pos.x <= min_x || self.body.pos.x >= max_x {
            self.body.pos.x = self.body.pos.x.clamp(min_x, max_x);
            self.dir_x = if self.body.pos.x <= min_x { 1.0 } else { -1.0 };
        }
        let max_y = self.world.y * 0.5;
        if self.body.pos.y <= BOSS_MIN_Y || self.body.pos.y >= max_y {
            self.body.pos.y = self.body.pos.y.clamp(BOSS_MIN_Y, max_y);
            self.dir_y = if self.body.pos.y <= BOSS_MIN_Y { 1.0 } else { -1.0 };
        }

        self.body.rotation += tuning.rotation_deg_per_tick.to_radians();
    }

    fn volley(&self, target: Option<Vec2>) -> Vec<BossShot> {
        let tuning = self.phase.tuning();
        let origin = self.body.pos + Vec2::new(0.0, self.body.radius * 0.5);
        let mut shots: Vec<BossShot> = tuning
            .volley_offsets
            .iter()
            .map(|dx| BossShot {
                pos: origin + Vec2::new(*dx, 0.0),
                vel: Vec2::new(0.0, tuning.rocket_speed),
                kind: BossProjectileKind::Rocket,
            })
            .collect();
        if self.phase == BossPhase::Aggressive {
            if let Some(target) = target {
                let aim = (target - origin).try_normalize().unwrap_or(Vec2::Y);
                shots.push(BossShot {
                    pos: origin,
                    vel: aim * BOSS_BULLET_SPEED,
                    kind: BossProjectileKind::Bullet,
                });
            }
        }
        shots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: Vec2 = Vec2::new(800.0, 600.0);

    fn active_boss() -> Boss {
        let mut boss = Boss::new(BOSS_MAX_HP, WORLD);
        let frame = boss.update(BOSS_APPEAR_MS, None);
        assert!(frame.became_active);
        boss
    }

    #[test]
    fn appears_then_activates_at_hover_point() {
        let mut boss = Boss::new(BOSS_MAX_HP, WORLD);
        assert!(!boss.is_targetable());
        boss.update(BOSS_APPEAR_MS * 0.5, None);
        assert!(matches!(boss.state, BossState::Appearing { .. }));
        assert!((boss.alpha - 0.5).abs() < 1e-4);
        boss.update(BOSS_APPEAR_MS * 0.5, None);
        assert!(boss.is_targetable());
        assert_eq!(boss.body.pos, boss.hover_point());
    }

    #[test]
    fn appearing_boss_shrugs_off_damage() {
        let mut boss = Boss::new(BOSS_MAX_HP, WORLD);
        assert_eq!(boss.take_damage(5), BossHit::Ignored);
        assert_eq!(boss.current_hp, BOSS_MAX_HP);
        boss.update(BOSS_APPEAR_MS, None);
        assert!(matches!(boss.take_damage(5), BossHit::Damaged { .. }));
        assert_eq!(boss.current_hp, BOSS_MAX_HP - 5);
    }

    #[test]
    fn appearing_boss_never_shoots() {
        let mut boss = Boss::new(BOSS_MAX_HP, WORLD);
        let frame = boss.update(BOSS_APPEAR_MS - 1.0, Some(Vec2::new(400.0, 500.0)));
        assert!(frame.shots.is_empty());
    }

    #[test]
    fn phase_flips_at_quarter_health_and_stays() {
        let mut boss = active_boss();
        for hit in 1..=22 {
            assert_eq!(
                boss.take_damage(1),
                BossHit::Damaged {
                    phase_changed: false
                },
                "hit {hit}"
            );
        }
        assert_eq!(boss.current_hp, 8);
        assert_eq!(boss.phase, BossPhase::Normal);
        assert_eq!(boss.take_damage(1), BossHit::Damaged { phase_changed: true });
        assert_eq!(boss.current_hp, 7);
        assert_eq!(boss.phase, BossPhase::Aggressive);
        for _ in 0..6 {
            boss.take_damage(1);
            assert_eq!(boss.phase, BossPhase::Aggressive);
        }
        assert_eq!(boss.take_damage(1), BossHit::Defeated);
        assert_eq!(boss.phase, BossPhase::Aggressive);
        assert_eq!(boss.take_damage(1), BossHit::Ignored);
    }

    #[test]
    fn volley_width_follows_phase() {
        let mut boss = active_boss();
        let frame = boss.update(NORMAL_TUNING.shoot_interval_ms, Some(Vec2::new(400.0, 500.0)));
        assert_eq!(frame.shots.len(), 3);
        assert!(frame.shots.iter().all(|s| s.kind == BossProjectileKind::Rocket));

        boss.current_hp = 5;
        let frame = boss.update(AGGRESSIVE_TUNING.shoot_interval_ms, Some(Vec2::new(400.0, 500.0)));
        assert!(frame.phase_changed);
        assert_eq!(frame.shots.len(), 6);
        assert_eq!(
            frame
                .shots
                .iter()
                .filter(|s| s.kind == BossProjectileKind::Bullet)
                .count(),
            1
        );
    }

    #[test]
    fn movement_stays_in_bounds() {
        let mut boss = active_boss();
        for _ in 0..2000 {
            boss.update(16.0, None);
            let p = boss.body.pos;
            assert!(p.x >= BOSS_BOUNDS_INSET_X && p.x <= WORLD.x - BOSS_BOUNDS_INSET_X);
            assert!(p.y >= BOSS_MIN_Y && p.y <= WORLD.y * 0.5);
        }
    }

    #[test]
    fn defeated_boss_finishes_after_death_sequence() {
        let mut boss = active_boss();
        boss.take_damage(BOSS_MAX_HP);
        assert!(boss.is_defeated());
        assert!(!boss.is_finished());
        let frame = boss.update(BOSS_DEATH_MS, Some(Vec2::ZERO));
        assert!(frame.shots.is_empty());
        assert!(boss.is_finished());
    }
}
