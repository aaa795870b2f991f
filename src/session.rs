//! One playthrough: owns every actor and runs the frame loop.
//!
//! ## Frame order
//!
//! | # | Step |
//! |---|------|
//! | 1 | spaceship update (invulnerability, entrance, effect expiry) |
//! | 2 | spawn timers, only in normal play |
//! | 3 | actor updates (lifetime, wrap, off-screen) |
//! | 4 | boss update |
//! | 5 | steering, manual fire, auto-fire |
//! | 6 | position integration |
//! | 7 | overlap detection and collision rules |
//! | 8 | deferred events |
//! | 9 | removal of dead actors |
//!
//! While a tutorial is open, or after game over, [`GameSession::update`] does
//! nothing at all.  Presentation layers read state through the accessors and
//! drain [`GameEvent`]s for effects, sounds and scene changes.

use bevy::math::Vec2;
use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::actor::{
    asteroid, ufo, Actor, ActorId, ActorKind, ActorTag, Asteroid, AsteroidSize, Body,
    BossProjectile, BossProjectileKind, Bullet, PowerUp, PowerUpKind, Ufo, UpdateCtx,
};
use crate::boss::{Boss, BossHit, BossPhase};
use crate::collision::{self, BulletFate, BulletOutcome, TargetHit};
use crate::config::GameConfig;
use crate::constants::*;
use crate::effects::{self, Applied};
use crate::game_data::GameData;
use crate::input::{FireLatch, PlayerIntent};
use crate::progression::{LevelChange, Progression, Stage};
use crate::spaceship::{DamageResult, Shot, Spaceship};
use crate::spawner::{self, SpawnRequest, Spawner};
use crate::timer::Scheduler;
use crate::tutorial::Tutorial;

/// Named scene changes the front end should carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTransition {
    Restart,
    Menu,
    GameOver,
}

/// Sound cues.  Playback is best-effort and never reported back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundKey {
    Shoot,
    Explosion,
    PowerUp,
    Hit,
    ShieldHit,
    LevelUp,
    BossAppear,
    BossHit,
    BossDefeat,
    GameOver,
}

impl SoundKey {
    pub fn asset_key(self) -> &'static str {
        match self {
            SoundKey::Shoot => "shoot",
            SoundKey::Explosion => "explosion",
            SoundKey::PowerUp => "powerup",
            SoundKey::Hit => "hit",
            SoundKey::ShieldHit => "shield_hit",
            SoundKey::LevelUp => "levelup",
            SoundKey::BossAppear => "boss_appear",
            SoundKey::BossHit => "boss_hit",
            SoundKey::BossDefeat => "boss_defeat",
            SoundKey::GameOver => "gameover",
        }
    }
}

/// Fire-and-forget notifications for effects, audio and scene flow.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Explosion { pos: Vec2 },
    PowerUpCollected { pos: Vec2, kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    ShieldAbsorbed { pos: Vec2 },
    Sound { key: SoundKey, volume: f32 },
    LevelUp { level: u32 },
    BackgroundTransition { level: u32 },
    BossIntro,
    BossAppearing,
    BossPhaseChanged { phase: BossPhase },
    BossDefeated { pos: Vec2 },
    TutorialOpened { kind: PowerUpKind },
    Transition(SceneTransition),
}

/// Work queued for a later frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    SpawnBoss,
    FinishBossStage,
    OpenTutorial(PowerUpKind),
}

#[derive(Resource)]
pub struct GameSession {
    config: GameConfig,
    data: GameData,
    ship: Spaceship,
    actors: Vec<Actor>,
    boss: Option<Boss>,
    spawner: Spawner,
    progression: Progression,
    tutorial: Tutorial,
    scheduler: Scheduler<Deferred>,
    fire_latch: FireLatch,
    rng: StdRng,
    now: f64,
    next_id: u32,
    events: Vec<GameEvent>,
    game_over: bool,
    new_high_score: bool,
}

impl GameSession {
    /// A fresh playthrough on level 1 with its opening asteroid wave.
    pub fn new(config: GameConfig, high_score: u32, seed: u64) -> Self {
        let mut session = Self {
            data: GameData::new(high_score),
            ship: Spaceship::new(&config),
            actors: Vec::new(),
            boss: None,
            spawner: Spawner::new(&config),
            progression: Progression::new(),
            tutorial: Tutorial::new(config.tutorials_enabled),
            scheduler: Scheduler::new(),
            fire_latch: FireLatch::default(),
            rng: StdRng::seed_from_u64(seed),
            now: 0.0,
            next_id: 0,
            events: Vec::new(),
            game_over: false,
            new_high_score: false,
            config,
        };
        session.spawn_initial_asteroids();
        session
    }

    /// Start over on level 1.  The high score and seen tutorials carry over.
    pub fn restart(&mut self) {
        self.data.reset();
        self.ship = Spaceship::new(&self.config);
        self.actors.clear();
        self.boss = None;
        self.spawner = Spawner::new(&self.config);
        self.progression = Progression::new();
        self.tutorial.dismiss();
        self.scheduler = Scheduler::new();
        self.fire_latch = FireLatch::default();
        self.now = 0.0;
        self.events.clear();
        self.game_over = false;
        self.new_high_score = false;
        self.spawn_initial_asteroids();
    }

    /// Replace the tuning used from the next [`GameSession::restart`] on.
    pub fn set_config(&mut self, config: GameConfig) {
        self.config = config;
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    /// Mutable session data, for scripted setups.
    pub fn data_mut(&mut self) -> &mut GameData {
        &mut self.data
    }

    pub fn ship(&self) -> &Spaceship {
        &self.ship
    }

    pub fn ship_mut(&mut self) -> &mut Spaceship {
        &mut self.ship
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    pub fn boss_mut(&mut self) -> Option<&mut Boss> {
        self.boss.as_mut()
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    /// Live actors of one kind.
    pub fn live(&self, tag: ActorTag) -> impl Iterator<Item = &Actor> {
        self.actors
            .iter()
            .filter(move |a| a.tag() == tag && !a.is_dead())
    }

    pub fn count(&self, tag: ActorTag) -> usize {
        self.live(tag).count()
    }

    pub fn stage(&self) -> Stage {
        self.progression.stage
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    /// Session clock in milliseconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The final score beat the previous high score.
    pub fn new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub fn tutorial(&self) -> &Tutorial {
        &self.tutorial
    }

    pub fn tutorial_active(&self) -> Option<PowerUpKind> {
        self.tutorial.active()
    }

    /// Close the open tutorial and resume play.
    pub fn dismiss_tutorial(&mut self) -> Option<PowerUpKind> {
        self.tutorial.dismiss()
    }

    /// Take every pending notification.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Queue a scene change requested from outside the simulation.
    pub fn request_transition(&mut self, transition: SceneTransition) {
        self.events.push(GameEvent::Transition(transition));
    }

    /// Remove every actor, leaving ship, boss and progress untouched.
    pub fn clear_field(&mut self) {
        self.actors.clear();
    }

    // ── Spawning ──────────────────────────────────────────────────────────────

    fn push_actor(&mut self, body: Body, kind: ActorKind) -> ActorId {
        self.next_id = self.next_id.wrapping_add(1);
        let id = ActorId(self.next_id);
        self.actors.push(Actor { id, body, kind });
        id
    }

    pub fn spawn_asteroid(&mut self, pos: Vec2, vel: Vec2, size: AsteroidSize) -> ActorId {
        let asteroid = Asteroid::new(size, &mut self.rng);
        self.push_actor(Body::new(pos, vel, size.radius()), ActorKind::Asteroid(asteroid))
    }

    pub fn spawn_bullet(&mut self, pos: Vec2, vel: Vec2, strong_laser: bool) -> ActorId {
        let bullet = Bullet::new(self.config.bullet_lifetime_ms, strong_laser);
        let radius = bullet.radius();
        self.push_actor(Body::new(pos, vel, radius), ActorKind::Bullet(bullet))
    }

    pub fn spawn_power_up(&mut self, pos: Vec2, kind: PowerUpKind) -> ActorId {
        let power_up = PowerUp::new(kind, self.config.power_up_lifetime_ms);
        let radius = power_up.radius();
        let id = self.push_actor(Body::new(pos, Vec2::ZERO, radius), ActorKind::PowerUp(power_up));
        if self.tutorial.announce(kind) {
            self.scheduler
                .schedule(TUTORIAL_DELAY_MS, Deferred::OpenTutorial(kind));
        }
        id
    }

    pub fn spawn_ufo(&mut self, pos: Vec2, vel: Vec2) -> ActorId {
        self.push_actor(Body::new(pos, vel, UFO_RADIUS), ActorKind::Ufo(Ufo::new()))
    }

    pub fn spawn_boss_projectile(&mut self, pos: Vec2, vel: Vec2, kind: BossProjectileKind) -> ActorId {
        self.push_actor(
            Body::new(pos, vel, kind.radius()),
            ActorKind::BossProjectile(BossProjectile::new(kind)),
        )
    }

    fn spawn_random(&mut self, request: SpawnRequest) {
        let world = self.config.world_size();
        match request {
            SpawnRequest::Asteroid => {
                let (pos, vel) = asteroid::spawn_trajectory(world, self.data.level, &mut self.rng);
                let size = AsteroidSize::random(&mut self.rng);
                self.spawn_asteroid(pos, vel, size);
            }
            SpawnRequest::PowerUp => {
                let inset = POWER_UP_SPAWN_INSET;
                let pos = Vec2::new(
                    self.rng.gen_range(inset..=(world.x - inset).max(inset)),
                    self.rng.gen_range(inset..=(world.y - inset).max(inset)),
                );
                let kind = PowerUpKind::roll(self.data.level, &mut self.rng);
                self.spawn_power_up(pos, kind);
            }
            SpawnRequest::Ufo => {
                let (pos, vel) = ufo::spawn_trajectory(world, &mut self.rng);
                self.spawn_ufo(pos, vel);
            }
        }
    }

    fn spawn_initial_asteroids(&mut self) {
        for _ in 0..spawner::initial_asteroid_count(self.data.level) {
            self.spawn_random(SpawnRequest::Asteroid);
        }
    }

    fn spawn_shots(&mut self, shots: Vec<Shot>) {
        if shots.is_empty() {
            return;
        }
        for shot in shots {
            self.spawn_bullet(shot.pos, shot.vel, shot.strong_laser);
        }
        self.sound(SoundKey::Shoot, 0.3);
    }

    // ── Events ────────────────────────────────────────────────────────────────

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn sound(&mut self, key: SoundKey, volume: f32) {
        self.emit(GameEvent::Sound { key, volume });
    }

    fn explode(&mut self, pos: Vec2) {
        self.emit(GameEvent::Explosion { pos });
        self.sound(SoundKey::Explosion, 0.5);
    }

    // ── Frame ─────────────────────────────────────────────────────────────────

    /// Advance the simulation by `delta_ms` with the player's current intent.
    pub fn update(&mut self, delta_ms: f32, intent: PlayerIntent) {
        if self.game_over || self.tutorial.is_paused() || delta_ms <= 0.0 {
            return;
        }
        self.now += delta_ms as f64;
        let now = self.now;
        let world = self.config.world_size();

        for kind in self.ship.update(now, delta_ms) {
            self.emit(GameEvent::PowerUpExpired { kind });
        }

        if self.progression.stage.spawning_enabled() {
            for request in self.spawner.tick(delta_ms) {
                self.spawn_random(request);
            }
        }

        let mut ctx = UpdateCtx {
            now,
            delta_ms,
            world,
            rng: &mut self.rng,
        };
        for actor in self.actors.iter_mut() {
            actor.update(&mut ctx);
        }

        self.update_boss(delta_ms);

        self.ship
            .steer(intent.up, intent.down, intent.left, intent.right);
        if self
            .fire_latch
            .update(intent.fire, self.ship.rapid_fire_active())
        {
            let shots = self.ship.fire(now);
            if shots.is_empty() {
                self.fire_latch.rearm();
            }
            self.spawn_shots(shots);
        }
        if self.ship.rapid_fire_active() {
            let shots = self.ship.fire(now);
            self.spawn_shots(shots);
        }

        if !self.ship.is_dead() {
            self.ship.body.integrate(delta_ms);
            self.ship.clamp_to_world(world);
        }
        for actor in self.actors.iter_mut().filter(|a| !a.is_dead()) {
            actor.body.integrate(delta_ms);
        }

        self.resolve_collisions();

        for deferred in self.scheduler.advance(delta_ms) {
            self.run_deferred(deferred);
        }

        self.actors.retain(|a| !a.is_dead());
    }

    fn update_boss(&mut self, delta_ms: f32) {
        let target = (!self.ship.is_dead()).then_some(self.ship.body.pos);
        let Some(boss) = self.boss.as_mut() else {
            return;
        };
        let frame = boss.update(delta_ms, target);
        let phase = boss.phase;
        let finished = boss.is_finished();

        if frame.phase_changed {
            self.emit(GameEvent::BossPhaseChanged { phase });
        }
        for shot in frame.shots {
            self.spawn_boss_projectile(shot.pos, shot.vel, shot.kind);
        }
        if finished {
            self.boss = None;
        }
    }

    // ── Collisions ────────────────────────────────────────────────────────────

    fn resolve_collisions(&mut self) {
        // Actors spawned while resolving (split pieces) join next frame.
        let n = self.actors.len();

        for i in 0..n {
            if self.ship.is_dead() {
                break;
            }
            let actor = &self.actors[i];
            if !actor.body.is_collidable() || !self.ship.body.overlaps(&actor.body) {
                continue;
            }
            match actor.tag() {
                ActorTag::Asteroid | ActorTag::Ufo => self.ship_rams(i),
                ActorTag::PowerUp => self.collect_power_up(i),
                ActorTag::BossProjectile => self.ship_struck(i),
                ActorTag::Bullet => {}
            }
        }

        for b in 0..n {
            if self.actors[b].tag() != ActorTag::Bullet {
                continue;
            }
            for t in 0..n {
                if !self.actors[b].body.is_collidable() {
                    break;
                }
                if t == b || !self.actors[t].body.is_collidable() {
                    continue;
                }
                if !self.actors[b].body.overlaps(&self.actors[t].body) {
                    continue;
                }
                match self.actors[t].tag() {
                    ActorTag::Asteroid => self.bullet_hits_asteroid(b, t),
                    ActorTag::Ufo => self.bullet_hits_ufo(b, t),
                    ActorTag::BossProjectile => self.bullet_hits_projectile(b, t),
                    ActorTag::Bullet | ActorTag::PowerUp => {}
                }
            }
            if self.actors[b].body.is_collidable() {
                let hits_boss = self
                    .boss
                    .as_ref()
                    .is_some_and(|boss| boss.is_targetable() && boss.body.overlaps(&self.actors[b].body));
                if hits_boss {
                    self.bullet_hits_boss(b);
                }
            }
        }
    }

    fn sync_lives(&mut self) {
        self.data.lives = self.ship.health;
    }

    fn damage_ship(&mut self, amount: u32) {
        match self.ship.take_damage(amount) {
            DamageResult::Ignored => {}
            DamageResult::Damaged => {
                self.sync_lives();
                self.sound(SoundKey::Hit, 0.6);
            }
            DamageResult::Destroyed => {
                self.sync_lives();
                let pos = self.ship.body.pos;
                self.explode(pos);
                self.trigger_game_over();
            }
        }
    }

    fn trigger_game_over(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.new_high_score = self.data.commit_high_score();
        self.sound(SoundKey::GameOver, 0.7);
        self.emit(GameEvent::Transition(SceneTransition::GameOver));
    }

    fn ship_rams(&mut self, i: usize) {
        let outcome = collision::ship_vs_enemy(self.ship.shield_active());
        if outcome.shield_absorbed {
            let pos = self.ship.body.pos;
            self.emit(GameEvent::ShieldAbsorbed { pos });
            self.sound(SoundKey::ShieldHit, 0.5);
        }
        if outcome.destroy_other {
            match self.actors[i].tag() {
                ActorTag::Asteroid => self.destroy_asteroid(i, false),
                _ => {
                    self.actors[i].body.destroy();
                    let pos = self.actors[i].body.pos;
                    self.explode(pos);
                }
            }
        }
        if outcome.ship_damage > 0 {
            self.damage_ship(outcome.ship_damage);
        }
    }

    fn ship_struck(&mut self, i: usize) {
        let outcome = collision::ship_vs_boss_projectile(self.ship.shield_active());
        if outcome.destroy_other {
            self.actors[i].body.destroy();
        }
        if outcome.shield_absorbed {
            let pos = self.ship.body.pos;
            self.emit(GameEvent::ShieldAbsorbed { pos });
            self.sound(SoundKey::ShieldHit, 0.5);
        } else {
            let pos = self.actors[i].body.pos;
            self.explode(pos);
        }
        if outcome.ship_damage > 0 {
            self.damage_ship(outcome.ship_damage);
        }
    }

    fn collect_power_up(&mut self, i: usize) {
        let Some(kind) = self.actors[i].as_power_up().map(|p| p.kind) else {
            return;
        };
        // Dead before the effect runs: a pickup applies at most once.
        self.actors[i].body.destroy();
        let pos = self.actors[i].body.pos;

        match effects::apply(kind, &mut self.ship, self.now, &self.config) {
            Applied::Healed(_) => self.sync_lives(),
            Applied::Napalm => self.napalm(),
            Applied::Timed { .. } => {}
        }
        self.emit(GameEvent::PowerUpCollected { pos, kind });
        self.sound(SoundKey::PowerUp, 0.6);
    }

    /// Destroy every live asteroid and UFO, scoring each; no split pieces.
    ///
    /// Each kill is awarded on its own, so one blast can cross several
    /// level thresholds.
    fn napalm(&mut self) {
        let mut kills = Vec::new();
        for actor in self.actors.iter_mut() {
            if !actor.body.is_collidable() {
                continue;
            }
            let value = match &actor.kind {
                ActorKind::Asteroid(a) => a.size.score(),
                ActorKind::Ufo(_) => UFO_SCORE,
                _ => continue,
            };
            actor.body.destroy();
            kills.push((actor.body.pos, value));
        }
        if kills.is_empty() {
            return;
        }
        self.sound(SoundKey::Explosion, 0.8);
        for (pos, value) in kills {
            self.emit(GameEvent::Explosion { pos });
            self.award_kill(value);
        }
    }

    fn apply_bullet_fate(&mut self, b: usize, outcome: &BulletOutcome) {
        if outcome.bullet == BulletFate::Consumed {
            self.actors[b].body.destroy();
        }
    }

    fn bullet_hits_asteroid(&mut self, b: usize, t: usize) {
        let strong = self.actors[b].as_bullet().is_some_and(|x| x.strong_laser);
        let Some(size) = self.actors[t].as_asteroid().map(|a| a.size) else {
            return;
        };
        let outcome = collision::bullet_vs_asteroid(strong, size);
        self.apply_bullet_fate(b, &outcome);

        let killed = match outcome.target {
            TargetHit::Destroy => true,
            TargetHit::Damage(n) => match &mut self.actors[t].kind {
                ActorKind::Asteroid(a) => a.take_damage(n),
                _ => false,
            },
        };
        if killed {
            self.destroy_asteroid(t, true);
        }
    }

    /// Destroy an asteroid, leave its pieces behind and optionally score it.
    fn destroy_asteroid(&mut self, t: usize, award: bool) {
        let Some(size) = self.actors[t].as_asteroid().map(|a| a.size) else {
            return;
        };
        self.actors[t].body.destroy();
        let pos = self.actors[t].body.pos;
        self.explode(pos);
        for (pos, vel, child) in asteroid::split(size, pos, &mut self.rng) {
            self.spawn_asteroid(pos, vel, child);
        }
        if award {
            self.award_kill(size.score());
        }
    }

    fn bullet_hits_ufo(&mut self, b: usize, t: usize) {
        let strong = self.actors[b].as_bullet().is_some_and(|x| x.strong_laser);
        let outcome = collision::bullet_vs_ufo(strong);
        self.apply_bullet_fate(b, &outcome);

        let killed = match outcome.target {
            TargetHit::Destroy => true,
            TargetHit::Damage(n) => match &mut self.actors[t].kind {
                ActorKind::Ufo(u) => u.take_damage(n),
                _ => false,
            },
        };
        if killed {
            self.actors[t].body.destroy();
            let pos = self.actors[t].body.pos;
            self.explode(pos);
            self.award_kill(UFO_SCORE);
        }
    }

    fn bullet_hits_projectile(&mut self, b: usize, t: usize) {
        let outcome = collision::bullet_vs_boss_projectile();
        self.apply_bullet_fate(b, &outcome);
        self.actors[t].body.destroy();
        let pos = self.actors[t].body.pos;
        self.explode(pos);
        self.award_kill(outcome.hit_score);
    }

    fn bullet_hits_boss(&mut self, b: usize) {
        let outcome = collision::bullet_vs_boss();
        self.apply_bullet_fate(b, &outcome);
        self.award_kill(outcome.hit_score);

        let TargetHit::Damage(amount) = outcome.target else {
            return;
        };
        let Some(boss) = self.boss.as_mut() else {
            return;
        };
        let pos = boss.body.pos;
        match boss.take_damage(amount) {
            BossHit::Ignored => {}
            BossHit::Damaged { phase_changed } => {
                self.sound(SoundKey::BossHit, 0.4);
                if phase_changed {
                    self.emit(GameEvent::BossPhaseChanged {
                        phase: BossPhase::Aggressive,
                    });
                }
            }
            BossHit::Defeated => self.on_boss_defeated(pos),
        }
    }

    fn on_boss_defeated(&mut self, pos: Vec2) {
        self.award_kill(BOSS_DEFEAT_SCORE);
        self.emit(GameEvent::BossDefeated { pos });
        self.explode(pos);
        self.sound(SoundKey::BossDefeat, 0.8);
        if self.progression.boss_defeated() {
            self.scheduler
                .schedule(BOSS_VICTORY_DELAY_MS, Deferred::FinishBossStage);
        }
    }

    // ── Progression ───────────────────────────────────────────────────────────

    /// Score a kill and level up if the threshold for the current level is met.
    ///
    /// Every scoring path goes through here; outside the `Normal` stage the
    /// points still count but the level stays put.
    fn award_kill(&mut self, points: u32) {
        self.data.award(points);
        if self.progression.stage.levels_up_on_score()
            && self.data.level_up_due(self.config.level_score_step)
        {
            if let Some(change) = self.progression.level_up(&mut self.data) {
                self.apply_level_change(change);
            }
        }
    }

    fn apply_level_change(&mut self, change: LevelChange) {
        match change {
            LevelChange::Normal { level, themed } => {
                self.spawner.apply_level(level);
                let mut wave = 0;
                for actor in self.actors.iter_mut() {
                    if !actor.body.is_collidable() {
                        continue;
                    }
                    match actor.tag() {
                        ActorTag::Asteroid => {
                            actor
                                .body
                                .fade_out(wave as f32 * LEVEL_FADE_STAGGER_MS, LEVEL_FADE_MS);
                            wave += 1;
                        }
                        ActorTag::Ufo => actor.body.destroy(),
                        _ => {}
                    }
                }
                self.spawn_initial_asteroids();
                self.emit(GameEvent::LevelUp { level });
                self.sound(SoundKey::LevelUp, 0.7);
                if themed {
                    self.emit(GameEvent::BackgroundTransition { level });
                }
            }
            LevelChange::BossIntro { level } => {
                let targets: Vec<usize> = self
                    .actors
                    .iter()
                    .enumerate()
                    .filter(|(_, a)| a.body.is_collidable() && a.tag() != ActorTag::Bullet)
                    .map(|(i, _)| i)
                    .collect();
                let stagger =
                    (BOSS_INTRO_FADE_MS - LEVEL_FADE_MS) / targets.len().max(1) as f32;
                for (n, i) in targets.into_iter().enumerate() {
                    self.actors[i]
                        .body
                        .fade_out(n as f32 * stagger, LEVEL_FADE_MS);
                }
                self.scheduler
                    .schedule(BOSS_INTRO_DELAY_MS, Deferred::SpawnBoss);
                self.emit(GameEvent::LevelUp { level });
                self.emit(GameEvent::BossIntro);
            }
        }
    }

    fn run_deferred(&mut self, deferred: Deferred) {
        match deferred {
            Deferred::SpawnBoss => {
                if self.progression.boss_spawned() {
                    self.boss = Some(Boss::new(
                        self.config.boss_max_hp,
                        self.config.world_size(),
                    ));
                    self.emit(GameEvent::BossAppearing);
                    self.sound(SoundKey::BossAppear, 0.8);
                }
            }
            Deferred::FinishBossStage => {
                if let Some(change) = self.progression.finish_boss_stage(&mut self.data) {
                    self.boss = None;
                    self.spawner.reset_timers();
                    self.apply_level_change(change);
                }
            }
            Deferred::OpenTutorial(kind) => {
                if self.tutorial.open(kind) {
                    self.emit(GameEvent::TutorialOpened { kind });
                }
            }
        }
    }
}
