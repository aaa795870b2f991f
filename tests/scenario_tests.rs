//! End-to-end gameplay scenarios driven through [`GameSession`].
//!
//! No Bevy app is involved: each test builds a session with a fixed seed,
//! clears the opening wave, places actors by hand and steps the frame loop.

use bevy::math::Vec2;
use starfall::actor::{ActorTag, AsteroidSize, PowerUpKind};
use starfall::boss::{BossPhase, BossState};
use starfall::config::GameConfig;
use starfall::constants::{BOSS_INTRO_DELAY_MS, BOSS_VICTORY_DELAY_MS};
use starfall::effects;
use starfall::input::PlayerIntent;
use starfall::progression::Stage;
use starfall::session::{GameEvent, GameSession, SceneTransition};

const FRAME_MS: f32 = 16.0;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config() -> GameConfig {
    GameConfig {
        ship_entrance_ms: 0.0,
        tutorials_enabled: false,
        ..GameConfig::default()
    }
}

/// A session with an empty playfield and the ship already in control.
fn session() -> GameSession {
    let mut session = GameSession::new(config(), 0, 1234);
    session.clear_field();
    session.drain_events();
    session
}

fn idle(session: &mut GameSession, delta_ms: f32) {
    session.update(delta_ms, PlayerIntent::default());
}

/// Run frames until `done` holds or `limit_ms` of session time has passed.
fn run_until(session: &mut GameSession, limit_ms: f32, mut done: impl FnMut(&GameSession) -> bool) {
    let mut elapsed = 0.0;
    while !done(session) && elapsed < limit_ms {
        idle(session, 100.0);
        elapsed += 100.0;
    }
}

fn count_level_ups(events: &[GameEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
        .count()
}

fn shoot_at(session: &mut GameSession, pos: Vec2) {
    session.spawn_bullet(pos, Vec2::ZERO, false);
    idle(session, FRAME_MS);
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn large_asteroid_destroyed_by_normal_bullets() {
    let mut s = session();
    let target = Vec2::new(400.0, 200.0);
    s.spawn_asteroid(target, Vec2::ZERO, AsteroidSize::Large);

    // Three hits for three health.
    for _ in 0..3 {
        shoot_at(&mut s, target);
    }

    assert_eq!(s.data().score, 20);
    assert_eq!(s.data().level, 1);
    let mediums: Vec<_> = s
        .live(ActorTag::Asteroid)
        .filter_map(|a| a.as_asteroid().map(|ast| (a, ast)))
        .filter(|(_, ast)| ast.size == AsteroidSize::Medium)
        .collect();
    assert_eq!(mediums.len(), 2);
    assert!(mediums.iter().all(|(a, _)| a.body.vel.length() > 0.0));
    assert_eq!(count_level_ups(&s.drain_events()), 0);
}

#[test]
fn small_kill_crosses_threshold_once() {
    let mut s = session();
    s.data_mut().score = 990;
    let target = Vec2::new(200.0, 150.0);
    s.spawn_asteroid(target, Vec2::ZERO, AsteroidSize::Small);
    shoot_at(&mut s, target);

    assert_eq!(s.data().score, 1090);
    assert_eq!(s.data().level, 2);
    assert_eq!(count_level_ups(&s.drain_events()), 1);
}

#[test]
fn score_below_threshold_does_not_level() {
    let mut s = session();
    s.data_mut().score = 880;
    let target = Vec2::new(200.0, 150.0);
    s.spawn_asteroid(target, Vec2::ZERO, AsteroidSize::Small);
    shoot_at(&mut s, target);

    assert_eq!(s.data().score, 980);
    assert_eq!(s.data().level, 1);
}

#[test]
fn napalm_checks_the_threshold_after_every_kill() {
    let mut s = session();
    s.data_mut().score = 1_900;
    for x in [100.0, 200.0, 300.0] {
        s.spawn_asteroid(Vec2::new(x, 100.0), Vec2::ZERO, AsteroidSize::Small);
    }
    let pos = s.ship().body.pos;
    s.spawn_power_up(pos, PowerUpKind::NapalmBomb);
    idle(&mut s, FRAME_MS);

    // 2000 leaves level 1, 2100 already clears level 2's mark of 2000.
    assert_eq!(s.data().score, 2_200);
    assert_eq!(s.data().level, 3);
    let events = s.drain_events();
    assert_eq!(count_level_ups(&events), 2);
    assert!(events.contains(&GameEvent::LevelUp { level: 3 }));
}

#[test]
fn last_hit_point_ends_the_game_once() {
    let mut s = session();
    s.ship_mut().health = 1;
    s.data_mut().lives = 1;
    let ship_pos = s.ship().body.pos;
    s.spawn_asteroid(ship_pos, Vec2::ZERO, AsteroidSize::Small);
    s.spawn_asteroid(ship_pos, Vec2::ZERO, AsteroidSize::Medium);

    idle(&mut s, FRAME_MS);
    idle(&mut s, FRAME_MS);

    assert_eq!(s.ship().health, 0);
    assert_eq!(s.data().lives, 0);
    assert!(s.is_game_over());
    let game_overs = s
        .drain_events()
        .into_iter()
        .filter(|e| *e == GameEvent::Transition(SceneTransition::GameOver))
        .count();
    assert_eq!(game_overs, 1);

    // Nothing moves once the game is over.
    let clock = s.now();
    idle(&mut s, 1000.0);
    assert_eq!(s.now(), clock);
    assert!(s.drain_events().is_empty());
}

#[test]
fn game_over_records_new_high_score() {
    let mut s = GameSession::new(config(), 50, 9);
    s.clear_field();
    s.data_mut().score = 70;
    s.ship_mut().health = 1;
    let ship_pos = s.ship().body.pos;
    s.spawn_ufo(ship_pos, Vec2::ZERO);
    idle(&mut s, FRAME_MS);

    assert!(s.new_high_score());
    assert_eq!(s.data().high_score, 70);

    s.restart();
    assert_eq!(s.data().score, 0);
    assert_eq!(s.data().lives, 3);
    assert_eq!(s.data().high_score, 70);
    assert!(!s.is_game_over());
}

// ── Properties ────────────────────────────────────────────────────────────────

#[test]
fn lives_follow_health_through_damage_and_healing() {
    let mut s = session();
    let ship_pos = s.ship().body.pos;
    s.spawn_asteroid(ship_pos, Vec2::ZERO, AsteroidSize::Small);
    idle(&mut s, FRAME_MS);
    assert_eq!(s.ship().health, 2);
    assert_eq!(s.data().lives, 2);

    let ship_pos = s.ship().body.pos;
    s.spawn_power_up(ship_pos, PowerUpKind::Health);
    idle(&mut s, FRAME_MS);
    assert_eq!(s.ship().health, 3);
    assert_eq!(s.data().lives, 3);
}

#[test]
fn invulnerable_ship_still_destroys_what_it_rams() {
    let mut s = session();
    let ship_pos = s.ship().body.pos;
    s.spawn_asteroid(ship_pos, Vec2::ZERO, AsteroidSize::Small);
    idle(&mut s, FRAME_MS);
    assert_eq!(s.ship().health, 2);

    let ship_pos = s.ship().body.pos;
    s.spawn_ufo(ship_pos, Vec2::ZERO);
    idle(&mut s, FRAME_MS);
    assert_eq!(s.ship().health, 2, "second ram lands inside the invulnerability window");
    assert_eq!(s.count(ActorTag::Ufo), 0);
}

#[test]
fn shield_absorbs_rams() {
    let mut s = session();
    let now = s.now();
    let cfg = s.config().clone();
    effects::apply(PowerUpKind::Shield, s.ship_mut(), now, &cfg);

    let ship_pos = s.ship().body.pos;
    s.spawn_asteroid(ship_pos, Vec2::ZERO, AsteroidSize::Small);
    s.spawn_ufo(ship_pos, Vec2::ZERO);
    idle(&mut s, FRAME_MS);

    assert_eq!(s.ship().health, 3);
    assert_eq!(s.count(ActorTag::Asteroid), 0);
    assert_eq!(s.count(ActorTag::Ufo), 0);
    assert_eq!(s.data().score, 0, "rams never score");
    assert!(s
        .drain_events()
        .iter()
        .any(|e| matches!(e, GameEvent::ShieldAbsorbed { .. })));
}

#[test]
fn strong_laser_passes_through_medium_asteroid() {
    let mut s = session();
    let target = Vec2::new(300.0, 200.0);
    let velocity = Vec2::new(30.0, 0.0);
    let rock = s.spawn_asteroid(target, velocity, AsteroidSize::Medium);
    let bullet = s.spawn_bullet(target, Vec2::ZERO, true);
    idle(&mut s, FRAME_MS);

    let bullet = s.actor(bullet).expect("strong bullet survives");
    assert!(!bullet.is_dead());
    let rock = s.actor(rock).expect("medium asteroid survives one hit");
    assert_eq!(rock.as_asteroid().map(|a| a.health), Some(1));
    assert_eq!(rock.body.vel, velocity);
}

#[test]
fn strong_laser_destroys_large_asteroid_outright() {
    let mut s = session();
    let target = Vec2::new(300.0, 200.0);
    s.spawn_asteroid(target, Vec2::ZERO, AsteroidSize::Large);
    let bullet = s.spawn_bullet(target, Vec2::ZERO, true);
    idle(&mut s, FRAME_MS);

    assert_eq!(s.data().score, 20);
    assert!(s.actor(bullet).is_some_and(|b| !b.is_dead()));
}

#[test]
fn medium_asteroid_leaves_one_small() {
    let mut s = session();
    let target = Vec2::new(600.0, 120.0);
    s.spawn_asteroid(target, Vec2::ZERO, AsteroidSize::Medium);
    shoot_at(&mut s, target);
    shoot_at(&mut s, target);

    assert_eq!(s.data().score, 50);
    let sizes: Vec<_> = s
        .live(ActorTag::Asteroid)
        .filter_map(|a| a.as_asteroid().map(|ast| ast.size))
        .collect();
    assert_eq!(sizes, vec![AsteroidSize::Small]);
}

#[test]
fn collecting_again_extends_the_effect() {
    let mut s = session();
    let ship_pos = s.ship().body.pos;
    s.spawn_power_up(ship_pos, PowerUpKind::TripleShot);
    idle(&mut s, FRAME_MS);
    assert!(s.ship().triple_shot_active());

    // Halfway through, pick up a second one.
    for _ in 0..100 {
        s.clear_field();
        idle(&mut s, 100.0);
    }
    s.clear_field();
    let ship_pos = s.ship().body.pos;
    s.spawn_power_up(ship_pos, PowerUpKind::TripleShot);
    idle(&mut s, FRAME_MS);

    // Past the first pickup's end, still running on the second.
    let cfg_ms = s.config().triple_shot_ms;
    let target = s.now() + (cfg_ms as f64) * 0.75;
    while s.now() < target {
        s.clear_field();
        idle(&mut s, 100.0);
    }
    assert!(s.ship().triple_shot_active());
}

#[test]
fn tutorial_freezes_the_whole_session() {
    let cfg = GameConfig {
        ship_entrance_ms: 0.0,
        ..GameConfig::default()
    };
    let mut s = GameSession::new(cfg, 0, 5);
    s.clear_field();
    s.spawn_power_up(Vec2::new(120.0, 120.0), PowerUpKind::StrongLaser);
    s.spawn_asteroid(Vec2::new(500.0, 100.0), Vec2::new(50.0, 50.0), AsteroidSize::Large);
    run_until(&mut s, 2_000.0, |s| s.tutorial_active().is_some());
    assert_eq!(s.tutorial_active(), Some(PowerUpKind::StrongLaser));

    let before: Vec<_> = s.actors().iter().map(|a| a.body.pos).collect();
    let data = s.data().clone();
    for _ in 0..20 {
        idle(&mut s, 100.0);
    }
    let after: Vec<_> = s.actors().iter().map(|a| a.body.pos).collect();
    assert_eq!(before, after);
    assert_eq!(*s.data(), data);

    s.dismiss_tutorial();
    idle(&mut s, 100.0);
    assert!(s.tutorial().is_explained(PowerUpKind::StrongLaser));
    assert_eq!(s.tutorial_active(), None);
}

// ── Boss stage ────────────────────────────────────────────────────────────────

/// Push a session from level 4 into the boss intro.
fn enter_boss_intro(s: &mut GameSession) {
    s.data_mut().level = 4;
    s.data_mut().score = 3_990;
    let target = Vec2::new(400.0, 150.0);
    s.spawn_asteroid(Vec2::new(100.0, 100.0), Vec2::ZERO, AsteroidSize::Large);
    s.spawn_asteroid(target, Vec2::ZERO, AsteroidSize::Small);
    shoot_at(s, target);
}

#[test]
fn level_five_brings_the_boss() {
    let mut s = session();
    enter_boss_intro(&mut s);

    assert_eq!(s.data().level, 5);
    assert_eq!(s.stage(), Stage::BossIntro);
    assert!(s
        .live(ActorTag::Asteroid)
        .all(|a| a.body.fade.is_some()));
    assert!(s.boss().is_none());

    // Score during the boss stage never levels up.
    s.data_mut().score = 9_000;

    run_until(&mut s, BOSS_INTRO_DELAY_MS + 200.0, |s| s.boss().is_some());
    assert_eq!(s.stage(), Stage::BossFight);
    assert_eq!(s.count(ActorTag::Asteroid), 0, "faded asteroids are gone");
    let boss = s.boss().expect("boss spawned");
    assert!(matches!(boss.state, BossState::Appearing { .. }));
    assert!(!boss.is_targetable());

    run_until(&mut s, 4_000.0, |s| s.boss().is_some_and(|b| b.is_targetable()));
    assert_eq!(s.data().level, 5);
}

#[test]
fn boss_turns_aggressive_and_victory_leads_to_level_six() {
    let mut s = session();
    enter_boss_intro(&mut s);
    run_until(&mut s, 8_000.0, |s| s.boss().is_some_and(|b| b.is_targetable()));

    let score_before = s.data().score;
    let mut phases = Vec::new();
    for _ in 0..30 {
        s.clear_field();
        let boss_pos = s.boss().map(|b| b.body.pos).expect("boss present");
        shoot_at(&mut s, boss_pos - Vec2::new(0.0, 25.0));
        if let Some(boss) = s.boss() {
            phases.push((boss.current_hp, boss.phase));
        }
    }

    // 22 hits leave 8 hp in phase 1; the 23rd drops to 7 and flips the phase.
    assert_eq!(phases[21], (8, BossPhase::Normal));
    assert_eq!(phases[22], (7, BossPhase::Aggressive));
    assert!(phases[22..].iter().all(|(_, p)| *p == BossPhase::Aggressive));
    assert!(s.boss().is_some_and(|b| b.is_defeated()));
    assert_eq!(s.stage(), Stage::BossVictory);
    assert_eq!(s.data().score, score_before + 30 * 10 + 1_000);
    assert_eq!(s.data().level, 5, "boss points never level up");

    let events = s.drain_events();
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::BossPhaseChanged { .. }))
            .count(),
        1
    );
    assert!(events.iter().any(|e| matches!(e, GameEvent::BossDefeated { .. })));

    s.clear_field();
    run_until(&mut s, BOSS_VICTORY_DELAY_MS + 200.0, |s| s.stage() == Stage::Normal);
    assert_eq!(s.stage(), Stage::Normal);
    assert_eq!(s.data().level, 6);
    assert!(s.boss().is_none());
    assert!(s.count(ActorTag::Asteroid) > 0, "level 6 opens with a fresh wave");
    assert!(s
        .drain_events()
        .contains(&GameEvent::BackgroundTransition { level: 6 }));
}
