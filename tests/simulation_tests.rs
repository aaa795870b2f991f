//! Headless tests for [`SimulationPlugin`] wired to the menu state machine.
//!
//! The clock advances a fixed 16 ms per `app.update()` and high-score
//! persistence is disabled, so nothing touches the filesystem.

use std::time::Duration;

use bevy::math::Vec2;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use starfall::actor::AsteroidSize;
use starfall::menu::{GameState, MainMenuPlugin};
use starfall::session::{GameSession, SceneTransition};
use starfall::simulation::{HighScoreStore, SessionSeed, SimulationPlugin};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(16)))
        .insert_resource(HighScoreStore::disabled())
        .insert_resource(SessionSeed(11))
        .init_resource::<ButtonInput<KeyCode>>()
        .add_plugins((MainMenuPlugin, SimulationPlugin));
    app
}

fn state(app: &App) -> GameState {
    app.world().resource::<State<GameState>>().get().clone()
}

fn start_game(app: &mut App) {
    app.update();
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    for _ in 0..3 {
        app.update();
    }
}

fn session(app: &mut App) -> Mut<'_, GameSession> {
    app.world_mut().resource_mut::<GameSession>()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn session_is_created_at_startup() {
    let mut app = headless_app();
    app.update();
    assert!(app.world().get_resource::<GameSession>().is_some());
    assert_eq!(state(&app), GameState::MainMenu);
}

#[test]
fn session_clock_only_runs_while_playing() {
    let mut app = headless_app();
    app.update();
    app.update();
    assert_eq!(session(&mut app).now(), 0.0, "menu must not advance the session");

    start_game(&mut app);
    assert_eq!(state(&app), GameState::Playing);
    assert!(session(&mut app).now() > 0.0);
}

#[test]
fn losing_the_last_hit_point_shows_game_over_then_restart_resets() {
    let mut app = headless_app();
    start_game(&mut app);

    {
        let mut s = session(&mut app);
        s.clear_field();
        s.data_mut().score = 120;
        s.ship_mut().health = 1;
        s.ship_mut().invulnerable_ms = 0.0;
        let pos = s.ship().body.pos;
        s.spawn_asteroid(pos, Vec2::ZERO, AsteroidSize::Large);
    }
    for _ in 0..3 {
        app.update();
    }
    assert_eq!(state(&app), GameState::GameOver);
    assert_eq!(session(&mut app).data().high_score, 120);

    session(&mut app).request_transition(SceneTransition::Restart);
    for _ in 0..3 {
        app.update();
    }
    assert_eq!(state(&app), GameState::Playing);
    let s = session(&mut app);
    assert!(!s.is_game_over());
    assert_eq!(s.data().score, 0);
    assert_eq!(s.data().lives, 3);
    assert_eq!(s.data().high_score, 120);
}

#[test]
fn menu_request_returns_to_title() {
    let mut app = headless_app();
    start_game(&mut app);

    session(&mut app).request_transition(SceneTransition::Menu);
    for _ in 0..2 {
        app.update();
    }
    assert_eq!(state(&app), GameState::MainMenu);
}
