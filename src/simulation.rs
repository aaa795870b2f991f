//! Simulation plugin: drives [`GameSession`] from Bevy's clock and keyboard.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use bevy::input::ButtonInput;
use bevy::prelude::*;

use crate::config::{load_game_config, GameConfig};
use crate::input::PlayerIntent;
use crate::menu::GameState;
use crate::save;
use crate::session::{GameEvent, GameSession, SceneTransition};

/// Every session notification, re-broadcast for presentation systems.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct SessionEvent(pub GameEvent);

/// Where the high score lives; `None` disables persistence.
#[derive(Resource, Debug, Clone)]
pub struct HighScoreStore {
    pub dir: Option<PathBuf>,
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self {
            dir: Some(save::save_dir()),
        }
    }
}

impl HighScoreStore {
    pub fn disabled() -> Self {
        Self { dir: None }
    }
}

/// Seed for the session's random stream.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SessionSeed(pub u64);

impl Default for SessionSeed {
    fn default() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self(nanos)
    }
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .init_resource::<HighScoreStore>()
            .init_resource::<SessionSeed>()
            .add_message::<SessionEvent>()
            .add_systems(Startup, (load_game_config, init_session_system).chain())
            .add_systems(OnEnter(GameState::Playing), start_playthrough_system)
            .add_systems(
                Update,
                (tutorial_dismiss_system, tick_session_system, leave_to_menu_system)
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                process_session_events_system.after(tick_session_system),
            );
    }
}

/// Directional and fire intent from arrows/WASD and Space.
pub fn intent_from_keys(keys: &ButtonInput<KeyCode>) -> PlayerIntent {
    PlayerIntent {
        up: keys.any_pressed([KeyCode::ArrowUp, KeyCode::KeyW]),
        down: keys.any_pressed([KeyCode::ArrowDown, KeyCode::KeyS]),
        left: keys.any_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]),
        right: keys.any_pressed([KeyCode::ArrowRight, KeyCode::KeyD]),
        fire: keys.pressed(KeyCode::Space),
    }
}

/// Create the session once the tuning file has been read.
pub fn init_session_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    store: Res<HighScoreStore>,
    seed: Res<SessionSeed>,
) {
    let high_score = match store.dir.as_deref().map(save::load_high_score_from) {
        Some(Ok(score)) => score,
        Some(Err(err)) => {
            warn!("Could not read high score, starting from 0: {}", err);
            0
        }
        None => 0,
    };
    commands.insert_resource(GameSession::new(config.clone(), high_score, seed.0));
    info!("Session ready (high score {})", high_score);
}

/// Every entry into `Playing` starts a fresh playthrough with the current tuning.
pub fn start_playthrough_system(config: Res<GameConfig>, session: Option<ResMut<GameSession>>) {
    let Some(mut session) = session else {
        warn!("Entered Playing without a session");
        return;
    };
    session.set_config(config.clone());
    session.restart();
    info!("New game started");
}

pub fn tick_session_system(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    session: Option<ResMut<GameSession>>,
) {
    let Some(mut session) = session else {
        return;
    };
    let delta_ms = time.delta_secs() * 1000.0;
    session.update(delta_ms, intent_from_keys(&keys));
}

pub fn tutorial_dismiss_system(keys: Res<ButtonInput<KeyCode>>, session: Option<ResMut<GameSession>>) {
    let Some(mut session) = session else {
        return;
    };
    if session.tutorial_active().is_some() && keys.just_pressed(KeyCode::Enter) {
        if let Some(kind) = session.dismiss_tutorial() {
            debug!("Tutorial closed: {}", kind.label());
        }
    }
}

pub fn leave_to_menu_system(keys: Res<ButtonInput<KeyCode>>, session: Option<ResMut<GameSession>>) {
    let Some(mut session) = session else {
        return;
    };
    if keys.just_pressed(KeyCode::Escape) {
        session.request_transition(SceneTransition::Menu);
    }
}

/// Drain the session outbox: log, persist, re-broadcast and change scenes.
pub fn process_session_events_system(
    session: Option<ResMut<GameSession>>,
    store: Res<HighScoreStore>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut writer: MessageWriter<SessionEvent>,
) {
    let Some(mut session) = session else {
        return;
    };
    for event in session.drain_events() {
        match &event {
            GameEvent::LevelUp { level } => info!("Level {}", level),
            GameEvent::BackgroundTransition { level } => debug!("Background theme for level {}", level),
            GameEvent::BossIntro => info!("Boss approaching"),
            GameEvent::BossAppearing => info!("Boss entering the arena"),
            GameEvent::BossPhaseChanged { phase } => info!("Boss entered phase {}", phase.number()),
            GameEvent::BossDefeated { .. } => info!("Boss defeated"),
            GameEvent::TutorialOpened { kind } => {
                info!("{}: {}", kind.label(), kind.explanation())
            }
            GameEvent::PowerUpCollected { kind, .. } => debug!("Collected {}", kind.label()),
            GameEvent::PowerUpExpired { kind } => debug!("{} wore off", kind.label()),
            GameEvent::Sound { key, volume } => trace!("sound {} @ {:.1}", key.asset_key(), volume),
            GameEvent::Explosion { .. } | GameEvent::ShieldAbsorbed { .. } => {}
            GameEvent::Transition(transition) => {
                apply_transition(*transition, &mut session, &store, state.get(), &mut next_state)
            }
        }
        writer.write(SessionEvent(event));
    }
}

fn apply_transition(
    transition: SceneTransition,
    session: &mut GameSession,
    store: &HighScoreStore,
    current: &GameState,
    next_state: &mut NextState<GameState>,
) {
    match transition {
        SceneTransition::GameOver => {
            let data = session.data();
            info!("Game over: score {} (high score {})", data.score, data.high_score);
            if session.new_high_score() {
                if let Some(dir) = store.dir.as_deref() {
                    match save::save_high_score_to(dir, data.high_score) {
                        Ok(()) => info!("Saved new high score {}", data.high_score),
                        Err(err) => warn!("Failed to save high score: {}", err),
                    }
                }
            }
            next_state.set(GameState::GameOver);
        }
        SceneTransition::Restart => {
            if *current == GameState::Playing {
                session.restart();
                info!("New game started");
            } else {
                next_state.set(GameState::Playing);
            }
        }
        SceneTransition::Menu => next_state.set(GameState::MainMenu),
    }
}
