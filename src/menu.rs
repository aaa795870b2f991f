//! Scene flow: `GameState` definition, the title screen and the game-over screen.
//!
//! ## States
//!
//! | State      | Description                                  |
//! |------------|----------------------------------------------|
//! | `MainMenu` | Initial state; title screen shown            |
//! | `Playing`  | Session running; all gameplay systems active |
//! | `GameOver` | Final score shown over the frozen playfield  |
//!
//! ## Systems (registered by `MainMenuPlugin`)
//!
//! | System                  | Schedule               | Purpose                        |
//! |-------------------------|------------------------|--------------------------------|
//! | `setup_main_menu`       | `OnEnter(MainMenu)`    | Spawn title UI                 |
//! | `cleanup_main_menu`     | `OnExit(MainMenu)`     | Despawn title UI               |
//! | `menu_button_system`    | `Update / MainMenu`    | Start / Quit clicks            |
//! | `menu_keyboard_system`  | `Update / MainMenu`    | Space or Enter starts          |
//! | `setup_game_over`       | `OnEnter(GameOver)`    | Spawn score summary            |
//! | `cleanup_game_over`     | `OnExit(GameOver)`     | Despawn score summary          |
//! | `game_over_input_system`| `Update / GameOver`    | R restarts, Esc returns to menu|

use bevy::prelude::*;

use crate::session::{GameSession, SceneTransition};

// ── Game state ────────────────────────────────────────────────────────────────

/// Top-level application state machine.
///
/// Gameplay systems in [`crate::simulation::SimulationPlugin`] run under
/// `.run_if(in_state(GameState::Playing))`.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    MainMenu,
    Playing,
    GameOver,
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the title UI; entire tree is despawned on `OnExit(MainMenu)`.
#[derive(Component)]
pub struct MainMenuRoot;

#[derive(Component)]
pub struct MenuStartButton;

#[derive(Component)]
pub struct MenuQuitButton;

/// Root node of the game-over summary.
#[derive(Component)]
pub struct GameOverRoot;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers `GameState` and both overlay screens.
///
/// Add this before any plugin that calls `.run_if(in_state(..))`.
pub struct MainMenuPlugin;

impl Plugin for MainMenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_systems(OnEnter(GameState::MainMenu), setup_main_menu)
            .add_systems(OnExit(GameState::MainMenu), cleanup_main_menu)
            .add_systems(OnEnter(GameState::GameOver), setup_game_over)
            .add_systems(OnExit(GameState::GameOver), cleanup_game_over)
            .add_systems(
                Update,
                (menu_button_system, menu_keyboard_system).run_if(in_state(GameState::MainMenu)),
            )
            .add_systems(
                Update,
                game_over_input_system.run_if(in_state(GameState::GameOver)),
            );
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn start_bg() -> Color {
    Color::srgb(0.08, 0.20, 0.36)
}
fn start_border() -> Color {
    Color::srgb(0.25, 0.55, 0.95)
}
fn start_text() -> Color {
    Color::srgb(0.80, 0.90, 1.0)
}
fn quit_bg() -> Color {
    Color::srgb(0.28, 0.06, 0.06)
}
fn quit_border() -> Color {
    Color::srgb(0.60, 0.12, 0.12)
}
fn quit_text() -> Color {
    Color::srgb(1.0, 0.65, 0.65)
}
fn title_color() -> Color {
    Color::srgb(0.95, 0.88, 0.45)
}
fn subtitle_color() -> Color {
    Color::srgb(0.55, 0.55, 0.65)
}
fn hint_color() -> Color {
    Color::srgb(0.35, 0.35, 0.45)
}

// ── OnEnter(MainMenu): spawn UI ───────────────────────────────────────────────

/// Spawn the full-screen title overlay.
///
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │                 STARFALL                    │
/// │            High score: 12345                │
/// │              [ START GAME ]                 │
/// │                 [ QUIT ]                    │
/// │   Arrows / WASD move · Space fires          │
/// └─────────────────────────────────────────────┘
/// ```
pub fn setup_main_menu(mut commands: Commands, session: Option<Res<GameSession>>) {
    let high_score = session.map(|s| s.data().high_score).unwrap_or(0);

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::BLACK),
            MainMenuRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("STARFALL"),
                TextFont {
                    font_size: 56.0,
                    ..default()
                },
                TextColor(title_color()),
            ));

            spacer(root, 10.0);

            root.spawn((
                Text::new(format!("High score: {high_score}")),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(subtitle_color()),
            ));

            spacer(root, 52.0);

            menu_button(root, "START GAME", start_bg(), start_border(), start_text(), MenuStartButton);
            spacer(root, 14.0);
            menu_button(root, "QUIT", quit_bg(), quit_border(), quit_text(), MenuQuitButton);

            spacer(root, 52.0);

            root.spawn((
                Text::new("Arrows / WASD move  ·  Space fires  ·  Enter closes tips"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(hint_color()),
            ));
        });
}

fn menu_button(
    parent: &mut ChildSpawnerCommands<'_>,
    label: &str,
    bg: Color,
    border: Color,
    text: Color,
    marker: impl Component,
) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(220.0),
                height: Val::Px(50.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(bg),
            BorderColor::all(border),
            marker,
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(text),
            ));
        });
}

/// Spawn a fixed-height invisible spacer node.
fn spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

// ── OnExit(MainMenu): despawn UI ──────────────────────────────────────────────

pub fn cleanup_main_menu(mut commands: Commands, query: Query<Entity, With<MainMenuRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

// ── Update (MainMenu only) ────────────────────────────────────────────────────

/// Handle Start Game and Quit button presses.
#[allow(clippy::type_complexity)]
pub fn menu_button_system(
    start_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<MenuStartButton>)>,
    quit_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<MenuQuitButton>)>,
    mut btn_text: Query<&mut TextColor>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<bevy::app::AppExit>,
) {
    for (interaction, children) in start_query.iter() {
        match interaction {
            Interaction::Pressed => next_state.set(GameState::Playing),
            Interaction::Hovered => tint(children, &mut btn_text, Color::WHITE),
            Interaction::None => tint(children, &mut btn_text, start_text()),
        }
    }

    for (interaction, children) in quit_query.iter() {
        match interaction {
            Interaction::Pressed => {
                exit.write(bevy::app::AppExit::Success);
            }
            Interaction::Hovered => tint(children, &mut btn_text, Color::WHITE),
            Interaction::None => tint(children, &mut btn_text, quit_text()),
        }
    }
}

fn tint(children: &Children, btn_text: &mut Query<&mut TextColor>, color: Color) {
    for child in children.iter() {
        if let Ok(mut text) = btn_text.get_mut(child) {
            *text = TextColor(color);
        }
    }
}

pub fn menu_keyboard_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Space) || keys.just_pressed(KeyCode::Enter) {
        next_state.set(GameState::Playing);
    }
}

// ── GameOver screen ───────────────────────────────────────────────────────────

pub fn setup_game_over(mut commands: Commands, session: Option<Res<GameSession>>) {
    let (score, high_score, record) = session
        .map(|s| (s.data().score, s.data().high_score, s.new_high_score()))
        .unwrap_or_default();

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            GameOverRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("GAME OVER"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(quit_text()),
            ));
            spacer(root, 16.0);
            root.spawn((
                Text::new(format!("Score: {score}")),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            let best = if record {
                format!("New high score: {high_score}!")
            } else {
                format!("High score: {high_score}")
            };
            root.spawn((
                Text::new(best),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(title_color()),
            ));
            spacer(root, 32.0);
            root.spawn((
                Text::new("R  restart  ·  Esc  main menu"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(hint_color()),
            ));
        });
}

pub fn cleanup_game_over(mut commands: Commands, query: Query<Entity, With<GameOverRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Queue restart or menu requests on the session; the simulation plugin
/// turns them into state changes.
pub fn game_over_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    session: Option<ResMut<GameSession>>,
) {
    let Some(mut session) = session else {
        return;
    };
    if keys.just_pressed(KeyCode::KeyR) {
        session.request_transition(SceneTransition::Restart);
    } else if keys.just_pressed(KeyCode::Escape) {
        session.request_transition(SceneTransition::Menu);
    }
}
