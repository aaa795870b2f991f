//! Presentation: gizmo drawing, HUD, tutorial panel and transient effects.
//!
//! Everything here only reads [`GameSession`] and [`SessionEvent`]s; nothing
//! feeds back into gameplay.
//!
//! ## System Responsibilities
//!
//! | System                      | Schedule | Purpose                                  |
//! |-----------------------------|----------|------------------------------------------|
//! | `setup_hud`                 | Startup  | Spawn HUD text and tutorial panel        |
//! | `hud_display_system`        | Update   | Score, lives, level, effect timers       |
//! | `tutorial_panel_system`     | Update   | Show the open power-up explanation       |
//! | `collect_flashes_system`    | Update   | Turn explosion events into flashes       |
//! | `background_theme_system`   | Update   | Swap clear colour on themed levels       |
//! | `overlay_toggle_system`     | Update   | F3 toggles hit-circle overlay            |
//! | `gizmo_rendering_system`    | Update   | Draw ship, actors, boss and flashes      |

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

use crate::actor::{ActorKind, AsteroidSize, BossProjectileKind, PowerUpKind};
use crate::boss::{Boss, BossPhase};
use crate::effects;
use crate::graphics::{screen_rotation, screen_to_world};
use crate::menu::GameState;
use crate::session::{GameEvent, GameSession};
use crate::simulation::SessionEvent;
use crate::spawner::is_themed_level;

const FLASH_MS: f32 = 300.0;
const FLASH_RADIUS: f32 = 30.0;

/// Debug overlay switches.
#[derive(Resource, Clone, Debug, Default)]
pub struct OverlayState {
    /// Draw every collision circle in yellow.
    pub show_hitboxes: bool,
}

/// Short-lived explosion rings, in playfield coordinates.
#[derive(Resource, Default, Debug)]
pub struct Flashes(pub Vec<Flash>);

#[derive(Debug, Clone, Copy)]
pub struct Flash {
    pub pos: Vec2,
    pub remaining_ms: f32,
    pub color: Color,
}

#[derive(Component)]
pub struct HudText;

#[derive(Component)]
pub struct TutorialPanel;

#[derive(Component)]
pub struct TutorialText;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OverlayState>()
            .init_resource::<Flashes>()
            .add_systems(Startup, setup_hud)
            .add_systems(
                Update,
                (
                    collect_flashes_system,
                    background_theme_system,
                    overlay_toggle_system,
                    hud_display_system,
                    tutorial_panel_system,
                    gizmo_rendering_system,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing).or(in_state(GameState::GameOver))),
            );
    }
}

// ── Palette ───────────────────────────────────────────────────────────────────

fn default_background() -> Color {
    Color::srgb(0.02, 0.02, 0.06)
}

/// Backdrop for the themed stretch after the boss.
fn themed_background(level: u32) -> Color {
    match level {
        6 => Color::srgb(0.06, 0.02, 0.10),
        7 => Color::srgb(0.02, 0.07, 0.10),
        8 => Color::srgb(0.08, 0.04, 0.02),
        9 => Color::srgb(0.02, 0.08, 0.04),
        _ => Color::srgb(0.10, 0.02, 0.04),
    }
}

fn asteroid_color(size: AsteroidSize) -> Color {
    match size {
        AsteroidSize::Large => Color::srgb(0.60, 0.55, 0.50),
        AsteroidSize::Medium => Color::srgb(0.70, 0.62, 0.52),
        AsteroidSize::Small => Color::srgb(0.80, 0.72, 0.60),
    }
}

fn power_up_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::Health => Color::srgb(0.2, 1.0, 0.3),
        PowerUpKind::RapidFire => Color::srgb(1.0, 0.85, 0.2),
        PowerUpKind::Shield => Color::srgb(0.3, 0.6, 1.0),
        PowerUpKind::TripleShot => Color::srgb(1.0, 0.5, 0.1),
        PowerUpKind::SpeedBoost => Color::srgb(0.2, 1.0, 1.0),
        PowerUpKind::StrongLaser => Color::srgb(1.0, 0.2, 0.9),
        PowerUpKind::NapalmBomb => Color::srgb(1.0, 0.25, 0.1),
        PowerUpKind::SupportShips => Color::srgb(0.7, 0.7, 1.0),
    }
}

fn faded(color: Color, alpha: f32) -> Color {
    color.with_alpha(alpha.clamp(0.0, 1.0))
}

// ── Startup ───────────────────────────────────────────────────────────────────

pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.88, 0.45)),
                HudText,
            ));
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            Visibility::Hidden,
            TutorialPanel,
        ))
        .with_children(|root| spawn_tutorial_box(root));
}

fn spawn_tutorial_box(root: &mut ChildSpawnerCommands<'_>) {
    root.spawn((
        Node {
            width: Val::Px(420.0),
            padding: UiRect::all(Val::Px(16.0)),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            border: UiRect::all(Val::Px(2.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.05, 0.05, 0.12, 0.92)),
        BorderColor::all(Color::srgb(0.3, 0.5, 0.9)),
    ))
    .with_children(|panel| {
        panel.spawn((
            Text::new(""),
            TextFont {
                font_size: 16.0,
                ..default()
            },
            TextColor(Color::WHITE),
            TutorialText,
        ));
        panel.spawn((
            Text::new("Press Enter to continue"),
            TextFont {
                font_size: 12.0,
                ..default()
            },
            TextColor(Color::srgb(0.5, 0.5, 0.6)),
        ));
    });
}

// ── Update: HUD ───────────────────────────────────────────────────────────────

/// One HUD line per active timed effect, in whole seconds.
pub fn effect_lines(session: &GameSession) -> Vec<String> {
    let ship = session.ship();
    PowerUpKind::ALL
        .iter()
        .filter_map(|kind| {
            let timer = effects::timer(ship, *kind)?;
            timer.is_active().then(|| {
                let secs = (timer.remaining_ms(session.now()) / 1000.0).ceil();
                format!("{}: {}s", kind.label(), secs)
            })
        })
        .collect()
}

pub fn hud_display_system(session: Option<Res<GameSession>>, mut query: Query<&mut Text, With<HudText>>) {
    let Some(session) = session else {
        return;
    };
    if !session.is_changed() {
        return;
    }
    let data = session.data();
    let mut lines = vec![
        format!("Score: {}", data.score),
        format!("Lives: {}", data.lives),
        format!(
            "Level: {}  (next at {})",
            data.level,
            data.next_level_score(session.config().level_score_step)
        ),
        format!("High: {}", data.high_score),
    ];
    lines.extend(effect_lines(&session));
    if let Some(boss) = session.boss() {
        lines.push(format!("Boss: {}/{}", boss.current_hp, boss.max_hp));
    }
    for mut text in query.iter_mut() {
        *text = Text::new(lines.join("\n"));
    }
}

pub fn tutorial_panel_system(
    session: Option<Res<GameSession>>,
    mut panel: Query<&mut Visibility, With<TutorialPanel>>,
    mut text: Query<&mut Text, With<TutorialText>>,
) {
    let Some(session) = session else {
        return;
    };
    let active = session.tutorial_active();
    for mut visibility in panel.iter_mut() {
        *visibility = if active.is_some() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
    if let Some(kind) = active {
        for mut t in text.iter_mut() {
            *t = Text::new(format!("{}\n\n{}", kind.label(), kind.explanation()));
        }
    }
}

// ── Update: transient effects ─────────────────────────────────────────────────

pub fn collect_flashes_system(
    time: Res<Time>,
    mut events: MessageReader<SessionEvent>,
    mut flashes: ResMut<Flashes>,
) {
    let delta_ms = time.delta_secs() * 1000.0;
    flashes.0.retain_mut(|f| {
        f.remaining_ms -= delta_ms;
        f.remaining_ms > 0.0
    });
    for SessionEvent(event) in events.read() {
        let (pos, color) = match event {
            GameEvent::Explosion { pos } => (*pos, Color::srgb(1.0, 0.6, 0.2)),
            GameEvent::ShieldAbsorbed { pos } => (*pos, Color::srgb(0.3, 0.6, 1.0)),
            GameEvent::PowerUpCollected { pos, kind } => (*pos, power_up_color(*kind)),
            _ => continue,
        };
        flashes.0.push(Flash {
            pos,
            remaining_ms: FLASH_MS,
            color,
        });
    }
}

pub fn background_theme_system(mut events: MessageReader<SessionEvent>, mut clear: ResMut<ClearColor>) {
    for SessionEvent(event) in events.read() {
        match event {
            GameEvent::BackgroundTransition { level } if is_themed_level(*level) => {
                clear.0 = themed_background(*level);
            }
            GameEvent::LevelUp { level } if !is_themed_level(*level) => {
                clear.0 = default_background();
            }
            _ => {}
        }
    }
}

pub fn overlay_toggle_system(keys: Res<ButtonInput<KeyCode>>, mut overlay: ResMut<OverlayState>) {
    if keys.just_pressed(KeyCode::F3) {
        overlay.show_hitboxes = !overlay.show_hitboxes;
    }
}

// ── Update: gizmos ────────────────────────────────────────────────────────────

pub fn gizmo_rendering_system(
    mut gizmos: Gizmos,
    session: Option<Res<GameSession>>,
    flashes: Res<Flashes>,
    overlay: Res<OverlayState>,
) {
    let Some(session) = session else {
        return;
    };
    let world = session.config().world_size();
    let to_world = |p: Vec2| screen_to_world(p, world);

    for actor in session.actors().iter().filter(|a| !a.is_dead()) {
        let body = &actor.body;
        let alpha = body.fade.map(|f| f.alpha()).unwrap_or(1.0);
        let center = to_world(body.pos);
        match &actor.kind {
            ActorKind::Asteroid(asteroid) => {
                let color = if asteroid.flash_ms > 0.0 {
                    Color::WHITE
                } else {
                    asteroid_color(asteroid.size)
                };
                gizmos.circle_2d(center, body.radius, faded(color, alpha));
                let spoke = Vec2::from_angle(screen_rotation(body.rotation)) * body.radius;
                gizmos.line_2d(center, center + spoke, faded(color, alpha * 0.6));
            }
            ActorKind::Bullet(bullet) => {
                let color = if bullet.strong_laser {
                    Color::srgb(1.0, 0.3, 0.9)
                } else {
                    Color::srgb(1.0, 1.0, 0.4)
                };
                gizmos.circle_2d(center, body.radius * 0.5, color);
            }
            ActorKind::PowerUp(power_up) => {
                let color = power_up_color(power_up.kind);
                gizmos.circle_2d(center, body.radius, faded(color, alpha));
                gizmos.circle_2d(center, body.radius * 0.5, faded(color, alpha * 0.5));
            }
            ActorKind::Ufo(_) => {
                let color = faded(Color::srgb(0.4, 1.0, 0.4), alpha);
                gizmos.circle_2d(center, body.radius, color);
                let half = Vec2::new(body.radius * 1.6, 0.0);
                gizmos.line_2d(center - half, center + half, color);
            }
            ActorKind::BossProjectile(projectile) => {
                let color = match projectile.kind {
                    BossProjectileKind::Rocket => Color::srgb(1.0, 0.4, 0.2),
                    BossProjectileKind::Bullet => Color::srgb(1.0, 0.1, 0.3),
                };
                gizmos.circle_2d(center, body.radius, faded(color, alpha));
            }
        }
        if overlay.show_hitboxes {
            gizmos.circle_2d(center, body.radius, Color::srgba(1.0, 1.0, 0.0, 0.5));
        }
    }

    if let Some(boss) = session.boss() {
        draw_boss(&mut gizmos, boss, world);
    }

    draw_ship(&mut gizmos, &session, world);

    for flash in &flashes.0 {
        let t = 1.0 - flash.remaining_ms / FLASH_MS;
        gizmos.circle_2d(
            to_world(flash.pos),
            FLASH_RADIUS * t.max(0.1),
            faded(flash.color, 1.0 - t),
        );
    }
}

fn draw_ship(gizmos: &mut Gizmos, session: &GameSession, world: Vec2) {
    let ship = session.ship();
    if ship.is_dead() {
        return;
    }
    // Blink while invulnerable.
    if ship.is_invulnerable() && (session.now() / 100.0) as u64 % 2 == 0 {
        return;
    }
    let pos = ship.body.pos;
    let color = Color::srgb(0.6, 0.85, 1.0);
    let hull = |p: Vec2, scale: f32| {
        [
            Vec2::new(0.0, -14.0),
            Vec2::new(-10.0, 10.0),
            Vec2::new(10.0, 10.0),
        ]
        .map(|v| screen_to_world(p + v * scale, world))
    };

    let [nose, left, right] = hull(pos, 1.0);
    gizmos.line_2d(nose, left, color);
    gizmos.line_2d(left, right, color);
    gizmos.line_2d(right, nose, color);

    if ship.shield_active() {
        gizmos.circle_2d(
            screen_to_world(pos, world),
            ship.body.radius * 2.0,
            Color::srgba(0.3, 0.6, 1.0, 0.7),
        );
    }
    if let Some(escorts) = ship.support_positions() {
        for escort in escorts {
            let [nose, left, right] = hull(escort, 0.6);
            let tint = Color::srgb(0.7, 0.7, 1.0);
            gizmos.line_2d(nose, left, tint);
            gizmos.line_2d(left, right, tint);
            gizmos.line_2d(right, nose, tint);
        }
    }
}

fn draw_boss(gizmos: &mut Gizmos, boss: &Boss, world: Vec2) {
    let center = screen_to_world(boss.body.pos, world);
    let radius = boss.body.radius * boss.scale;
    let base = match boss.phase {
        BossPhase::Normal => Color::srgb(0.8, 0.3, 0.9),
        BossPhase::Aggressive => Color::srgb(1.0, 0.2, 0.2),
    };
    gizmos.circle_2d(center, radius, faded(base, boss.alpha));

    let rotation = screen_rotation(boss.body.rotation);
    for i in 0..6 {
        let angle = rotation + i as f32 * std::f32::consts::TAU / 6.0;
        let tip = center + Vec2::from_angle(angle) * radius * 1.2;
        gizmos.line_2d(center + Vec2::from_angle(angle) * radius, tip, faded(base, boss.alpha));
    }

    // Health bar above the hull.
    let width = boss.body.radius * 2.0;
    let left = center + Vec2::new(-width * 0.5, radius + 12.0);
    let filled = left + Vec2::new(width * boss.hp_fraction(), 0.0);
    gizmos.line_2d(left, left + Vec2::new(width, 0.0), faded(Color::srgb(0.3, 0.3, 0.3), boss.alpha));
    gizmos.line_2d(left, filled, faded(Color::srgb(0.2, 1.0, 0.3), boss.alpha));
}
