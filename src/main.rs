use bevy::prelude::*;
use bevy::window::WindowResolution;
use std::env;

use starfall::constants::{WORLD_HEIGHT, WORLD_WIDTH};
use starfall::graphics;
use starfall::menu::{GameState, MainMenuPlugin};
use starfall::rendering::RenderingPlugin;
use starfall::simulation::{SessionSeed, SimulationPlugin};

fn main() {
    // Fixed seed for reproducible runs.
    let seed = env::var("STARFALL_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok());
    let skip_menu = env::var("STARFALL_SKIP_MENU").is_ok();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Starfall".into(),
            resolution: WindowResolution::new(WORLD_WIDTH as u32, WORLD_HEIGHT as u32),
            resizable: false,
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.06)))
    .add_plugins(MainMenuPlugin)
    .add_plugins(SimulationPlugin)
    .add_plugins(RenderingPlugin)
    .add_systems(Startup, graphics::setup_camera);

    if let Some(seed) = seed {
        app.insert_resource(SessionSeed(seed));
        println!("Using seed {}", seed);
    }
    if skip_menu {
        app.insert_state(GameState::Playing);
    }

    app.run();
}
