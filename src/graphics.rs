use bevy::prelude::*;

/// Setup camera for 2D rendering.
///
/// The default projection maps one world unit to one pixel, so an 800×600
/// window shows exactly the playfield once it is centred.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
    eprintln!("[SETUP] Camera spawned");
}

/// Playfield coordinates (origin top-left, +y down) to Bevy world space
/// (origin centre, +y up).
#[inline]
pub fn screen_to_world(pos: Vec2, world: Vec2) -> Vec2 {
    Vec2::new(pos.x - world.x * 0.5, world.y * 0.5 - pos.y)
}

/// Rotation in playfield space (clockwise-positive) to Bevy's counter-clockwise.
#[inline]
pub fn screen_rotation(rotation: f32) -> f32 {
    -rotation
}
