//! Starfall gameplay core.
//!
//! An arcade asteroid shooter: a spaceship clears asteroids and UFOs, picks up
//! timed power-ups, and fights a two-phase boss at level 5.  All rules live in
//! plain Rust ([`session::GameSession`] and the modules it drives); the Bevy
//! plugins in [`menu`], [`simulation`] and [`rendering`] only feed it input
//! and present its state.

pub mod actor;
pub mod boss;
pub mod collision;
pub mod config;
pub mod constants;
pub mod effects;
pub mod error;
pub mod game_data;
pub mod graphics;
pub mod input;
pub mod menu;
pub mod progression;
pub mod rendering;
pub mod save;
pub mod session;
pub mod simulation;
pub mod spaceship;
pub mod spawner;
pub mod timer;
pub mod tutorial;
