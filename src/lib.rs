//! Flappy Core - deterministic simulation for a side-scrolling gate runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, session)
//! - `records`: Aggregate statistics and high score bookkeeping
//! - `persistence`: Key-value store boundary (memory and file backed)
//! - `platform`: Command queue and fixed timestep clock
//! - `settings`: Player customization choices
//! - `game`: Owns one session plus its records and drives it frame by frame

pub mod game;
pub mod persistence;
pub mod platform;
pub mod records;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use records::{GameStats, Records};
pub use settings::Customization;

/// Game configuration constants
pub mod consts {
    /// Simulation tick rate (one tick per display refresh)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
    pub const GROUND_HEIGHT: f32 = 80.0;
    pub const SKY_HEIGHT: f32 = 50.0;

    /// Bird defaults (before size multiplier)
    pub const ACTOR_X: f32 = 150.0;
    pub const ACTOR_SPAWN_Y: f32 = PLAYFIELD_HEIGHT / 2.0;
    pub const ACTOR_WIDTH: f32 = 32.0;
    pub const ACTOR_HEIGHT: f32 = 24.0;
    /// Terminal velocity, shared by every difficulty
    pub const MAX_FALL_SPEED: f32 = 10.0;
    /// Degrees of tilt per unit of velocity
    pub const ROTATION_FACTOR: f32 = 3.0;
    pub const MAX_ROTATION_DEG: f32 = 30.0;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 80.0;
    /// Keeps gaps away from the sky and ground bands
    pub const GAP_MARGIN: f32 = 50.0;
    /// Slack past the left edge before a pipe is dropped
    pub const OFFSCREEN_MARGIN: f32 = 100.0;

    /// Time Attack session length
    pub const TIME_ATTACK_SECS: u32 = 60;
}

/// Lowest `y` the bird's top edge may reach before its bottom edge meets the ground.
///
/// Both the position clamp and the ground collision check go through here so
/// a bird pinned to the floor is always also flagged as grounded.
#[inline]
pub fn floor_limit(actor_height: f32) -> f32 {
    consts::PLAYFIELD_HEIGHT - consts::GROUND_HEIGHT - actor_height
}

/// Convert a tick count into whole seconds (rounded)
#[inline]
pub fn ticks_to_secs(ticks: u64) -> u64 {
    let rate = consts::TICK_RATE as u64;
    (ticks + rate / 2) / rate
}
