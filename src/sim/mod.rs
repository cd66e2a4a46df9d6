//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, storage or platform dependencies

pub mod actor;
pub mod collision;
pub mod obstacle;
pub mod profile;
pub mod state;
pub mod tick;

pub use actor::{Actor, BirdSize};
pub use collision::{Collision, Judgement, judge};
pub use obstacle::Obstacle;
pub use profile::{Difficulty, GameMode, Profile, resolve};
pub use state::{
    Command, EffectEvent, EffectKind, EndReason, GameStatus, Session, SessionResult, Snapshot,
};
pub use tick::{apply_command, tick};
