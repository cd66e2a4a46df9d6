//! Session state and core simulation types
//!
//! The `Session` is the single authoritative owner of the bird and the pipe
//! stream. Runs advance only through `sim::tick`; outside callers may only
//! adopt a persisted high score via `Session::set_high_score`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, BirdSize};
use super::collision::Collision;
use super::obstacle::Obstacle;
use super::profile::Profile;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Title screen, nothing advances
    Menu,
    /// Active gameplay
    Playing,
    /// Suspended, resumes exactly where it stopped
    Paused,
    /// Run ended, waiting for start or reset
    GameOver,
}

/// Abstract commands delivered by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Jump,
    Reset,
    Pause,
    Resume,
}

/// Visual/audio cue kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Jump,
    Score,
    Collision,
}

/// Ephemeral cue for the particle and sound layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectEvent {
    pub kind: EffectKind,
    pub origin: Vec2,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    Collision(Collision),
    TimeUp,
}

/// A completed run, handed to the statistics bridge exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub score: u32,
    pub duration_secs: u64,
    pub reason: EndReason,
}

/// Read-only view for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub status: GameStatus,
    pub score: u32,
    pub high_score: u32,
    pub actor: Actor,
    /// Stream order (oldest first)
    pub obstacles: Vec<Obstacle>,
    /// Seconds left in time-limited modes
    pub time_left_secs: Option<u32>,
    /// Cues raised since the previous snapshot
    pub events: Vec<EffectEvent>,
}

/// Authoritative game session
#[derive(Debug, Clone)]
pub struct Session<R: Rng = Pcg32> {
    /// Tuning for every run in this session
    pub profile: Profile,
    pub status: GameStatus,
    pub score: u32,
    /// Best score seen; drops only when statistics are cleared
    pub high_score: u32,
    pub bird_size: BirdSize,
    pub actor: Actor,
    /// Live pipes, creation ordered
    pub obstacles: Vec<Obstacle>,
    /// Ticks spent playing in the current run
    pub elapsed_ticks: u64,
    /// Ticks remaining (time-limited modes only)
    pub countdown_ticks: Option<u64>,
    /// Spawn cursor: x of the most recent spawn
    pub last_spawn_x: f32,
    pub(crate) rng: R,
    pub(crate) events: Vec<EffectEvent>,
    next_id: u32,
}

impl Session<Pcg32> {
    /// Create a session with a seeded generator
    pub fn new(profile: Profile, bird_size: BirdSize, high_score: u32, seed: u64) -> Self {
        Self::with_rng(profile, bird_size, high_score, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Create a session around any random source
    pub fn with_rng(profile: Profile, bird_size: BirdSize, high_score: u32, rng: R) -> Self {
        Self {
            profile,
            status: GameStatus::Menu,
            score: 0,
            high_score,
            bird_size,
            actor: Actor::spawn(bird_size),
            obstacles: Vec::new(),
            elapsed_ticks: 0,
            countdown_ticks: None,
            last_spawn_x: PLAYFIELD_WIDTH,
            rng,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Adopt the persisted best score (after a save, or a statistics wipe)
    pub fn set_high_score(&mut self, best: u32) {
        if best != self.high_score {
            log::debug!("High score {} -> {}", self.high_score, best);
        }
        self.high_score = best;
    }

    /// Put the bird, pipes, score and clocks back to a fresh run
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.actor = Actor::spawn(self.bird_size);
        self.obstacles.clear();
        self.elapsed_ticks = 0;
        self.countdown_ticks = self
            .profile
            .time_limit_secs
            .map(|secs| secs as u64 * TICK_RATE as u64);
        self.last_spawn_x = PLAYFIELD_WIDTH;
    }

    /// Seconds left on the countdown (rounded up)
    pub fn time_left_secs(&self) -> Option<u32> {
        let rate = TICK_RATE as u64;
        self.countdown_ticks.map(|t| t.div_ceil(rate) as u32)
    }

    pub(crate) fn emit(&mut self, kind: EffectKind, origin: Vec2) {
        self.events.push(EffectEvent { kind, origin });
    }

    /// Cues raised but not yet drained
    pub fn pending_events(&self) -> &[EffectEvent] {
        &self.events
    }

    /// Copy out renderer state and drain the effect queue
    pub fn snapshot(&mut self) -> Snapshot {
        Snapshot {
            status: self.status,
            score: self.score,
            high_score: self.high_score,
            actor: self.actor,
            obstacles: self.obstacles.clone(),
            time_left_secs: self.time_left_secs(),
            events: std::mem::take(&mut self.events),
        }
    }
}
