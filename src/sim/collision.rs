//! Collision detection and pass-through scoring
//!
//! Everything here is judged against a single post-physics bird position.
//! The judge never mutates; the session applies the verdict.

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::obstacle::Obstacle;
use super::profile::Profile;
use crate::consts::SKY_HEIGHT;

/// What the bird hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    Ground,
    Ceiling,
    Pipe { id: u32 },
}

/// Verdict for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Judgement {
    /// First collision found, if any
    pub collision: Option<Collision>,
    /// Ids of pipes cleared this tick, in stream order
    pub scored: Vec<u32>,
}

impl Judgement {
    /// Whether the run must end
    pub fn terminal(&self) -> bool {
        self.collision.is_some()
    }
}

/// Bottom edge at or below the ground line
///
/// Uses the same threshold as the position clamp in `actor::step`.
#[inline]
pub fn hits_ground(actor: &Actor) -> bool {
    actor.pos.y >= actor.floor_y()
}

/// Top edge at or above the sky band
#[inline]
pub fn hits_ceiling(actor: &Actor) -> bool {
    actor.top() <= SKY_HEIGHT
}

/// Bird overlaps the pipe horizontally and is outside its gap
pub fn hits_pipe(actor: &Actor, obstacle: &Obstacle) -> bool {
    let overlaps = actor.left() < obstacle.right() && actor.right() > obstacle.x;
    overlaps && (actor.top() < obstacle.gap_top || actor.bottom() > obstacle.gap_bottom)
}

/// Bird's leading edge is past the pipe's trailing edge for the first time
#[inline]
pub fn clears_pipe(actor: &Actor, obstacle: &Obstacle) -> bool {
    !obstacle.passed && actor.right() > obstacle.right()
}

/// Judge the bird against the world boundaries and the pipe stream
pub fn judge(actor: &Actor, obstacles: &[Obstacle], profile: &Profile) -> Judgement {
    let collision = if !profile.collisions_enabled {
        None
    } else if hits_ground(actor) {
        Some(Collision::Ground)
    } else if hits_ceiling(actor) {
        Some(Collision::Ceiling)
    } else {
        obstacles
            .iter()
            .find(|o| hits_pipe(actor, o))
            .map(|o| Collision::Pipe { id: o.id })
    };

    let scored = obstacles
        .iter()
        .filter(|o| clears_pipe(actor, o))
        .map(|o| o.id)
        .collect();

    Judgement { collision, scored }
}
