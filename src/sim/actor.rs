//! Bird physics
//!
//! One fixed step of vertical motion: gravity or jump impulse, a symmetric
//! velocity clamp, a soft positional clamp, and a cosmetic tilt.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::profile::Profile;
use crate::consts::*;
use crate::floor_limit;

/// Bird size choice; scales the collision box, never the physics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum BirdSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl BirdSize {
    pub const ALL: [BirdSize; 3] = [BirdSize::Small, BirdSize::Medium, BirdSize::Large];

    pub fn multiplier(&self) -> f32 {
        match self {
            BirdSize::Small => 0.8,
            BirdSize::Medium => 1.0,
            BirdSize::Large => 1.2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BirdSize::Small => "small",
            BirdSize::Medium => "medium",
            BirdSize::Large => "large",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "small" => Some(BirdSize::Small),
            "medium" | "med" => Some(BirdSize::Medium),
            "large" => Some(BirdSize::Large),
            _ => None,
        }
    }
}

/// The player's bird
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner; `x` never changes
    pub pos: Vec2,
    /// Vertical velocity (positive is down)
    pub velocity: f32,
    /// Visual tilt in degrees, within [-30, 30]
    pub rotation_deg: f32,
    pub size: BirdSize,
}

impl Default for Actor {
    fn default() -> Self {
        Self::spawn(BirdSize::default())
    }
}

impl Actor {
    /// Bird at the spawn point, at rest
    pub fn spawn(size: BirdSize) -> Self {
        Self {
            pos: Vec2::new(ACTOR_X, ACTOR_SPAWN_Y),
            velocity: 0.0,
            rotation_deg: 0.0,
            size,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        ACTOR_WIDTH * self.size.multiplier()
    }

    #[inline]
    pub fn height(&self) -> f32 {
        ACTOR_HEIGHT * self.size.multiplier()
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height()
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    /// Leading edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width()
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width(), self.height()) / 2.0
    }

    /// Highest allowed `pos.y` for this bird's size
    #[inline]
    pub fn floor_y(&self) -> f32 {
        floor_limit(self.height())
    }
}

/// Advance the bird by one tick
pub fn step(actor: &Actor, jump_requested: bool, profile: &Profile) -> Actor {
    let velocity = if jump_requested {
        profile.jump_impulse
    } else {
        actor.velocity + profile.gravity
    };
    let velocity = velocity.clamp(-profile.max_fall_speed, profile.max_fall_speed);

    // Soft boundary: keeps the bird drawable, collision is judged separately
    let y = (actor.pos.y + velocity).clamp(0.0, actor.floor_y());

    let rotation_deg = (velocity * ROTATION_FACTOR).clamp(-MAX_ROTATION_DEG, MAX_ROTATION_DEG);

    Actor {
        pos: Vec2::new(actor.pos.x, y),
        velocity,
        rotation_deg,
        size: actor.size,
    }
}
