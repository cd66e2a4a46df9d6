//! Pipe stream: movement, retirement and spawning
//!
//! Spawning chains off the previous spawn position (`last_spawn_x`) rather
//! than the live position of the rightmost pipe. Live pipes end up a fixed
//! `2 * spawn_spacing` apart, while the spawn point creeps right by
//! `spawn_spacing` per spawn, so pipes queue up beyond the right edge over a
//! long run.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::profile::Profile;
use crate::consts::*;

/// A pipe pair with a vertical gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Bottom of the upper pipe
    pub gap_top: f32,
    /// Top of the lower pipe
    pub gap_bottom: f32,
    /// Set once the bird has cleared this pipe
    pub passed: bool,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, gap_top: f32, gap_height: f32) -> Self {
        Self {
            id,
            x,
            width: PIPE_WIDTH,
            gap_top,
            gap_bottom: gap_top + gap_height,
            passed: false,
        }
    }

    /// Trailing edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_center(&self) -> f32 {
        (self.gap_top + self.gap_bottom) / 2.0
    }

    /// Fully past the left edge, including the pop-in slack
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.right() < -OFFSCREEN_MARGIN
    }
}

/// Allowed range for `gap_top` at a given gap height
pub fn gap_top_range(gap_height: f32) -> (f32, f32) {
    let min = SKY_HEIGHT + GAP_MARGIN;
    let max = PLAYFIELD_HEIGHT - GROUND_HEIGHT - gap_height - GAP_MARGIN;
    (min, max.max(min))
}

/// Scroll every pipe left and drop the ones that are gone
pub fn advance(obstacles: &mut Vec<Obstacle>, profile: &Profile) {
    for obstacle in obstacles.iter_mut() {
        obstacle.x -= profile.obstacle_speed;
    }
    obstacles.retain(|o| !o.is_offscreen());
}

/// Whether the stream is due a new pipe this tick
pub fn should_spawn(obstacles: &[Obstacle], last_spawn_x: f32, profile: &Profile) -> bool {
    match obstacles.last() {
        None => true,
        Some(tail) => tail.x <= last_spawn_x - profile.spawn_spacing,
    }
}

/// Build the next pipe, `spawn_spacing` to the right of the previous spawn
pub fn spawn<R: Rng + ?Sized>(
    id: u32,
    last_spawn_x: f32,
    profile: &Profile,
    rng: &mut R,
) -> Obstacle {
    let (min, max) = gap_top_range(profile.gap_height);
    let gap_top = rng.random_range(min..=max);
    Obstacle::new(id, last_spawn_x + profile.spawn_spacing, gap_top, profile.gap_height)
}
