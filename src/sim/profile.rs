//! Difficulty and game mode tuning tables
//!
//! Pure lookup from a (difficulty, mode) pair to the numeric constants the
//! simulation runs on. Every combination resolves; there is no failure path.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FALL_SPEED, TIME_ATTACK_SECS};

/// Difficulty levels, ordered from gentlest to harshest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "expert" => Some(Difficulty::Expert),
            _ => None,
        }
    }
}

/// Game mode variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    /// Traditional gameplay
    #[default]
    Classic,
    /// Score as much as possible before the clock runs out
    TimeAttack,
    /// Plays like classic
    Survival,
    /// No collisions, scoring still counts
    Zen,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::Classic,
        GameMode::TimeAttack,
        GameMode::Survival,
        GameMode::Zen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::TimeAttack => "timeAttack",
            GameMode::Survival => "survival",
            GameMode::Zen => "zen",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "timeattack" | "time-attack" | "time_attack" => Some(GameMode::TimeAttack),
            "survival" => Some(GameMode::Survival),
            "zen" => Some(GameMode::Zen),
            _ => None,
        }
    }

    /// Display name shown in menus
    pub fn display_name(&self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::TimeAttack => "Time Attack",
            GameMode::Survival => "Survival",
            GameMode::Zen => "Zen Mode",
        }
    }
}

/// Resolved tuning for one session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub difficulty: Difficulty,
    pub mode: GameMode,
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Velocity set by a jump (negative is up)
    pub jump_impulse: f32,
    /// Symmetric velocity clamp
    pub max_fall_speed: f32,
    /// Leftward pipe movement per tick
    pub obstacle_speed: f32,
    /// Vertical opening of each pipe
    pub gap_height: f32,
    /// Horizontal offset between consecutive spawns
    pub spawn_spacing: f32,
    /// Session length cap in seconds (time-limited modes only)
    pub time_limit_secs: Option<u32>,
    /// False in zen mode
    pub collisions_enabled: bool,
}

struct DifficultyRow {
    gravity: f32,
    jump_impulse: f32,
    obstacle_speed: f32,
    gap_height: f32,
    spawn_spacing: f32,
}

const fn row(difficulty: Difficulty) -> DifficultyRow {
    match difficulty {
        Difficulty::Easy => DifficultyRow {
            gravity: 0.4,
            jump_impulse: -7.5,
            obstacle_speed: 1.5,
            gap_height: 180.0,
            spawn_spacing: 350.0,
        },
        Difficulty::Normal => DifficultyRow {
            gravity: 0.5,
            jump_impulse: -8.5,
            obstacle_speed: 2.0,
            gap_height: 150.0,
            spawn_spacing: 300.0,
        },
        Difficulty::Hard => DifficultyRow {
            gravity: 0.6,
            jump_impulse: -9.0,
            obstacle_speed: 2.5,
            gap_height: 120.0,
            spawn_spacing: 280.0,
        },
        Difficulty::Expert => DifficultyRow {
            gravity: 0.7,
            jump_impulse: -9.5,
            obstacle_speed: 3.0,
            gap_height: 100.0,
            spawn_spacing: 250.0,
        },
    }
}

/// Resolve the tuning bundle for a difficulty/mode pair
pub fn resolve(difficulty: Difficulty, mode: GameMode) -> Profile {
    let r = row(difficulty);
    Profile {
        difficulty,
        mode,
        gravity: r.gravity,
        jump_impulse: r.jump_impulse,
        max_fall_speed: MAX_FALL_SPEED,
        obstacle_speed: r.obstacle_speed,
        gap_height: r.gap_height,
        spawn_spacing: r.spawn_spacing,
        time_limit_secs: match mode {
            GameMode::TimeAttack => Some(TIME_ATTACK_SECS),
            _ => None,
        },
        collisions_enabled: mode != GameMode::Zen,
    }
}

impl Default for Profile {
    fn default() -> Self {
        resolve(Difficulty::default(), GameMode::default())
    }
}
