//! Player customization choices
//!
//! Persisted separately from records. Only the bird size, difficulty and
//! game mode reach the simulation; the rest is for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::persistence::{KvStore, StoreError, keys};
pub use crate::sim::actor::BirdSize;
use crate::sim::profile::{Difficulty, GameMode, Profile, resolve};

/// Bird colour choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum BirdColor {
    #[default]
    Yellow,
    Blue,
    Red,
    Green,
    Purple,
    Orange,
    Pink,
    White,
    Black,
}

impl BirdColor {
    pub const ALL: [BirdColor; 9] = [
        BirdColor::Yellow,
        BirdColor::Blue,
        BirdColor::Red,
        BirdColor::Green,
        BirdColor::Purple,
        BirdColor::Orange,
        BirdColor::Pink,
        BirdColor::White,
        BirdColor::Black,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BirdColor::Yellow => "yellow",
            BirdColor::Blue => "blue",
            BirdColor::Red => "red",
            BirdColor::Green => "green",
            BirdColor::Purple => "purple",
            BirdColor::Orange => "orange",
            BirdColor::Pink => "pink",
            BirdColor::White => "white",
            BirdColor::Black => "black",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
    }

    /// Hex colour for renderers
    pub fn hex(&self) -> &'static str {
        match self {
            BirdColor::Yellow => "#FFD700",
            BirdColor::Blue => "#1E90FF",
            BirdColor::Red => "#FF4444",
            BirdColor::Green => "#32CD32",
            BirdColor::Purple => "#9370DB",
            BirdColor::Orange => "#FF8C00",
            BirdColor::Pink => "#FF69B4",
            BirdColor::White => "#FFFFFF",
            BirdColor::Black => "#333333",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum BirdShape {
    #[default]
    Round,
    Square,
    Triangle,
}

impl BirdShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            BirdShape::Round => "round",
            BirdShape::Square => "square",
            BirdShape::Triangle => "triangle",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "round" => Some(BirdShape::Round),
            "square" => Some(BirdShape::Square),
            "triangle" => Some(BirdShape::Triangle),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundTheme {
    #[default]
    Day,
    Night,
    Sunset,
    Space,
    Underwater,
    Forest,
}

impl BackgroundTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundTheme::Day => "day",
            BackgroundTheme::Night => "night",
            BackgroundTheme::Sunset => "sunset",
            BackgroundTheme::Space => "space",
            BackgroundTheme::Underwater => "underwater",
            BackgroundTheme::Forest => "forest",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "day" => Some(BackgroundTheme::Day),
            "night" => Some(BackgroundTheme::Night),
            "sunset" => Some(BackgroundTheme::Sunset),
            "space" => Some(BackgroundTheme::Space),
            "underwater" => Some(BackgroundTheme::Underwater),
            "forest" => Some(BackgroundTheme::Forest),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PipeStyle {
    #[default]
    Classic,
    Metal,
    Candy,
    Neon,
    Stone,
}

impl PipeStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipeStyle::Classic => "classic",
            PipeStyle::Metal => "metal",
            PipeStyle::Candy => "candy",
            PipeStyle::Neon => "neon",
            PipeStyle::Stone => "stone",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(PipeStyle::Classic),
            "metal" => Some(PipeStyle::Metal),
            "candy" => Some(PipeStyle::Candy),
            "neon" => Some(PipeStyle::Neon),
            "stone" => Some(PipeStyle::Stone),
            _ => None,
        }
    }
}

/// Everything the player can pick before a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customization {
    // === Bird ===
    pub bird_color: BirdColor,
    pub bird_shape: BirdShape,
    /// Scales the collision box
    pub bird_size: BirdSize,

    // === World ===
    pub background_theme: BackgroundTheme,
    pub pipe_style: PipeStyle,

    // === Gameplay ===
    pub difficulty: Difficulty,
    pub game_mode: GameMode,

    // === Effects ===
    pub particle_effects: bool,
    pub weather_effects: bool,
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            bird_color: BirdColor::Yellow,
            bird_shape: BirdShape::Round,
            bird_size: BirdSize::Medium,
            background_theme: BackgroundTheme::Day,
            pipe_style: PipeStyle::Classic,
            difficulty: Difficulty::Normal,
            game_mode: GameMode::Classic,
            particle_effects: true,
            weather_effects: false,
        }
    }
}

impl Customization {
    /// Tuning for the selected difficulty and mode
    pub fn profile(&self) -> Profile {
        resolve(self.difficulty, self.game_mode)
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }

    /// Load from the store, falling back to defaults
    pub fn load<S: KvStore + ?Sized>(store: &S) -> Self {
        match store.load(keys::CUSTOMIZATION) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(custom) => {
                    log::info!("Loaded customization");
                    custom
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable customization: {e}");
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default customization");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not load customization: {e}");
                Self::default()
            }
        }
    }

    /// Save to the store; failures are logged, not returned
    pub fn save<S: KvStore + ?Sized>(&self, store: &mut S) {
        let written = serde_json::to_string(self)
            .map_err(StoreError::from)
            .and_then(|json| store.save(keys::CUSTOMIZATION, &json));
        match written {
            Ok(()) => log::info!("Customization saved"),
            Err(e) => log::warn!("Could not save customization: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_default_profile_is_normal_classic() {
        let custom = Customization::default();
        let profile = custom.profile();
        assert_eq!(profile.difficulty, Difficulty::Normal);
        assert_eq!(profile.mode, GameMode::Classic);
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let custom = Customization {
            bird_color: BirdColor::Purple,
            bird_size: BirdSize::Large,
            difficulty: Difficulty::Expert,
            game_mode: GameMode::TimeAttack,
            weather_effects: true,
            ..Default::default()
        };
        custom.save(&mut store);
        assert_eq!(Customization::load(&store), custom);

        let raw = store.get(keys::CUSTOMIZATION).unwrap();
        assert!(raw.contains("\"birdColor\":\"purple\""));
        assert!(raw.contains("\"gameMode\":\"timeAttack\""));
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let mut store = MemoryStore::new();
        store
            .save(keys::CUSTOMIZATION, r#"{"birdSize":"small","difficulty":"hard"}"#)
            .unwrap();
        let custom = Customization::load(&store);
        assert_eq!(custom.bird_size, BirdSize::Small);
        assert_eq!(custom.difficulty, Difficulty::Hard);
        assert_eq!(custom.bird_color, BirdColor::Yellow);
        assert!(custom.particle_effects);
    }

    #[test]
    fn test_unknown_enum_value_falls_back() {
        let mut store = MemoryStore::new();
        store
            .save(keys::CUSTOMIZATION, r#"{"birdColor":"chartreuse"}"#)
            .unwrap();
        assert_eq!(Customization::load(&store), Customization::default());
    }

    #[test]
    fn test_failing_store_uses_defaults() {
        let mut store = MemoryStore::failing();
        let custom = Customization::load(&store);
        assert_eq!(custom, Customization::default());
        custom.save(&mut store);
    }

    #[test]
    fn test_reset_to_defaults() {
        let mut custom = Customization {
            pipe_style: PipeStyle::Neon,
            ..Default::default()
        };
        custom.reset_to_defaults();
        assert_eq!(custom, Customization::default());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(BirdColor::from_str("PINK"), Some(BirdColor::Pink));
        assert_eq!(BirdShape::from_str("triangle"), Some(BirdShape::Triangle));
        assert_eq!(BackgroundTheme::from_str("space"), Some(BackgroundTheme::Space));
        assert_eq!(PipeStyle::from_str("candy"), Some(PipeStyle::Candy));
        assert_eq!(BirdSize::from_str("large"), Some(BirdSize::Large));
        assert_eq!(PipeStyle::from_str("wood"), None);
    }
}
