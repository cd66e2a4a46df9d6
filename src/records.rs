//! High score and lifetime statistics
//!
//! Persisted through a `KvStore` after every completed run. Storage problems
//! are logged and the game carries on in memory.

use serde::{Deserialize, Serialize};

use crate::persistence::{KvStore, keys};
use crate::sim::SessionResult;

/// Lifetime totals across every completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GameStats {
    #[serde(rename = "totalGames")]
    pub games_played: u64,
    #[serde(rename = "bestScore")]
    pub best_score: u64,
    #[serde(rename = "totalScore")]
    pub total_score: u64,
    #[serde(rename = "averageScore")]
    pub average_score: u64,
    /// Seconds
    #[serde(rename = "playtime")]
    pub playtime_secs: u64,
}

impl GameStats {
    /// Fold one finished run into the totals
    pub fn record_session(&mut self, score: u64, duration_secs: u64) {
        self.games_played += 1;
        self.best_score = self.best_score.max(score);
        self.total_score += score;
        self.playtime_secs += duration_secs;
        // round(total / games), halves away from zero
        self.average_score = (self.total_score * 2 + self.games_played) / (self.games_played * 2);
    }
}

/// Owns the high score and statistics plus the store they live in
#[derive(Debug)]
pub struct Records<S: KvStore> {
    store: S,
    high_score: u32,
    stats: GameStats,
    /// Last write failed; `flush` retries it
    dirty: bool,
}

impl<S: KvStore> Records<S> {
    /// Read saved values, falling back to defaults for anything missing or unreadable
    pub fn load(store: S) -> Self {
        let high_score = match store.load(keys::HIGH_SCORE) {
            Ok(Some(text)) => text.trim().parse::<u32>().unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable high score {text:?}: {e}");
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Could not load high score: {e}");
                0
            }
        };

        let stats = match store.load(keys::STATS) {
            Ok(Some(json)) => serde_json::from_str::<GameStats>(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable statistics: {e}");
                GameStats::default()
            }),
            Ok(None) => GameStats::default(),
            Err(e) => {
                log::warn!("Could not load statistics: {e}");
                GameStats::default()
            }
        };

        log::info!(
            "Loaded records: best {}, {} games played",
            high_score,
            stats.games_played
        );

        Self {
            store,
            high_score,
            stats,
            dirty: false,
        }
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Whether unsaved changes are waiting on `flush`
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Record one completed run. Call exactly once per run.
    pub fn record_session(&mut self, result: &SessionResult) {
        self.high_score = self.high_score.max(result.score);
        self.stats
            .record_session(result.score as u64, result.duration_secs);
        self.dirty = true;
        self.flush();
    }

    /// Write the current values; keeps the dirty flag on failure
    pub fn flush(&mut self) -> bool {
        if !self.dirty {
            return true;
        }
        match self.write() {
            Ok(()) => {
                self.dirty = false;
                log::debug!("Records saved");
                true
            }
            Err(e) => {
                log::warn!("Could not save records, keeping them in memory: {e}");
                false
            }
        }
    }

    fn write(&mut self) -> Result<(), crate::persistence::StoreError> {
        self.store
            .save(keys::HIGH_SCORE, &self.high_score.to_string())?;
        let json = serde_json::to_string(&self.stats)?;
        self.store.save(keys::STATS, &json)
    }

    /// Forget everything, in memory and in storage
    pub fn reset_statistics(&mut self) {
        self.high_score = 0;
        self.stats = GameStats::default();
        self.dirty = false;
        for key in [keys::HIGH_SCORE, keys::STATS] {
            if let Err(e) = self.store.remove(key) {
                log::warn!("Could not clear {key}: {e}");
            }
        }
        log::info!("Statistics reset");
    }
}

/// Format a countdown as `m:ss`
pub fn format_countdown(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Format total playtime for the stats panel
pub fn format_playtime(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
