//! Flappy Core entry point
//!
//! Native headless runner: plays a few autopilot runs against the real
//! simulation and persists records to a JSON save file.
//!
//! Usage: `flappy-core [difficulty] [mode] [runs]`
//! Save file location comes from `FLAPPY_SAVE` (default `flappy-save.json`).

use flappy_core::Game;
use flappy_core::persistence::{FileStore, KvStore, MemoryStore};
use flappy_core::records::{format_countdown, format_playtime};
use flappy_core::settings::Customization;
use flappy_core::sim::{Difficulty, GameMode, GameStatus, Snapshot};

/// Hard stop for a single run (10 minutes of game time)
const MAX_TICKS_PER_RUN: u32 = 60 * 60 * 10;

fn main() {
    env_logger::init();
    log::info!("Flappy Core (headless) starting...");

    let save_path = std::env::var("FLAPPY_SAVE").unwrap_or_else(|_| "flappy-save.json".into());
    let store: Box<dyn KvStore> = match FileStore::open(&save_path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("Save file unavailable ({e}), records will not persist");
            Box::new(MemoryStore::new())
        }
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED);

    let mut game = Game::new(store, seed);

    // Command line overrides the saved choices
    let mut args = std::env::args().skip(1);
    let mut customization: Customization = game.customization().clone();
    if let Some(arg) = args.next() {
        match Difficulty::from_str(&arg) {
            Some(d) => customization.difficulty = d,
            None => log::warn!("Unknown difficulty {arg:?}, keeping saved choice"),
        }
    }
    if let Some(arg) = args.next() {
        match GameMode::from_str(&arg) {
            Some(m) => customization.game_mode = m,
            None => log::warn!("Unknown mode {arg:?}, keeping saved choice"),
        }
    }
    let runs: u32 = args.next().and_then(|a| a.parse().ok()).unwrap_or(3);
    if &customization != game.customization() {
        game.set_customization(customization);
    }

    println!(
        "Playing {} run(s) on {} / {}",
        runs,
        game.customization().difficulty.as_str(),
        game.customization().game_mode.display_name()
    );

    let input = game.input();
    for run in 1..=runs {
        input.start();
        game.step();

        let mut ticks = 0;
        while game.status() == GameStatus::Playing && ticks < MAX_TICKS_PER_RUN {
            let snapshot = game.snapshot();
            if should_flap(&snapshot) {
                input.jump();
            }
            game.step();
            ticks += 1;
        }

        let snapshot = game.snapshot();
        let left = snapshot
            .time_left_secs
            .map(|s| format!(", {} left", format_countdown(s)))
            .unwrap_or_default();
        println!(
            "Run {run}: score {} (best {}){left}",
            snapshot.score, snapshot.high_score
        );

        if game.status() == GameStatus::Playing {
            // Zen runs never end on their own
            input.reset();
            game.step();
        }
    }

    let stats = *game.records().stats();
    println!(
        "Games {} | best {} | average {} | playtime {}",
        stats.games_played,
        stats.best_score,
        stats.average_score,
        format_playtime(stats.playtime_secs)
    );
}

/// Jump when the bird sinks below the middle of the next gap
fn should_flap(snapshot: &Snapshot) -> bool {
    let bird = &snapshot.actor;
    let target = snapshot
        .obstacles
        .iter()
        .find(|o| o.right() >= bird.left())
        .map(|o| o.gap_center() + 10.0)
        .unwrap_or(flappy_core::consts::ACTOR_SPAWN_Y);
    bird.bottom() > target && bird.velocity >= 0.0
}
