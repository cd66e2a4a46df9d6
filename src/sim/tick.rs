//! Fixed timestep simulation tick and command handling
//!
//! Core game loop that advances a session deterministically. Commands and
//! ticks are the only ways a session changes.

use rand::Rng;

use super::actor;
use super::collision::judge;
use super::obstacle;
use super::state::{Command, EffectKind, EndReason, GameStatus, Session, SessionResult};
use crate::ticks_to_secs;

/// Apply one input command. Commands that make no sense in the current
/// status are ignored.
pub fn apply_command<R: Rng>(session: &mut Session<R>, command: Command) {
    match (session.status, command) {
        (GameStatus::Menu | GameStatus::GameOver, Command::Start) => {
            session.reset_run();
            session.status = GameStatus::Playing;
            log::info!(
                "Run started ({} / {})",
                session.profile.difficulty.as_str(),
                session.profile.mode.as_str()
            );
        }
        (GameStatus::Playing, Command::Jump) => {
            // Applied now rather than on the next tick
            let origin = session.actor.center();
            session.actor = actor::step(&session.actor, true, &session.profile);
            session.emit(EffectKind::Jump, origin);
        }
        (GameStatus::Playing, Command::Pause) => {
            session.status = GameStatus::Paused;
        }
        (GameStatus::Paused, Command::Resume) => {
            session.status = GameStatus::Playing;
        }
        (GameStatus::Playing | GameStatus::Paused | GameStatus::GameOver, Command::Reset) => {
            if session.status != GameStatus::GameOver {
                log::info!("Run abandoned at score {}", session.score);
            }
            session.status = GameStatus::Menu;
            session.events.clear();
        }
        (status, command) => {
            log::trace!("Ignoring {:?} while {:?}", command, status);
        }
    }
}

/// Advance the session by one fixed timestep
///
/// Returns the finished run on the tick that ends it, and `None` otherwise.
pub fn tick<R: Rng>(session: &mut Session<R>) -> Option<SessionResult> {
    // Don't tick unless a run is live
    if session.status != GameStatus::Playing {
        return None;
    }

    session.elapsed_ticks += 1;

    let profile = session.profile;
    let moved = actor::step(&session.actor, false, &profile);
    session.actor = moved;

    obstacle::advance(&mut session.obstacles, &profile);
    if obstacle::should_spawn(&session.obstacles, session.last_spawn_x, &profile) {
        let id = session.next_entity_id();
        let pipe = obstacle::spawn(id, session.last_spawn_x, &profile, &mut session.rng);
        log::debug!("Spawned pipe {} at x={} gap_top={:.1}", id, pipe.x, pipe.gap_top);
        session.last_spawn_x = pipe.x;
        session.obstacles.push(pipe);
    }

    let verdict = judge(&session.actor, &session.obstacles, &profile);

    if let Some(collision) = verdict.collision {
        return Some(end_run(session, EndReason::Collision(collision)));
    }

    for id in verdict.scored {
        if let Some(pipe) = session.obstacles.iter_mut().find(|o| o.id == id) {
            pipe.passed = true;
            let origin = glam::Vec2::new(pipe.right(), pipe.gap_center());
            session.score += 1;
            session.emit(EffectKind::Score, origin);
        }
    }

    if let Some(remaining) = session.countdown_ticks.as_mut() {
        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            return Some(end_run(session, EndReason::TimeUp));
        }
    }

    None
}

/// Enter GameOver and produce the run summary
fn end_run<R: Rng>(session: &mut Session<R>, reason: EndReason) -> SessionResult {
    session.status = GameStatus::GameOver;
    session.high_score = session.high_score.max(session.score);
    let origin = session.actor.center();
    session.emit(EffectKind::Collision, origin);

    let result = SessionResult {
        score: session.score,
        duration_secs: ticks_to_secs(session.elapsed_ticks),
        reason,
    };
    log::info!(
        "Game over: score {} in {}s ({:?}), best {}",
        result.score,
        result.duration_secs,
        reason,
        session.high_score
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::actor::BirdSize;
    use crate::sim::collision::Collision;
    use crate::sim::obstacle::Obstacle;
    use crate::sim::profile::{Difficulty, GameMode, Profile, resolve};

    fn session(mode: GameMode) -> Session {
        Session::new(resolve(Difficulty::Normal, mode), BirdSize::Medium, 0, 12345)
    }

    fn playing(mode: GameMode) -> Session {
        let mut s = session(mode);
        apply_command(&mut s, Command::Start);
        s
    }

    /// Tick until the run ends (or give up)
    fn run_to_end(s: &mut Session, max_ticks: u32) -> Option<SessionResult> {
        for _ in 0..max_ticks {
            if let Some(result) = tick(s) {
                return Some(result);
            }
        }
        None
    }

    #[test]
    fn test_menu_start_to_playing() {
        let mut s = session(GameMode::Classic);
        assert_eq!(tick(&mut s), None);
        assert_eq!(s.elapsed_ticks, 0);

        apply_command(&mut s, Command::Start);
        assert_eq!(s.status, GameStatus::Playing);
        assert_eq!(s.countdown_ticks, None);
    }

    #[test]
    fn test_first_tick_falls_and_spawns() {
        let mut s = playing(GameMode::Classic);
        assert_eq!(tick(&mut s), None);
        assert_eq!(s.actor.velocity, 0.5);
        assert_eq!(s.actor.pos.y, 300.5);
        assert_eq!(s.obstacles.len(), 1);
        assert_eq!(s.obstacles[0].x, 1100.0);
        assert_eq!(s.obstacles[0].id, 1);
        assert_eq!(s.last_spawn_x, 1100.0);
    }

    #[test]
    fn test_spawn_cursor_is_chained() {
        let mut s = playing(GameMode::Classic);
        s.actor.pos.y = 200.0;
        tick(&mut s);
        // Tail must retreat 300 from 1100 before the next spawn (150 ticks at 2/tick)
        for _ in 0..149 {
            s.actor.pos.y = 200.0;
            s.actor.velocity = 0.0;
            tick(&mut s);
        }
        assert_eq!(s.obstacles.len(), 1);
        assert_eq!(s.obstacles[0].x, 802.0);

        s.actor.pos.y = 200.0;
        s.actor.velocity = 0.0;
        tick(&mut s);
        assert_eq!(s.obstacles.len(), 2);
        assert_eq!(s.obstacles[1].x, 1400.0);
        assert_eq!(s.last_spawn_x, 1400.0);
    }

    #[test]
    fn test_live_pipes_keep_double_spacing() {
        let mut s = playing(GameMode::Zen);
        let spacing = s.profile.spawn_spacing;
        assert_eq!(run_to_end(&mut s, 1500), None);
        assert!(s.obstacles.len() >= 3);
        for pair in s.obstacles.windows(2) {
            assert_eq!(pair[1].x - pair[0].x, 2.0 * spacing);
        }
        // Cursor stays where the tail spawned while the tail scrolls left
        let tail = s.obstacles.last().map(|o| o.x).unwrap();
        assert!(s.last_spawn_x >= tail);
    }

    #[test]
    fn test_jump_is_immediate() {
        let mut s = playing(GameMode::Classic);
        let before = s.actor.center();
        apply_command(&mut s, Command::Jump);
        assert_eq!(s.actor.velocity, -8.5);
        assert_eq!(s.actor.pos.y, 291.5);
        assert_eq!(s.actor.rotation_deg, -25.5);
        assert_eq!(s.elapsed_ticks, 0);

        let events = s.snapshot().events;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EffectKind::Jump);
        assert_eq!(events[0].origin, before);
    }

    #[test]
    fn test_two_jumps_between_ticks_both_apply() {
        let mut s = playing(GameMode::Classic);
        apply_command(&mut s, Command::Jump);
        apply_command(&mut s, Command::Jump);
        assert_eq!(s.actor.pos.y, 300.0 - 17.0);
        assert_eq!(s.snapshot().events.len(), 2);
    }

    #[test]
    fn test_invalid_commands_are_noops() {
        let mut s = session(GameMode::Classic);
        for cmd in [Command::Jump, Command::Pause, Command::Resume, Command::Reset] {
            apply_command(&mut s, cmd);
            assert_eq!(s.status, GameStatus::Menu);
        }
        assert_eq!(s.actor, crate::sim::actor::Actor::spawn(BirdSize::Medium));

        let mut s = playing(GameMode::Classic);
        apply_command(&mut s, Command::Start);
        apply_command(&mut s, Command::Resume);
        assert_eq!(s.status, GameStatus::Playing);
        assert_eq!(s.actor.pos.y, ACTOR_SPAWN_Y);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut s = playing(GameMode::TimeAttack);
        for _ in 0..10 {
            tick(&mut s);
        }
        apply_command(&mut s, Command::Pause);
        assert_eq!(s.status, GameStatus::Paused);

        let actor = s.actor;
        let pipes = s.obstacles.clone();
        let countdown = s.countdown_ticks;
        for _ in 0..100 {
            assert_eq!(tick(&mut s), None);
        }
        apply_command(&mut s, Command::Jump);
        assert_eq!(s.actor, actor);
        assert_eq!(s.obstacles, pipes);
        assert_eq!(s.countdown_ticks, countdown);
        assert_eq!(s.elapsed_ticks, 10);

        apply_command(&mut s, Command::Resume);
        assert_eq!(s.status, GameStatus::Playing);
        tick(&mut s);
        assert_eq!(s.elapsed_ticks, 11);
    }

    #[test]
    fn test_falling_bird_hits_ground() {
        let mut s = playing(GameMode::Classic);
        let result = run_to_end(&mut s, 1000).expect("bird should land");
        assert_eq!(result.reason, EndReason::Collision(Collision::Ground));
        assert_eq!(s.status, GameStatus::GameOver);
        // Flagged on the same tick the clamp pins it to the floor
        assert_eq!(s.actor.pos.y, s.actor.floor_y());
        assert_eq!(result.score, 0);

        let events = s.snapshot().events;
        assert_eq!(events.last().map(|e| e.kind), Some(EffectKind::Collision));

        // GameOver does not advance
        assert_eq!(tick(&mut s), None);
    }

    #[test]
    fn test_jumping_into_ceiling() {
        let mut s = playing(GameMode::Classic);
        for _ in 0..40 {
            apply_command(&mut s, Command::Jump);
            if let Some(result) = tick(&mut s) {
                assert_eq!(result.reason, EndReason::Collision(Collision::Ceiling));
                return;
            }
        }
        panic!("bird never reached the ceiling");
    }

    #[test]
    fn test_game_over_updates_high_score() {
        let mut s = playing(GameMode::Classic);
        s.high_score = 5;
        s.score = 7;
        s.actor.pos.y = s.actor.floor_y();
        let result = tick(&mut s).expect("grounded");
        assert_eq!(result.score, 7);
        assert_eq!(s.high_score, 7);

        // A lower score never lowers it
        apply_command(&mut s, Command::Start);
        s.actor.pos.y = s.actor.floor_y();
        tick(&mut s);
        assert_eq!(s.high_score, 7);
    }

    #[test]
    fn test_scoring_marks_pipe_and_emits() {
        let mut s = playing(GameMode::Classic);
        s.last_spawn_x = 5000.0;
        // Trailing edge at 183, moves to 181 this tick: bird leading edge is 182
        s.obstacles.push(Obstacle::new(99, 103.0, 200.0, 150.0));
        s.actor.pos.y = 250.0;

        assert_eq!(tick(&mut s), None);
        assert_eq!(s.score, 1);
        assert!(s.obstacles[0].passed);

        let events = s.snapshot().events;
        let score_events: Vec<_> = events.iter().filter(|e| e.kind == EffectKind::Score).collect();
        assert_eq!(score_events.len(), 1);
        assert_eq!(score_events[0].origin, glam::Vec2::new(181.0, 275.0));

        // Never scored twice
        s.actor.pos.y = 250.0;
        s.actor.velocity = 0.0;
        tick(&mut s);
        assert_eq!(s.score, 1);
    }

    #[test]
    fn test_collision_tick_discards_scoring() {
        let mut s = playing(GameMode::Classic);
        s.last_spawn_x = 5000.0;
        s.obstacles.push(Obstacle::new(1, 103.0, 200.0, 150.0));
        s.actor.pos.y = s.actor.floor_y();
        let result = tick(&mut s).expect("grounded");
        assert_eq!(result.score, 0);
        assert!(!s.obstacles[0].passed);
    }

    #[test]
    fn test_pipe_crash_ends_run() {
        let mut s = playing(GameMode::Classic);
        s.last_spawn_x = 5000.0;
        // Pipe spans the bird; gap 50..200 sits well above it
        s.obstacles.push(Obstacle::new(42, 140.0, 50.0, 150.0));

        let result = tick(&mut s).expect("crashed");
        assert_eq!(result.reason, EndReason::Collision(Collision::Pipe { id: 42 }));
        assert_eq!(result.score, 0);
        assert_eq!(s.status, GameStatus::GameOver);

        let center = s.actor.center();
        let events = s.snapshot().events;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EffectKind::Collision);
        assert_eq!(events[0].origin, center);
    }

    #[test]
    fn test_time_up_tick_keeps_scoring() {
        let mut s = playing(GameMode::TimeAttack);
        s.last_spawn_x = 5000.0;
        s.countdown_ticks = Some(1);
        s.obstacles.push(Obstacle::new(7, 103.0, 200.0, 150.0));
        s.actor.pos.y = 250.0;

        let result = tick(&mut s).expect("time is up");
        assert_eq!(result.reason, EndReason::TimeUp);
        assert_eq!(result.score, 1);
        assert_eq!(s.score, 1);
        assert!(s.obstacles[0].passed);
        assert_eq!(s.status, GameStatus::GameOver);

        let center = s.actor.center();
        let kinds: Vec<_> = s.snapshot().events.iter().map(|e| (e.kind, e.origin)).collect();
        assert_eq!(
            kinds,
            vec![
                (EffectKind::Score, glam::Vec2::new(181.0, 275.0)),
                (EffectKind::Collision, center),
            ]
        );
    }

    #[test]
    fn test_zen_never_ends_but_scores() {
        let mut s = playing(GameMode::Zen);
        assert_eq!(run_to_end(&mut s, 2000), None);
        assert_eq!(s.status, GameStatus::Playing);
        // The first pipe (x=1100) reaches the bird within 2000 ticks
        assert!(s.score >= 1);
        assert!(s.obstacles.iter().all(|o| o.passed || o.right() >= s.actor.right()));
    }

    #[test]
    fn test_time_attack_ends_on_countdown() {
        let profile: Profile = resolve(Difficulty::Normal, GameMode::TimeAttack);
        let mut s = Session::new(
            Profile {
                collisions_enabled: false,
                ..profile
            },
            BirdSize::Medium,
            0,
            3,
        );
        apply_command(&mut s, Command::Start);
        assert_eq!(s.time_left_secs(), Some(60));

        assert_eq!(run_to_end(&mut s, 3599), None);
        assert_eq!(s.time_left_secs(), Some(1));
        let result = tick(&mut s).expect("time is up");
        assert_eq!(result.reason, EndReason::TimeUp);
        assert_eq!(result.duration_secs, 60);
        assert_eq!(s.status, GameStatus::GameOver);
        assert_eq!(s.time_left_secs(), Some(0));
    }

    #[test]
    fn test_reset_abandons_run() {
        let mut s = playing(GameMode::Classic);
        for _ in 0..5 {
            tick(&mut s);
        }
        apply_command(&mut s, Command::Jump);
        apply_command(&mut s, Command::Reset);
        assert_eq!(s.status, GameStatus::Menu);
        assert!(s.pending_events().is_empty());
        assert_eq!(tick(&mut s), None);

        // Reset from pause too
        apply_command(&mut s, Command::Start);
        apply_command(&mut s, Command::Pause);
        apply_command(&mut s, Command::Reset);
        assert_eq!(s.status, GameStatus::Menu);
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut s = playing(GameMode::Classic);
        run_to_end(&mut s, 1000).expect("ends");
        apply_command(&mut s, Command::Start);
        assert_eq!(s.status, GameStatus::Playing);
        assert_eq!(s.score, 0);
        assert!(s.obstacles.is_empty());
        assert_eq!(s.elapsed_ticks, 0);
        assert_eq!(s.actor.pos.y, ACTOR_SPAWN_Y);
    }

    #[test]
    fn test_determinism() {
        // Same seed, same inputs, same world
        let mut a = playing(GameMode::Zen);
        let mut b = playing(GameMode::Zen);
        for i in 0..900 {
            if i % 23 == 0 {
                apply_command(&mut a, Command::Jump);
                apply_command(&mut b, Command::Jump);
            }
            tick(&mut a);
            tick(&mut b);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.actor, b.actor);
        assert_eq!(a.obstacles, b.obstacles);
    }

    #[test]
    fn test_duration_rounds_ticks() {
        let mut s = playing(GameMode::Classic);
        s.elapsed_ticks = 89;
        s.actor.pos.y = s.actor.floor_y();
        let result = tick(&mut s).expect("grounded");
        // 90 ticks = 1.5s rounds to 2
        assert_eq!(result.duration_secs, 2);
    }
}
