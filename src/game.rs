//! Frame driver
//!
//! Owns the authoritative session together with its records, settings and
//! command queue. Each frame drains queued commands first, then runs however
//! many fixed ticks the elapsed time covers.

use crate::persistence::KvStore;
use crate::platform::{CommandQueue, FixedStep, InputHandle};
use crate::records::Records;
use crate::settings::Customization;
use crate::sim::{Command, GameStatus, Session, SessionResult, Snapshot, apply_command, tick};

pub struct Game<S: KvStore> {
    session: Session,
    records: Records<S>,
    customization: Customization,
    queue: CommandQueue,
    clock: FixedStep,
    seed: u64,
}

impl<S: KvStore> Game<S> {
    /// Load records and customization from `store` and sit in the menu
    pub fn new(store: S, seed: u64) -> Self {
        let customization = Customization::load(&store);
        Self::with_customization(store, customization, seed)
    }

    pub fn with_customization(store: S, customization: Customization, seed: u64) -> Self {
        let records = Records::load(store);
        let session = Session::new(
            customization.profile(),
            customization.bird_size,
            records.high_score(),
            seed,
        );
        Self {
            session,
            records,
            customization,
            queue: CommandQueue::new(),
            clock: FixedStep::new(),
            seed,
        }
    }

    /// Sender for the input collaborator
    pub fn input(&self) -> InputHandle {
        self.queue.handle()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn records(&self) -> &Records<S> {
        &self.records
    }

    pub fn customization(&self) -> &Customization {
        &self.customization
    }

    pub fn status(&self) -> GameStatus {
        self.session.status
    }

    /// Renderer view; drains pending effect events
    pub fn snapshot(&mut self) -> Snapshot {
        self.session.snapshot()
    }

    /// Apply queued commands, then run the ticks covered by `dt` seconds.
    /// Returns the number of ticks run.
    pub fn frame(&mut self, dt: f32) -> u32 {
        self.process_commands();
        let ticks = self.clock.advance(dt);
        for _ in 0..ticks {
            self.run_tick();
        }
        ticks
    }

    /// Apply queued commands and run exactly one tick (headless drivers)
    pub fn step(&mut self) {
        self.process_commands();
        self.run_tick();
    }

    fn process_commands(&mut self) {
        for command in self.queue.drain() {
            apply_command(&mut self.session, command);
            if command == Command::Reset {
                // Nothing from the abandoned run may tick after this
                self.clock.reset();
            }
        }
    }

    fn run_tick(&mut self) {
        if let Some(result) = tick(&mut self.session) {
            self.finish(result);
        }
    }

    fn finish(&mut self, result: SessionResult) {
        self.records.record_session(&result);
        // Keep the session's copy in step with what was persisted
        self.session.set_high_score(self.records.high_score());
    }

    /// Swap customization between runs. Ignored while a run is live.
    pub fn set_customization(&mut self, customization: Customization) -> bool {
        if matches!(self.session.status, GameStatus::Playing | GameStatus::Paused) {
            log::warn!("Customization change ignored during a run");
            return false;
        }
        customization.save(self.records.store_mut());
        self.session = Session::new(
            customization.profile(),
            customization.bird_size,
            self.records.high_score(),
            self.seed,
        );
        self.customization = customization;
        true
    }

    /// Wipe the high score and lifetime statistics
    pub fn reset_statistics(&mut self) {
        self.records.reset_statistics();
        self.session.set_high_score(self.records.high_score());
    }

    /// Retry any pending writes; true when everything is durable
    pub fn flush(&mut self) -> bool {
        self.records.flush()
    }
}

impl<S: KvStore> Drop for Game<S> {
    fn drop(&mut self) {
        if !self.records.flush() {
            log::error!("Records could not be saved before exit");
        }
    }
}
