//! Command queue between input sources and the session
//!
//! Any number of `InputHandle`s may send; only the owner of the
//! `CommandQueue` applies commands, so the session has a single writer.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::sim::Command;

/// Cloneable sender for abstract game commands
#[derive(Debug, Clone)]
pub struct InputHandle {
    tx: Sender<Command>,
}

impl InputHandle {
    /// Queue a command; returns false once the game has been dropped
    pub fn send(&self, command: Command) -> bool {
        self.tx.send(command).is_ok()
    }

    pub fn jump(&self) -> bool {
        self.send(Command::Jump)
    }

    pub fn start(&self) -> bool {
        self.send(Command::Start)
    }

    pub fn reset(&self) -> bool {
        self.send(Command::Reset)
    }

    pub fn pause(&self) -> bool {
        self.send(Command::Pause)
    }

    pub fn resume(&self) -> bool {
        self.send(Command::Resume)
    }
}

/// Receiving end, owned by the game loop
#[derive(Debug)]
pub struct CommandQueue {
    tx: Sender<Command>,
    rx: Receiver<Command>,
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn handle(&self) -> InputHandle {
        InputHandle {
            tx: self.tx.clone(),
        }
    }

    /// Everything queued so far, in arrival order
    pub fn drain(&self) -> Vec<Command> {
        self.rx.try_iter().collect()
    }
}
