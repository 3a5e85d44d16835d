//! Hand-off between command producers and HTTP pollers
//!
//! The relay owns the pending-command FIFO and the last command handed to a
//! poller. One instance is created at startup and shared through an `Arc`
//! by the console (producer) and the HTTP handler (consumer).

use crate::command::vocabulary::Command;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct RelayState {
    pending: VecDeque<Command>,
    last_delivered: Option<Command>,
}

/// Unbounded command queue with sticky delivery
///
/// Queue and last-delivered slot sit behind a single lock so a poll's
/// dequeue and bookkeeping are one linearizable step.
#[derive(Debug, Default)]
pub struct CommandRelay {
    state: Mutex<RelayState>,
}

impl CommandRelay {
    pub fn new() -> Self {
        Self::default()
    }

    // Every critical section leaves the state consistent, so a panic while
    // holding the lock cannot corrupt it.
    fn lock(&self) -> MutexGuard<'_, RelayState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a command to the back of the queue
    pub fn enqueue(&self, command: Command) {
        self.lock().pending.push_back(command);
    }

    /// Append several commands, keeping their order
    pub fn enqueue_all(&self, commands: &[Command]) {
        self.lock().pending.extend(commands.iter().copied());
    }

    /// Remove the oldest pending command without touching the sticky slot
    pub fn try_dequeue(&self) -> Option<Command> {
        self.lock().pending.pop_front()
    }

    /// Deliver the next command to a poller.
    ///
    /// Returns the oldest pending command and remembers it. With nothing
    /// pending, the previously delivered command is returned again; `None`
    /// only before the first delivery.
    pub fn poll(&self) -> Option<Command> {
        let mut state = self.lock();
        match state.pending.pop_front() {
            Some(command) => {
                state.last_delivered = Some(command);
                Some(command)
            }
            None => state.last_delivered,
        }
    }

    /// The most recently delivered command, if any
    pub fn last_delivered(&self) -> Option<Command> {
        self.lock().last_delivered
    }

    /// Number of commands waiting for delivery
    pub fn pending(&self) -> usize {
        self.lock().pending.len()
    }
}
