//! Background move computation
//!
//! Runs [`AIEngine::get_move_with_stats`] on a spawned thread so a caller
//! with its own loop (a UI, a match runner) can keep polling. Each request
//! owns a fresh channel; dropping the receiver on [`MoveWorker::reset`] or on
//! a new request means a stale result can never be delivered.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::board::{GameState, Player};
use crate::engine::{AIEngine, MoveResult};
use crate::error::{Error, Result};

/// Worker computation state
#[derive(Debug, Default)]
enum WorkerState {
    #[default]
    Idle,
    Thinking {
        receiver: Receiver<Result<MoveResult>>,
        start_time: Instant,
    },
}

/// Single-slot background searcher.
#[derive(Debug)]
pub struct MoveWorker {
    engine: AIEngine,
    state: WorkerState,
}

impl MoveWorker {
    pub fn new(engine: AIEngine) -> Self {
        Self {
            engine,
            state: WorkerState::Idle,
        }
    }

    #[inline]
    pub fn engine(&self) -> &AIEngine {
        &self.engine
    }

    /// Start computing a move for `player`.
    ///
    /// Any request still in flight is abandoned; its thread runs to
    /// completion but the result is discarded.
    pub fn request(&mut self, state: &GameState, player: Player) {
        if self.is_thinking() {
            debug!("abandoning in-flight move request");
        }
        let engine = self.engine.clone();
        let state = state.clone();
        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = engine.get_move_with_stats(&state, player);
            let _ = tx.send(result);
        });

        self.state = WorkerState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check for a finished result without blocking.
    ///
    /// Returns `None` while idle or still thinking. A delivered result
    /// returns the worker to idle.
    pub fn poll(&mut self) -> Option<Result<MoveResult>> {
        let received = match &self.state {
            WorkerState::Thinking { receiver, start_time } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    warn!("move worker thread exited without sending");
                    self.state = WorkerState::Idle;
                    return Some(Err(Error::WorkerDisconnected));
                }
            },
            WorkerState::Idle => None,
        };

        let (result, elapsed) = received?;
        self.state = WorkerState::Idle;
        debug!(elapsed_ms = elapsed.as_millis() as u64, "move worker finished");
        Some(result)
    }

    /// Block until the pending request finishes.
    ///
    /// Returns `None` when nothing was requested.
    pub fn wait(&mut self) -> Option<Result<MoveResult>> {
        match std::mem::take(&mut self.state) {
            WorkerState::Thinking { receiver, .. } => Some(
                receiver
                    .recv()
                    .map_err(|_| Error::WorkerDisconnected)
                    .and_then(|result| result),
            ),
            WorkerState::Idle => None,
        }
    }

    /// Abandon any in-flight request
    pub fn reset(&mut self) {
        self.state = WorkerState::Idle;
    }

    #[inline]
    pub fn is_thinking(&self) -> bool {
        matches!(self.state, WorkerState::Thinking { .. })
    }

    /// Time spent on the current request
    pub fn elapsed(&self) -> Option<Duration> {
        match &self.state {
            WorkerState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            WorkerState::Idle => None,
        }
    }
}
