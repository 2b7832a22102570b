use alloc::collections::VecDeque;
use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;

use crate::*;

/// Round-scoped cancellation flag. Clones share the flag; a fresh token is issued
/// for every round, so cancelling one round never affects the next.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Whether both handles belong to the same round.
    pub fn same_round(&self, other: &CancellationToken) -> bool {
        Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LossStep {
    /// The round was abandoned, nothing was touched.
    Cancelled,
    /// A mine was revealed and more are pending.
    Detonated(Coord2),
    /// The last mine was revealed and the session is now lost.
    Finished(Coord2),
    /// Advanced again after finishing.
    Exhausted,
}

/// Paced reveal of every remaining mine after a losing move.
///
/// The host drives it: call [`LossSequence::advance`] once, then again every
/// [`LossSequence::delay`] from its timer, returning to its event loop in between.
#[derive(Clone, Debug)]
pub struct LossSequence {
    pending: VecDeque<Coord2>,
    token: CancellationToken,
    delay: Duration,
}

impl LossSequence {
    pub fn new(session: &GameSession, token: CancellationToken, delay: Duration) -> Self {
        let pending: VecDeque<Coord2> = session.unrevealed_mines().into();
        log::debug!("Loss sequence queued {} mine(s)", pending.len());
        Self {
            pending,
            token,
            delay,
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn advance(&mut self, session: &mut GameSession) -> LossStep {
        if self.token.is_cancelled() {
            log::debug!("Loss sequence cancelled with {} mine(s) left", self.pending.len());
            return LossStep::Cancelled;
        }

        let Some(coords) = self.pending.pop_front() else {
            return LossStep::Exhausted;
        };

        if !session.detonate(coords) {
            log::warn!("Mine at {:?} was already revealed", coords);
        }

        if self.pending.is_empty() {
            session.finish_loss();
            LossStep::Finished(coords)
        } else {
            LossStep::Detonated(coords)
        }
    }
}
