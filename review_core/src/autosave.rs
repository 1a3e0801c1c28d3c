//! Debounce state machine for draft auto-save.
//!
//! Replaces the ad hoc timer handle + mutable skip flag of the original
//! workflow with an explicit three-state machine:
//!
//! ```text
//! Idle --note_change--> Scheduled --take_due--> Idle
//!   \--suppress--> Suppressed --note_change--> Idle
//! ```
//!
//! Suppression is a one-shot flag set synchronously by every programmatic
//! draft load (event selection, reconciler reload) and consumed by the very
//! next change notification, so a load never persists itself. Each further
//! change cancels and replaces the pending deadline (last-edit-wins).

use std::time::Duration;
use tokio::time::Instant;

/// Idle duration after the last edit before an auto-save write is issued.
pub const DEFAULT_QUIESCENCE_MS: u64 = 700;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoSaveState {
    /// Nothing to persist.
    Idle,
    /// The next change notification is ignored (programmatic load).
    Suppressed,
    /// A write fires once the deadline passes without further edits.
    Scheduled { deadline: Instant },
}

/// Debounced persister scheduling.
///
/// Owns no I/O: callers observe `deadline()` / `take_due()` and perform the
/// actual write, which keeps the machine deterministic under paused time.
#[derive(Debug)]
pub struct AutoSave {
    state: AutoSaveState,
    window: Duration,
}

impl AutoSave {
    pub fn new(window: Duration) -> Self {
        Self {
            state: AutoSaveState::Idle,
            window,
        }
    }

    pub fn state(&self) -> AutoSaveState {
        self.state
    }

    /// One-shot suppression for a programmatic load. Also cancels any
    /// scheduled write: switching selection must never flush the previous
    /// event's timer.
    pub fn suppress(&mut self) {
        self.state = AutoSaveState::Suppressed;
    }

    /// Observe a draft change. A suppressed machine consumes the one-shot
    /// and schedules nothing; otherwise the write deadline is replaced with
    /// `now + window`.
    pub fn note_change(&mut self, now: Instant) {
        match self.state {
            AutoSaveState::Suppressed => self.state = AutoSaveState::Idle,
            _ => {
                self.state = AutoSaveState::Scheduled {
                    deadline: now + self.window,
                }
            }
        }
    }

    /// Drop any scheduled write (manual save bypass, deselection).
    pub fn cancel(&mut self) {
        if matches!(self.state, AutoSaveState::Scheduled { .. }) {
            self.state = AutoSaveState::Idle;
        }
    }

    /// When the deadline has passed, transition back to `Idle` and report
    /// that exactly one write should fire now.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.state {
            AutoSaveState::Scheduled { deadline } if now >= deadline => {
                self.state = AutoSaveState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Deadline of the scheduled write, if any, for the driving event loop.
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            AutoSaveState::Scheduled { deadline } => Some(deadline),
            _ => None,
        }
    }
}

impl Default for AutoSave {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_QUIESCENCE_MS))
    }
}
