//! Time source and cancellation primitives for a planning run.
//!
//! Every time-dependent entry point takes its "now" from a [`Clock`] owned by
//! the planning-run context, so tests can pin the reference time without any
//! process-wide state. Long sampling loops (visibility analysis, candidate
//! slot generation) poll a [`CancellationToken`] so dense catalogs can be
//! aborted or bounded by a deadline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use super::ModifiedJulianDate;

/// Source of the current time for a planning run.
pub trait Clock {
    fn now(&self) -> ModifiedJulianDate;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> ModifiedJulianDate {
        ModifiedJulianDate::from_datetime(chrono::Utc::now())
    }
}

/// A pinned time, for tests and reproducible runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub ModifiedJulianDate);

impl Clock for FixedClock {
    fn now(&self) -> ModifiedJulianDate {
        self.0
    }
}

/// Cooperative cancellation handle polled by the sampling loops.
///
/// Cloning shares the underlying flag; cancelling any clone cancels all of
/// them. An optional deadline turns the token into a soft time budget.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that trips once `deadline` has passed.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Some(deadline),
        }
    }

    /// Request cancellation of the run sharing this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        if self.cancelled.load(Ordering::Relaxed) {
            return true;
        }
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }
}
