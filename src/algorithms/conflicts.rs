//! Conflict detection over committed schedules.
//!
//! Two overlap notions coexist. Half-open `[start, stop)` semantics govern
//! the schedule invariant: back-to-back entries sharing an endpoint do not
//! conflict. The strict greedy pass of the slot-sampling scheduler uses the
//! closed-interval test instead, refusing even touching slots; the
//! compaction pass is what later closes those seams.

use crate::core::domain::{Period, ScheduleEntry};

/// True when `period` overlaps any committed entry (half-open).
pub fn conflicts_with(period: &Period, committed: &[ScheduleEntry]) -> bool {
    committed.iter().any(|entry| entry.period.overlaps(period))
}

/// True when `period` overlaps or merely touches any committed entry.
pub fn touches_any(period: &Period, committed: &[ScheduleEntry]) -> bool {
    committed
        .iter()
        .any(|entry| entry.period.touches_or_overlaps(period))
}

/// Final validation sweep: sort by start time and drop any entry that still
/// overlaps an earlier survivor.
///
/// A safety net over the repair pass; on a well-formed schedule this is the
/// identity.
pub fn validate_schedule(mut entries: Vec<ScheduleEntry>) -> Vec<ScheduleEntry> {
    entries.sort_by(|a, b| {
        a.period
            .start
            .value()
            .total_cmp(&b.period.start.value())
    });

    let mut survivors: Vec<ScheduleEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        if conflicts_with(&entry.period, &survivors) {
            log::warn!(
                "dropping '{}' [{:.5}, {:.5}): overlaps an earlier entry",
                entry.target.name(),
                entry.period.start.value(),
                entry.period.stop.value(),
            );
        } else {
            survivors.push(entry);
        }
    }
    survivors
}
