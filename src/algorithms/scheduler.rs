//! Schedule building.
//!
//! Turns scored, visibility-windowed targets into a conflict-free timetable.
//! Two algorithms, dispatched on the configured strategy:
//!
//! - **First-fit-decreasing greedy** (every strategy except max-objects):
//!   sort by score, give each target the earliest slot that fits its full
//!   exposure, reject on conflict. Simple and intentionally not optimal.
//! - **Slot-sampling greedy-with-repair** (max-objects): enumerate candidate
//!   start times on a fixed step, pick conflict-free slots in classic
//!   end-time order, then compact idle gaps and run a final validation
//!   sweep. See [`max_objects_schedule`] for the pass structure.
//!
//! An infeasible target is simply absent from the output; the builder never
//! fails for "no feasible schedule".

use super::conflicts;
use crate::core::domain::{Period, ScheduleEntry, Target};
use crate::error::PlanError;
use crate::models::{Exposure, PlanningConfig, Strategy};
use crate::time::CancellationToken;

/// A scored target with its visibility windows, ready for scheduling.
#[derive(Debug, Clone)]
pub struct ScheduleCandidate {
    pub target: Target,
    pub periods: Vec<Period>,
    pub score: f64,
    pub exposure: Exposure,
}

/// Build the night's timetable from scored candidates.
///
/// Candidates with a non-finite or non-positive required exposure are
/// skipped with a diagnostic. The output satisfies two invariants: no two
/// entries overlap (half-open), and each target appears at most once.
pub fn build_schedule(
    candidates: &[ScheduleCandidate],
    config: &PlanningConfig,
    cancel: &CancellationToken,
) -> Result<Vec<ScheduleEntry>, PlanError> {
    let schedulable: Vec<&ScheduleCandidate> = candidates
        .iter()
        .filter(|c| {
            if c.exposure.is_schedulable() {
                true
            } else {
                log::debug!(
                    "skipping '{}': required exposure {} h is not schedulable",
                    c.target.name(),
                    c.exposure.total.value()
                );
                false
            }
        })
        .collect();

    match config.strategy {
        Strategy::MaxObjects => max_objects_schedule(&schedulable, config, cancel),
        _ => Ok(greedy_schedule(&schedulable, config)),
    }
}

/// First-fit-decreasing by score.
fn greedy_schedule(
    candidates: &[&ScheduleCandidate],
    config: &PlanningConfig,
) -> Vec<ScheduleEntry> {
    let mut ordered: Vec<&ScheduleCandidate> = candidates.to_vec();
    ordered.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.target.name().cmp(&b.target.name()))
    });

    let min_visibility_days = config.min_visibility.to::<qtty::Day>();
    let mut schedule: Vec<ScheduleEntry> = Vec::new();

    for candidate in ordered {
        let exposure_days = candidate.exposure.total.to::<qtty::Day>();

        // Earliest window long enough for the full exposure; optionally fall
        // back to a truncated slot in any window clearing the visibility floor
        let slot = candidate
            .periods
            .iter()
            .find(|p| p.duration() >= exposure_days)
            .map(|p| (p, exposure_days))
            .or_else(|| {
                if config.exclude_insufficient_time {
                    return None;
                }
                candidate
                    .periods
                    .iter()
                    .find(|p| p.duration() >= min_visibility_days)
                    .map(|p| (p, p.duration().min(exposure_days)))
            });

        let Some((window, duration)) = slot else {
            log::debug!(
                "no feasible window for '{}' ({} h needed)",
                candidate.target.name(),
                candidate.exposure.total.value()
            );
            continue;
        };

        let period = Period::new(window.start, window.start + duration);
        if conflicts::conflicts_with(&period, &schedule) {
            log::debug!(
                "rejecting '{}': slot conflicts with a committed entry",
                candidate.target.name()
            );
            continue;
        }

        schedule.push(ScheduleEntry {
            period,
            target: candidate.target.clone(),
            source_window: *window,
        });
    }

    schedule.sort_by(|a, b| a.period.start.value().total_cmp(&b.period.start.value()));
    schedule
}

/// One candidate observation slot for the max-objects scheduler.
#[derive(Debug, Clone)]
struct Slot {
    period: Period,
    source_window: Period,
    candidate: usize,
    score: f64,
}

/// Slot-sampling greedy-with-repair, in five passes:
///
/// 1. enumerate candidate start times on the configured slot step,
/// 2. sort all slots by end time ascending, score descending,
/// 3. strict greedy scan accepting one conflict-free slot per target
///    (touching counts as a conflict here),
/// 4. gap-compaction: shift entries earlier to close idle gaps above the
///    configured threshold, never leaving the source visibility window and
///    never introducing a conflict,
/// 5. final validation sweep re-asserting the no-overlap invariant.
fn max_objects_schedule(
    candidates: &[&ScheduleCandidate],
    config: &PlanningConfig,
    cancel: &CancellationToken,
) -> Result<Vec<ScheduleEntry>, PlanError> {
    let step = config.slot_step.to::<qtty::Day>();
    if !(step.value().is_finite() && step.value() > 0.0) {
        return Err(PlanError::InvalidSamplingInterval {
            minutes: config.slot_step.value(),
        });
    }

    // Pass 1: slot generation
    let mut slots: Vec<Slot> = Vec::new();
    for (index, candidate) in candidates.iter().enumerate() {
        let exposure_days = candidate.exposure.total.to::<qtty::Day>();
        for window in &candidate.periods {
            if window.duration() < exposure_days {
                continue;
            }
            let mut start = window.start;
            while start + exposure_days <= window.stop {
                if cancel.is_cancelled() {
                    return Err(PlanError::Cancelled);
                }
                slots.push(Slot {
                    period: Period::new(start, start + exposure_days),
                    source_window: *window,
                    candidate: index,
                    score: candidate.score,
                });
                start = start + step;
            }
        }
    }

    // Pass 2: weighted-interval-scheduling order
    slots.sort_by(|a, b| {
        a.period
            .stop
            .value()
            .total_cmp(&b.period.stop.value())
            .then_with(|| b.score.total_cmp(&a.score))
            .then_with(|| a.candidate.cmp(&b.candidate))
    });

    // Pass 3: strict greedy, one slot per target, touching slots rejected
    let mut scheduled_targets = vec![false; candidates.len()];
    let mut schedule: Vec<ScheduleEntry> = Vec::new();
    for slot in &slots {
        if scheduled_targets[slot.candidate] {
            continue;
        }
        if conflicts::touches_any(&slot.period, &schedule) {
            continue;
        }
        scheduled_targets[slot.candidate] = true;
        schedule.push(ScheduleEntry {
            period: slot.period,
            target: candidates[slot.candidate].target.clone(),
            source_window: slot.source_window,
        });
    }

    // Pass 4: gap compaction
    schedule.sort_by(|a, b| a.period.start.value().total_cmp(&b.period.start.value()));
    let max_idle = config.max_idle_gap.to::<qtty::Day>();
    let mut compacted: Vec<ScheduleEntry> = Vec::with_capacity(schedule.len());
    for entry in schedule {
        let shifted = compact_entry(&entry, &compacted, max_idle);
        compacted.push(shifted);
    }

    // Pass 5: final validation
    Ok(conflicts::validate_schedule(compacted))
}

/// Shift `entry` earlier to close an oversized idle gap, bounded by its
/// source visibility window. Keeps the original slot when the shift would
/// conflict with an already-compacted entry.
fn compact_entry(
    entry: &ScheduleEntry,
    compacted: &[ScheduleEntry],
    max_idle: qtty::Days,
) -> ScheduleEntry {
    let Some(previous) = compacted.last() else {
        return entry.clone();
    };

    let gap = entry.period.start - previous.period.stop;
    if gap <= max_idle {
        return entry.clone();
    }

    // Never move before the window the slot was carved from
    let headroom = entry.period.start - entry.source_window.start;
    let shift = gap.min(headroom);
    if shift.value() <= 0.0 {
        return entry.clone();
    }

    let moved = Period::new(entry.period.start - shift, entry.period.stop - shift);
    if conflicts::conflicts_with(&moved, compacted) {
        return entry.clone();
    }

    ScheduleEntry {
        period: moved,
        ..entry.clone()
    }
}
