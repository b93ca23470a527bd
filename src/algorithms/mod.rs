//! Schedule construction algorithms.

pub mod conflicts;
pub mod scheduler;

pub use conflicts::validate_schedule;
pub use scheduler::{build_schedule, ScheduleCandidate};
