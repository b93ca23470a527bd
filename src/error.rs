use crate::time::ModifiedJulianDate;

/// Hard failures of a planning run.
///
/// Everything else in this engine degrades gracefully: unparsable input
/// becomes an empty default, objects with missing or invalid data are
/// skipped with a log diagnostic, and an infeasible schedule is simply an
/// empty one. Only a malformed analysis interval and cooperative
/// cancellation abort a run.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlanError {
    #[error("analysis interval start ({}) must be before end ({})", start.value(), stop.value())]
    InvalidInterval {
        start: ModifiedJulianDate,
        stop: ModifiedJulianDate,
    },

    #[error("sampling interval must be a positive number of minutes, got {minutes}")]
    InvalidSamplingInterval { minutes: f64 },

    #[error("planning run cancelled")]
    Cancelled,
}
