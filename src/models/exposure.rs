use serde::{Deserialize, Serialize};

use crate::core::domain::FieldOfView;

/// Imaging requirements for one target, supplied by the external exposure
/// calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Exposure {
    /// Total integration time required for an adequate image.
    pub total: qtty::Hours,
    /// Number of sub-exposures.
    pub frames: u32,
    /// Number of mosaic tiles needed to cover the field.
    pub panels: u32,
}

impl Exposure {
    /// True when the exposure can actually be scheduled. Non-finite or
    /// non-positive totals are silently skipped by the schedule builder.
    pub fn is_schedulable(&self) -> bool {
        self.total.value().is_finite() && self.total.value() > 0.0
    }
}

/// Seam for the external exposure-calculator collaborator.
///
/// Given a target's brightness, the sky quality and its field of view, an
/// implementation answers how long, in how many frames and over how many
/// mosaic panels the target must be imaged.
pub trait ExposureCalculator {
    fn estimate(&self, magnitude: f64, bortle: u8, fov: &FieldOfView) -> Exposure;
}
