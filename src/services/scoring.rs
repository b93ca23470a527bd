//! Strategy-specific target scoring.
//!
//! Maps (target, visibility, exposure, strategy) to one scalar priority used
//! to order scheduling candidates. Each strategy has its own formula; they
//! are not interchangeable. Targets with unknown magnitude cannot be scored
//! and are excluded with a diagnostic, never an error.
//!
//! Mosaic groups score `object_count × visible_hours × 10` under every
//! strategy, while individual objects are demoted to `visible_hours × 0.1`
//! only while the mosaic-groups strategy is active. The asymmetry mirrors
//! the established planner behavior and is kept as-is pending product
//! clarification (see DESIGN.md).

use super::visibility::VisibilityReport;
use crate::core::domain::Target;
use crate::models::{Exposure, Strategy};

/// Floor for reciprocal denominators, keeping scores finite when a target's
/// visibility exactly matches its required exposure.
const RECIPROCAL_FLOOR: f64 = 1e-6;

/// Score one target under `strategy`, or `None` when it cannot be scored.
pub fn score_target(
    target: &Target,
    report: &VisibilityReport,
    exposure: &Exposure,
    strategy: Strategy,
) -> Option<f64> {
    let Some(magnitude) = target.magnitude() else {
        log::debug!(
            "excluding '{}' from scoring: no magnitude available",
            target.name()
        );
        return None;
    };

    let visible_hours = report.total_hours().value();

    if target.is_group() {
        return Some(target.object_count() as f64 * visible_hours * 10.0);
    }

    let score = match strategy {
        Strategy::LongestDuration => visible_hours,
        Strategy::MaxObjects => {
            // Bin-packing affinity: visibility barely covering the required
            // exposure scores highest
            let slack = (visible_hours - exposure.total.value()).abs();
            1.0 / slack.max(RECIPROCAL_FLOOR)
        }
        Strategy::OptimalSnr => {
            let elevation_factor = (report.max_altitude.value() / 90.0).clamp(0.0, 1.0);
            let brightness_factor = ((20.0 - magnitude) / 20.0).clamp(0.0, 1.0);
            elevation_factor * brightness_factor
        }
        Strategy::MinimalMosaic => 1.0 / f64::from(exposure.panels.max(1)),
        Strategy::DifficultyBalanced => {
            let time_ratio = visible_hours / exposure.total.value().max(RECIPROCAL_FLOOR);
            let difficulty =
                (magnitude / 20.0 + f64::from(exposure.panels.max(1)) / 10.0).max(RECIPROCAL_FLOOR);
            time_ratio / difficulty
        }
        Strategy::MosaicGroups => visible_hours * 0.1,
    };

    Some(score)
}
