//! Visibility window computation.
//!
//! Steps a clock across the analysis interval and evaluates, at each sample,
//! whether a target is observable: altitude within the configured bounds,
//! Sun far enough below the horizon for the chosen twilight, and (optionally)
//! far enough from the Moon. Consecutive visible samples merge into
//! [`Period`]s; a single non-visible sample closes the current period, so an
//! object dipping out of the altitude band or into twilight yields multiple
//! disjoint windows.
//!
//! ## Edge cases
//! - No sample satisfies the predicates: empty period list, not an error.
//! - Every sample satisfies them: one period spanning the whole interval.
//! - Moon avoidance off: samples inside the exclusion radius stay visible
//!   but the report is flagged `near_moon`.

use crate::astro::{alt_az, moon, sun};
use crate::core::domain::{CelestialObject, Period};
use crate::error::PlanError;
use crate::models::PlanningConfig;
use crate::time::{CancellationToken, ModifiedJulianDate};

/// Per-night visibility data for one target, owned by the planning pass.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityReport {
    /// Disjoint, chronologically ordered windows of observability.
    pub periods: Vec<Period>,
    /// True when at least one visible sample fell inside the Moon
    /// exclusion radius (only meaningful with avoidance off).
    pub near_moon: bool,
    /// Highest altitude reached across all visible samples.
    pub max_altitude: qtty::Degrees,
}

impl VisibilityReport {
    pub fn empty() -> Self {
        Self {
            periods: Vec::new(),
            near_moon: false,
            max_altitude: qtty::Degrees::new(f64::NEG_INFINITY),
        }
    }

    pub fn total_hours(&self) -> qtty::Hours {
        total_visibility_hours(&self.periods)
    }
}

/// Sum of period lengths in hours.
pub fn total_visibility_hours(periods: &[Period]) -> qtty::Hours {
    let total_days = periods
        .iter()
        .fold(qtty::Days::new(0.0), |acc, p| acc + p.duration());
    total_days.to::<qtty::Hour>()
}

/// Moon exclusion radius for a given illuminated fraction.
///
/// A brighter Moon washes out a larger patch of sky: 5° when new, growing
/// linearly to 30° when full.
pub fn moon_exclusion_radius(illumination: f64) -> qtty::Degrees {
    qtty::Degrees::new(5.0 + 25.0 * illumination.clamp(0.0, 1.0))
}

/// Compute the visibility windows of `object` over `window`.
///
/// The sampling interval, altitude bounds, twilight threshold, Moon
/// handling and night margins all come from `config`. The loop polls
/// `cancel` so a dense catalog sweep can be aborted.
pub fn find_visibility_periods(
    object: &CelestialObject,
    window: &Period,
    config: &PlanningConfig,
    cancel: &CancellationToken,
) -> Result<VisibilityReport, PlanError> {
    if window.start >= window.stop {
        return Err(PlanError::InvalidInterval {
            start: window.start,
            stop: window.stop,
        });
    }
    let step_minutes = config.sampling_interval.value();
    if !(step_minutes.is_finite() && step_minutes > 0.0) {
        return Err(PlanError::InvalidSamplingInterval {
            minutes: step_minutes,
        });
    }
    let step = config.sampling_interval.to::<qtty::Day>();

    // Sample grid and Sun altitudes, shared by the margin and main passes
    let mut grid: Vec<ModifiedJulianDate> = Vec::new();
    let mut t = window.start;
    while t < window.stop {
        if cancel.is_cancelled() {
            return Err(PlanError::Cancelled);
        }
        grid.push(t);
        t = t + step;
    }

    let sun_threshold = config.twilight.sun_altitude_threshold();
    let sun_altitudes: Vec<f64> = grid
        .iter()
        .map(|&t| sun::sun_altitude(t, config.latitude, config.longitude).value())
        .collect();

    // Margins mode: exclude samples too close to the edges of darkness
    let dark_window = config.night_margin.map(|margin| {
        let margin_days = margin.to::<qtty::Day>();
        let first_dark = grid
            .iter()
            .zip(&sun_altitudes)
            .find(|(_, &alt)| alt < sun_threshold.value())
            .map(|(&t, _)| t);
        let last_dark = grid
            .iter()
            .zip(&sun_altitudes)
            .rev()
            .find(|(_, &alt)| alt < sun_threshold.value())
            .map(|(&t, _)| t);
        match (first_dark, last_dark) {
            (Some(start), Some(stop)) => Some(Period::new(start + margin_days, stop - margin_days)),
            _ => None,
        }
    });

    let mut report = VisibilityReport::empty();
    let mut run_start: Option<ModifiedJulianDate> = None;

    for (i, &t) in grid.iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(PlanError::Cancelled);
        }

        let mut visible = sample_visible(object, t, sun_altitudes[i], config, dark_window.as_ref());

        if visible {
            let separation = moon::moon_separation(object.ra, object.dec, t);
            let radius = moon_exclusion_radius(moon::moon_illumination(t));
            if separation < radius {
                if config.avoid_moon {
                    visible = false;
                } else {
                    report.near_moon = true;
                }
            }
        }

        if visible {
            let altitude = alt_az(object.ra, object.dec, t, config.latitude, config.longitude)
                .altitude;
            if altitude > report.max_altitude {
                report.max_altitude = altitude;
            }
            if run_start.is_none() {
                run_start = Some(t);
            }
        } else if let Some(start) = run_start.take() {
            report.periods.push(Period::new(start, t));
        }
    }

    if let Some(start) = run_start {
        report.periods.push(Period::new(start, window.stop));
    }

    Ok(report)
}

fn sample_visible(
    object: &CelestialObject,
    t: ModifiedJulianDate,
    sun_altitude: f64,
    config: &PlanningConfig,
    dark_window: Option<&Option<Period>>,
) -> bool {
    if sun_altitude >= config.twilight.sun_altitude_threshold().value() {
        return false;
    }
    if let Some(margins) = dark_window {
        match margins {
            Some(period) => {
                if t < period.start || t > period.stop {
                    return false;
                }
            }
            // Margins requested but no darkness found in the interval
            None => return false,
        }
    }

    let altitude = alt_az(object.ra, object.dec, t, config.latitude, config.longitude).altitude;
    altitude >= config.min_altitude && altitude <= config.max_altitude
}
