use serde::{Deserialize, Serialize};

use super::Strategy;

/// How far the Sun must be below the horizon for the sky to count as dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwilightKind {
    Civil,
    Nautical,
    Astronomical,
}

impl TwilightKind {
    /// Sun altitude threshold for this twilight definition.
    pub fn sun_altitude_threshold(&self) -> qtty::Degrees {
        match self {
            TwilightKind::Civil => qtty::Degrees::new(-6.0),
            TwilightKind::Nautical => qtty::Degrees::new(-12.0),
            TwilightKind::Astronomical => qtty::Degrees::new(-18.0),
        }
    }
}

/// All options of a planning run, passed by reference through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// Observer latitude, positive north.
    pub latitude: qtty::Degrees,
    /// Observer longitude, positive east.
    pub longitude: qtty::Degrees,
    /// Bortle sky-brightness index, 1 (pristine) to 9 (inner city).
    pub bortle: u8,
    /// Lower altitude bound for a usable sample.
    pub min_altitude: qtty::Degrees,
    /// Upper altitude bound (mounts often cannot track near zenith).
    pub max_altitude: qtty::Degrees,
    pub twilight: TwilightKind,
    /// Targets visible for less than this total are not scheduled.
    pub min_visibility: qtty::Hours,
    /// Sampling interval of the visibility analysis grid.
    pub sampling_interval: qtty::Minutes,
    /// Candidate start-time spacing for the max-objects slot generator.
    pub slot_step: qtty::Minutes,
    /// Largest tolerated idle gap between consecutive observations before
    /// the compaction pass tries to close it.
    pub max_idle_gap: qtty::Minutes,
    pub strategy: Strategy,
    /// When set, an entry is only scheduled if a visibility window covers
    /// the full required exposure; otherwise shorter slots are allowed down
    /// to `min_visibility`.
    pub exclude_insufficient_time: bool,
    /// Treat samples inside the Moon exclusion radius as not visible.
    /// When off, such samples stay visible and the target is flagged.
    pub avoid_moon: bool,
    /// Optional padding excluded at both edges of astronomical night, so an
    /// imaging session is not clipped by twilight-model imprecision.
    pub night_margin: Option<qtty::Minutes>,
    /// Do not schedule a mosaic member individually once its group is built.
    pub mosaic_no_duplicates: bool,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            latitude: qtty::Degrees::new(0.0),
            longitude: qtty::Degrees::new(0.0),
            bortle: 4,
            min_altitude: qtty::Degrees::new(20.0),
            max_altitude: qtty::Degrees::new(85.0),
            twilight: TwilightKind::Astronomical,
            min_visibility: qtty::Hours::new(1.0),
            sampling_interval: qtty::Minutes::new(5.0),
            slot_step: qtty::Minutes::new(15.0),
            max_idle_gap: qtty::Minutes::new(15.0),
            strategy: Strategy::LongestDuration,
            exclude_insufficient_time: true,
            avoid_moon: false,
            night_margin: None,
            mosaic_no_duplicates: true,
        }
    }
}
