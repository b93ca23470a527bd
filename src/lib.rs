//! Night-sky visibility analysis and observation scheduling engine.
//!
//! Given an observer location, a set of candidate deep-sky objects and
//! equipment constraints, this crate computes when each object is observable
//! during a night (altitude bounds, twilight, Moon interference) and packs
//! the resulting visibility windows into a conflict-free observation
//! timetable under one of several optimization strategies.
//!
//! The pipeline is: celestial position math ([`astro`]) → visibility window
//! sampling ([`services::visibility`]) → optional mosaic-group combination
//! ([`services::mosaic`]) → scoring ([`services::scoring`]) → schedule
//! building ([`algorithms::scheduler`]). The [`planner::Planner`] facade
//! wires the stages together for a single planning run.
//!
//! Catalog loading, exposure estimation, plotting and report generation are
//! external collaborators: the engine consumes plain domain structs and an
//! [`models::ExposureCalculator`] implementation, and produces
//! [`core::domain::ScheduleEntry`] sequences plus per-target visibility
//! periods for display.

pub mod algorithms;
pub mod astro;
pub mod core;
pub mod error;
pub mod models;
pub mod planner;
pub mod services;
pub mod time;

pub use crate::core::domain::{
    CelestialObject, FieldOfView, MosaicGroup, Period, ScheduleEntry, Target,
};
pub use crate::error::PlanError;
pub use crate::models::{Exposure, ExposureCalculator, PlanningConfig, Strategy, TwilightKind};
pub use crate::planner::{NightPlan, Planner, TargetVisibility};
pub use crate::time::{CancellationToken, Clock, FixedClock, ModifiedJulianDate, SystemClock};
