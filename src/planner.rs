//! Planning-run facade.
//!
//! [`Planner`] wires the pipeline together for one night: visibility
//! sampling for every catalog object, optional mosaic-group combination,
//! exposure estimation through the external calculator, strategy scoring,
//! and schedule building. It owns no state beyond the configuration; every
//! run is independent.

use crate::algorithms::{self, ScheduleCandidate};
use crate::core::domain::{CelestialObject, Period, ScheduleEntry, Target};
use crate::error::PlanError;
use crate::models::{ExposureCalculator, PlanningConfig};
use crate::services::mosaic;
use crate::services::scoring;
use crate::services::visibility::{self, VisibilityReport};
use crate::time::{CancellationToken, Clock};

/// Visibility data for one target, scheduled or not, kept for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetVisibility {
    pub target: Target,
    pub report: VisibilityReport,
}

/// The outcome of one planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct NightPlan {
    /// Conflict-free timetable, chronologically ordered.
    pub entries: Vec<ScheduleEntry>,
    /// Per-target visibility for every analyzed target, including those
    /// that did not make the schedule.
    pub visibility: Vec<TargetVisibility>,
}

impl NightPlan {
    pub fn total_scheduled_hours(&self) -> f64 {
        self.entries.iter().map(|e| e.duration_hours()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One-night observation planner.
pub struct Planner<'a> {
    config: PlanningConfig,
    calculator: &'a dyn ExposureCalculator,
}

impl<'a> Planner<'a> {
    pub fn new(config: PlanningConfig, calculator: &'a dyn ExposureCalculator) -> Self {
        Self { config, calculator }
    }

    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// Analysis window for the night ahead: the next 24 hours from the
    /// clock's now. Twilight filtering inside the visibility pass trims it
    /// to the actual dark hours.
    pub fn upcoming_night(&self, clock: &dyn Clock) -> Period {
        let now = clock.now();
        Period::new(now, now + qtty::Days::new(1.0))
    }

    /// Plan a night for individual objects.
    pub fn plan_night(
        &self,
        objects: &[CelestialObject],
        window: &Period,
        cancel: &CancellationToken,
    ) -> Result<NightPlan, PlanError> {
        self.plan_night_with_groups(objects, &[], window, cancel)
    }

    /// Plan a night where some objects form mosaic clusters.
    ///
    /// `clusters` holds indices into `objects`, one vector per cluster, as
    /// produced by the external field-of-view overlap detection. Each
    /// viable cluster becomes a [`crate::MosaicGroup`] competing for
    /// schedule time; with `mosaic_no_duplicates` set, its members no
    /// longer compete individually.
    pub fn plan_night_with_groups(
        &self,
        objects: &[CelestialObject],
        clusters: &[Vec<usize>],
        window: &Period,
        cancel: &CancellationToken,
    ) -> Result<NightPlan, PlanError> {
        let reports: Vec<VisibilityReport> = objects
            .iter()
            .map(|obj| visibility::find_visibility_periods(obj, window, &self.config, cancel))
            .collect::<Result<_, _>>()?;

        let mut visibility_out: Vec<TargetVisibility> = Vec::new();
        let mut candidates: Vec<ScheduleCandidate> = Vec::new();
        let mut grouped = vec![false; objects.len()];

        for cluster in clusters {
            if cancel.is_cancelled() {
                return Err(PlanError::Cancelled);
            }
            if cluster.iter().any(|&i| i >= objects.len()) {
                log::warn!(
                    "ignoring mosaic cluster {cluster:?}: member index out of range \
                     for a catalog of {} objects",
                    objects.len()
                );
                continue;
            }
            let members: Vec<CelestialObject> =
                cluster.iter().map(|&i| objects[i].clone()).collect();
            let member_reports: Vec<&VisibilityReport> =
                cluster.iter().map(|&i| &reports[i]).collect();

            let Some((group, report)) = mosaic::combine_group(&members, &member_reports) else {
                log::debug!("ignoring mosaic cluster of {} member(s)", cluster.len());
                continue;
            };
            if self.config.mosaic_no_duplicates {
                for &i in cluster {
                    grouped[i] = true;
                }
            }

            let target = Target::Group(group);
            if let Some(candidate) = self.candidate_for(&target, &report) {
                candidates.push(candidate);
            }
            visibility_out.push(TargetVisibility { target, report });
        }

        for (i, object) in objects.iter().enumerate() {
            let target = Target::Single(object.clone());
            if !grouped[i] {
                if let Some(candidate) = self.candidate_for(&target, &reports[i]) {
                    candidates.push(candidate);
                }
            }
            visibility_out.push(TargetVisibility {
                target,
                report: reports[i].clone(),
            });
        }

        let entries = algorithms::build_schedule(&candidates, &self.config, cancel)?;
        Ok(NightPlan {
            entries,
            visibility: visibility_out,
        })
    }

    /// Turn a target and its visibility into a scored scheduling candidate,
    /// or `None` when it cannot compete (too little visibility, or no
    /// magnitude to score it by).
    fn candidate_for(
        &self,
        target: &Target,
        report: &VisibilityReport,
    ) -> Option<ScheduleCandidate> {
        if report.total_hours() < self.config.min_visibility {
            log::debug!(
                "excluding '{}': visible {:.2} h, below the {:.2} h floor",
                target.name(),
                report.total_hours().value(),
                self.config.min_visibility.value()
            );
            return None;
        }
        let Some(magnitude) = target.magnitude() else {
            log::debug!(
                "excluding '{}' from scheduling: no magnitude available",
                target.name()
            );
            return None;
        };
        let exposure = self
            .calculator
            .estimate(magnitude, self.config.bortle, &target.fov());
        let score = scoring::score_target(target, report, &exposure, self.config.strategy)?;

        Some(ScheduleCandidate {
            target: target.clone(),
            periods: report.periods.clone(),
            score,
            exposure,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Exposure;
    use crate::time::{FixedClock, ModifiedJulianDate};

    struct FixedExposure(f64);

    impl ExposureCalculator for FixedExposure {
        fn estimate(&self, _magnitude: f64, _bortle: u8, _fov: &crate::FieldOfView) -> Exposure {
            Exposure {
                total: qtty::Hours::new(self.0),
                frames: 60,
                panels: 1,
            }
        }
    }

    fn milan_config() -> PlanningConfig {
        PlanningConfig {
            latitude: qtty::Degrees::new(45.5),
            longitude: qtty::Degrees::new(9.2),
            ..PlanningConfig::default()
        }
    }

    fn object(name: &str, ra: f64, dec: f64, magnitude: f64) -> CelestialObject {
        let mut obj = CelestialObject::new(name, qtty::Degrees::new(ra), qtty::Degrees::new(dec));
        obj.magnitude = Some(magnitude);
        obj
    }

    // Night of 2026-02-25 near Milan: around local midnight the sidereal
    // time is close to 10 h, so an RA=10h object culminates mid-night.
    fn february_night() -> Period {
        Period::new(
            ModifiedJulianDate::new(61096.0 + 19.0 / 24.0),
            ModifiedJulianDate::new(61097.0 + 4.5 / 24.0),
        )
    }

    #[test]
    fn culminating_object_is_visible_and_scheduled() {
        let calculator = FixedExposure(2.0);
        let planner = Planner::new(milan_config(), &calculator);
        let objects = vec![object("RA10 Dec40", 150.0, 40.0, 3.4)];

        let plan = planner
            .plan_night(&objects, &february_night(), &CancellationToken::new())
            .unwrap();

        assert_eq!(plan.visibility.len(), 1);
        let report = &plan.visibility[0].report;
        assert_eq!(report.periods.len(), 1, "expected one contiguous window");
        assert!(report.total_hours().value() > 2.0);
        assert!(report.max_altitude.value() > 60.0);

        assert_eq!(plan.entries.len(), 1);
        assert!((plan.total_scheduled_hours() - 2.0).abs() < 1e-9);
        assert!(plan.entries[0].source_window.contains(&plan.entries[0].period));
    }

    #[test]
    fn object_without_magnitude_is_analyzed_but_not_scheduled() {
        let calculator = FixedExposure(2.0);
        let planner = Planner::new(milan_config(), &calculator);
        let mut anonymous = object("No mag", 150.0, 40.0, 0.0);
        anonymous.magnitude = None;

        let plan = planner
            .plan_night(&[anonymous], &february_night(), &CancellationToken::new())
            .unwrap();

        assert!(plan.is_empty());
        // Visibility is still reported for display
        assert_eq!(plan.visibility.len(), 1);
        assert!(!plan.visibility[0].report.periods.is_empty());
    }

    #[test]
    fn below_visibility_floor_is_not_scheduled() {
        let mut cfg = milan_config();
        cfg.min_visibility = qtty::Hours::new(100.0);
        let calculator = FixedExposure(2.0);
        let planner = Planner::new(cfg, &calculator);

        let plan = planner
            .plan_night(
                &[object("RA10 Dec40", 150.0, 40.0, 3.4)],
                &february_night(),
                &CancellationToken::new(),
            )
            .unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn mosaic_cluster_replaces_its_members() {
        let calculator = FixedExposure(2.0);
        let planner = Planner::new(milan_config(), &calculator);
        // A close circumpolar pair, visible all night from Milan
        let objects = vec![
            object("North A", 40.0, 88.5, 7.0),
            object("North B", 42.0, 88.8, 7.5),
        ];

        let plan = planner
            .plan_night_with_groups(
                &objects,
                &[vec![0, 1]],
                &february_night(),
                &CancellationToken::new(),
            )
            .unwrap();

        assert_eq!(plan.entries.len(), 1);
        assert_eq!(plan.entries[0].target.name(), "Mosaic(North A+North B)");
        // Members were folded into the group, not scheduled individually
        assert!(plan
            .entries
            .iter()
            .all(|e| !matches!(&e.target, Target::Single(_))));
        // Display data covers the group and both members
        assert_eq!(plan.visibility.len(), 3);
    }

    #[test]
    fn mosaic_members_compete_individually_when_duplicates_allowed() {
        let mut cfg = milan_config();
        cfg.mosaic_no_duplicates = false;
        // Slot sampling can place the members after the group's slot; the
        // simple greedy would start everyone at the window edge and reject
        cfg.strategy = crate::models::Strategy::MaxObjects;
        let calculator = FixedExposure(2.0);
        let planner = Planner::new(cfg, &calculator);
        let objects = vec![
            object("North A", 40.0, 88.5, 7.0),
            object("North B", 42.0, 88.8, 7.5),
        ];

        let plan = planner
            .plan_night_with_groups(
                &objects,
                &[vec![0, 1]],
                &february_night(),
                &CancellationToken::new(),
            )
            .unwrap();

        // The group is scheduled first (group multiplier), members can then
        // fill the rest of the night
        assert!(plan.entries.len() >= 2);
        assert!(plan
            .entries
            .iter()
            .any(|e| matches!(&e.target, Target::Group(_))));
    }

    #[test]
    fn out_of_range_cluster_is_ignored() {
        let calculator = FixedExposure(2.0);
        let planner = Planner::new(milan_config(), &calculator);
        let objects = vec![
            object("North A", 40.0, 88.5, 7.0),
            object("North B", 42.0, 88.8, 7.5),
        ];

        // Index 5 does not exist; the cluster must be dropped, leaving the
        // members to compete individually
        let plan = planner
            .plan_night_with_groups(
                &objects,
                &[vec![0, 5]],
                &february_night(),
                &CancellationToken::new(),
            )
            .unwrap();

        assert!(plan
            .visibility
            .iter()
            .all(|v| matches!(&v.target, Target::Single(_))));
        assert!(!plan.is_empty());
    }

    #[test]
    fn upcoming_night_spans_a_day_from_the_clock() {
        let calculator = FixedExposure(2.0);
        let planner = Planner::new(milan_config(), &calculator);
        let clock = FixedClock(ModifiedJulianDate::new(61096.5));

        let window = planner.upcoming_night(&clock);
        assert_eq!(window.start.value(), 61096.5);
        assert_eq!(window.stop.value(), 61097.5);
    }

    #[test]
    fn cancellation_propagates_from_the_pipeline() {
        let calculator = FixedExposure(2.0);
        let planner = Planner::new(milan_config(), &calculator);
        let token = CancellationToken::new();
        token.cancel();

        let err = planner
            .plan_night(
                &[object("RA10 Dec40", 150.0, 40.0, 3.4)],
                &february_night(),
                &token,
            )
            .unwrap_err();
        assert!(matches!(err, PlanError::Cancelled));
    }
}
