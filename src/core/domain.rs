//! Domain models for night planning: time periods, catalog objects, mosaic
//! groups and schedule entries.
//!
//! All entities here are created fresh per planning run (one night, one
//! location, one strategy) and discarded once the schedule is produced;
//! nothing is persisted across runs.

use serde::{Deserialize, Serialize};

use crate::time::ModifiedJulianDate;

/// A contiguous time interval `[start, stop)` in UTC, expressed in MJD.
///
/// Used for visibility windows, dark-sky windows and scheduled observation
/// slots. Invariant: `start < stop`; periods belonging to the same object
/// within one night are disjoint and chronologically ordered.
///
/// # Examples
///
/// ```
/// use nightplan::{ModifiedJulianDate, Period};
///
/// let period = Period::new(
///     ModifiedJulianDate::new(60000.0),
///     ModifiedJulianDate::new(60000.5),
/// );
/// assert_eq!(period.duration_hours(), 12.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub start: ModifiedJulianDate,
    pub stop: ModifiedJulianDate,
}

impl Period {
    pub fn new(start: ModifiedJulianDate, stop: ModifiedJulianDate) -> Self {
        Self { start, stop }
    }

    /// Duration as a strongly-typed `Days` quantity.
    pub fn duration(&self) -> qtty::Days {
        self.stop - self.start
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration().to::<qtty::Hour>().value()
    }

    /// Half-open overlap test: touching endpoints do not overlap.
    pub fn overlaps(&self, other: &Period) -> bool {
        self.start < other.stop && other.start < self.stop
    }

    /// Closed-interval intersection test: shared endpoints count as contact.
    pub fn touches_or_overlaps(&self, other: &Period) -> bool {
        self.start <= other.stop && other.start <= self.stop
    }

    /// True if `other` lies entirely within this period.
    pub fn contains(&self, other: &Period) -> bool {
        self.start <= other.start && other.stop <= self.stop
    }

    pub fn contains_instant(&self, t: ModifiedJulianDate) -> bool {
        self.start <= t && t < self.stop
    }

    /// Intersection of two periods, or `None` when they do not overlap.
    pub fn intersect(&self, other: &Period) -> Option<Period> {
        let start = if self.start > other.start { self.start } else { other.start };
        let stop = if self.stop < other.stop { self.stop } else { other.stop };
        if start < stop {
            Some(Period::new(start, stop))
        } else {
            None
        }
    }
}

/// Rectangular field of view in arcminutes.
///
/// Parsed from catalog strings like `"1.5° x 1°"` or `"90' x 60'"` by
/// [`crate::astro::coords::parse_fov`]; an unparsable descriptor degrades to
/// the zero field, which callers treat as "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldOfView {
    pub width: qtty::Arcminutes,
    pub height: qtty::Arcminutes,
}

impl FieldOfView {
    pub const ZERO: FieldOfView = FieldOfView {
        width: qtty::Arcminutes::new(0.0),
        height: qtty::Arcminutes::new(0.0),
    };

    pub fn new(width: qtty::Arcminutes, height: qtty::Arcminutes) -> Self {
        Self { width, height }
    }

    /// Total area in arcmin².
    pub fn area_arcmin2(&self) -> f64 {
        self.width.value() * self.height.value()
    }

    pub fn is_zero(&self) -> bool {
        self.area_arcmin2() == 0.0
    }
}

/// Broad object class, carried for display and reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    Galaxy,
    Nebula,
    PlanetaryNebula,
    SupernovaRemnant,
    StarCluster,
    Other,
}

/// A catalog object with immutable identity and coordinates.
///
/// Derived per-night data (visibility periods, Moon-interference flag) is
/// owned by the planning pass that computes it, not stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialObject {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub ra: qtty::Degrees,
    pub dec: qtty::Degrees,
    pub magnitude: Option<f64>,
    pub fov: FieldOfView,
    pub object_type: ObjectType,
}

impl CelestialObject {
    pub fn new(name: impl Into<String>, ra: qtty::Degrees, dec: qtty::Degrees) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            ra,
            dec,
            magnitude: None,
            fov: FieldOfView::ZERO,
            object_type: ObjectType::Other,
        }
    }
}

/// A composite of spatially overlapping objects imaged as one mosaic.
///
/// The overlap periods are the *intersection* of all members' visibility (a
/// mosaic needs every panel simultaneously observable — a planning
/// approximation, since panels are imaged sequentially), so they are never
/// longer than the shortest member's own visibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MosaicGroup {
    pub members: Vec<CelestialObject>,
    pub overlap_periods: Vec<Period>,
    pub composite_magnitude: Option<f64>,
    pub combined_fov: FieldOfView,
}

impl MosaicGroup {
    pub fn object_count(&self) -> usize {
        self.members.len()
    }

    /// Display name derived from the member names.
    pub fn name(&self) -> String {
        let names: Vec<&str> = self.members.iter().map(|m| m.name.as_str()).collect();
        format!("Mosaic({})", names.join("+"))
    }
}

/// A schedulable target: either a single object or a mosaic group.
///
/// Both variants expose the same capability surface (name, magnitude, field
/// of view) so scoring and scheduling treat them interchangeably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Target {
    Single(CelestialObject),
    Group(MosaicGroup),
}

impl Target {
    pub fn name(&self) -> String {
        match self {
            Target::Single(obj) => obj.name.clone(),
            Target::Group(group) => group.name(),
        }
    }

    pub fn magnitude(&self) -> Option<f64> {
        match self {
            Target::Single(obj) => obj.magnitude,
            Target::Group(group) => group.composite_magnitude,
        }
    }

    pub fn fov(&self) -> FieldOfView {
        match self {
            Target::Single(obj) => obj.fov,
            Target::Group(group) => group.combined_fov,
        }
    }

    pub fn object_count(&self) -> usize {
        match self {
            Target::Single(_) => 1,
            Target::Group(group) => group.object_count(),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Target::Group(_))
    }
}

/// One committed slot of the night's timetable.
///
/// Across a full schedule no two entries overlap and each target appears at
/// most once. `source_window` is the visibility period the slot was carved
/// from; the gap-compaction pass may move the slot earlier but never outside
/// this window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub period: Period,
    pub target: Target,
    pub source_window: Period,
}

impl ScheduleEntry {
    pub fn duration_hours(&self) -> f64 {
        self.period.duration_hours()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(start: f64, stop: f64) -> Period {
        Period::new(ModifiedJulianDate::new(start), ModifiedJulianDate::new(stop))
    }

    #[test]
    fn period_duration_helpers() {
        let p = period(100.0, 100.5);
        assert_eq!(p.duration_hours(), 12.0);
        assert_eq!(p.duration(), qtty::Days::new(0.5));
    }

    #[test]
    fn period_overlap_semantics() {
        let a = period(0.0, 1.0);
        let b = period(1.0, 2.0);
        let c = period(0.5, 1.5);

        // Touching endpoints are not an overlap under half-open semantics
        assert!(!a.overlaps(&b));
        assert!(a.touches_or_overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn period_intersection() {
        let a = period(0.0, 1.0);
        let b = period(0.5, 2.0);
        let c = period(1.0, 2.0);

        let i = a.intersect(&b).unwrap();
        assert_eq!(i, period(0.5, 1.0));
        assert!(a.intersect(&c).is_none());
    }

    #[test]
    fn period_containment() {
        let outer = period(0.0, 2.0);
        let inner = period(0.5, 1.0);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.contains_instant(ModifiedJulianDate::new(0.0)));
        assert!(!outer.contains_instant(ModifiedJulianDate::new(2.0)));
    }

    #[test]
    fn fov_area() {
        let fov = FieldOfView::new(qtty::Arcminutes::new(90.0), qtty::Arcminutes::new(60.0));
        assert_eq!(fov.area_arcmin2(), 5400.0);
        assert!(FieldOfView::ZERO.is_zero());
    }

    #[test]
    fn target_capability_surface() {
        let mut m81 = CelestialObject::new("M81", qtty::Degrees::new(148.9), qtty::Degrees::new(69.07));
        m81.magnitude = Some(6.9);
        let mut m82 = CelestialObject::new("M82", qtty::Degrees::new(148.97), qtty::Degrees::new(69.68));
        m82.magnitude = Some(8.4);

        let single = Target::Single(m81.clone());
        assert_eq!(single.name(), "M81");
        assert_eq!(single.object_count(), 1);
        assert!(!single.is_group());

        let group = Target::Group(MosaicGroup {
            members: vec![m81, m82],
            overlap_periods: vec![],
            composite_magnitude: Some(6.6),
            combined_fov: FieldOfView::ZERO,
        });
        assert_eq!(group.name(), "Mosaic(M81+M82)");
        assert_eq!(group.object_count(), 2);
        assert_eq!(group.magnitude(), Some(6.6));
        assert!(group.is_group());
    }
}
