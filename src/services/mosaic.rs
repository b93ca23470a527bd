//! Mosaic group combination.
//!
//! External geometric-overlap detection hands the planner clusters of
//! objects whose fields of view overlap enough to image as one mosaic. This
//! module folds such a cluster into a single [`MosaicGroup`]: the
//! *intersection* of all members' visibility (every panel must be
//! observable at once), a brightness-weighted composite magnitude, and a
//! bounding combined field of view. The group then flows through scoring
//! and scheduling exactly like a single object.

use super::visibility::VisibilityReport;
use crate::core::domain::{CelestialObject, FieldOfView, MosaicGroup, Period};

/// Intersect two chronologically ordered, disjoint period lists.
pub fn intersect_periods(a: &[Period], b: &[Period]) -> Vec<Period> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if let Some(overlap) = a[i].intersect(&b[j]) {
            result.push(overlap);
        }
        // Advance whichever interval ends first
        if a[i].stop <= b[j].stop {
            i += 1;
        } else {
            j += 1;
        }
    }
    result
}

/// Intersection of every member's visibility periods.
///
/// The result is a subset of each individual list, so a group's overlap
/// windows are never longer than the shortest member's own visibility.
pub fn intersect_all(lists: &[&[Period]]) -> Vec<Period> {
    let Some((first, rest)) = lists.split_first() else {
        return Vec::new();
    };
    rest.iter().fold(first.to_vec(), |acc, list| {
        intersect_periods(&acc, list)
    })
}

/// Brightness-weighted composite magnitude: fluxes add, magnitudes do not.
///
/// Returns `None` when any member lacks a magnitude, since the combined
/// brightness would be meaningless.
pub fn composite_magnitude(members: &[CelestialObject]) -> Option<f64> {
    let mut flux = 0.0;
    for member in members {
        match member.magnitude {
            Some(magnitude) => flux += 10f64.powf(-0.4 * magnitude),
            None => {
                log::debug!(
                    "no composite magnitude for group: '{}' has no magnitude",
                    member.name
                );
                return None;
            }
        }
    }
    (flux > 0.0).then(|| -2.5 * flux.log10())
}

/// Bounding field of view covering every member's own field.
///
/// Member centers are projected onto a local plane (RA compressed by
/// cos dec), each extended by its half-extents, and the enclosing box is
/// returned in arcminutes. RA wraparound is not handled; clustered mosaic
/// members are degrees apart at most.
pub fn combined_fov(members: &[CelestialObject]) -> FieldOfView {
    if members.is_empty() {
        return FieldOfView::ZERO;
    }

    let mean_dec =
        members.iter().map(|m| m.dec.value()).sum::<f64>() / members.len() as f64;
    let cos_dec = mean_dec.to_radians().cos().max(1e-6);

    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for member in members {
        let x = member.ra.value() * 60.0 * cos_dec;
        let y = member.dec.value() * 60.0;
        let half_w = member.fov.width.value() / 2.0;
        let half_h = member.fov.height.value() / 2.0;

        min_x = min_x.min(x - half_w);
        max_x = max_x.max(x + half_w);
        min_y = min_y.min(y - half_h);
        max_y = max_y.max(y + half_h);
    }

    FieldOfView::new(
        qtty::Arcminutes::new(max_x - min_x),
        qtty::Arcminutes::new(max_y - min_y),
    )
}

/// Build a [`MosaicGroup`] and its visibility report from a cluster.
///
/// Returns `None` for clusters of fewer than two members; a singleton is
/// not a mosaic.
pub fn combine_group(
    members: &[CelestialObject],
    reports: &[&VisibilityReport],
) -> Option<(MosaicGroup, VisibilityReport)> {
    if members.len() < 2 || members.len() != reports.len() {
        return None;
    }

    let period_lists: Vec<&[Period]> = reports.iter().map(|r| r.periods.as_slice()).collect();
    let overlap_periods = intersect_all(&period_lists);

    let group = MosaicGroup {
        members: members.to_vec(),
        overlap_periods: overlap_periods.clone(),
        composite_magnitude: composite_magnitude(members),
        combined_fov: combined_fov(members),
    };

    // The group is observable only when every member is; the conservative
    // peak altitude is the lowest member's
    let max_altitude = reports
        .iter()
        .map(|r| r.max_altitude)
        .fold(qtty::Degrees::new(f64::INFINITY), |acc, alt| acc.min(alt));
    let report = VisibilityReport {
        periods: overlap_periods,
        near_moon: reports.iter().any(|r| r.near_moon),
        max_altitude,
    };

    Some((group, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ModifiedJulianDate;

    fn period(start: f64, stop: f64) -> Period {
        Period::new(ModifiedJulianDate::new(start), ModifiedJulianDate::new(stop))
    }

    fn report(periods: Vec<Period>) -> VisibilityReport {
        VisibilityReport {
            periods,
            near_moon: false,
            max_altitude: qtty::Degrees::new(50.0),
        }
    }

    fn member(name: &str, ra: f64, dec: f64, magnitude: Option<f64>) -> CelestialObject {
        let mut obj =
            CelestialObject::new(name, qtty::Degrees::new(ra), qtty::Degrees::new(dec));
        obj.magnitude = magnitude;
        obj.fov = FieldOfView::new(qtty::Arcminutes::new(30.0), qtty::Arcminutes::new(20.0));
        obj
    }

    #[test]
    fn pairwise_intersection() {
        let a = vec![period(0.0, 0.4), period(0.5, 1.0)];
        let b = vec![period(0.3, 0.7)];

        let overlap = intersect_periods(&a, &b);
        assert_eq!(overlap, vec![period(0.3, 0.4), period(0.5, 0.7)]);
    }

    #[test]
    fn intersection_of_disjoint_lists_is_empty() {
        let a = vec![period(0.0, 0.4)];
        let b = vec![period(0.5, 1.0)];
        assert!(intersect_periods(&a, &b).is_empty());
    }

    #[test]
    fn overlap_is_subset_of_every_member() {
        let lists: Vec<Vec<Period>> = vec![
            vec![period(0.0, 0.6), period(0.7, 1.0)],
            vec![period(0.2, 0.8)],
            vec![period(0.1, 0.9)],
        ];
        let refs: Vec<&[Period]> = lists.iter().map(|l| l.as_slice()).collect();
        let overlap = intersect_all(&refs);

        assert_eq!(overlap, vec![period(0.2, 0.6), period(0.7, 0.8)]);
        for piece in &overlap {
            for list in &lists {
                assert!(
                    list.iter().any(|p| p.contains(piece)),
                    "overlap piece must lie within each member's visibility"
                );
            }
        }
    }

    #[test]
    fn composite_magnitude_adds_flux() {
        // Two equal magnitudes combine to ~0.753 mag brighter
        let members = vec![
            member("A", 10.0, 40.0, Some(8.0)),
            member("B", 10.2, 40.1, Some(8.0)),
        ];
        let combined = composite_magnitude(&members).unwrap();
        assert!((combined - (8.0 - 2.5 * 2f64.log10())).abs() < 1e-9);
        assert!(combined < 8.0);

        // A missing magnitude poisons the composite
        let partial = vec![
            member("A", 10.0, 40.0, Some(8.0)),
            member("B", 10.2, 40.1, None),
        ];
        assert!(composite_magnitude(&partial).is_none());
    }

    #[test]
    fn combined_fov_encloses_members() {
        let members = vec![
            member("A", 10.0, 40.0, Some(8.0)),
            member("B", 10.5, 40.2, Some(9.0)),
        ];
        let combined = combined_fov(&members);
        for m in &members {
            assert!(combined.width >= m.fov.width);
            assert!(combined.height >= m.fov.height);
        }
        // Separated centers stretch the box beyond a single member's field
        assert!(combined.area_arcmin2() > members[0].fov.area_arcmin2());
    }

    #[test]
    fn combine_group_requires_two_members() {
        let solo = vec![member("A", 10.0, 40.0, Some(8.0))];
        let solo_report = report(vec![period(0.0, 0.5)]);
        assert!(combine_group(&solo, &[&solo_report]).is_none());
    }

    #[test]
    fn combine_group_builds_conservative_report() {
        let members = vec![
            member("A", 10.0, 40.0, Some(8.0)),
            member("B", 10.2, 40.1, Some(9.0)),
        ];
        let report_a = report(vec![period(0.0, 0.6)]);
        let mut report_b = report(vec![period(0.2, 0.8)]);
        report_b.near_moon = true;
        report_b.max_altitude = qtty::Degrees::new(35.0);

        let (group, combined) = combine_group(&members, &[&report_a, &report_b]).unwrap();

        assert_eq!(group.object_count(), 2);
        assert_eq!(combined.periods, vec![period(0.2, 0.6)]);
        assert!(combined.near_moon);
        assert_eq!(combined.max_altitude.value(), 35.0);

        // Subset property: never longer than the shortest member
        let shortest = report_a
            .total_hours()
            .value()
            .min(report_b.total_hours().value());
        assert!(combined.total_hours().value() <= shortest);
    }
}
