//! Stateless coordinate and catalog-string conversions.
//!
//! Parsing here never fails hard: a descriptor the parser cannot make sense
//! of degrades to a zero/empty default, which downstream code treats as
//! "unknown" rather than as an error.

use crate::core::domain::FieldOfView;

/// Sexagesimal degrees/minutes/seconds to decimal degrees.
///
/// Sign-aware: a negative value in any component negates the whole
/// magnitude, so `(-12, 30, 0)` and `(12, -30, 0)` both mean −12.5°.
pub fn dms_to_degrees(deg: f64, min: f64, sec: f64) -> qtty::Degrees {
    let sign = if deg < 0.0 || min < 0.0 || sec < 0.0 { -1.0 } else { 1.0 };
    qtty::Degrees::new(sign * (deg.abs() + min.abs() / 60.0 + sec.abs() / 3600.0))
}

/// Hours/minutes/seconds of right ascension to decimal hours, with the same
/// sign handling as [`dms_to_degrees`].
pub fn hms_to_hours(hours: f64, min: f64, sec: f64) -> f64 {
    let sign = if hours < 0.0 || min < 0.0 || sec < 0.0 { -1.0 } else { 1.0 };
    sign * (hours.abs() + min.abs() / 60.0 + sec.abs() / 3600.0)
}

/// Decimal hours of right ascension to decimal degrees (1h = 15°).
pub fn hours_to_degrees(hours: f64) -> qtty::Degrees {
    qtty::Degrees::new(hours * 15.0)
}

/// Decimal degrees to decimal hours of right ascension.
pub fn degrees_to_hours(deg: qtty::Degrees) -> f64 {
    deg.value() / 15.0
}

/// Parse a field-of-view descriptor of the form `"<num>[°|'] x <num>[°|']"`.
///
/// Degrees are converted to arcminutes; a bare number is taken as
/// arcminutes. Anything unparsable yields [`FieldOfView::ZERO`] ("unknown"),
/// never an error.
///
/// ```
/// use nightplan::astro::coords::parse_fov;
///
/// assert_eq!(parse_fov("1.5° x 1°").area_arcmin2(), 5400.0);
/// assert_eq!(parse_fov("90' x 60'").area_arcmin2(), 5400.0);
/// assert_eq!(parse_fov("garbage").area_arcmin2(), 0.0);
/// ```
pub fn parse_fov(descriptor: &str) -> FieldOfView {
    let mut parts = descriptor.split(['x', 'X']);
    let (Some(first), Some(second), None) = (parts.next(), parts.next(), parts.next()) else {
        return FieldOfView::ZERO;
    };

    match (parse_extent_arcmin(first), parse_extent_arcmin(second)) {
        (Some(width), Some(height)) => {
            FieldOfView::new(qtty::Arcminutes::new(width), qtty::Arcminutes::new(height))
        }
        _ => FieldOfView::ZERO,
    }
}

fn parse_extent_arcmin(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let (number, scale) = if let Some(stripped) = trimmed.strip_suffix('°') {
        (stripped, 60.0)
    } else if let Some(stripped) = trimmed.strip_suffix('\'') {
        (stripped, 1.0)
    } else {
        (trimmed, 1.0)
    };

    let value: f64 = number.trim().parse().ok()?;
    (value >= 0.0).then_some(value * scale)
}

/// Great-circle separation between two equatorial positions.
pub fn angular_separation(
    ra1: qtty::Degrees,
    dec1: qtty::Degrees,
    ra2: qtty::Degrees,
    dec2: qtty::Degrees,
) -> qtty::Degrees {
    let cos_sep =
        dec1.sin() * dec2.sin() + dec1.cos() * dec2.cos() * (ra1 - ra2).cos();
    qtty::Degrees::new(cos_sep.clamp(-1.0, 1.0).acos().to_degrees())
}

/// Ecliptic longitude/latitude to equatorial RA/Dec for obliquity `eps`.
pub(crate) fn ecliptic_to_equatorial(
    lambda: qtty::Degrees,
    beta: qtty::Degrees,
    eps: qtty::Degrees,
) -> (qtty::Degrees, qtty::Degrees) {
    let (sin_lam, cos_lam) = lambda.sin_cos();
    let (sin_beta, cos_beta) = beta.sin_cos();
    let (sin_eps, cos_eps) = eps.sin_cos();

    let sin_dec = sin_beta * cos_eps + cos_beta * sin_eps * sin_lam;
    let dec = qtty::Degrees::new(sin_dec.clamp(-1.0, 1.0).asin().to_degrees());

    let y = sin_lam * cos_eps - beta.tan() * sin_eps;
    let ra = qtty::Degrees::new(y.atan2(cos_lam).to_degrees()).wrap_pos();

    (ra, dec)
}
