//! Low-precision solar position.
//!
//! Mean-element formulas good to a couple of arcminutes, which is far below
//! the whole-degree twilight thresholds they feed.

use super::{alt_az, coords, HorizontalCoord};
use crate::time::ModifiedJulianDate;

/// Mean obliquity of the ecliptic.
pub(crate) fn obliquity(t: ModifiedJulianDate) -> qtty::Degrees {
    qtty::Degrees::new(23.439 - 0.0000004 * t.days_since_j2000())
}

/// Apparent ecliptic longitude of the Sun.
pub(crate) fn sun_ecliptic_longitude(t: ModifiedJulianDate) -> qtty::Degrees {
    let d = t.days_since_j2000();

    // Mean longitude and mean anomaly
    let mean_longitude = qtty::Degrees::new(280.460 + 0.9856474 * d).wrap_pos();
    let mean_anomaly = qtty::Degrees::new(357.528 + 0.9856003 * d).wrap_pos();

    // Equation of center, two largest terms
    let center = 1.915 * mean_anomaly.sin() + 0.020 * (mean_anomaly * 2.0).sin();
    (mean_longitude + qtty::Degrees::new(center)).wrap_pos()
}

/// Geocentric equatorial position (RA, Dec) of the Sun.
pub fn sun_equatorial(t: ModifiedJulianDate) -> (qtty::Degrees, qtty::Degrees) {
    let lambda = sun_ecliptic_longitude(t);
    coords::ecliptic_to_equatorial(lambda, qtty::Degrees::new(0.0), obliquity(t))
}

/// Horizontal position of the Sun for an observer.
pub fn sun_position(
    t: ModifiedJulianDate,
    latitude: qtty::Degrees,
    longitude: qtty::Degrees,
) -> HorizontalCoord {
    let (ra, dec) = sun_equatorial(t);
    alt_az(ra, dec, t, latitude, longitude)
}

/// Altitude of the Sun, the quantity twilight predicates test against.
pub fn sun_altitude(
    t: ModifiedJulianDate,
    latitude: qtty::Degrees,
    longitude: qtty::Degrees,
) -> qtty::Degrees {
    sun_position(t, latitude, longitude).altitude
}
