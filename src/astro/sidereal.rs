//! Greenwich and local sidereal time.

use crate::time::ModifiedJulianDate;

/// Greenwich mean sidereal time as an angle in [0°, 360°).
///
/// Standard polynomial in days since J2000.0 (IAU 1982 coefficients),
/// accurate to well under a second of time over the planning horizon.
pub fn greenwich_sidereal_time(t: ModifiedJulianDate) -> qtty::Degrees {
    let d = t.days_since_j2000();
    let centuries = d / 36525.0;
    let gmst = 280.46061837 + 360.98564736629 * d + 0.000387933 * centuries * centuries
        - centuries * centuries * centuries / 38710000.0;
    qtty::Degrees::new(gmst).wrap_pos()
}

/// Local sidereal time: GMST shifted by the observer's east longitude.
pub fn local_sidereal_time(t: ModifiedJulianDate, longitude: qtty::Degrees) -> qtty::Degrees {
    (greenwich_sidereal_time(t) + longitude).wrap_pos()
}
