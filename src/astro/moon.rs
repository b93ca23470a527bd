//! Low-precision lunar position and illumination.
//!
//! Truncated mean-element series (largest ecliptic-longitude and latitude
//! corrections only), good to a fraction of a degree — the Moon-avoidance
//! exclusion radii are tens of degrees wide.

use super::{alt_az, coords, sun, HorizontalCoord};
use crate::time::ModifiedJulianDate;

/// Geocentric ecliptic longitude and latitude of the Moon.
pub(crate) fn moon_ecliptic(t: ModifiedJulianDate) -> (qtty::Degrees, qtty::Degrees) {
    let d = t.days_since_j2000();

    // Mean longitude, mean anomaly and argument of latitude
    let mean_longitude = qtty::Degrees::new(218.316 + 13.176396 * d).wrap_pos();
    let mean_anomaly = qtty::Degrees::new(134.963 + 13.064993 * d).wrap_pos();
    let argument_latitude = qtty::Degrees::new(93.272 + 13.229350 * d).wrap_pos();

    let lambda = (mean_longitude + qtty::Degrees::new(6.289 * mean_anomaly.sin())).wrap_pos();
    let beta = qtty::Degrees::new(5.128 * argument_latitude.sin());

    (lambda, beta)
}

/// Geocentric equatorial position (RA, Dec) of the Moon.
pub fn moon_equatorial(t: ModifiedJulianDate) -> (qtty::Degrees, qtty::Degrees) {
    let (lambda, beta) = moon_ecliptic(t);
    coords::ecliptic_to_equatorial(lambda, beta, sun::obliquity(t))
}

/// Horizontal position of the Moon for an observer.
pub fn moon_position(
    t: ModifiedJulianDate,
    latitude: qtty::Degrees,
    longitude: qtty::Degrees,
) -> HorizontalCoord {
    let (ra, dec) = moon_equatorial(t);
    alt_az(ra, dec, t, latitude, longitude)
}

/// Illuminated fraction of the lunar disc in [0, 1].
///
/// Derived from the Sun–Moon elongation: 0 at new moon, 1 at full moon.
pub fn moon_illumination(t: ModifiedJulianDate) -> f64 {
    let (lambda_moon, beta_moon) = moon_ecliptic(t);
    let lambda_sun = sun::sun_ecliptic_longitude(t);

    // Elongation on the sphere, not just in longitude
    let cos_elongation = beta_moon.cos() * (lambda_moon - lambda_sun).cos();
    (1.0 - cos_elongation.clamp(-1.0, 1.0)) / 2.0
}

/// Angular separation between a target and the Moon at time `t`.
pub fn moon_separation(
    ra: qtty::Degrees,
    dec: qtty::Degrees,
    t: ModifiedJulianDate,
) -> qtty::Degrees {
    let (moon_ra, moon_dec) = moon_equatorial(t);
    coords::angular_separation(ra, dec, moon_ra, moon_dec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illumination_stays_in_unit_interval() {
        for i in 0..120 {
            let t = ModifiedJulianDate::new(60000.0 + i as f64 * 0.37);
            let f = moon_illumination(t);
            assert!((0.0..=1.0).contains(&f), "illumination {f} out of range");
        }
    }

    #[test]
    fn illumination_matches_known_phases() {
        // 2026-02-17: new moon (annular solar eclipse day)
        let new_moon = moon_illumination(ModifiedJulianDate::new(61088.5));
        assert!(new_moon < 0.05, "new moon illumination {new_moon}");

        // 2026-03-03: full moon (total lunar eclipse day)
        let full_moon = moon_illumination(ModifiedJulianDate::new(61102.5));
        assert!(full_moon > 0.95, "full moon illumination {full_moon}");
    }

    #[test]
    fn moon_stays_near_ecliptic() {
        // Lunar latitude never exceeds the ~5.1° inclination in this series
        for i in 0..60 {
            let (_, beta) = moon_ecliptic(ModifiedJulianDate::new(60100.0 + i as f64));
            assert!(beta.value().abs() <= 5.2);
        }
    }

    #[test]
    fn separation_is_symmetric_in_time_queries() {
        // Pure function: identical inputs give identical outputs even when
        // probed backwards in time
        let ra = qtty::Degrees::new(150.0);
        let dec = qtty::Degrees::new(40.0);
        let t = ModifiedJulianDate::new(61100.25);

        let first = moon_separation(ra, dec, t);
        let _other = moon_separation(ra, dec, ModifiedJulianDate::new(61090.0));
        let second = moon_separation(ra, dec, t);
        assert_eq!(first, second);
    }
}
