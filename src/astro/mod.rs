//! Celestial position math: coordinate conversions, sidereal time and
//! low-precision Sun/Moon ephemerides.
//!
//! Everything here is a pure function of (time, location); there is no
//! shared mutable state and calls are safe at arbitrary, non-monotonic
//! timestamps — the schedule builder probes both forward and backward in
//! time. Accuracy is the usual low-precision-series tradeoff (arcminutes
//! for the Sun, a fraction of a degree for the Moon), which is ample for
//! visibility planning against altitude bounds of whole degrees.

pub mod coords;
pub mod moon;
pub mod sidereal;
pub mod sun;

use crate::time::ModifiedJulianDate;

/// Observer-relative position of an object on the sky.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalCoord {
    /// Angular height above the horizon.
    pub altitude: qtty::Degrees,
    /// Compass direction in [0°, 360°), measured from north through east.
    pub azimuth: qtty::Degrees,
}

/// Equatorial (RA/Dec) to horizontal (alt/az) conversion for an observer at
/// `latitude`/`longitude` (east-positive) at time `t`.
///
/// The hour angle comes from local sidereal time; the azimuth quadrant is
/// resolved with `atan2` and shifted so 0° is north.
pub fn alt_az(
    ra: qtty::Degrees,
    dec: qtty::Degrees,
    t: ModifiedJulianDate,
    latitude: qtty::Degrees,
    longitude: qtty::Degrees,
) -> HorizontalCoord {
    let lst = sidereal::local_sidereal_time(t, longitude);
    let hour_angle = (lst - ra).wrap_pos();

    let (sin_h, cos_h) = hour_angle.sin_cos();
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_dec, cos_dec) = dec.sin_cos();

    let sin_alt = sin_lat * sin_dec + cos_lat * cos_dec * cos_h;
    let altitude = qtty::Degrees::new(sin_alt.clamp(-1.0, 1.0).asin().to_degrees());

    // atan2 form measures azimuth from south, westward; rotate to north-based
    let az_south = sin_h.atan2(cos_h * sin_lat - dec.tan() * cos_lat).to_degrees();
    let azimuth = qtty::Degrees::new(az_south + 180.0).wrap_pos();

    HorizontalCoord { altitude, azimuth }
}
