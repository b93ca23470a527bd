use serde::*;

/// Modified Julian Date representation.
/// MJD 0 = 1858-11-17 00:00:00 UTC
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ModifiedJulianDate(qtty::Days);

/// MJD of the Unix epoch (1970-01-01 00:00:00 UTC).
pub const MJD_UNIX_EPOCH: f64 = 40587.0;

impl ModifiedJulianDate {
    /// Create a new MJD value.
    pub fn new<V: Into<qtty::Days>>(v: V) -> Self {
        Self(v.into())
    }

    /// Raw MJD value as f64.
    pub fn value(&self) -> f64 {
        self.0.value()
    }

    /// Convert to Unix timestamp (seconds since 1970-01-01 00:00:00 UTC).
    pub fn to_unix_timestamp(&self) -> f64 {
        (self.value() - MJD_UNIX_EPOCH) * 86400.0
    }

    /// Create from Unix timestamp (seconds since 1970-01-01 00:00:00 UTC).
    pub fn from_unix_timestamp(timestamp: f64) -> Self {
        Self::new(timestamp / 86400.0 + MJD_UNIX_EPOCH)
    }

    /// Convert to chrono DateTime<Utc>.
    pub fn to_datetime(&self) -> chrono::DateTime<chrono::Utc> {
        let secs = self.to_unix_timestamp();
        let secs_i64 = secs.floor() as i64;
        let nanos = ((secs - secs.floor()) * 1e9) as u32;
        chrono::DateTime::from_timestamp(secs_i64, nanos).unwrap_or(chrono::DateTime::UNIX_EPOCH)
    }

    /// Create from chrono DateTime<Utc>.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self::from_unix_timestamp(dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 / 1e9)
    }

    /// Convert to local civil time at a fixed UTC offset, for display of
    /// schedule times in the observer's zone.
    pub fn to_datetime_in(
        &self,
        offset: chrono::FixedOffset,
    ) -> chrono::DateTime<chrono::FixedOffset> {
        self.to_datetime().with_timezone(&offset)
    }

    /// Create from a datetime in any timezone.
    pub fn from_datetime_in<Tz: chrono::TimeZone>(dt: chrono::DateTime<Tz>) -> Self {
        Self::from_datetime(dt.with_timezone(&chrono::Utc))
    }

    /// Days elapsed since the J2000.0 epoch (MJD 51544.5), the time base of
    /// the low-precision solar and lunar ephemerides.
    pub fn days_since_j2000(&self) -> f64 {
        self.value() - 51544.5
    }
}

impl From<f64> for ModifiedJulianDate {
    fn from(v: f64) -> Self {
        ModifiedJulianDate::new(v)
    }
}

impl std::ops::Add<qtty::Days> for ModifiedJulianDate {
    type Output = ModifiedJulianDate;

    fn add(self, rhs: qtty::Days) -> ModifiedJulianDate {
        ModifiedJulianDate(self.0 + rhs)
    }
}

impl std::ops::Sub<qtty::Days> for ModifiedJulianDate {
    type Output = ModifiedJulianDate;

    fn sub(self, rhs: qtty::Days) -> ModifiedJulianDate {
        ModifiedJulianDate(self.0 - rhs)
    }
}

impl std::ops::Sub<ModifiedJulianDate> for ModifiedJulianDate {
    type Output = qtty::Days;

    fn sub(self, rhs: ModifiedJulianDate) -> qtty::Days {
        self.0 - rhs.0
    }
}
