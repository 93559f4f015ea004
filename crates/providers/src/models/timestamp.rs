use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A point in time that is either a bare date or a full datetime.
///
/// Vendors report "last updated" values as Unix timestamps even when the
/// underlying record only carries day precision. A midnight-aligned instant
/// collapses to a bare date so day-precision values never surface as
/// datetimes with a zero time component.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Day precision ("2024-01-15")
    Date(NaiveDate),

    /// Full instant, UTC
    DateTime(DateTime<Utc>),
}

impl Timestamp {
    /// Build from Unix epoch seconds (UTC).
    ///
    /// Returns `None` for out-of-range values.
    pub fn from_unix(secs: i64) -> Option<Self> {
        let instant = DateTime::from_timestamp(secs, 0)?;
        if instant.time() == NaiveTime::MIN {
            Some(Self::Date(instant.date_naive()))
        } else {
            Some(Self::DateTime(instant))
        }
    }

    /// The calendar date of this timestamp.
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Date(date) => *date,
            Self::DateTime(instant) => instant.date_naive(),
        }
    }
}
