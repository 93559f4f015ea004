//! Reusable query-parameter value types.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A query value that accepts a single string, a number, or a list of
/// either, and always serializes as one comma-joined wire string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommaSeparated(String);

impl CommaSeparated {
    /// The joined wire representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the individual items.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.0.split(',').map(str::trim).filter(|s| !s.is_empty())
    }
}

impl From<&str> for CommaSeparated {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for CommaSeparated {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Item {
            Text(String),
            Number(i64),
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            One(Item),
            Many(Vec<Item>),
        }

        fn render(item: Item) -> String {
            match item {
                Item::Text(text) => text,
                Item::Number(number) => number.to_string(),
            }
        }

        let joined = match Raw::deserialize(deserializer)? {
            Raw::One(item) => render(item),
            Raw::Many(items) => items
                .into_iter()
                .map(render)
                .collect::<Vec<_>>()
                .join(","),
        };
        if joined.trim().is_empty() {
            return Err(D::Error::custom("expected at least one value"));
        }
        Ok(Self(joined))
    }
}

impl Serialize for CommaSeparated {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// An "updated since" bound that accepts a Unix epoch, a bare date, or a
/// datetime, and always serializes as epoch seconds (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UpdatedSince {
    /// Unix epoch seconds
    Epoch(i64),

    /// Full instant, UTC
    Instant(DateTime<Utc>),

    /// Bare date, interpreted as midnight UTC
    Day(NaiveDate),
}

impl UpdatedSince {
    /// Normalize to Unix epoch seconds.
    pub fn as_epoch(&self) -> i64 {
        match self {
            Self::Epoch(secs) => *secs,
            Self::Instant(instant) => instant.timestamp(),
            Self::Day(day) => day.and_time(NaiveTime::MIN).and_utc().timestamp(),
        }
    }
}

impl Serialize for UpdatedSince {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.as_epoch())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_comma_separated_from_string() {
        let value: CommaSeparated = serde_json::from_value(json!("AAPL,MSFT")).unwrap();
        assert_eq!(value.as_str(), "AAPL,MSFT");
        assert_eq!(value.items().collect::<Vec<_>>(), vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_comma_separated_from_list() {
        let value: CommaSeparated = serde_json::from_value(json!(["AAPL", "MSFT"])).unwrap();
        assert_eq!(value.as_str(), "AAPL,MSFT");
    }

    #[test]
    fn test_comma_separated_from_numbers() {
        let value: CommaSeparated = serde_json::from_value(json!([123, 456])).unwrap();
        assert_eq!(value.as_str(), "123,456");
    }

    #[test]
    fn test_comma_separated_rejects_empty() {
        assert!(serde_json::from_value::<CommaSeparated>(json!("")).is_err());
        assert!(serde_json::from_value::<CommaSeparated>(json!([])).is_err());
    }

    #[test]
    fn test_updated_since_epoch() {
        let value: UpdatedSince = serde_json::from_value(json!(1_700_000_000)).unwrap();
        assert_eq!(value.as_epoch(), 1_700_000_000);
    }

    #[test]
    fn test_updated_since_date_is_midnight_utc() {
        let value: UpdatedSince = serde_json::from_value(json!("2024-01-15")).unwrap();
        let expected = Utc
            .with_ymd_and_hms(2024, 1, 15, 0, 0, 0)
            .unwrap()
            .timestamp();
        assert_eq!(value.as_epoch(), expected);
    }

    #[test]
    fn test_updated_since_datetime() {
        let value: UpdatedSince =
            serde_json::from_value(json!("2024-01-15T10:30:00Z")).unwrap();
        let expected = Utc
            .with_ymd_and_hms(2024, 1, 15, 10, 30, 0)
            .unwrap()
            .timestamp();
        assert_eq!(value.as_epoch(), expected);
    }

    #[test]
    fn test_updated_since_serializes_as_epoch() {
        let value: UpdatedSince = serde_json::from_value(json!("2024-01-15")).unwrap();
        let json = serde_json::to_value(value).unwrap();
        assert!(json.is_i64());
    }
}
