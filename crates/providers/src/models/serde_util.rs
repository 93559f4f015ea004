//! Lenient serde helpers shared by the provider record schemas.
//!
//! Vendors mix numbers, numeric strings, empty strings, and nulls freely;
//! these helpers normalize all of them before typed validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

use super::timestamp::Timestamp;

/// `Option<Decimal>` from a number, a numeric string, or null.
/// Empty strings deserialize to `None`.
pub mod decimal_opt {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                parse_decimal(trimmed)
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("invalid decimal: '{trimmed}'")))
            }
            Some(Value::Number(n)) => parse_decimal(&n.to_string())
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid decimal: {n}"))),
            Some(other) => Err(D::Error::custom(format!(
                "expected number or string, got {other}"
            ))),
        }
    }
}

/// `Option<u8>` from a number, a numeric string, or null.
pub mod u8_opt {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|v| u8::try_from(v).ok())
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("value out of range: {n}"))),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => s
                .trim()
                .parse::<u8>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid integer: '{s}'"))),
            Some(other) => Err(D::Error::custom(format!(
                "expected integer or string, got {other}"
            ))),
        }
    }
}

/// `Option<Timestamp>` from Unix epoch seconds (number or numeric string).
pub mod unix_timestamp_opt {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        let secs = match value {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Number(n)) => n
                .as_i64()
                .ok_or_else(|| D::Error::custom(format!("invalid epoch: {n}")))?,
            Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
            Some(Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| D::Error::custom(format!("invalid epoch: '{s}'")))?,
            Some(other) => {
                return Err(D::Error::custom(format!(
                    "expected epoch seconds, got {other}"
                )))
            }
        };
        Timestamp::from_unix(secs)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("epoch out of range: {secs}")))
    }
}

/// `Option<String>` where an empty or whitespace-only string becomes `None`.
pub mod none_if_empty {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.filter(|s| !s.trim().is_empty()))
    }
}

/// Parse a decimal, falling back to scientific notation for values that
/// arrive as large floats.
pub(crate) fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Parse a `YYYY-MM-DD` date, returning `None` for anything else.
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Replace empty-string values in a raw row with null, in place.
/// Typed validation then sees `None` instead of `""`.
pub(crate) fn null_empty_strings(row: &mut Value) {
    if let Value::Object(map) = row {
        for value in map.values_mut() {
            if matches!(value, Value::String(s) if s.is_empty()) {
                *value = Value::Null;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "decimal_opt::deserialize")]
        price: Option<Decimal>,
        #[serde(default, deserialize_with = "u8_opt::deserialize")]
        importance: Option<u8>,
        #[serde(default, deserialize_with = "unix_timestamp_opt::deserialize")]
        updated: Option<Timestamp>,
        #[serde(default, deserialize_with = "none_if_empty::deserialize")]
        note: Option<String>,
    }

    #[test]
    fn test_decimal_from_string_and_number() {
        let row: Row = serde_json::from_value(json!({"price": "250.50"})).unwrap();
        assert_eq!(row.price, Some(dec!(250.50)));
        let row: Row = serde_json::from_value(json!({"price": 250.5})).unwrap();
        assert_eq!(row.price, Some(dec!(250.5)));
    }

    #[test]
    fn test_decimal_empty_string_is_none() {
        let row: Row = serde_json::from_value(json!({"price": ""})).unwrap();
        assert_eq!(row.price, None);
    }

    #[test]
    fn test_decimal_invalid_string_fails() {
        assert!(serde_json::from_value::<Row>(json!({"price": "n/a"})).is_err());
    }

    #[test]
    fn test_u8_from_string() {
        let row: Row = serde_json::from_value(json!({"importance": "5"})).unwrap();
        assert_eq!(row.importance, Some(5));
    }

    #[test]
    fn test_epoch_from_number() {
        let row: Row = serde_json::from_value(json!({"updated": 1_705_276_800})).unwrap();
        // 2024-01-15T00:00:00Z collapses to a bare date
        assert!(matches!(row.updated, Some(Timestamp::Date(_))));
    }

    #[test]
    fn test_none_if_empty() {
        let row: Row = serde_json::from_value(json!({"note": "  "})).unwrap();
        assert_eq!(row.note, None);
        let row: Row = serde_json::from_value(json!({"note": "kept"})).unwrap();
        assert_eq!(row.note, Some("kept".to_string()));
    }

    #[test]
    fn test_parse_decimal_scientific() {
        assert_eq!(parse_decimal("1.5e3"), Some(dec!(1500)));
    }

    #[test]
    fn test_null_empty_strings_in_place() {
        let mut row = json!({"a": "", "b": "x", "c": 1});
        null_empty_strings(&mut row);
        assert_eq!(row, json!({"a": null, "b": "x", "c": 1}));
    }
}
