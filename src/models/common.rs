//! Common types and decoding helpers shared across all models.

use std::fmt;

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{DeezerError, Result};

/// Release date structure.
///
/// Not all fields may be available; year is always present when known,
/// but month and day may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseDate {
    /// Year of release.
    pub year: i32,

    /// Month of release (1-12), if known.
    pub month: Option<u32>,

    /// Day of release (1-31), if known.
    pub day: Option<u32>,
}

impl ReleaseDate {
    /// Parse a date string in "YYYY-MM-DD" format.
    ///
    /// Returns `None` for an empty string or Deezer's `0000-00-00` placeholder.
    /// A `00` month or day means unknown. Anything else that is not a valid
    /// year, month in 1-12 or day in 1-31 is dropped with a `trace!`.
    pub fn parse(date_str: &str) -> Option<Self> {
        let trimmed = date_str.trim();
        if trimmed.is_empty() {
            return None;
        }

        match Self::parse_parts(trimmed) {
            Some(date) if date.year == 0 => None,
            Some(date) => Some(date),
            None => {
                trace!("dropping release date {:?}", trimmed);
                None
            }
        }
    }

    fn parse_parts(date_str: &str) -> Option<Self> {
        let mut parts = date_str.split('-');

        let year: i32 = parts.next()?.parse().ok()?;
        let month = date_part(parts.next(), 12)?;
        let day = date_part(parts.next(), 31)?;
        if parts.next().is_some() {
            return None;
        }

        Some(Self { year, month, day })
    }
}

// `Some(None)` when absent or `00`, `None` when not a number in `1..=max`.
fn date_part(part: Option<&str>, max: u32) -> Option<Option<u32>> {
    let Some(part) = part else {
        return Some(None);
    };
    match part.parse::<u32>().ok()? {
        0 => Some(None),
        n if n <= max => Some(Some(n)),
        _ => None,
    }
}

impl fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.month, self.day) {
            (Some(m), Some(d)) => write!(f, "{:04}-{:02}-{:02}", self.year, m, d),
            (Some(m), None) => write!(f, "{:04}-{:02}", self.year, m),
            _ => write!(f, "{:04}", self.year),
        }
    }
}

/// A nested `{ "id": .., "title": .. }` object pointing at a related entity.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Reference {
    #[serde(default, deserialize_with = "optional_id")]
    pub id: Option<u64>,

    #[serde(default)]
    pub title: Option<String>,
}

/// Decode `json` into the raw field set of `entity`.
///
/// Missing or mistyped fields become [`DeezerError::MalformedResponse`].
pub(crate) fn decode<T: DeserializeOwned>(entity: &'static str, json: &Value) -> Result<T> {
    if !json.is_object() {
        return Err(DeezerError::malformed(entity, "expected a JSON object"));
    }
    T::deserialize(json).map_err(|e| DeezerError::malformed(entity, e))
}

/// Log keys the decoder did not consume.
pub(crate) fn log_ignored(entity: &'static str, extra: &Map<String, Value>) {
    if !extra.is_empty() {
        let keys: Vec<&str> = extra.keys().map(String::as_str).collect();
        trace!("{}: ignoring fields {:?}", entity, keys);
    }
}

/// Borrow the `data` array of a collection response.
pub(crate) fn data_rows<'a>(entity: &'static str, response: &'a Value) -> Result<&'a [Value]> {
    response
        .get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| DeezerError::malformed(entity, "missing `data` array"))
}

// Deezer ids are numbers, but some payloads carry them as strings.
fn id_from_value<E: de::Error>(value: Value) -> std::result::Result<u64, E> {
    match &value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| E::custom(format!("invalid id {}", n))),
        Value::String(s) => s
            .parse()
            .map_err(|_| E::custom(format!("invalid id {:?}", s))),
        other => Err(E::custom(format!("invalid id {}", other))),
    }
}

pub(crate) fn id<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    id_from_value(Value::deserialize(deserializer)?)
}

pub(crate) fn optional_id<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer)?
        .map(id_from_value)
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct WithId {
        #[serde(deserialize_with = "id")]
        id: u64,
        #[serde(default)]
        nested: Option<Reference>,
    }

    #[test]
    fn test_parse_release_date_full() {
        let date = ReleaseDate::parse("2023-05-15").unwrap();
        assert_eq!(date.year, 2023);
        assert_eq!(date.month, Some(5));
        assert_eq!(date.day, Some(15));
        assert_eq!(date.to_string(), "2023-05-15");
    }

    #[test]
    fn test_parse_release_date_year_only() {
        let date = ReleaseDate::parse("2020").unwrap();
        assert_eq!(date.year, 2020);
        assert_eq!(date.month, None);
        assert_eq!(date.to_string(), "2020");
    }

    #[test]
    fn test_parse_release_date_placeholders() {
        assert_eq!(ReleaseDate::parse(""), None);
        assert_eq!(ReleaseDate::parse("0000-00-00"), None);

        let unknown_day = ReleaseDate::parse("2005-07-00").unwrap();
        assert_eq!(unknown_day.month, Some(7));
        assert_eq!(unknown_day.day, None);
    }

    #[test]
    fn test_parse_release_date_rejects_invalid() {
        assert_eq!(ReleaseDate::parse("abc"), None);
        assert_eq!(ReleaseDate::parse("2005-13-45"), None);
        assert_eq!(ReleaseDate::parse("2005-12-32"), None);
        assert_eq!(ReleaseDate::parse("2005-xx-01"), None);
        assert_eq!(ReleaseDate::parse("2005-01-01-01"), None);
    }

    #[test]
    fn test_id_accepts_number_and_string() {
        let a: WithId = decode("thing", &json!({"id": 12})).unwrap();
        let b: WithId = decode("thing", &json!({"id": "34"})).unwrap();
        assert_eq!(a.id, 12);
        assert_eq!(b.id, 34);
        assert!(a.nested.is_none());
    }

    #[test]
    fn test_reference_optional_fields() {
        let v: WithId = decode("thing", &json!({"id": 1, "nested": {"name": "x"}})).unwrap();
        let nested = v.nested.unwrap();
        assert_eq!(nested.id, None);
        assert_eq!(nested.title, None);
    }

    #[test]
    fn test_decode_reports_entity() {
        let err = decode::<WithId>("thing", &json!({"id": "abc"})).unwrap_err();
        match err {
            DeezerError::MalformedResponse { entity, reason } => {
                assert_eq!(entity, "thing");
                assert!(reason.contains("invalid id"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert!(decode::<WithId>("thing", &json!([1, 2])).is_err());
    }

    #[test]
    fn test_data_rows_missing() {
        assert!(data_rows("track", &json!({"total": 0})).is_err());
        assert_eq!(data_rows("track", &json!({"data": []})).unwrap().len(), 0);
    }
}
