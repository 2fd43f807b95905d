//! Wire date types for REST payloads.
//!
//! Inbound timestamps deserialize through [`curio_core::wiredate::parse`],
//! so query parameters and request bodies accept the same two encodings as
//! the rest of the REST surface (full timestamp, or date-only extended to
//! midnight UTC). Outbound timestamps are rendered by handlers with
//! [`curio_core::wiredate::format`] in the configured wire zone.

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer};

use curio_core::wiredate;

/// A `DateTime<Utc>` that deserializes from wire encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireDateTime(pub DateTime<Utc>);

impl WireDateTime {
    /// Returns the inner DateTime<Utc>.
    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }
}

impl<'de> Deserialize<'de> for WireDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        wiredate::parse(&s)
            .map(WireDateTime)
            .map_err(|e| de::Error::custom(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Query {
        date: Option<WireDateTime>,
    }

    #[test]
    fn test_deserializes_full_timestamp() {
        let q: Query = serde_json::from_str(r#"{"date":"2024-03-01T10:30:00Z"}"#).unwrap();
        assert_eq!(
            q.date.unwrap().into_inner(),
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_deserializes_date_only_as_midnight_utc() {
        let q: Query = serde_json::from_str(r#"{"date":"2024-03-01"}"#).unwrap();
        assert_eq!(
            q.date.unwrap().into_inner(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_rejects_garbage_with_date_field_message() {
        let result = serde_json::from_str::<Query>(r#"{"date":"not-a-date"}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("date"));
        assert!(err.contains("not-a-date"));
    }

    #[test]
    fn test_absent_is_none() {
        let q: Query = serde_json::from_str("{}").unwrap();
        assert!(q.date.is_none());
    }
}
