//! ISO-8601 date codec for the REST boundary.
//!
//! A pure function pair — no formatter object, no clone contract. Parsing
//! always normalizes to UTC; formatting renders in the *configured* wire
//! zone. The legacy behavior of echoing timestamps in the server's local
//! zone is preserved as explicit configuration ([`WireZone::Fixed`]) rather
//! than ambient state; unconfigured servers emit UTC.
//!
//! Accepted input encodings:
//! - full timestamp: `2024-03-01T10:30:00Z`, `2024-03-01T10:30:00+10:00`
//! - timestamp without zone (assumed UTC): `2024-03-01T10:30:00`
//! - date only: `2024-03-01` — extended to `T00:00:00Z` before parsing

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, Utc};

use crate::error::{Error, Result};
use crate::i18n;

/// The time zone wire timestamps are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireZone {
    Utc,
    Fixed(FixedOffset),
}

impl Default for WireZone {
    fn default() -> Self {
        WireZone::Utc
    }
}

impl WireZone {
    /// Parse an operator-supplied offset string.
    ///
    /// Accepts `Z`, `UTC`, the empty string, or `±HH:MM`. Anything else is
    /// a configuration error.
    pub fn from_offset_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
            return Ok(WireZone::Utc);
        }
        let (sign, rest) = match s.split_at_checked(1) {
            Some(("+", rest)) => (1i32, rest),
            Some(("-", rest)) => (-1i32, rest),
            _ => return Err(Error::Config(format!("invalid time zone offset: {}", s))),
        };
        let (hh, mm) = rest
            .split_once(':')
            .ok_or_else(|| Error::Config(format!("invalid time zone offset: {}", s)))?;
        let hours: i32 = hh
            .parse()
            .map_err(|_| Error::Config(format!("invalid time zone offset: {}", s)))?;
        let minutes: i32 = mm
            .parse()
            .map_err(|_| Error::Config(format!("invalid time zone offset: {}", s)))?;
        if hours > 14 || minutes > 59 {
            return Err(Error::Config(format!("invalid time zone offset: {}", s)));
        }
        let secs = sign * (hours * 3600 + minutes * 60);
        FixedOffset::east_opt(secs)
            .map(WireZone::Fixed)
            .ok_or_else(|| Error::Config(format!("invalid time zone offset: {}", s)))
    }
}

/// Format a timestamp for the wire in the configured zone.
pub fn format(dt: DateTime<Utc>, zone: WireZone) -> String {
    match zone {
        WireZone::Utc => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
        WireZone::Fixed(offset) => dt
            .with_timezone(&offset)
            .to_rfc3339_opts(SecondsFormat::Secs, false),
    }
}

/// Parse a wire timestamp, normalizing to UTC.
///
/// Date-only input gets a synthetic midnight-UTC time component appended
/// before parsing. Unparseable input fails with a validation error whose
/// field is `"date"`.
pub fn parse(source: &str) -> Result<DateTime<Utc>> {
    let trimmed = source.trim();
    let extended;
    let to_parse = if trimmed.to_uppercase().contains('T') {
        trimmed
    } else {
        extended = format!("{}T00:00:00Z", trimmed);
        &extended
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(to_parse) {
        return Ok(dt.with_timezone(&Utc));
    }
    // Timestamp without a zone designator — assume UTC
    if let Ok(naive) = NaiveDateTime::parse_from_str(to_parse, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(to_parse, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    Err(Error::validation(
        "date",
        i18n::resolve("api.error.dateparse", &[source]),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_utc() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();
        assert_eq!(format(dt, WireZone::Utc), "2024-03-01T10:30:00Z");
    }

    #[test]
    fn test_format_in_configured_offset() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();
        let zone = WireZone::from_offset_str("+10:00").unwrap();
        assert_eq!(format(dt, zone), "2024-03-01T20:30:00+10:00");
    }

    #[test]
    fn test_parse_full_timestamp_with_z() {
        let dt = parse("2024-03-01T10:30:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_full_timestamp_with_offset() {
        let dt = parse("2024-03-01T20:30:00+10:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_without_zone_assumes_utc() {
        let dt = parse("2024-03-01T10:30:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_date_only_is_midnight_utc() {
        let dt = parse("2024-03-01").unwrap();
        assert_eq!(dt, parse("2024-03-01T00:00:00Z").unwrap());
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_round_trip_any_zone() {
        let dt = Utc.with_ymd_and_hms(2023, 11, 17, 23, 59, 59).unwrap();
        for offset in ["", "+10:00", "-05:30", "+00:00"] {
            let zone = WireZone::from_offset_str(offset).unwrap();
            assert_eq!(parse(&format(dt, zone)).unwrap(), dt, "zone {:?}", offset);
        }
    }

    #[test]
    fn test_parse_failure_tags_date_field() {
        let err = parse("not-a-date").unwrap_err();
        match err {
            Error::Validation { field, message } => {
                assert_eq!(field, "date");
                assert!(message.contains("not-a-date"));
            }
            other => panic!("expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_fails() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
    }

    #[test]
    fn test_offset_parsing() {
        assert_eq!(WireZone::from_offset_str("Z").unwrap(), WireZone::Utc);
        assert_eq!(WireZone::from_offset_str("").unwrap(), WireZone::Utc);
        assert!(matches!(
            WireZone::from_offset_str("+10:00").unwrap(),
            WireZone::Fixed(_)
        ));
        assert!(WireZone::from_offset_str("10:00").is_err());
        assert!(WireZone::from_offset_str("+25:00").is_err());
        assert!(WireZone::from_offset_str("+xx:yy").is_err());
    }
}
