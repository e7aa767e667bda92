//! Timestamps stored as fixed-width RFC 3339 strings with millisecond precision.
//!
//! Fixed width keeps lexical order equal to chronological order, so the store can sort
//! on the raw string.

use chrono::{DateTime, SecondsFormat, Utc};

/// Current time truncated to milliseconds, so values survive a store round-trip unchanged.
#[must_use]
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

#[must_use]
pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `#[serde(with = "atelier_kernel::time::millis")]`
pub mod millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// # Errors
    /// Never fails for well-formed timestamps.
    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format(value))
    }

    /// # Errors
    /// Fails when the value is not an RFC 3339 timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|value| value.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
    struct Stamped {
        #[serde(with = "millis")]
        at: DateTime<Utc>,
    }

    #[test]
    fn timestamps_are_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format(&whole), "2026-01-02T03:04:05.000Z");

        let json = serde_json::to_string(&Stamped { at: whole }).unwrap();
        assert_eq!(json, r#"{"at":"2026-01-02T03:04:05.000Z"}"#);
        assert_eq!(serde_json::from_str::<Stamped>(&json).unwrap().at, whole);
    }

    #[test]
    fn now_has_millisecond_precision() {
        assert_eq!(now().timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn offsets_are_normalised_to_utc() {
        let parsed: Stamped = serde_json::from_str(r#"{"at":"2026-01-02T05:04:05.250+02:00"}"#).unwrap();
        assert_eq!(format(&parsed.at), "2026-01-02T03:04:05.250Z");
    }
}
