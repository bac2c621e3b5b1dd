//! Date fields as the API sends them.
//!
//! Timestamps usually arrive as RFC 3339, but date pickers on the web side
//! post plain `YYYY-MM-DD` values and older records carry timestamps with
//! no offset. All three read as UTC; `null` and `""` read as absent.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

/// Parses an API date: RFC 3339, an offset-less timestamp, or a bare
/// calendar date (midnight UTC).
pub fn parse_api_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn invalid<E: serde::de::Error>(value: &str) -> E {
    E::custom(format!(
        "invalid date '{}': expected RFC 3339 or YYYY-MM-DD",
        value
    ))
}

/// `deserialize_with` for required date fields.
pub fn deserialize_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_api_datetime(&value).ok_or_else(|| invalid(&value))
}

/// `deserialize_with` for optional date fields. Pair with `#[serde(default)]`.
pub fn deserialize_optional_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => parse_api_datetime(&value).map(Some).ok_or_else(|| invalid(&value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "deserialize_datetime")]
        at: DateTime<Utc>,
        #[serde(default, deserialize_with = "deserialize_optional_datetime")]
        until: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_parse_api_datetime_formats() {
        let midnight = Utc.with_ymd_and_hms(2024, 5, 14, 0, 0, 0).unwrap();
        assert_eq!(parse_api_datetime("2024-05-14"), Some(midnight));
        assert_eq!(parse_api_datetime("2024-05-14T00:00:00Z"), Some(midnight));
        assert_eq!(parse_api_datetime("2024-05-14T04:00:00+04:00"), Some(midnight));
        assert_eq!(parse_api_datetime("2024-05-14T00:00:00.000Z"), Some(midnight));
        assert_eq!(parse_api_datetime("2024-05-14T00:00:00"), Some(midnight));
        assert_eq!(parse_api_datetime("14/05/2024"), None);
        assert_eq!(parse_api_datetime("2024-02-30"), None);
    }

    #[test]
    fn test_deserialize_date_fields() {
        let row: Row = serde_json::from_str(r#"{"at":"2024-05-14","until":"2024-06-01"}"#).unwrap();
        assert_eq!(row.at, Utc.with_ymd_and_hms(2024, 5, 14, 0, 0, 0).unwrap());
        assert_eq!(row.until, Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()));

        for json in [
            r#"{"at":"2024-05-14"}"#,
            r#"{"at":"2024-05-14","until":null}"#,
            r#"{"at":"2024-05-14","until":""}"#,
        ] {
            let row: Row = serde_json::from_str(json).unwrap();
            assert_eq!(row.until, None);
        }

        assert!(serde_json::from_str::<Row>(r#"{"at":"soon"}"#).is_err());
        assert!(serde_json::from_str::<Row>(r#"{"at":"2024-05-14","until":"later"}"#).is_err());
    }
}
