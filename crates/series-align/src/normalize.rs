//! Date normalization.
//!
//! The two upstream producers encode dates differently: bare
//! `YYYY-MM-DD` strings, ISO datetimes with or without a zone, and
//! occasionally epoch milliseconds. Everything collapses to one
//! canonical calendar-day key so the join compares equal days as equal.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Map a raw date-like value to its canonical `YYYY-MM-DD` key.
///
/// The calendar day is taken from UTC date fields, never locale ones,
/// so keys from both sides compare directly. Time-of-day is discarded.
/// Absent, empty, or unparseable input yields `None`.
pub fn canonical_date(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => canonical_date_str(s),
        Value::Number(n) => {
            let millis = n.as_i64()?;
            let dt = DateTime::<Utc>::from_timestamp_millis(millis)?;
            Some(dt.date_naive().format("%Y-%m-%d").to_string())
        }
        _ => None,
    }
}

fn canonical_date_str(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let date = if s.contains('T') {
        // Zoned datetimes resolve to their UTC calendar day; naive ones
        // are taken as already being in the exchange's convention.
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            dt.with_timezone(&Utc).date_naive()
        } else if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            dt.date()
        } else if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            dt.date()
        } else {
            return None;
        }
    } else {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?
    };

    Some(date.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_date_and_midnight_iso_share_one_key() {
        assert_eq!(
            canonical_date(&json!("2023-05-01")),
            canonical_date(&json!("2023-05-01T00:00:00Z"))
        );
        assert_eq!(
            canonical_date(&json!("2023-05-01")),
            Some("2023-05-01".to_string())
        );
    }

    #[test]
    fn zoned_datetime_uses_utc_calendar_day() {
        // 23:00 UTC-3 is 02:00 UTC the next day
        assert_eq!(
            canonical_date(&json!("2023-05-01T23:00:00-03:00")),
            Some("2023-05-02".to_string())
        );
    }

    #[test]
    fn naive_datetime_keeps_its_own_day() {
        assert_eq!(
            canonical_date(&json!("2023-05-01T16:30:00")),
            Some("2023-05-01".to_string())
        );
    }

    #[test]
    fn epoch_millis_parse() {
        // 2023-01-02T00:00:00Z
        assert_eq!(
            canonical_date(&json!(1672617600000i64)),
            Some("2023-01-02".to_string())
        );
    }

    #[test]
    fn invalid_inputs_are_none() {
        assert_eq!(canonical_date(&json!(null)), None);
        assert_eq!(canonical_date(&json!("")), None);
        assert_eq!(canonical_date(&json!("   ")), None);
        assert_eq!(canonical_date(&json!("not-a-date")), None);
        assert_eq!(canonical_date(&json!("2023-13-45")), None);
        assert_eq!(canonical_date(&json!("2023-05-01Tgarbage")), None);
        assert_eq!(canonical_date(&json!({"d": "2023-05-01"})), None);
        assert_eq!(canonical_date(&json!(true)), None);
    }

    #[test]
    fn idempotent_for_identical_input() {
        let raw = json!("2023-05-01T10:00:00Z");
        assert_eq!(canonical_date(&raw), canonical_date(&raw));
    }
}
