//! Draw-date parsing and rendering.
//!
//! Dates cross two boundaries in two different shapes: the raffle backend
//! speaks `YYYY-MM-DD HH:mm:ss`, while the admin UI posts
//! `YYYY-MM-DDTHH:mm` strings (seconds optional). Both are normalized to a
//! single UTC instant here so the rule engine only ever compares one
//! representation. The backend's `0000-00-00 00:00:00` sentinel means
//! "no date set" and parses to `None` everywhere.

use chrono::{NaiveDateTime, TimeZone, Utc};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Format the raffle backend uses for all datetime columns.
pub const BACKEND_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The backend's "no date set" sentinel value.
pub const UNSET_SENTINEL: &str = "0000-00-00 00:00:00";

const UI_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";
const UI_DATETIME_FORMAT_WITH_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a datetime string that may legitimately be absent.
///
/// Returns `Ok(None)` for empty/whitespace strings and the unset sentinel.
/// The caller decides whether absence is acceptable or a missing-date rule
/// violation. Unrecognized formats are an error, not a silent `None`.
pub fn parse_optional(raw: &str) -> Result<Option<Timestamp>, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() || raw == UNSET_SENTINEL {
        return Ok(None);
    }

    for format in [
        BACKEND_DATETIME_FORMAT,
        UI_DATETIME_FORMAT_WITH_SECONDS,
        UI_DATETIME_FORMAT,
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Some(Utc.from_utc_datetime(&naive)));
        }
    }

    Err(CoreError::Validation(format!(
        "Unrecognized datetime value: '{raw}'"
    )))
}

/// Parse a datetime string that must be present.
pub fn parse_required(raw: &str, field: &str) -> Result<Timestamp, CoreError> {
    parse_optional(raw)?
        .ok_or_else(|| CoreError::Validation(format!("{field} is required")))
}

/// Render a timestamp in the backend's datetime format.
pub fn to_backend_string(ts: Timestamp) -> String {
    ts.format(BACKEND_DATETIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_format() {
        let ts = parse_optional("2025-06-01 18:30:00").unwrap().unwrap();
        assert_eq!(to_backend_string(ts), "2025-06-01 18:30:00");
    }

    #[test]
    fn parses_ui_format_without_seconds() {
        let ts = parse_optional("2025-06-01T18:30").unwrap().unwrap();
        assert_eq!(to_backend_string(ts), "2025-06-01 18:30:00");
    }

    #[test]
    fn parses_ui_format_with_seconds() {
        let ts = parse_optional("2025-06-01T18:30:15").unwrap().unwrap();
        assert_eq!(to_backend_string(ts), "2025-06-01 18:30:15");
    }

    #[test]
    fn sentinel_is_absent() {
        assert!(parse_optional("0000-00-00 00:00:00").unwrap().is_none());
    }

    #[test]
    fn empty_and_whitespace_are_absent() {
        assert!(parse_optional("").unwrap().is_none());
        assert!(parse_optional("   ").unwrap().is_none());
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse_optional("next tuesday").is_err());
        assert!(parse_optional("2025-13-45 99:00:00").is_err());
    }

    #[test]
    fn required_rejects_sentinel() {
        let err = parse_required(UNSET_SENTINEL, "draw date").unwrap_err();
        assert!(err.to_string().contains("draw date is required"));
    }

    #[test]
    fn required_accepts_real_date() {
        assert!(parse_required("2025-06-01 00:00:00", "draw date").is_ok());
    }
}
