// ABOUTME: Strict date parsing against a portal-supplied strftime pattern.
// ABOUTME: Fails with TeiError::DateFormat instead of guessing; callers pre-slice fixed-width prefixes.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Result, TeiError};

/// Calendar timestamp stored in metadata records. Carries no timezone.
pub type Timestamp = NaiveDateTime;

/// Parses `raw` against the strftime-style `format`.
///
/// The whole of `raw` must match; nothing is trimmed or truncated. Patterns
/// without time fields (e.g. `%Y-%m-%d`) yield midnight of that date.
pub fn parse_date(raw: &str, format: &str) -> Result<Timestamp> {
    match NaiveDateTime::parse_from_str(raw, format) {
        Ok(ts) => Ok(ts),
        Err(err) => NaiveDate::parse_from_str(raw, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or_else(|| TeiError::DateFormat {
                raw: raw.to_string(),
                format: format.to_string(),
                source: err,
            }),
    }
}

/// Returns the first `width` characters of `raw`.
///
/// Portals publish ISO timestamps with trailing offsets or fractions; callers
/// cut them to the width of their pattern (19 for `%Y-%m-%dT%H:%M:%S`).
pub fn fixed_prefix(raw: &str, width: usize) -> &str {
    match raw.char_indices().nth(width) {
        Some((idx, _)) => &raw[..idx],
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    const ISO: &str = "%Y-%m-%dT%H:%M:%S";

    #[test]
    fn parses_iso_timestamp() {
        let ts = parse_date("2021-07-04T10:15:30", ISO).unwrap();
        let expected = NaiveDate::from_ymd_opt(2021, 7, 4)
            .unwrap()
            .and_hms_opt(10, 15, 30)
            .unwrap();
        assert_eq!(ts, expected);
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_date("not-a-date", ISO).unwrap_err();
        assert!(err.is_date_format());
        assert!(err.to_string().contains("not-a-date"));
    }

    #[test]
    fn rejects_untruncated_offset() {
        // The parser does no slicing of its own.
        assert!(parse_date("2021-07-04T10:15:30+02:00", ISO).is_err());
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(parse_date("2021-07-04T10:15", ISO).is_err());
    }

    #[test]
    fn date_only_pattern_yields_midnight() {
        let ts = parse_date("2019.03.30", "%Y.%m.%d").unwrap();
        assert_eq!(ts.year(), 2019);
        assert_eq!(ts.month(), 3);
        assert_eq!(ts.day(), 30);
        assert_eq!(ts.hour(), 0);
        assert_eq!(ts.minute(), 0);
    }

    #[test]
    fn fixed_prefix_cuts_on_char_boundaries() {
        assert_eq!(
            fixed_prefix("2021-07-04T10:15:30.000+02:00", 19),
            "2021-07-04T10:15:30"
        );
        assert_eq!(fixed_prefix("short", 19), "short");
        assert_eq!(fixed_prefix("árvíztűrő", 3), "árv");
        assert_eq!(fixed_prefix("", 5), "");
    }

    #[test]
    fn sliced_portal_value_parses() {
        let raw = "2020-02-17T06:30:00+01:00";
        let ts = parse_date(fixed_prefix(raw, 19), ISO).unwrap();
        assert_eq!(ts.hour(), 6);
        assert_eq!(ts.minute(), 30);
    }
}
