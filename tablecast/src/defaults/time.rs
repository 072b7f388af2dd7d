//! Timestamp parsing with an ordered list of accepted layouts.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ConvertError;

/// One accepted timestamp layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeLayout {
    /// RFC 2822, e.g. `Thu, 05 Nov 2020 16:01:54 +0000`.
    Rfc2822,
    /// RFC 3339 with optional fractional seconds, e.g. `2020-11-05T16:01:54.0123Z`.
    Rfc3339,
    /// A chrono format string. Values without an offset are taken as UTC,
    /// and date-only values as midnight UTC.
    Format(String),
}

impl TimeLayout {
    /// The layouts used when none are configured.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![Self::Rfc2822, Self::Rfc3339]
    }

    /// Parses `raw` with this layout.
    #[must_use]
    pub fn parse(&self, raw: &str) -> Option<DateTime<Utc>> {
        match self {
            Self::Rfc2822 => DateTime::parse_from_rfc2822(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            Self::Rfc3339 => DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            Self::Format(fmt) => parse_with_format(raw, fmt),
        }
    }
}

fn parse_with_format(raw: &str, fmt: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(raw, fmt)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Parses a timestamp, accepting the first layout that matches.
pub fn parse_timestamp(raw: &str, layouts: &[TimeLayout]) -> Result<DateTime<Utc>, ConvertError> {
    layouts
        .iter()
        .find_map(|layout| layout.parse(raw))
        .ok_or_else(|| ConvertError::new(format!("unrecognized time format {raw}")))
}

/// Compares a raw timestamp against an actual one as instants.
pub fn compare_timestamp(
    raw: &str,
    actual: &DateTime<Utc>,
    layouts: &[TimeLayout],
) -> Result<(), ConvertError> {
    let expected = parse_timestamp(raw, layouts)?;
    if expected == *actual {
        Ok(())
    } else {
        Err(ConvertError::mismatch(expected, actual))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn expected() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2020-11-05T16:01:54.0123Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_parse_supported_layouts() {
        let layouts = TimeLayout::defaults();
        let cases = [
            ("Thu, 05 Nov 2020 16:01:54 +0000", 1000),
            ("05 Nov 2020 16:01:54 GMT", 1000),
            ("2020-11-05T16:01:54Z", 1000),
            ("2020-11-05T16:01:54+00:00", 1000),
            ("2020-11-05T16:01:54.0123Z", 0),
        ];

        for (raw, tolerance_ms) in cases {
            let parsed = parse_timestamp(raw, &layouts).unwrap();
            let delta_ms = (expected() - parsed).num_milliseconds().abs();
            assert!(delta_ms <= tolerance_ms, "{raw} parsed as {parsed}");
        }
    }

    #[test]
    fn test_parse_respects_offset() {
        let parsed = parse_timestamp("2020-11-05T18:01:54+02:00", &TimeLayout::defaults()).unwrap();
        assert_eq!(parsed.to_rfc3339(), "2020-11-05T16:01:54+00:00");
    }

    #[test]
    fn test_parse_unrecognized() {
        let err = parse_timestamp("abc", &TimeLayout::defaults()).unwrap_err();
        assert_eq!(err.message, "unrecognized time format abc");
    }

    #[test]
    fn test_custom_format_layouts() {
        let layouts = vec![
            TimeLayout::Format("%Y-%m-%d %H:%M:%S".to_string()),
            TimeLayout::Format("%d/%m/%Y".to_string()),
        ];

        let with_time = parse_timestamp("2020-11-05 16:01:54", &layouts).unwrap();
        assert_eq!(with_time.to_rfc3339(), "2020-11-05T16:01:54+00:00");

        let date_only = parse_timestamp("05/11/2020", &layouts).unwrap();
        assert_eq!(date_only.to_rfc3339(), "2020-11-05T00:00:00+00:00");
    }

    #[test]
    fn test_first_matching_layout_wins() {
        let layouts = vec![
            TimeLayout::Format("%d/%m/%Y".to_string()),
            TimeLayout::Format("%m/%d/%Y".to_string()),
        ];
        let parsed = parse_timestamp("05/11/2020", &layouts).unwrap();
        assert_eq!(parsed.to_rfc3339(), "2020-11-05T00:00:00+00:00");
    }

    #[test]
    fn test_compare_timestamp() {
        let layouts = TimeLayout::defaults();
        let actual = DateTime::parse_from_rfc3339("2020-11-05T16:01:54Z")
            .unwrap()
            .with_timezone(&Utc);

        assert!(compare_timestamp("2020-11-05T16:01:54Z", &actual, &layouts).is_ok());
        assert!(compare_timestamp("2020-11-05T18:01:54+02:00", &actual, &layouts).is_ok());

        let later = actual + Duration::hours(1);
        let err = compare_timestamp("2020-11-05T16:01:54Z", &later, &layouts).unwrap_err();
        assert_eq!(
            err.message,
            "expected 2020-11-05 16:01:54 UTC, but got 2020-11-05 17:01:54 UTC"
        );
    }

    #[test]
    fn test_compare_timestamp_invalid_expected() {
        let err = compare_timestamp("soon", &Utc::now(), &TimeLayout::defaults()).unwrap_err();
        assert_eq!(err.message, "unrecognized time format soon");
    }
}
