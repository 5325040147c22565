//! Date formatting for table cells and filter values. All times are UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const DATE_FORMAT: &str = "%d %b %Y";
const DATE_TIME_FORMAT: &str = "%d %b %Y, %H:%M";

/// Parse an API timestamp: RFC 3339, a naive date-time, or a bare date.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// `"01 May 2023"`. Empty input gives empty output; text that is not a
/// timestamp is returned unchanged.
pub fn format_date(text: &str) -> String {
    format_with(text, DATE_FORMAT)
}

/// `"01 May 2023, 10:30"`.
pub fn format_date_time(text: &str) -> String {
    format_with(text, DATE_TIME_FORMAT)
}

fn format_with(text: &str, pattern: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    match parse_timestamp(text) {
        Some(dt) => dt.format(pattern).to_string(),
        None => text.to_string(),
    }
}

/// Format a filter value holding epoch milliseconds.
pub fn format_millis_date(text: &str) -> String {
    text.trim()
        .parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Convert a typed `YYYY-MM-DD` date into the epoch-millisecond text stored
/// in filter values. Empty input maps to the empty value.
pub fn date_input_to_millis(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return Some(String::new());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc().timestamp_millis().to_string())
}

/// Inverse of [`date_input_to_millis`], for pre-filling the input.
pub fn millis_to_date_input(text: &str) -> String {
    text.trim()
        .parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_variants() {
        assert_eq!(format_date("2023-05-01T10:30:00Z"), "01 May 2023");
        assert_eq!(format_date("2023-05-01T10:30:00.000"), "01 May 2023");
        assert_eq!(format_date("2023-05-01"), "01 May 2023");
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_format_date_time() {
        assert_eq!(format_date_time("2023-05-01T10:30:00+02:00"), "01 May 2023, 08:30");
        assert_eq!(format_date_time("  "), "");
    }

    #[test]
    fn test_millis_conversions() {
        let millis = date_input_to_millis("2024-02-29").unwrap();
        assert_eq!(millis, "1709164800000");
        assert_eq!(format_millis_date(&millis), "29 Feb 2024");
        assert_eq!(millis_to_date_input(&millis), "2024-02-29");
        assert_eq!(date_input_to_millis(""), Some(String::new()));
        assert_eq!(date_input_to_millis("2024-02-30"), None);
        assert_eq!(format_millis_date(""), "");
        assert_eq!(format_millis_date("soon"), "");
    }
}
