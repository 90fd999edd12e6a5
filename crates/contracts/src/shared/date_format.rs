//! Date formatting for table cells and form inputs.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), "%Y-%m-%d").ok()
}

/// Short human-readable date.
/// Example: "2024-03-05T00:00:00Z" -> "Mar 5, 2024"
pub fn format_short_date(raw: &str) -> Option<String> {
    parse_date(raw).map(|d| d.format("%b %-d, %Y").to_string())
}

/// Value suitable for `<input type="date">`.
/// Example: "2024-03-05T10:30:00.000Z" -> "2024-03-05"
pub fn to_input_date(raw: &str) -> Option<String> {
    parse_date(raw).map(|d| d.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_short_date() {
        assert_eq!(
            format_short_date("2024-03-05T00:00:00Z").as_deref(),
            Some("Mar 5, 2024")
        );
        assert_eq!(
            format_short_date("2024-12-31").as_deref(),
            Some("Dec 31, 2024")
        );
        assert_eq!(
            format_short_date("2024-03-15T14:02:26.123").as_deref(),
            Some("Mar 15, 2024")
        );
    }

    #[test]
    fn test_to_input_date() {
        assert_eq!(
            to_input_date("2024-03-05T10:30:00.000Z").as_deref(),
            Some("2024-03-05")
        );
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_short_date("invalid"), None);
        assert_eq!(format_short_date(""), None);
    }
}
