//! Long-form date rendering for the welcome page (en-US style).

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// e.g. `March 5, 2024`.
pub fn long_date<Tz>(moment: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    moment.format("%B %-d, %Y").to_string()
}

/// e.g. `Tuesday, March 5, 2024 at 02:05:09 PM`.
pub fn long_date_time<Tz>(moment: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    moment.format("%A, %B %-d, %Y at %I:%M:%S %p").to_string()
}

/// Parses an ISO-8601 `createdAt`; `None` when it is not a valid timestamp.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<chrono::FixedOffset>> {
    DateTime::parse_from_rfc3339(value.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn long_date_has_no_padding() {
        let moment = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        assert_eq!(long_date(&moment), "March 5, 2024");
    }

    #[test]
    fn long_date_time_uses_twelve_hour_clock() {
        let moment = Utc.with_ymd_and_hms(2024, 3, 5, 14, 5, 9).unwrap();
        assert_eq!(
            long_date_time(&moment),
            "Tuesday, March 5, 2024 at 02:05:09 PM"
        );
    }

    #[test]
    fn parse_timestamp_accepts_iso_and_rejects_garbage() {
        let parsed = parse_timestamp("2024-03-05T12:00:00.000Z").unwrap();
        assert_eq!(long_date(&parsed), "March 5, 2024");
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
