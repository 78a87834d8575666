use chrono::{DateTime, NaiveDate, Utc};

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

/// "Oct 15, 2023"
#[must_use]
pub fn format_date(value: NaiveDate) -> String {
    value.format("%b %-d, %Y").to_string()
}

/// Countdown as `mm:ss`; minutes keep growing past 99.
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// "45 min", or "-" when unknown.
#[must_use]
pub fn format_minutes(minutes: Option<u32>) -> String {
    minutes.map_or_else(|| "-".to_owned(), |m| format!("{m} min"))
}
