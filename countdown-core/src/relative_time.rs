//! Human-readable distance between an event and now ("in 2 days", "5 minutes ago").

use chrono::{DateTime, Utc};

use crate::event::Event;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Largest unit first
const UNITS: [(i64, &str); 7] = [
    (YEAR, "year"),
    (MONTH, "month"),
    (WEEK, "week"),
    (DAY, "day"),
    (HOUR, "hour"),
    (MINUTE, "minute"),
    (1, "second"),
];

/// Describe `date` relative to `now` using the largest whole unit.
pub fn relative_label(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = date.signed_duration_since(now).num_seconds();
    if seconds == 0 {
        return "now".to_string();
    }

    let magnitude = seconds.abs();
    let (count, unit) = UNITS
        .iter()
        .find(|(size, _)| magnitude >= *size)
        .map(|(size, unit)| (magnitude / size, *unit))
        .unwrap_or((magnitude, "second"));

    let plural = if count == 1 { "" } else { "s" };

    if seconds > 0 {
        format!("in {} {}{}", count, unit, plural)
    } else {
        format!("{} {}{} ago", count, unit, plural)
    }
}

impl Event {
    /// Label for list rows, e.g. "in 3 weeks".
    pub fn relative_label(&self, now: DateTime<Utc>) -> String {
        relative_label(self.date, now)
    }
}
