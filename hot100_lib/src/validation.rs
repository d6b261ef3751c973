//! Chart date validation and week arithmetic.
//!
//! Charts are published per Sunday-to-Saturday week and addressed by
//! date. A date inside the current week is used as is, since that week's
//! Saturday has not been published yet; any other date resolves to the
//! Saturday of its week.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::ChartError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The first week the Hot 100 was published.
pub fn first_chart_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1958, 8, 4).unwrap_or(NaiveDate::MIN)
}

/// Parse a `YYYY-MM-DD` date, ignoring surrounding whitespace.
pub fn validate_date(input: &str) -> Result<NaiveDate, ChartError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| {
        ChartError::InvalidDate(format!(
            "invalid date '{}'. Expected format: YYYY-MM-DD (e.g., 2024-06-01)",
            trimmed
        ))
    })
}

/// Checks that a chart can exist for `date`: not before the first chart, not after `today`.
pub fn validate_chart_date(date: NaiveDate, today: NaiveDate) -> Result<NaiveDate, ChartError> {
    let first = first_chart_date();
    if date < first {
        return Err(ChartError::InvalidDate(format!(
            "{} is before the first chart ({})",
            date.format(DATE_FORMAT),
            first.format(DATE_FORMAT)
        )));
    }
    if date > today {
        return Err(ChartError::InvalidDate(format!(
            "{} is in the future",
            date.format(DATE_FORMAT)
        )));
    }
    Ok(date)
}

/// Saturday closing the Sunday-to-Saturday week that contains `date`.
pub fn saturday_of_week(date: NaiveDate) -> NaiveDate {
    let days_since_sunday = i64::from(date.weekday().num_days_from_sunday());
    date + Duration::days(6 - days_since_sunday)
}

/// The date to request a chart for when the user picks `selected`.
pub fn effective_chart_date(selected: NaiveDate, today: NaiveDate) -> NaiveDate {
    let saturday = saturday_of_week(selected);
    if saturday == saturday_of_week(today) {
        selected
    } else {
        saturday
    }
}

/// Same weekday one week earlier.
pub fn previous_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(7)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
