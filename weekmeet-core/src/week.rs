//! Week math and week keys.
//!
//! A week is identified by its start date: the most recent Sunday, formatted
//! as zero-padded YYYY-MM-DD. Every client resolves "now" to a local calendar
//! date before calling into this module, so two people in the same timezone
//! always land on the same key.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{WeekmeetError, WeekmeetResult};

/// Returns the start of the week (Sunday) containing `date`.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Formats a week start date as a week key.
pub fn week_key(week_start: NaiveDate) -> String {
    week_start.format("%Y-%m-%d").to_string()
}

/// Parses a week key back into a date.
///
/// Accepts any calendar date, not just Sundays; callers normalize with
/// `week_start_of` when they need the canonical week start.
pub fn parse_week_key(key: &str) -> WeekmeetResult<NaiveDate> {
    let date = NaiveDate::parse_from_str(key, "%Y-%m-%d")
        .map_err(|e| WeekmeetError::Validation(format!("Invalid week key '{key}': {e}")))?;

    // chrono accepts unpadded month/day; stored keys are always padded
    if week_key(date) != key {
        return Err(WeekmeetError::Validation(format!(
            "Invalid week key '{key}': expected zero-padded YYYY-MM-DD"
        )));
    }

    Ok(date)
}

/// Shifts a date by whole weeks. Negative counts go back in time.
pub fn add_weeks(date: NaiveDate, weeks: i64) -> NaiveDate {
    date + Duration::weeks(weeks)
}

/// The seven dates of the week starting at `week_start`, Sunday first.
pub fn week_dates(week_start: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|i| week_start + Duration::days(i as i64))
}
