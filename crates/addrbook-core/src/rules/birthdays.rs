use crate::error::CoreError;
use crate::rules::dates::anniversary_in_year;
use chrono::{Datelike, Days, NaiveDate};

pub const DEFAULT_UPCOMING_DAYS: i64 = 7;
pub const MAX_UPCOMING_DAYS: i64 = 365;
pub const CONGRATULATION_DATE_FORMAT: &str = "%Y.%m.%d";

pub fn validate_upcoming_days(days: i64) -> Result<i64, CoreError> {
    if !(0..=MAX_UPCOMING_DAYS).contains(&days) {
        return Err(CoreError::InvalidUpcomingDays(days));
    }
    Ok(days)
}

/// First occurrence of `birth_date` on or after `reference`.
pub fn next_birthday(birth_date: NaiveDate, reference: NaiveDate) -> Option<NaiveDate> {
    let this_year = anniversary_in_year(birth_date, reference.year())?;
    if this_year >= reference {
        return Some(this_year);
    }
    anniversary_in_year(birth_date, reference.year() + 1)
}

/// Moves Saturday and Sunday to the following Monday.
pub fn congratulation_date(date: NaiveDate) -> Option<NaiveDate> {
    let weekday = date.weekday().num_days_from_monday();
    if weekday >= 5 {
        return date.checked_add_days(Days::new(u64::from(7 - weekday)));
    }
    Some(date)
}

/// Congratulation date for a birthday whose next occurrence is at most
/// `window_days` after `reference`, `None` otherwise.
pub fn upcoming_congratulation(
    birth_date: NaiveDate,
    reference: NaiveDate,
    window_days: i64,
) -> Option<NaiveDate> {
    let next = next_birthday(birth_date, reference)?;
    let days_until = (next - reference).num_days();
    if !(0..=window_days).contains(&days_until) {
        return None;
    }
    congratulation_date(next)
}

pub fn format_congratulation_date(date: NaiveDate) -> String {
    date.format(CONGRATULATION_DATE_FORMAT).to_string()
}
