use chrono::{Datelike, Local, NaiveDate};

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Month/day of `date` placed in `year`. Feb 29 falls back to Feb 28 when
/// `year` is not a leap year.
pub fn anniversary_in_year(date: NaiveDate, year: i32) -> Option<NaiveDate> {
    let (month, day) = (date.month(), date.day());
    if month == 2 && day == 29 && !is_leap_year(year) {
        return NaiveDate::from_ymd_opt(year, 2, 28);
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
