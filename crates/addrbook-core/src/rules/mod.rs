pub mod birthdays;
pub mod dates;

pub use birthdays::{
    congratulation_date, format_congratulation_date, next_birthday, upcoming_congratulation,
    validate_upcoming_days, DEFAULT_UPCOMING_DAYS, MAX_UPCOMING_DAYS,
};
pub use dates::{anniversary_in_year, is_leap_year, local_today};
