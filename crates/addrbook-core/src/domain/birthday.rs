use crate::error::CoreError;
use crate::rules::dates::local_today;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const BIRTHDAY_FORMAT: &str = "%d.%m.%Y";

/// A birthday as entered (`DD.MM.YYYY`) together with its parsed date.
///
/// The raw text is what gets persisted and shown back to the user; the parsed
/// date drives the upcoming-birthday rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Birthday {
    raw: String,
    date: NaiveDate,
}

impl Birthday {
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        Self::parse_on(raw, local_today())
    }

    /// Validates `raw` against an explicit `today` instead of the local clock.
    pub fn parse_on(raw: &str, today: NaiveDate) -> Result<Self, CoreError> {
        let date = parse_birthday_date(raw)?;
        if date > today {
            return Err(CoreError::BirthdayInFuture(raw.to_string()));
        }
        Ok(Self {
            raw: raw.to_string(),
            date,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl TryFrom<String> for Birthday {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Birthday> for String {
    fn from(value: Birthday) -> Self {
        value.raw
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_birthday_date(raw: &str) -> Result<NaiveDate, CoreError> {
    // chrono accepts unpadded fields, so check the DD.MM.YYYY shape first.
    let bytes = raw.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            2 | 5 => *byte == b'.',
            _ => byte.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(CoreError::InvalidBirthdayFormat(raw.to_string()));
    }

    NaiveDate::parse_from_str(raw, BIRTHDAY_FORMAT)
        .map_err(|_| CoreError::InvalidBirthdayFormat(raw.to_string()))
}
