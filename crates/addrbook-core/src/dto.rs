use crate::rules::format_congratulation_date;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingBirthday {
    pub name: String,
    pub congratulation_date: NaiveDate,
}

impl UpcomingBirthday {
    /// `YYYY.MM.DD`
    pub fn formatted_date(&self) -> String {
        format_congratulation_date(self.congratulation_date)
    }
}
