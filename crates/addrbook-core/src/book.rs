use crate::domain::ContactRecord;
use crate::dto::UpcomingBirthday;
use crate::error::CoreError;
use crate::rules::{upcoming_congratulation, DEFAULT_UPCOMING_DAYS};
use chrono::NaiveDate;

/// Name-keyed contact directory. Iteration follows insertion order; replacing
/// a record keeps the slot of the one it replaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    records: Vec<ContactRecord>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContactRecord> {
        self.records.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.name().as_str())
    }

    /// Inserts `record`, replacing any record with the same name. The
    /// replaced record is returned.
    pub fn add_record(&mut self, record: ContactRecord) -> Option<ContactRecord> {
        match self.position(record.name().as_str()) {
            Some(index) => Some(std::mem::replace(&mut self.records[index], record)),
            None => {
                self.records.push(record);
                None
            }
        }
    }

    pub fn find(&self, name: &str) -> Option<&ContactRecord> {
        self.records
            .iter()
            .find(|record| record.name().as_str() == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut ContactRecord> {
        self.records
            .iter_mut()
            .find(|record| record.name().as_str() == name)
    }

    pub fn delete(&mut self, name: &str) -> Result<ContactRecord, CoreError> {
        let index = self
            .position(name)
            .ok_or_else(|| CoreError::ContactNotFound(name.to_string()))?;
        Ok(self.records.remove(index))
    }

    pub fn upcoming_birthdays(&self, reference: NaiveDate) -> Vec<UpcomingBirthday> {
        self.upcoming_birthdays_within(reference, DEFAULT_UPCOMING_DAYS)
    }

    pub fn upcoming_birthdays_within(
        &self,
        reference: NaiveDate,
        window_days: i64,
    ) -> Vec<UpcomingBirthday> {
        self.records
            .iter()
            .filter_map(|record| {
                let birthday = record.birthday()?;
                let date = upcoming_congratulation(birthday.date(), reference, window_days)?;
                Some(UpcomingBirthday {
                    name: record.name().to_string(),
                    congratulation_date: date,
                })
            })
            .collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.name().as_str() == name)
    }
}

impl<'a> IntoIterator for &'a AddressBook {
    type Item = &'a ContactRecord;
    type IntoIter = std::slice::Iter<'a, ContactRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<ContactRecord> for AddressBook {
    fn from_iter<T: IntoIterator<Item = ContactRecord>>(iter: T) -> Self {
        let mut book = AddressBook::new();
        for record in iter {
            book.add_record(record);
        }
        book
    }
}
