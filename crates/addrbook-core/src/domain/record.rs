use crate::domain::{Birthday, Name, Phone};
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    name: Name,
    #[serde(default)]
    phones: Vec<Phone>,
    #[serde(default)]
    birthday: Option<Birthday>,
}

impl ContactRecord {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            phones: Vec::new(),
            birthday: None,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    pub fn add_phone(&mut self, raw: &str) -> Result<&Phone, CoreError> {
        let phone = Phone::new(raw)?;
        Ok(self.push_phone(phone))
    }

    pub fn push_phone(&mut self, phone: Phone) -> &Phone {
        self.phones.push(phone);
        &self.phones[self.phones.len() - 1]
    }

    pub fn add_birthday(&mut self, raw: &str) -> Result<&Birthday, CoreError> {
        let birthday = Birthday::new(raw)?;
        Ok(self.set_birthday(birthday))
    }

    pub fn set_birthday(&mut self, birthday: Birthday) -> &Birthday {
        self.birthday.insert(birthday)
    }

    pub fn find_phone(&self, raw: &str) -> Option<&Phone> {
        self.phones.iter().find(|phone| phone.as_str() == raw)
    }

    /// Removes every phone equal to `raw` and returns how many were dropped.
    pub fn remove_phone(&mut self, raw: &str) -> usize {
        let before = self.phones.len();
        self.phones.retain(|phone| phone.as_str() != raw);
        before - self.phones.len()
    }

    /// Replaces `old` with `new`. The record is left untouched if `old` is
    /// missing or `new` does not validate.
    pub fn edit_phone(&mut self, old: &str, new: &str) -> Result<(), CoreError> {
        if self.find_phone(old).is_none() {
            return Err(CoreError::PhoneNotFound {
                name: self.name.to_string(),
                phone: old.to_string(),
            });
        }
        let replacement = Phone::new(new)?;
        self.remove_phone(old);
        self.phones.push(replacement);
        Ok(())
    }

    pub fn phones_joined(&self, separator: &str) -> String {
        self.phones
            .iter()
            .map(Phone::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ContactRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Contact name: {}, phones: {}, birthday: {}",
            self.name,
            self.phones_joined("; "),
            self.birthday
                .as_ref()
                .map(Birthday::as_str)
                .unwrap_or("-")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::ContactRecord;
    use crate::domain::{Birthday, Name};
    use crate::error::CoreError;
    use chrono::NaiveDate;

    fn record(name: &str) -> ContactRecord {
        ContactRecord::new(Name::new(name).unwrap())
    }

    #[test]
    fn add_phone_keeps_order_and_duplicates() {
        let mut contact = record("Ada");
        contact.add_phone("0501234567").unwrap();
        contact.add_phone("0670000000").unwrap();
        contact.add_phone("0501234567").unwrap();
        let phones: Vec<&str> = contact.phones().iter().map(|p| p.as_str()).collect();
        assert_eq!(phones, ["0501234567", "0670000000", "0501234567"]);
    }

    #[test]
    fn add_phone_rejects_invalid_without_change() {
        let mut contact = record("Ada");
        let err = contact.add_phone("123").unwrap_err();
        assert_eq!(err, CoreError::InvalidPhone("123".to_string()));
        assert!(contact.phones().is_empty());
    }

    #[test]
    fn find_phone_matches_exact_text() {
        let mut contact = record("Ada");
        contact.add_phone("0501234567").unwrap();
        assert!(contact.find_phone("0501234567").is_some());
        assert!(contact.find_phone("050123456").is_none());
    }

    #[test]
    fn remove_phone_is_idempotent() {
        let mut contact = record("Ada");
        contact.add_phone("0501234567").unwrap();
        contact.add_phone("0670000000").unwrap();
        contact.add_phone("0501234567").unwrap();

        assert_eq!(contact.remove_phone("0501234567"), 2);
        let once = contact.phones().to_vec();
        assert_eq!(contact.remove_phone("0501234567"), 0);
        assert_eq!(contact.phones(), once.as_slice());
        assert_eq!(contact.remove_phone("1111111111"), 0);
    }

    #[test]
    fn edit_phone_replaces_number() {
        let mut contact = record("Ada");
        contact.add_phone("0501234567").unwrap();
        contact.add_phone("0670000000").unwrap();
        contact.edit_phone("0501234567", "0939999999").unwrap();
        assert_eq!(contact.phones_joined(","), "0670000000,0939999999");
    }

    #[test]
    fn edit_phone_missing_old_is_not_found() {
        let mut contact = record("Ada");
        let err = contact.edit_phone("0501234567", "0939999999").unwrap_err();
        assert!(matches!(err, CoreError::PhoneNotFound { .. }));
    }

    #[test]
    fn edit_phone_invalid_new_keeps_old() {
        let mut contact = record("Ada");
        contact.add_phone("0501234567").unwrap();
        assert!(contact.edit_phone("0501234567", "bad").is_err());
        assert_eq!(contact.phones_joined(","), "0501234567");
    }

    #[test]
    fn set_birthday_overwrites() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let mut contact = record("Ada");
        contact.set_birthday(Birthday::parse_on("01.01.1990", today).unwrap());
        contact.set_birthday(Birthday::parse_on("02.02.1991", today).unwrap());
        assert_eq!(contact.birthday().map(|b| b.as_str()), Some("02.02.1991"));
    }

    #[test]
    fn add_birthday_rejects_bad_input() {
        let mut contact = record("Ada");
        assert!(contact.add_birthday("1990.01.01").is_err());
        assert!(contact.birthday().is_none());
    }

    #[test]
    fn render_lists_phones_and_birthday() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let mut contact = record("Ada");
        assert_eq!(
            contact.render(),
            "Contact name: Ada, phones: , birthday: -"
        );
        contact.add_phone("0501234567").unwrap();
        contact.add_phone("0670000000").unwrap();
        contact.set_birthday(Birthday::parse_on("12.06.1990", today).unwrap());
        assert_eq!(
            contact.render(),
            "Contact name: Ada, phones: 0501234567; 0670000000, birthday: 12.06.1990"
        );
    }
}
