use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("contact name is required")]
    EmptyName,
    #[error("invalid phone number {0:?}: expected exactly 10 digits")]
    InvalidPhone(String),
    #[error("invalid date {0:?}: expected DD.MM.YYYY")]
    InvalidBirthdayFormat(String),
    #[error("invalid date {0:?}: birthday cannot be in the future")]
    BirthdayInFuture(String),
    #[error("contact not found: {0}")]
    ContactNotFound(String),
    #[error("phone number {phone} not found for {name}")]
    PhoneNotFound { name: String, phone: String },
    #[error("invalid upcoming days: {0}")]
    InvalidUpcomingDays(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::EmptyName
            | CoreError::InvalidPhone(_)
            | CoreError::InvalidBirthdayFormat(_)
            | CoreError::BirthdayInFuture(_)
            | CoreError::InvalidUpcomingDays(_) => ErrorKind::Validation,
            CoreError::ContactNotFound(_) | CoreError::PhoneNotFound { .. } => ErrorKind::NotFound,
        }
    }
}
