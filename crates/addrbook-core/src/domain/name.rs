use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Contact name, kept exactly as typed. Names are the directory key, so no
/// trimming or case folding happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        if raw.is_empty() {
            return Err(CoreError::EmptyName);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Name {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(CoreError::EmptyName);
        }
        Ok(Self(value))
    }
}

impl From<Name> for String {
    fn from(value: Name) -> Self {
        value.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
