use crate::error::{Result, StoreError};
use crate::paths::{ensure_parent_dir, restrict_file_permissions};
use crate::BookStore;
use addrbook_core::domain::ContactRecord;
use addrbook_core::AddressBook;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const JSON_FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct BookDocumentRef<'a> {
    version: u32,
    contacts: Vec<&'a ContactRecord>,
}

#[derive(Deserialize)]
struct BookDocument {
    version: u32,
    contacts: Vec<ContactRecord>,
}

/// Book snapshot kept as one pretty-printed JSON document.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl BookStore for JsonStore {
    fn load(&self) -> Result<AddressBook> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path().display(), "no snapshot, starting empty");
            return Ok(AddressBook::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        let document: BookDocument = serde_json::from_str(&contents)?;
        if document.version != JSON_FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion(i64::from(document.version)));
        }
        Ok(document.contacts.into_iter().collect())
    }

    fn save(&self, book: &AddressBook) -> Result<()> {
        ensure_parent_dir(&self.path)?;
        let document = BookDocumentRef {
            version: JSON_FORMAT_VERSION,
            contacts: book.iter().collect(),
        };
        let mut contents = serde_json::to_string_pretty(&document)?;
        contents.push('\n');

        let temp = self.temp_path();
        fs::write(&temp, contents)?;
        restrict_file_permissions(&temp)?;
        fs::rename(&temp, &self.path)?;
        tracing::debug!(path = %self.path().display(), contacts = book.len(), "snapshot written");
        Ok(())
    }
}
