pub mod db;
pub mod error;
pub mod json;
pub mod migrate;
pub mod paths;
pub mod repo;

use crate::error::Result;
use addrbook_core::AddressBook;
use rusqlite::Connection;
use std::path::Path;

pub use json::JsonStore;

/// Where an address book lives between sessions.
///
/// `load` returns an empty book when nothing has been saved yet. `save`
/// replaces the whole stored snapshot.
pub trait BookStore {
    fn load(&self) -> Result<AddressBook>;
    fn save(&self, book: &AddressBook) -> Result<()>;
}

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = db::open(path)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn migrate(&self) -> Result<()> {
        migrate::run_migrations(&self.conn)
    }

    pub fn schema_version(&self) -> Result<i64> {
        migrate::schema_version(&self.conn)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn contacts(&self) -> repo::ContactsRepo<'_> {
        repo::ContactsRepo::new(&self.conn)
    }
}

impl BookStore for Store {
    fn load(&self) -> Result<AddressBook> {
        Ok(self.contacts().list_all()?.into_iter().collect())
    }

    fn save(&self, book: &AddressBook) -> Result<()> {
        self.contacts().replace_all(book)
    }
}
