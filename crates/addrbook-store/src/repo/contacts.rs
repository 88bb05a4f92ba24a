use crate::error::Result;
use addrbook_core::domain::{Birthday, ContactRecord, Name, Phone};
use addrbook_core::AddressBook;
use rusqlite::{params, Connection};
use std::collections::HashMap;

struct ContactRow {
    name: String,
    birthday: Option<String>,
}

pub struct ContactsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> ContactsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// All records in book order, validated on the way out.
    pub fn list_all(&self) -> Result<Vec<ContactRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, birthday FROM contacts ORDER BY position ASC;")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ContactRow {
                    name: row.get(0)?,
                    birthday: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut phones = self.phones_by_contact()?;
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let mut record = ContactRecord::new(Name::try_from(row.name)?);
            for value in phones.remove(record.name().as_str()).unwrap_or_default() {
                record.push_phone(Phone::try_from(value)?);
            }
            if let Some(raw) = row.birthday {
                record.set_birthday(Birthday::try_from(raw)?);
            }
            records.push(record);
        }
        Ok(records)
    }

    /// Replaces the stored snapshot with `book`.
    pub fn replace_all(&self, book: &AddressBook) -> Result<()> {
        if self.conn.is_autocommit() {
            let tx = self.conn.unchecked_transaction()?;
            replace_all_inner(&tx, book)?;
            tx.commit()?;
            Ok(())
        } else {
            replace_all_inner(self.conn, book)
        }
    }

    pub fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts;", [], |row| row.get(0))?;
        Ok(count)
    }

    fn phones_by_contact(&self) -> Result<HashMap<String, Vec<String>>> {
        let mut stmt = self.conn.prepare(
            "SELECT contact_name, value FROM contact_phones
             ORDER BY contact_name ASC, position ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut out: HashMap<String, Vec<String>> = HashMap::new();
        while let Some(row) = rows.next()? {
            let contact_name: String = row.get(0)?;
            let value: String = row.get(1)?;
            out.entry(contact_name).or_default().push(value);
        }
        Ok(out)
    }
}

fn replace_all_inner(conn: &Connection, book: &AddressBook) -> Result<()> {
    conn.execute("DELETE FROM contact_phones;", [])?;
    conn.execute("DELETE FROM contacts;", [])?;

    let mut insert_contact =
        conn.prepare("INSERT INTO contacts (name, position, birthday) VALUES (?1, ?2, ?3);")?;
    let mut insert_phone = conn.prepare(
        "INSERT INTO contact_phones (contact_name, position, value) VALUES (?1, ?2, ?3);",
    )?;

    for (position, record) in book.iter().enumerate() {
        let name = record.name().as_str();
        insert_contact.execute(params![
            name,
            position as i64,
            record.birthday().map(|birthday| birthday.as_str()),
        ])?;
        for (phone_position, phone) in record.phones().iter().enumerate() {
            insert_phone.execute(params![name, phone_position as i64, phone.as_str()])?;
        }
    }
    Ok(())
}
