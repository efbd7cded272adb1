use crate::error::{Result, StoreError};
use callwarden_core::platform::{self, ContactDirectory};
use rusqlite::{params, Connection, OptionalExtension};

/// A trusted number as stored. The raw number is kept as entered;
/// normalization happens in the engine at decision time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: i64,
    pub name: Option<String>,
    pub number: String,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct ContactNew {
    pub name: Option<String>,
    pub number: String,
}

pub struct ContactsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> ContactsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn add(&self, now_utc: i64, input: ContactNew) -> Result<Contact> {
        let number = input.number.trim().to_string();
        if number.is_empty() || !number.chars().any(|c| c.is_ascii_digit()) {
            return Err(StoreError::InvalidNumber(input.number));
        }

        let existing: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM contacts WHERE number = ?1;",
                params![number],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            return Err(StoreError::DuplicateNumber(number));
        }

        self.conn.execute(
            "INSERT INTO contacts (name, number, created_at) VALUES (?1, ?2, ?3);",
            params![input.name, number, now_utc],
        )?;
        let id = self.conn.last_insert_rowid();
        Ok(Contact {
            id,
            name: input.name,
            number,
            created_at: now_utc,
        })
    }

    pub fn remove(&self, number: &str) -> Result<()> {
        let deleted = self.conn.execute(
            "DELETE FROM contacts WHERE number = ?1;",
            params![number.trim()],
        )?;
        if deleted == 0 {
            return Err(StoreError::NotFound(format!("contact {number}")));
        }
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, number, created_at FROM contacts ORDER BY created_at, id;")?;
        let rows = stmt.query_map([], |row| {
            Ok(Contact {
                id: row.get(0)?,
                name: row.get(1)?,
                number: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?;
        let mut contacts = Vec::new();
        for row in rows {
            contacts.push(row?);
        }
        Ok(contacts)
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts;", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn numbers(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT number FROM contacts;")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut numbers = Vec::new();
        for row in rows {
            numbers.push(row?);
        }
        Ok(numbers)
    }
}

impl ContactDirectory for ContactsRepo<'_> {
    fn contact_numbers(&self) -> platform::Result<Vec<String>> {
        Ok(self.numbers()?)
    }
}
