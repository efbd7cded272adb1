use crate::error::{Result, StoreError};
use callwarden_core::platform::{self, BlockedCallCounter};
use rusqlite::{params, Connection, OptionalExtension};

/// Name of the blocked-calls counter row.
pub const BLOCKED_CALLS: &str = "blocked_calls";

pub struct CountersRepo<'a> {
    conn: &'a Connection,
}

impl<'a> CountersRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Single-statement increment; callers never see an intermediate value.
    pub fn increment(&self, name: &str) -> Result<i64> {
        let value: Option<i64> = self
            .conn
            .query_row(
                "UPDATE counters SET value = value + 1 WHERE name = ?1 RETURNING value;",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        value.ok_or_else(|| StoreError::NotFound(format!("counter {name}")))
    }

    pub fn read(&self, name: &str) -> Result<i64> {
        let value: Option<i64> = self
            .conn
            .query_row(
                "SELECT value FROM counters WHERE name = ?1;",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        value.ok_or_else(|| StoreError::NotFound(format!("counter {name}")))
    }
}

impl BlockedCallCounter for CountersRepo<'_> {
    fn increment(&self) -> platform::Result<i64> {
        Ok(CountersRepo::increment(self, BLOCKED_CALLS)?)
    }

    fn read(&self) -> platform::Result<i64> {
        Ok(CountersRepo::read(self, BLOCKED_CALLS)?)
    }
}
