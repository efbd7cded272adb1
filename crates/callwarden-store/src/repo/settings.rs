use crate::error::Result;
use callwarden_core::platform::{self, ProtectionSettings};
use rusqlite::{params, Connection, OptionalExtension};

/// Key for the user-set "protection enabled" flag.
pub const PROTECTION_ENABLED: &str = "protection_enabled";

/// Persisted key-value settings: the protection flag and, for CLI use,
/// the simulated platform capability grants.
pub struct SettingsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> SettingsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1;",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT (key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool> {
        match self.get(key)? {
            Some(value) => Ok(value == "true"),
            None => Ok(default),
        }
    }

    pub fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.set(key, if value { "true" } else { "false" })
    }
}

impl ProtectionSettings for SettingsRepo<'_> {
    fn protection_enabled(&self) -> platform::Result<bool> {
        Ok(self.get_bool(PROTECTION_ENABLED, false)?)
    }
}
