use crate::error::{Result, StoreError};
use callwarden_core::domain::{ScreenedCall, Verdict};
use rusqlite::{params, Connection};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct ScreenedCallNew {
    pub number: Option<String>,
    pub verdict: Verdict,
    pub reason: Option<String>,
}

pub struct CallLogRepo<'a> {
    conn: &'a Connection,
}

impl<'a> CallLogRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn record(&self, now_utc: i64, input: ScreenedCallNew) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO call_log (number, verdict, reason, at) VALUES (?1, ?2, ?3, ?4);",
            params![input.number, input.verdict.as_str(), input.reason, now_utc],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent screenings first.
    pub fn recent(&self, limit: i64) -> Result<Vec<ScreenedCall>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, number, verdict, reason, at FROM call_log
             ORDER BY at DESC, id DESC LIMIT ?1;",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, i64>(4)?,
            ))
        })?;

        let mut calls = Vec::new();
        for row in rows {
            let (id, number, verdict, reason, at) = row?;
            let verdict = Verdict::from_str(&verdict)
                .map_err(|_| StoreError::InvalidRecord(format!("call {id} verdict {verdict}")))?;
            let reason = match reason {
                Some(value) => Some(
                    value
                        .parse()
                        .map_err(|_| StoreError::InvalidRecord(format!("call {id} reason {value}")))?,
                ),
                None => None,
            };
            calls.push(ScreenedCall {
                id,
                number,
                verdict,
                reason,
                at,
            });
        }
        Ok(calls)
    }

    pub fn blocked_count(&self) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM call_log WHERE verdict = 'block';",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
