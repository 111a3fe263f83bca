//! Raw key-value access over the `kv` table.
//!
//! # Responsibility
//! - Provide the fallible get/set operations of the storage service.
//!
//! # Invariants
//! - `kv_set` is an upsert; a key holds at most one value.
//! - Callers above the persistence adapter never see these errors.

use super::DbResult;
use rusqlite::{params, Connection, OptionalExtension};

/// Reads the value stored under `key`, or `None` when the key is absent.
pub fn kv_get(conn: &Connection, key: &str) -> DbResult<Option<String>> {
    let value = conn
        .query_row("SELECT value FROM kv WHERE key = ?1;", [key], |row| {
            row.get::<_, String>(0)
        })
        .optional()?;
    Ok(value)
}

/// Writes `value` under `key`, replacing any previous value.
pub fn kv_set(conn: &Connection, key: &str, value: &str) -> DbResult<()> {
    conn.execute(
        "INSERT INTO kv (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
        params![key, value],
    )?;
    Ok(())
}
