//! Durable slot store backed by SQLite.
//!
//! Two tables: `groups` records which groups exist (create-on-write, like a
//! registry key), `slots` holds the string values. A read open of a group
//! never written to returns absent, matching [`MemoryStore`] semantics.
//!
//! [`MemoryStore`]: crate::core::store::MemoryStore

use crate::core::error::ReattachError;
use crate::core::store::{SlotStore, StoreGroup};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::time::Duration;

const STORE_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS groups (
        group_name TEXT PRIMARY KEY
    );
    CREATE TABLE IF NOT EXISTS slots (
        group_name TEXT NOT NULL,
        slot_key TEXT NOT NULL,
        value TEXT NOT NULL,
        PRIMARY KEY (group_name, slot_key)
    );
";

/// Slot store over a local SQLite database file. The file and schema are
/// created on the first writable open.
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        SqliteStore {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection, ReattachError> {
        let conn = Connection::open(&self.db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))?;
        Ok(conn)
    }

    fn open_writable(&self, name: &str) -> Result<SqliteGroup, ReattachError> {
        let conn = self.connect()?;
        conn.execute_batch(STORE_SCHEMA)?;
        conn.execute(
            "INSERT OR IGNORE INTO groups (group_name) VALUES (?1)",
            params![name],
        )?;
        Ok(SqliteGroup {
            conn,
            group_name: name.to_string(),
        })
    }

    fn open_readable(&self, name: &str) -> Result<Option<SqliteGroup>, ReattachError> {
        if !self.db_path.exists() {
            return Ok(None);
        }
        let conn = self.connect()?;
        let known: Option<String> = conn
            .query_row(
                "SELECT group_name FROM groups WHERE group_name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        if known.is_none() {
            return Ok(None);
        }
        Ok(Some(SqliteGroup {
            conn,
            group_name: name.to_string(),
        }))
    }
}

impl SlotStore for SqliteStore {
    fn open_group(&self, name: &str, writable: bool) -> Option<Box<dyn StoreGroup + '_>> {
        if writable {
            match self.open_writable(name) {
                Ok(group) => Some(Box::new(group)),
                Err(_) => None,
            }
        } else {
            match self.open_readable(name) {
                Ok(Some(group)) => Some(Box::new(group)),
                Ok(None) | Err(_) => None,
            }
        }
    }
}

struct SqliteGroup {
    conn: Connection,
    group_name: String,
}

impl StoreGroup for SqliteGroup {
    fn get_value(&self, key: &str) -> Option<String> {
        self.conn
            .query_row(
                "SELECT value FROM slots WHERE group_name = ?1 AND slot_key = ?2",
                params![self.group_name, key],
                |row| row.get(0),
            )
            .optional()
            .ok()
            .flatten()
    }

    fn set_value(&mut self, key: &str, value: &str) -> Result<(), ReattachError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO slots (group_name, slot_key, value) VALUES (?1, ?2, ?3)",
            params![self.group_name, key, value],
        )?;
        Ok(())
    }

    fn delete_value(&mut self, key: &str) -> Result<(), ReattachError> {
        self.conn.execute(
            "DELETE FROM slots WHERE group_name = ?1 AND slot_key = ?2",
            params![self.group_name, key],
        )?;
        Ok(())
    }
}
