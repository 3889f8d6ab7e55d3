//! SQLite-backed durable storage.
//!
//! TaskFlow persists very little: a key-value table whose only well-known
//! entry is the tree's completed-cycles tally.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use super::data_dir;
use crate::error::{DatabaseError, Result};
use crate::growth::CycleStore;

const COMPLETED_CYCLES_KEY: &str = "completed_cycles";

/// SQLite database holding the key-value store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/taskflow.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("taskflow.db"))
    }

    /// Open (or create) the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

impl CycleStore for Database {
    fn load_completed_cycles(&self) -> Result<u64> {
        match self.kv_get(COMPLETED_CYCLES_KEY)? {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                DatabaseError::CorruptValue {
                    key: COMPLETED_CYCLES_KEY.into(),
                    value: raw.clone(),
                }
                .into()
            }),
            None => Ok(0),
        }
    }

    fn save_completed_cycles(&mut self, cycles: u64) -> Result<()> {
        self.kv_set(COMPLETED_CYCLES_KEY, &cycles.to_string())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_set("test", "again").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "again");
    }

    #[test]
    fn completed_cycles_default_to_zero() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.load_completed_cycles().unwrap(), 0);
    }

    #[test]
    fn completed_cycles_roundtrip() {
        let mut db = Database::open_memory().unwrap();
        db.save_completed_cycles(12).unwrap();
        assert_eq!(db.load_completed_cycles().unwrap(), 12);
    }

    #[test]
    fn corrupt_tally_is_reported() {
        let db = Database::open_memory().unwrap();
        db.kv_set(COMPLETED_CYCLES_KEY, "lots").unwrap();
        let err = db.load_completed_cycles().unwrap_err();
        assert!(matches!(
            err,
            CoreError::Database(DatabaseError::CorruptValue { .. })
        ));
    }
}
