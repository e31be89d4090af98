use crate::models::now_millis;
use crate::{Error, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

use super::KeyValueStore;

/// SQLite-backed key-value slots
pub struct SqliteStore {
    db_path: PathBuf,
    conn: Connection,
}

impl SqliteStore {
    /// Open the database at `db_path`, creating it and its schema if needed
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&db_path)?;
        Self::initialize_schema(&conn)?;
        log::debug!("opened slot database at {}", db_path.display());

        Ok(Self { db_path, conn })
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            db_path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Initialize the database schema
    fn initialize_schema(conn: &Connection) -> Result<()> {
        let schema = include_str!("../../../core/schema.sql");
        conn.execute_batch(schema)?;
        Ok(())
    }

    /// Get the database path
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Get the current schema version
    pub fn schema_version(&self) -> Result<i32> {
        let version: String = self.conn.query_row(
            "SELECT value FROM metadata WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )?;
        
        version.parse::<i32>()
            .map_err(|_| Error::InvalidInput("Invalid schema version".to_string()))
    }

    /// Backup the database
    pub fn backup<P: AsRef<Path>>(&self, backup_path: P) -> Result<()> {
        std::fs::copy(&self.db_path, backup_path)?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now_millis()],
        )?;
        Ok(())
    }
}
