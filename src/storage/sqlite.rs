use std::path::Path;

use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};

use super::{Storage, StorageError};

const TEMPLATE_DATABASE_UP_SQL: &str = "
CREATE TABLE IF NOT EXISTS storage (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);
";

/// Key-value storage in a single SQLite table
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open the database at `path`, creating it and its directory if needed
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = if path.exists() {
            info!("Connecting to database: {}", path.display());
            Connection::open(path)?
        } else {
            info!("Creating database: {}", path.display());
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Connection::open(path)?
        };

        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(TEMPLATE_DATABASE_UP_SQL)?;
        Ok(Self { conn })
    }
}

impl Storage for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        debug!("Writing {} bytes to `{}`", value.len(), key);
        self.conn.execute(
            "INSERT INTO storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}
