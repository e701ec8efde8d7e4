use std::fs;
use std::path::Path;

use super::Storage;
use crate::{error::Error, Result};
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value storage kept in a single SQLite table.
pub struct SqliteStorage(Connection);

impl SqliteStorage {
    pub fn new(connection: Connection) -> Result<Self> {
        let storage = Self(connection);
        storage.init_database()?;
        Ok(storage)
    }

    /// Opens (or creates) the database file, creating parent directories as needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        Self::new(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    fn init_database(&self) -> Result<()> {
        let stmt = format!(
            "CREATE TABLE IF NOT EXISTS {t_name} ({key_col} TEXT PRIMARY KEY, {value_col} TEXT NOT NULL);",
            t_name = Self::KV_TABLE_NAME,
            key_col = Self::KV_T_KEY_COL,
            value_col = Self::KV_T_VALUE_COL
        );

        if let Err(e) = self.0.execute(&stmt, ()) {
            return Err(Error::DatabaseOperationFailed(e.to_string()));
        };

        Ok(())
    }
}

impl Storage for SqliteStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let stmt = format!(
            "SELECT {value_col} FROM {t_name} WHERE {key_col} = ?1;",
            t_name = Self::KV_TABLE_NAME,
            key_col = Self::KV_T_KEY_COL,
            value_col = Self::KV_T_VALUE_COL
        );

        let value = self
            .0
            .query_row(&stmt, params![key], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let stmt = format!(
            "INSERT INTO {t_name} ({key_col}, {value_col}) VALUES (?1, ?2) \
             ON CONFLICT({key_col}) DO UPDATE SET {value_col} = excluded.{value_col};",
            t_name = Self::KV_TABLE_NAME,
            key_col = Self::KV_T_KEY_COL,
            value_col = Self::KV_T_VALUE_COL
        );

        self.0.execute(&stmt, params![key, value])?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let stmt = format!(
            "DELETE FROM {t_name} WHERE {key_col} = ?1;",
            t_name = Self::KV_TABLE_NAME,
            key_col = Self::KV_T_KEY_COL
        );

        self.0.execute(&stmt, params![key])?;
        Ok(())
    }
}
