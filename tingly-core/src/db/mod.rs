//! SQLite database layer for Tingly Console.
//!
//! Provides persistent storage for:
//! - Settings (console preferences: API base URLs, poll intervals)
//! - UI state (page-local blobs such as the custom-models list)
//!
//! The `ui_state` table is exposed to the custom-model store through the
//! [`StateStore`](crate::models::StateStore) trait, so store logic stays
//! testable without a database.

mod migrations;

use rusqlite::Connection;
use std::path::PathBuf;

use crate::models::{StateStore, StoreError};

/// Database connection wrapper.
///
/// Provides a high-level API for interacting with the SQLite database.
/// Automatically handles connection setup and migrations.
pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    /// Open the database at the default location.
    ///
    /// Default path: `~/.local/share/tingly-console/console.db`
    pub fn open() -> anyhow::Result<Self> {
        let path = Self::default_path()?;
        Self::open_at(path)
    }

    /// Open the database at a specific path.
    ///
    /// Creates parent directories if they don't exist.
    pub fn open_at(path: PathBuf) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;

        Ok(Self { conn, path })
    }

    /// Get the default database path.
    ///
    /// Returns `~/.local/share/tingly-console/console.db` (or platform equivalent).
    pub fn default_path() -> anyhow::Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".local/share")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;

        Ok(data_dir.join("tingly-console").join("console.db"))
    }

    /// Run database migrations.
    ///
    /// Safe to call multiple times - migrations are tracked and only run once.
    pub fn migrate(&self) -> anyhow::Result<()> {
        migrations::run_migrations(&self.conn)?;
        Ok(())
    }

    /// Get a reference to the underlying connection.
    ///
    /// Use sparingly - prefer the high-level methods when possible.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Get the database file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    // =========================================================================
    // Settings Storage
    // =========================================================================

    /// Save a setting to the database (upsert).
    pub fn set_setting(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO settings (key, value, updated_at) VALUES (?, ?, unixepoch())
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            [key, value],
        )?;
        Ok(())
    }

    /// Get a setting from the database.
    ///
    /// Returns `None` if the setting doesn't exist.
    pub fn get_setting(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM settings WHERE key = ?")?;
        let result = stmt.query_row([key], |row| row.get(0));
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Delete a setting from the database.
    pub fn delete_setting(&self, key: &str) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM settings WHERE key = ?", [key])?;
        Ok(())
    }

    // =========================================================================
    // UI State Storage
    // =========================================================================

    /// Save a UI state blob (upsert).
    pub fn set_state(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO ui_state (key, value, updated_at) VALUES (?, ?, unixepoch())
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            [key, value],
        )?;
        Ok(())
    }

    /// Get a UI state blob.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get_state(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM ui_state WHERE key = ?")?;
        let result = stmt.query_row([key], |row| row.get(0));
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Delete a UI state blob.
    ///
    /// No-op if the key doesn't exist.
    pub fn remove_state(&self, key: &str) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM ui_state WHERE key = ?", [key])?;
        Ok(())
    }
}

impl StateStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.get_state(key)
            .map_err(|e| StoreError::Storage(e.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set_state(key, value)
            .map_err(|e| StoreError::Storage(e.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.remove_state(key)
            .map_err(|e| StoreError::Storage(e.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_db() -> (TempDir, Database) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db = Database::open_at(db_path).unwrap();
        db.migrate().unwrap();
        (temp_dir, db)
    }

    #[test]
    fn test_open_and_migrate() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.db");
        let db = Database::open_at(path).unwrap();
        db.migrate().unwrap();
    }

    #[test]
    fn test_open_at_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let nested_path = tmp.path().join("deep").join("nested").join("test.db");

        assert!(!nested_path.parent().unwrap().exists());

        let _db = Database::open_at(nested_path.clone()).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_open_at_reuses_existing_database() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.db");

        // First open - create and populate
        {
            let db = Database::open_at(path.clone()).unwrap();
            db.migrate().unwrap();
            db.set_state("blob", "{}").unwrap();
        }

        // Second open - should see existing data
        {
            let db = Database::open_at(path).unwrap();
            let value = db.get_state("blob").unwrap();
            assert_eq!(value, Some("{}".to_string()));
        }
    }

    #[test]
    fn test_default_path_returns_valid_path() {
        if let Ok(path) = Database::default_path() {
            assert!(path.ends_with("tingly-console/console.db"));
            assert!(path.parent().is_some());
        }
    }

    #[test]
    fn test_setting_roundtrip_and_upsert() {
        let (_temp, db) = setup_test_db();

        assert_eq!(db.get_setting("settings").unwrap(), None);

        db.set_setting("settings", "old").unwrap();
        db.set_setting("settings", "new").unwrap();
        assert_eq!(db.get_setting("settings").unwrap(), Some("new".to_string()));

        db.delete_setting("settings").unwrap();
        assert_eq!(db.get_setting("settings").unwrap(), None);
    }

    #[test]
    fn test_state_roundtrip() {
        let (_temp, db) = setup_test_db();

        db.set_state("custom_models", r#"{"openai":["gpt-4o"]}"#)
            .unwrap();
        assert_eq!(
            db.get_state("custom_models").unwrap(),
            Some(r#"{"openai":["gpt-4o"]}"#.to_string())
        );

        db.remove_state("custom_models").unwrap();
        assert_eq!(db.get_state("custom_models").unwrap(), None);

        // Removing a missing key is a no-op
        db.remove_state("custom_models").unwrap();
    }

    #[test]
    fn test_settings_and_state_tables_are_independent() {
        let (_temp, db) = setup_test_db();

        db.set_setting("k", "setting").unwrap();
        db.set_state("k", "state").unwrap();

        assert_eq!(db.get_setting("k").unwrap(), Some("setting".to_string()));
        assert_eq!(db.get_state("k").unwrap(), Some("state".to_string()));
    }
}
