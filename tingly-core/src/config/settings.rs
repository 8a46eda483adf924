//! Console settings.
//!
//! Settings are persisted to the SQLite database as JSON.

use serde::{Deserialize, Serialize};

/// Base URL both API surfaces default to.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Port the proxy server listens on unless configured otherwise.
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Console settings - persisted to the database as JSON.
///
/// The two base URLs are separate because the server-control surface may be
/// served from a different address than the UI-data surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    /// Base URL of the UI-data surface (status, providers, defaults, history).
    pub ui_api_base: String,

    /// Base URL of the server-control surface (start/stop/restart, token).
    pub server_api_base: String,

    /// Port passed to server start/restart requests.
    pub server_port: u16,

    /// How many history entries to request.
    pub history_limit: usize,

    /// Seconds between status refreshes in watch mode.
    pub status_refresh_secs: u64,

    /// Seconds between activity-log refreshes in watch mode.
    pub activity_refresh_secs: u64,

    /// Seconds between request-log refreshes in watch mode.
    pub log_refresh_secs: u64,

    /// Seconds between history refreshes in watch mode.
    pub history_refresh_secs: u64,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            ui_api_base: DEFAULT_API_BASE.to_string(),
            server_api_base: DEFAULT_API_BASE.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            history_limit: 200,
            status_refresh_secs: 30,
            activity_refresh_secs: 10,
            log_refresh_secs: 5,
            history_refresh_secs: 30,
        }
    }
}

impl ConsoleSettings {
    /// Load settings from the database, using defaults for missing values.
    ///
    /// If settings don't exist or can't be parsed, returns defaults.
    pub fn load(db: &crate::db::Database) -> Self {
        let mut settings = Self::default();

        if let Ok(Some(json)) = db.get_setting("console") {
            match serde_json::from_str::<ConsoleSettings>(&json) {
                Ok(loaded) => settings = loaded,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to parse console settings, using defaults");
                }
            }
        }

        settings
    }

    /// Save settings to the database.
    pub fn save(&self, db: &crate::db::Database) -> anyhow::Result<()> {
        let json = serde_json::to_string(self)?;
        db.set_setting("console", &json)?;
        Ok(())
    }

    /// Validate and clamp settings to usable values.
    pub fn validate(&mut self) {
        if self.ui_api_base.trim().is_empty() {
            self.ui_api_base = DEFAULT_API_BASE.to_string();
        }
        if self.server_api_base.trim().is_empty() {
            self.server_api_base = DEFAULT_API_BASE.to_string();
        }
        if self.server_port == 0 {
            self.server_port = DEFAULT_SERVER_PORT;
        }

        self.history_limit = self.history_limit.clamp(1, 10_000);
        self.status_refresh_secs = self.status_refresh_secs.max(1);
        self.activity_refresh_secs = self.activity_refresh_secs.max(1);
        self.log_refresh_secs = self.log_refresh_secs.max(1);
        self.history_refresh_secs = self.history_refresh_secs.max(1);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_db() -> (TempDir, crate::db::Database) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db = crate::db::Database::open_at(db_path).unwrap();
        db.migrate().unwrap();
        (temp_dir, db)
    }

    #[test]
    fn test_defaults() {
        let settings = ConsoleSettings::default();
        assert_eq!(settings.ui_api_base, DEFAULT_API_BASE);
        assert_eq!(settings.server_port, 8080);
        assert_eq!(settings.history_limit, 200);
        assert_eq!(settings.log_refresh_secs, 5);
    }

    #[test]
    fn test_load_missing_returns_defaults() {
        let (_temp, db) = setup_test_db();
        let settings = ConsoleSettings::load(&db);
        assert_eq!(settings, ConsoleSettings::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let (_temp, db) = setup_test_db();

        let mut settings = ConsoleSettings::default();
        settings.server_api_base = "http://10.0.0.5:9090".to_string();
        settings.history_limit = 500;
        settings.save(&db).unwrap();

        let loaded = ConsoleSettings::load(&db);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_survives_corrupted_json() {
        let (_temp, db) = setup_test_db();
        db.set_setting("console", "{ not json").unwrap();

        let settings = ConsoleSettings::load(&db);
        assert_eq!(settings, ConsoleSettings::default());
    }

    #[test]
    fn test_load_ignores_unknown_fields() {
        let (_temp, db) = setup_test_db();
        db.set_setting(
            "console",
            r#"{"ui_api_base": "http://localhost:3000", "layout_mode": "wide"}"#,
        )
        .unwrap();

        let settings = ConsoleSettings::load(&db);
        assert_eq!(settings.ui_api_base, "http://localhost:3000");
        assert_eq!(settings.server_port, DEFAULT_SERVER_PORT);
    }

    #[test]
    fn test_validate_clamps_degenerate_values() {
        let mut settings = ConsoleSettings {
            ui_api_base: "  ".to_string(),
            server_api_base: String::new(),
            server_port: 0,
            history_limit: 0,
            status_refresh_secs: 0,
            activity_refresh_secs: 0,
            log_refresh_secs: 0,
            history_refresh_secs: 0,
        };
        settings.validate();

        assert_eq!(settings.ui_api_base, DEFAULT_API_BASE);
        assert_eq!(settings.server_api_base, DEFAULT_API_BASE);
        assert_eq!(settings.server_port, DEFAULT_SERVER_PORT);
        assert_eq!(settings.history_limit, 1);
        assert_eq!(settings.status_refresh_secs, 1);
    }
}
