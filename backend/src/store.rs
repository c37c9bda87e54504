//! Local persistence of the widget snapshot in a single sqlite table.

use crate::error::{Result, WidgetError};
use common::model::persisted::WidgetSnapshot;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

const SNAPSHOT_KEY: &str = "snapshot";

pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Opens (or creates) the database file and its table.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        store.connect()?.execute(
            "CREATE TABLE IF NOT EXISTS widget_state (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )?;
        Ok(store)
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    pub fn load(&self) -> Result<Option<WidgetSnapshot>> {
        let conn = self.connect()?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM widget_state WHERE key = ?1",
                params![SNAPSHOT_KEY],
                |row| row.get(0),
            )
            .optional()?;
        raw.map(|raw| {
            serde_json::from_str(&raw).map_err(|e| WidgetError::Storage(e.to_string()))
        })
        .transpose()
    }

    pub fn save(&self, snapshot: &WidgetSnapshot) -> Result<()> {
        let raw = serde_json::to_string(snapshot).map_err(|e| WidgetError::Storage(e.to_string()))?;
        self.connect()?.execute(
            "INSERT OR REPLACE INTO widget_state (key, value) VALUES (?1, ?2)",
            params![SNAPSHOT_KEY, raw],
        )?;
        Ok(())
    }
}
