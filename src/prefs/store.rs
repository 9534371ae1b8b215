//! Key-value backends for persisted preferences.

use color_eyre::{eyre::eyre, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// String key-value storage that survives restarts.
pub trait PreferenceStore: Send + Sync {
  /// Stored value for `key`, if any.
  fn get(&self, key: &str) -> Result<Option<String>>;

  /// Insert or replace the value for `key`.
  fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// SQLite-backed preference storage.
pub struct SqliteStore {
  conn: Mutex<Connection>,
}

impl SqliteStore {
  /// Open the store at the default location.
  pub fn open() -> Result<Self> {
    Self::open_at(&Self::default_path()?)
  }

  pub fn open_at(path: &Path) -> Result<Self> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|e| eyre!("Failed to create preferences directory: {}", e))?;
    }

    let conn = Connection::open(path)
      .map_err(|e| eyre!("Failed to open preferences at {}: {}", path.display(), e))?;
    conn
      .execute_batch(SCHEMA)
      .map_err(|e| eyre!("Failed to create preferences table: {}", e))?;

    Ok(Self {
      conn: Mutex::new(conn),
    })
  }

  fn default_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
      .ok_or_else(|| eyre!("Could not determine data directory"))?;

    Ok(data_dir.join("rmdex").join("preferences.db"))
  }
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS preferences (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

impl PreferenceStore for SqliteStore {
  fn get(&self, key: &str) -> Result<Option<String>> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    conn
      .query_row(
        "SELECT value FROM preferences WHERE key = ?1",
        params![key],
        |row| row.get(0),
      )
      .optional()
      .map_err(|e| eyre!("Failed to read preference {}: {}", key, e))
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    conn
      .execute(
        "INSERT OR REPLACE INTO preferences (key, value) VALUES (?1, ?2)",
        params![key, value],
      )
      .map_err(|e| eyre!("Failed to write preference {}: {}", key, e))?;
    Ok(())
  }
}

/// Preferences kept for the lifetime of the process only.
#[derive(Default)]
pub struct MemoryStore {
  values: Mutex<HashMap<String, String>>,
}

impl PreferenceStore for MemoryStore {
  fn get(&self, key: &str) -> Result<Option<String>> {
    let values = self
      .values
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;
    Ok(values.get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    let mut values = self
      .values
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;
    values.insert(key.to_string(), value.to_string());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_sqlite_missing_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open_at(&dir.path().join("prefs.db")).unwrap();
    assert_eq!(store.get("theme").unwrap(), None);
  }

  #[test]
  fn test_sqlite_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open_at(&dir.path().join("prefs.db")).unwrap();
    store.set("theme", "light").unwrap();
    store.set("theme", "dark").unwrap();
    assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
  }

  #[test]
  fn test_sqlite_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("prefs.db");
    {
      let store = SqliteStore::open_at(&path).unwrap();
      store.set("language", "pt-BR").unwrap();
    }
    let store = SqliteStore::open_at(&path).unwrap();
    assert_eq!(store.get("language").unwrap().as_deref(), Some("pt-BR"));
  }

  #[test]
  fn test_memory_store() {
    let store = MemoryStore::default();
    assert_eq!(store.get("k").unwrap(), None);
    store.set("k", "v").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
  }
}
