//! Key-value settings backed by SQLite.
//!
//! Holds the bearer token (key `token`) next to client settings such as
//! `api_url`. The orchestrator never touches this directly; it reads the
//! token through [`StoredToken`](crate::auth::StoredToken).

use anyhow::{Context, Result, bail};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::consts::{API_URL_KEY, DEFAULT_API_URL};

/// Persistent key-value store.
pub struct Config {
    conn: Mutex<Connection>,
}

impl Config {
    /// Open or create the settings table in the given database.
    /// Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open config database")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS settings (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .context("failed to create settings table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn in_memory() -> Result<Self> {
        Self::open(":memory:")
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Like [`get`](Self::get), but an unset key is an error.
    pub fn require(&self, key: &str) -> Result<String> {
        match self.get(key)? {
            Some(value) => Ok(value),
            None => bail!("{key} is not set"),
        }
    }

    /// Upsert a value.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM settings WHERE key = ?1", [key])?;
        Ok(())
    }

    /// Resolve the API base URL: explicit override, then the stored
    /// `api_url`, then [`DEFAULT_API_URL`]. Trailing slashes are dropped.
    pub fn api_url(&self, override_url: Option<&str>) -> Result<String> {
        let url = match override_url {
            Some(url) => url.to_string(),
            None => self
                .get(API_URL_KEY)?
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        };
        Ok(url.trim_end_matches('/').to_string())
    }
}

/// Pick the database path: an explicit path as given, otherwise `default`
/// with its parent directory created.
pub fn resolve_db_path(flag: Option<String>, default: Option<PathBuf>) -> Result<String> {
    if let Some(path) = flag {
        return Ok(path);
    }
    let path = default.context("cannot determine home directory")?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    path.to_str()
        .map(str::to_string)
        .context("database path is not valid UTF-8")
}
