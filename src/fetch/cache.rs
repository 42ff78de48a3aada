use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

/// SQLite-backed store of page bodies keyed by URL, with a freshness window.
pub struct ResponseCache {
    conn: Mutex<Connection>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn open(path: &Path, ttl: Duration) -> Result<Self> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create cache directory {}", dir.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open cache at {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::with_connection(conn, ttl)
    }

    #[cfg(test)]
    pub fn in_memory(ttl: Duration) -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?, ttl)
    }

    fn with_connection(conn: Connection, ttl: Duration) -> Result<Self> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS responses (
                url        TEXT PRIMARY KEY,
                body       TEXT NOT NULL,
                fetched_at INTEGER NOT NULL
            );
            ",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
            ttl,
        })
    }

    /// Cached body for `url` if it was stored within the freshness window.
    pub fn get(&self, url: &str) -> Result<Option<String>> {
        let oldest = Utc::now().timestamp() - self.ttl.as_secs() as i64;
        let conn = self.lock()?;
        let body = conn
            .query_row(
                "SELECT body FROM responses WHERE url = ?1 AND fetched_at > ?2",
                params![url, oldest],
                |row| row.get(0),
            )
            .optional()?;
        Ok(body)
    }

    pub fn put(&self, url: &str, body: &str) -> Result<()> {
        self.put_at(url, body, Utc::now().timestamp())
    }

    fn put_at(&self, url: &str, body: &str, fetched_at: i64) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO responses (url, body, fetched_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(url) DO UPDATE SET body = excluded.body, fetched_at = excluded.fetched_at",
            params![url, body, fetched_at],
        )?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("response cache lock poisoned"))
    }
}
