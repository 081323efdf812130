//! Durable seen-set store backed by SQLite.
//!
//! The frontier records every URL it has ever accepted here, keyed by its
//! fingerprint, together with whether the page was downloaded. Entries are
//! written through on every insert and never deleted, which is what makes
//! crash-and-resume possible: on a non-restart startup the frontier
//! re-queues every entry still marked `downloaded = 0`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS seen_urls (
    fingerprint TEXT PRIMARY KEY,
    url TEXT NOT NULL,
    downloaded INTEGER NOT NULL DEFAULT 0
);
"#;

/// Persistent `fingerprint -> (url, downloaded)` mapping.
///
/// Stored at `{save_file}.sqlite`; SQLite's WAL companions account for the
/// additional files next to it.
pub struct SeenIndex {
    pool: SqlitePool,
}

impl SeenIndex {
    /// Open the store at `{save_file}.sqlite`, creating it (and its parent
    /// directory) if missing.
    pub async fn open(save_file: &Path) -> Result<Self> {
        if let Some(parent) = save_file.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let db_path = db_path(save_file);
        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open seen-set store {}", db_path.display()))?;

        sqlx::query(SCHEMA_SQL)
            .execute(&pool)
            .await
            .context("failed to initialize seen-set schema")?;

        Ok(Self { pool })
    }

    /// Insert a fresh `(url, downloaded=false)` entry. Returns `false` when
    /// the fingerprint was already present (the entry is left untouched).
    pub async fn insert_new(&self, fingerprint: &str, url: &str) -> Result<bool> {
        let result =
            sqlx::query("INSERT OR IGNORE INTO seen_urls (fingerprint, url, downloaded) VALUES (?, ?, 0)")
                .bind(fingerprint)
                .bind(url)
                .execute(&self.pool)
                .await
                .context("failed to insert seen-set entry")?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip an existing entry to `downloaded = true`.
    pub async fn set_downloaded(&self, fingerprint: &str) -> Result<()> {
        sqlx::query("UPDATE seen_urls SET downloaded = 1 WHERE fingerprint = ?")
            .bind(fingerprint)
            .execute(&self.pool)
            .await
            .context("failed to mark seen-set entry downloaded")?;
        Ok(())
    }

    pub async fn contains(&self, fingerprint: &str) -> Result<bool> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM seen_urls WHERE fingerprint = ?")
            .bind(fingerprint)
            .fetch_optional(&self.pool)
            .await
            .context("failed to query seen-set entry")?;
        Ok(row.is_some())
    }

    pub async fn is_downloaded(&self, fingerprint: &str) -> Result<bool> {
        let row: Option<(bool,)> =
            sqlx::query_as("SELECT downloaded FROM seen_urls WHERE fingerprint = ?")
                .bind(fingerprint)
                .fetch_optional(&self.pool)
                .await
                .context("failed to query seen-set entry")?;
        Ok(row.is_some_and(|(downloaded,)| downloaded))
    }

    /// Every `(fingerprint, url, downloaded)` entry, for restart recovery.
    pub async fn scan(&self) -> Result<Vec<(String, String, bool)>> {
        let rows: Vec<(String, String, bool)> =
            sqlx::query_as("SELECT fingerprint, url, downloaded FROM seen_urls")
                .fetch_all(&self.pool)
                .await
                .context("failed to scan seen-set store")?;
        Ok(rows)
    }

    /// Close the connection pool, flushing outstanding writes.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn db_path(save_file: &Path) -> PathBuf {
    let mut path = save_file.as_os_str().to_owned();
    path.push(".sqlite");
    PathBuf::from(path)
}

/// Files belonging to the store: everything in `save_file`'s directory whose
/// name starts with `save_file`'s file name (the database plus WAL/SHM
/// companions).
pub fn store_files(save_file: &Path) -> Vec<PathBuf> {
    let Some(file_name) = save_file.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        return Vec::new();
    };
    let dir = match save_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let Ok(entries) = std::fs::read_dir(&dir) else {
        return Vec::new();
    };
    entries
        .flatten()
        .filter(|entry| {
            entry.file_name().to_string_lossy().starts_with(&file_name)
                && entry.file_type().is_ok_and(|t| t.is_file())
        })
        .map(|entry| entry.path())
        .collect()
}

/// Delete every store file for a restart.
pub fn delete_store_files(save_file: &Path) -> Result<()> {
    for path in store_files(save_file) {
        std::fs::remove_file(&path)
            .with_context(|| format!("failed to delete {}", path.display()))?;
    }
    Ok(())
}
