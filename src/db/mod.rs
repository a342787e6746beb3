use anyhow::{anyhow, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

pub mod models;
use models::*;

use crate::error::StorageDecodeError;
use crate::stats::FilterSpec;

/// Storage key for the saved filter presets.
pub const SAVED_FILTERS_KEY: &str = "winmix_saved_filters";
/// Storage key for the admin connection settings.
pub const ADMIN_CONFIG_KEY: &str = "winmix_supabase_config";

/// Local key/value state backed by SQLite (single connection with mutex)
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the SQLite database at the given path
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::from_connection(conn)
    }

    /// Private in-memory database, used by tests.
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let db = Database {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Run schema migrations (idempotent)
    fn run_migrations(&self) -> Result<()> {
        self.conn()?.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database connection mutex poisoned"))
    }

    // ── Raw key/value ─────────────────────────────────────────────────────────

    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        read_value(&conn, key)
    }

    pub fn put_raw(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;
        write_value(&conn, key, value)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM local_state WHERE key = ?1", params![key])?;
        Ok(())
    }

    // ── JSON values ───────────────────────────────────────────────────────────

    /// Decode the JSON stored under `key`; an absent or malformed value yields the default.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        let conn = self.conn()?;
        load_or_default_in(&conn, key)
    }

    pub fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.put_raw(key, &raw)
    }

    /// Read-modify-write of the JSON value under `key` inside one transaction,
    /// holding the connection lock throughout.
    fn update_json<T, R>(&self, key: &str, f: impl FnOnce(&mut T) -> (R, bool)) -> Result<R>
    where
        T: DeserializeOwned + Serialize + Default,
    {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut value: T = load_or_default_in(&tx, key)?;
        let (result, changed) = f(&mut value);
        if changed {
            write_value(&tx, key, &serde_json::to_string(&value)?)?;
        }
        tx.commit()?;
        Ok(result)
    }

    // ── Saved filters ─────────────────────────────────────────────────────────

    pub fn list_saved_filters(&self) -> Result<Vec<SavedFilter>> {
        self.load_or_default(SAVED_FILTERS_KEY)
    }

    /// Append a named preset and return it.
    pub fn save_filter(&self, name: &str, filters: FilterSpec) -> Result<SavedFilter> {
        let name = name.trim();
        if name.is_empty() {
            anyhow::bail!("filter name must not be empty");
        }
        let saved = SavedFilter {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            filters: filters.normalized(),
            created_at: Some(Utc::now()),
        };
        self.update_json(SAVED_FILTERS_KEY, |all: &mut Vec<SavedFilter>| {
            all.push(saved.clone());
            ((), true)
        })?;
        Ok(saved)
    }

    /// Remove a preset by id; returns whether anything was removed.
    pub fn delete_filter(&self, id: &str) -> Result<bool> {
        self.update_json(SAVED_FILTERS_KEY, |all: &mut Vec<SavedFilter>| {
            let before = all.len();
            all.retain(|f| f.id != id);
            let removed = all.len() != before;
            (removed, removed)
        })
    }

    // ── Admin connection config ───────────────────────────────────────────────

    pub fn get_admin_config(&self) -> Result<AdminConfig> {
        self.load_or_default(ADMIN_CONFIG_KEY)
    }

    pub fn put_admin_config(&self, config: &AdminConfig) -> Result<()> {
        self.put_json(ADMIN_CONFIG_KEY, config)
    }

    pub fn reset_admin_config(&self) -> Result<()> {
        self.remove(ADMIN_CONFIG_KEY)
    }
}

fn read_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM local_state WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

fn write_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO local_state (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET
            value=excluded.value,
            updated_at=excluded.updated_at",
        params![key, value, Utc::now()],
    )?;
    Ok(())
}

fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Result<T, StorageDecodeError> {
    serde_json::from_str(raw).map_err(|source| StorageDecodeError {
        key: key.to_string(),
        source,
    })
}

fn load_or_default_in<T: DeserializeOwned + Default>(conn: &Connection, key: &str) -> Result<T> {
    match read_value(conn, key)?.map(|raw| decode(key, &raw)) {
        None => Ok(T::default()),
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) => {
            warn!("{}; falling back to default", e);
            Ok(T::default())
        }
    }
}

/// SQLite schema (idempotent CREATE IF NOT EXISTS)
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS local_state (
    key         TEXT    PRIMARY KEY,
    value       TEXT    NOT NULL,
    updated_at  TEXT    NOT NULL
);
"#;
