//! Snapshot storage trait and SQLite implementation.

use chrono::{DateTime, Utc};
use color_eyre::{eyre::eyre, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::catalog::types::{ListItem, ListSnapshot};
use crate::error::{CatalogError, CatalogResult};

/// Trait for single-slot list snapshot stores.
///
/// A store holds at most one snapshot. Writes replace it wholesale and
/// readers never see a snapshot paired with another snapshot's items.
pub trait SnapshotStore: Send + Sync {
  /// Whether a snapshot has been written (and not cleared).
  fn has_snapshot(&self) -> CatalogResult<bool>;

  /// Read the stored snapshot with its items in their original order.
  ///
  /// Fails with [`CatalogError::NotFound`] when nothing is stored.
  fn read_snapshot(&self) -> CatalogResult<ListSnapshot>;

  /// Replace the stored snapshot and all of its items.
  fn replace_snapshot(&self, snapshot: &ListSnapshot) -> CatalogResult<()>;

  /// When the stored snapshot was written.
  fn fetched_at(&self) -> CatalogResult<Option<DateTime<Utc>>>;

  /// Drop the stored snapshot and its items.
  fn clear(&self) -> CatalogResult<()>;
}

/// SQLite-based snapshot storage.
pub struct SqliteSnapshotStore {
  conn: Mutex<Connection>,
}

impl SqliteSnapshotStore {
  /// Open (or create) the cache database at `path`, or at the default
  /// location when `path` is `None`.
  pub fn open(path: Option<&Path>) -> Result<Self> {
    let path = match path {
      Some(p) => p.to_path_buf(),
      None => Self::default_path()?,
    };

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|e| eyre!("Failed to create cache directory: {}", e))?;
    }

    let conn = Connection::open(&path)
      .map_err(|e| eyre!("Failed to open cache database at {}: {}", path.display(), e))?;

    Self::with_connection(conn)
  }

  /// Open a throwaway store that lives only as long as the process.
  pub fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory()
      .map_err(|e| eyre!("Failed to open in-memory cache database: {}", e))?;
    Self::with_connection(conn)
  }

  fn with_connection(conn: Connection) -> Result<Self> {
    let store = Self {
      conn: Mutex::new(conn),
    };
    store.run_migrations()?;
    Ok(store)
  }

  /// Get the default database path.
  pub fn default_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
      .ok_or_else(|| eyre!("Could not determine data directory"))?;

    Ok(data_dir.join("reelsync").join("cache.db"))
  }

  /// Run database migrations for cache tables.
  ///
  /// The cache is disposable: a database written with another schema
  /// version is dropped and rebuilt rather than upgraded.
  fn run_migrations(&self) -> Result<()> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    let version: i64 = conn
      .query_row("PRAGMA user_version", [], |row| row.get(0))
      .map_err(|e| eyre!("Failed to read cache schema version: {}", e))?;

    if version != SCHEMA_VERSION {
      debug!(from = version, to = SCHEMA_VERSION, "Rebuilding cache schema");
      conn
        .execute_batch("DROP TABLE IF EXISTS list_items; DROP TABLE IF EXISTS list_snapshot;")
        .map_err(|e| eyre!("Failed to drop stale cache tables: {}", e))?;
    }

    conn
      .execute_batch(CACHE_SCHEMA)
      .map_err(|e| eyre!("Failed to run cache migrations: {}", e))?;
    conn
      .pragma_update(None, "user_version", SCHEMA_VERSION)
      .map_err(|e| eyre!("Failed to record cache schema version: {}", e))?;

    Ok(())
  }

  // Writes are transactional, so a poisoned connection is still consistent.
  fn lock(&self) -> MutexGuard<'_, Connection> {
    self.conn.lock().unwrap_or_else(|e| e.into_inner())
  }

  /// Run raw SQL against the cache, for fault injection in tests.
  #[cfg(test)]
  pub(crate) fn execute_batch(&self, sql: &str) {
    self.lock().execute_batch(sql).unwrap();
  }
}

const SCHEMA_VERSION: i64 = 2;

/// Schema for cache tables.
///
/// `list_snapshot` has a single allowed row (`slot = 0`). Items are keyed by
/// movie id, so ids are unique within the stored snapshot. Everything else
/// about an item lives in its JSON `data`.
const CACHE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS list_snapshot (
    slot INTEGER PRIMARY KEY CHECK (slot = 0),
    page INTEGER NOT NULL,
    total_pages INTEGER NOT NULL,
    total_results INTEGER NOT NULL,
    fetched_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS list_items (
    id INTEGER PRIMARY KEY,
    position INTEGER NOT NULL,
    data BLOB NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_list_items_position ON list_items(position);
"#;

impl SnapshotStore for SqliteSnapshotStore {
  fn has_snapshot(&self) -> CatalogResult<bool> {
    let conn = self.lock();
    let count: i64 = conn
      .query_row("SELECT COUNT(*) FROM list_snapshot", [], |row| row.get(0))
      .map_err(CatalogError::storage("checking for snapshot"))?;
    Ok(count > 0)
  }

  fn read_snapshot(&self) -> CatalogResult<ListSnapshot> {
    let conn = self.lock();

    let header: Option<(u32, u32, u64)> = conn
      .query_row(
        "SELECT page, total_pages, total_results FROM list_snapshot WHERE slot = 0",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
      )
      .optional()
      .map_err(CatalogError::storage("reading snapshot"))?;

    let (page, total_pages, total_results) = header.ok_or(CatalogError::NotFound)?;

    let mut stmt = conn
      .prepare("SELECT id, data FROM list_items ORDER BY position")
      .map_err(CatalogError::storage("preparing item query"))?;

    let rows = stmt
      .query_map([], |row| {
        let id: i64 = row.get(0)?;
        let data: Vec<u8> = row.get(1)?;
        Ok((id, data))
      })
      .map_err(CatalogError::storage("reading items"))?;

    let mut items = Vec::new();
    for row in rows {
      let (id, data) = row.map_err(CatalogError::storage("reading items"))?;
      let item: ListItem =
        serde_json::from_slice(&data).map_err(|source| CatalogError::CorruptItem { id, source })?;
      items.push(item);
    }

    Ok(ListSnapshot {
      page,
      total_pages,
      total_results,
      items,
    })
  }

  fn replace_snapshot(&self, snapshot: &ListSnapshot) -> CatalogResult<()> {
    // Serialize before touching the database so a bad item can't abort mid-write
    let encoded = snapshot
      .items
      .iter()
      .map(|item| {
        serde_json::to_vec(item)
          .map(|data| (item, data))
          .map_err(|source| CatalogError::CorruptItem {
            id: item.id,
            source,
          })
      })
      .collect::<CatalogResult<Vec<_>>>()?;

    let mut conn = self.lock();
    let tx = conn
      .transaction()
      .map_err(CatalogError::storage("beginning transaction"))?;

    tx.execute("DELETE FROM list_items", [])
      .map_err(CatalogError::storage("clearing items"))?;
    tx.execute("DELETE FROM list_snapshot", [])
      .map_err(CatalogError::storage("clearing snapshot"))?;

    tx.execute(
      "INSERT INTO list_snapshot (slot, page, total_pages, total_results, fetched_at)
       VALUES (0, ?, ?, ?, datetime('now'))",
      params![snapshot.page, snapshot.total_pages, snapshot.total_results],
    )
    .map_err(CatalogError::storage("writing snapshot"))?;

    {
      let mut stmt = tx
        .prepare(
          "INSERT OR REPLACE INTO list_items (id, position, data)
           VALUES (?, ?, ?)",
        )
        .map_err(CatalogError::storage("preparing item insert"))?;

      for (position, (item, data)) in encoded.iter().enumerate() {
        stmt
          .execute(params![item.id, position as i64, data])
          .map_err(CatalogError::storage("writing items"))?;
      }
    }

    // Dropping `tx` on any early return above rolls everything back
    tx.commit()
      .map_err(CatalogError::storage("committing snapshot"))?;

    debug!(
      page = snapshot.page,
      items = snapshot.items.len(),
      "Replaced cached snapshot"
    );
    Ok(())
  }

  fn fetched_at(&self) -> CatalogResult<Option<DateTime<Utc>>> {
    let conn = self.lock();
    let raw: Option<String> = conn
      .query_row(
        "SELECT fetched_at FROM list_snapshot WHERE slot = 0",
        [],
        |row| row.get(0),
      )
      .optional()
      .map_err(CatalogError::storage("reading snapshot timestamp"))?;

    Ok(raw.as_deref().and_then(parse_datetime))
  }

  fn clear(&self) -> CatalogResult<()> {
    let mut conn = self.lock();
    let tx = conn
      .transaction()
      .map_err(CatalogError::storage("beginning transaction"))?;
    tx.execute("DELETE FROM list_items", [])
      .map_err(CatalogError::storage("clearing items"))?;
    tx.execute("DELETE FROM list_snapshot", [])
      .map_err(CatalogError::storage("clearing snapshot"))?;
    tx.commit()
      .map_err(CatalogError::storage("committing clear"))?;
    Ok(())
  }
}

/// Parse a datetime string from SQLite format ("YYYY-MM-DD HH:MM:SS").
fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
  chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
    .map(|dt| dt.and_utc())
    .ok()
}
