//! Local persistence for the catalog list.
//!
//! The cache is single-slot: it holds the most recently fetched list page
//! and nothing else. There is no expiry; a stored snapshot is served until
//! the next successful refresh replaces it.

mod storage;

pub use storage::{SnapshotStore, SqliteSnapshotStore};
