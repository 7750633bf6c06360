//! Catalog synchronization for TMDB: a single-slot SQLite snapshot cache in
//! front of the discover and movie details endpoints.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod view;

pub use error::{CatalogError, ErrorKind};
