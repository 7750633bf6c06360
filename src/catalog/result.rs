use crate::error::CatalogError;

/// Outcome of a repository operation.
///
/// This is the only way failures leave the repository. Callers match both
/// arms; there are no `unwrap`-style accessors.
#[derive(Debug)]
pub enum FetchResult<T> {
  Success(T),
  Error {
    /// Human-readable description
    message: Option<String>,
    cause: Option<CatalogError>,
  },
}

impl<T> From<CatalogError> for FetchResult<T> {
  fn from(err: CatalogError) -> Self {
    FetchResult::Error {
      message: Some(err.to_string()),
      cause: Some(err),
    }
  }
}
