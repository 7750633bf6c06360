//! Error taxonomy for the catalog layer.

use thiserror::Error;

/// Coarse classification of a [`CatalogError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Network failure, non-success status or undecodable response body
  Transport,
  /// Local cache could not be read or written
  Storage,
  /// No snapshot stored
  NotFound,
  /// The caller gave up while a request was in flight
  Cancelled,
}

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("Request to {url} failed: {source}")]
  Transport {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  #[error("Request to {url} returned status {status}")]
  Status {
    url: String,
    status: reqwest::StatusCode,
  },

  #[error("Failed to decode response from {url}: {source}")]
  Decode {
    url: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("API token contains characters not allowed in a request header")]
  InvalidToken,

  #[error("Cache storage error while {context}: {source}")]
  Storage {
    context: &'static str,
    #[source]
    source: rusqlite::Error,
  },

  #[error("Cached item {id} is corrupt: {source}")]
  CorruptItem {
    id: i64,
    #[source]
    source: serde_json::Error,
  },

  #[error("Cache worker failed: {0}")]
  Worker(#[from] tokio::task::JoinError),

  #[error("No catalog snapshot stored")]
  NotFound,

  #[error("Request cancelled")]
  Cancelled,
}

impl CatalogError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Transport { .. } | Self::Status { .. } | Self::Decode { .. } | Self::InvalidToken => {
        ErrorKind::Transport
      }
      Self::Storage { .. } | Self::CorruptItem { .. } | Self::Worker(_) => ErrorKind::Storage,
      Self::NotFound => ErrorKind::NotFound,
      Self::Cancelled => ErrorKind::Cancelled,
    }
  }

  /// Shorthand for wrapping a rusqlite error with what the store was doing.
  pub(crate) fn storage(context: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
    move |source| Self::Storage { context, source }
  }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_kind_groups_variants() {
    let status = CatalogError::Status {
      url: "https://example.test/movie/1".to_string(),
      status: reqwest::StatusCode::NOT_FOUND,
    };
    assert_eq!(status.kind(), ErrorKind::Transport);

    let decode = CatalogError::Decode {
      url: "https://example.test".to_string(),
      source: serde_json::from_str::<u32>("nope").unwrap_err(),
    };
    assert_eq!(decode.kind(), ErrorKind::Transport);

    let storage = CatalogError::storage("reading snapshot")(rusqlite::Error::InvalidQuery);
    assert_eq!(storage.kind(), ErrorKind::Storage);
    assert!(storage.to_string().contains("reading snapshot"));

    assert_eq!(CatalogError::NotFound.kind(), ErrorKind::NotFound);
    assert_eq!(CatalogError::Cancelled.kind(), ErrorKind::Cancelled);
  }

  #[test]
  fn test_status_message_is_readable() {
    let err = CatalogError::Status {
      url: "https://api.themoviedb.org/3/movie/7".to_string(),
      status: reqwest::StatusCode::UNAUTHORIZED,
    };
    assert_eq!(
      err.to_string(),
      "Request to https://api.themoviedb.org/3/movie/7 returned status 401 Unauthorized"
    );
  }
}
