//! Catalog repository: the cache-or-network policy for list and detail reads.

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::cache::SnapshotStore;
use crate::error::{CatalogError, CatalogResult};

use super::client::CatalogSource;
use super::mapping;
use super::result::FetchResult;
use super::types::{Details, ListQuery, ListSnapshot};

/// Serves the catalog list from the local snapshot cache and details from
/// the network.
///
/// The list cache has no expiry. A stored snapshot is returned as-is until a
/// forced refresh replaces it. Overlapping calls are independent: nothing is
/// deduplicated and the last successful write wins.
pub struct CatalogRepository<R, S> {
  remote: R,
  store: Arc<S>,
  query: ListQuery,
}

impl<R, S> CatalogRepository<R, S>
where
  R: CatalogSource,
  S: SnapshotStore + 'static,
{
  pub fn new(remote: R, store: S) -> Self {
    Self {
      remote,
      store: Arc::new(store),
      query: ListQuery::default(),
    }
  }

  /// Override the query used for list refreshes (defaults to page 1, no
  /// adult or video entries).
  pub fn with_list_query(mut self, query: ListQuery) -> Self {
    self.query = query;
    self
  }

  /// Get the catalog list.
  ///
  /// 1. If `force_refresh` is set or nothing is cached, fetch the configured
  ///    page and replace the cached snapshot with it
  /// 2. Return whatever the cache holds
  ///
  /// A failed fetch leaves the cache untouched. `cancel` is only observed
  /// while waiting on the network; once a response is in hand the cache
  /// write runs to completion.
  pub async fn fetch_list(
    &self,
    force_refresh: bool,
    cancel: &CancellationToken,
  ) -> FetchResult<ListSnapshot> {
    match self.load_list(force_refresh, cancel).await {
      Ok(snapshot) => FetchResult::Success(snapshot),
      Err(err) => {
        warn!(force_refresh, error = %err, "Catalog list fetch failed");
        err.into()
      }
    }
  }

  /// Get full details for one movie. Always goes to the network.
  pub async fn fetch_details(&self, id: i64, cancel: &CancellationToken) -> FetchResult<Details> {
    match until_cancelled(cancel, self.remote.fetch_details(id)).await {
      Ok(raw) => FetchResult::Success(mapping::details(raw)),
      Err(err) => {
        warn!(id, error = %err, "Movie details fetch failed");
        err.into()
      }
    }
  }

  async fn load_list(
    &self,
    force_refresh: bool,
    cancel: &CancellationToken,
  ) -> CatalogResult<ListSnapshot> {
    // The timestamp is only logged, so its failure is kept apart from the presence check
    let (cached, fetched_at) = self
      .with_store(|store| Ok((store.has_snapshot()?, store.fetched_at())))
      .await?;

    if force_refresh || !cached {
      let query = self.query;
      info!(force_refresh, cached, page = query.page, "Refreshing catalog list");

      let raw = until_cancelled(cancel, self.remote.fetch_list(&query)).await?;
      let snapshot = mapping::list_snapshot(raw, query.page);

      // Runs on the blocking pool, so it completes even if this future is dropped
      self
        .with_store(move |store| store.replace_snapshot(&snapshot))
        .await?;
    } else {
      match fetched_at {
        Ok(Some(fetched_at)) => debug!(%fetched_at, "Serving cached catalog list"),
        Ok(None) => debug!("Serving cached catalog list"),
        Err(err) => warn!(error = %err, "Could not read cached snapshot timestamp"),
      }
    }

    match self.with_store(|store| store.read_snapshot()).await {
      Err(CatalogError::NotFound) => {
        error!("Snapshot missing right after presence check or refresh");
        Err(CatalogError::NotFound)
      }
      other => other,
    }
  }

  /// Run a store call on the blocking thread pool.
  async fn with_store<T, F>(&self, f: F) -> CatalogResult<T>
  where
    F: FnOnce(&S) -> CatalogResult<T> + Send + 'static,
    T: Send + 'static,
  {
    let store = Arc::clone(&self.store);
    tokio::task::spawn_blocking(move || f(store.as_ref())).await?
  }
}

/// Await `fut` unless `cancel` fires first.
async fn until_cancelled<T>(
  cancel: &CancellationToken,
  fut: impl Future<Output = CatalogResult<T>>,
) -> CatalogResult<T> {
  tokio::select! {
    biased;
    _ = cancel.cancelled() => Err(CatalogError::Cancelled),
    result = fut => result,
  }
}
