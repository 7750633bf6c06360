use async_trait::async_trait;
use reqwest::header;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::catalog::api_types::{RawDetails, RawListPage};
use crate::catalog::types::ListQuery;
use crate::error::{CatalogError, CatalogResult};

/// Remote catalog operations used by the repository.
///
/// Each call is a single round trip with no retries.
#[async_trait]
pub trait CatalogSource: Send + Sync {
  async fn fetch_list(&self, query: &ListQuery) -> CatalogResult<RawListPage>;

  async fn fetch_details(&self, id: i64) -> CatalogResult<RawDetails>;
}

/// Connection settings for the TMDB API
#[derive(Debug, Clone)]
pub struct RemoteConfig {
  /// API root, e.g. `https://api.themoviedb.org/3/`
  pub base_url: Url,
  /// Bearer token (TMDB "API Read Access Token")
  pub auth_token: String,
  pub timeout: Duration,
}

/// TMDB API client
#[derive(Clone)]
pub struct TmdbClient {
  client: reqwest::Client,
  base_url: Url,
}

impl TmdbClient {
  pub fn new(config: &RemoteConfig) -> CatalogResult<Self> {
    Self::with_builder(config, reqwest::Client::builder())
  }

  /// Like [`TmdbClient::new`], starting from a caller-supplied client builder.
  pub fn with_builder(
    config: &RemoteConfig,
    builder: reqwest::ClientBuilder,
  ) -> CatalogResult<Self> {
    let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", config.auth_token))
      .map_err(|_| CatalogError::InvalidToken)?;
    auth.set_sensitive(true);

    let mut headers = header::HeaderMap::new();
    headers.insert(header::AUTHORIZATION, auth);
    headers.insert(
      header::ACCEPT,
      header::HeaderValue::from_static("application/json"),
    );

    let client = builder
      .default_headers(headers)
      .timeout(config.timeout)
      .build()
      .map_err(|source| CatalogError::Transport {
        url: config.base_url.to_string(),
        source,
      })?;

    Ok(Self {
      client,
      base_url: with_trailing_slash(config.base_url.clone()),
    })
  }

  /// URL of the discover endpoint for `query`
  fn list_url(&self, query: &ListQuery) -> Url {
    let mut url = self.endpoint("discover/movie");
    url
      .query_pairs_mut()
      .append_pair("language", "en-US")
      .append_pair("sort_by", "popularity")
      .append_pair("include_adult", &query.include_adult.to_string())
      .append_pair("include_video", &query.include_video.to_string())
      .append_pair("page", &query.page.to_string());
    url
  }

  fn details_url(&self, id: i64) -> Url {
    self.endpoint(&format!("movie/{}", id))
  }

  fn endpoint(&self, path: &str) -> Url {
    let mut url = self.base_url.clone();
    // Base is normalized to end in '/', so this only appends segments
    url.set_path(&format!("{}{}", self.base_url.path(), path));
    url
  }

  async fn get_json<T: DeserializeOwned>(&self, url: Url) -> CatalogResult<T> {
    let start = tokio::time::Instant::now();
    let url_str = url.to_string();
    debug!(url = %url_str, "HTTP GET start");

    let resp = self.client.get(url).send().await.map_err(|source| {
      warn!(url = %url_str, error = %source, "HTTP GET failed");
      CatalogError::Transport {
        url: url_str.clone(),
        source,
      }
    })?;

    let status = resp.status();
    if !status.is_success() {
      warn!(url = %url_str, status = status.as_u16(), "HTTP GET returned error status");
      return Err(CatalogError::Status {
        url: url_str,
        status,
      });
    }

    let body = resp.bytes().await.map_err(|source| CatalogError::Transport {
      url: url_str.clone(),
      source,
    })?;

    debug!(
      url = %url_str,
      bytes = body.len(),
      latency_ms = start.elapsed().as_millis() as u64,
      "HTTP GET done"
    );

    serde_json::from_slice(&body).map_err(|source| CatalogError::Decode {
      url: url_str,
      source,
    })
  }
}

#[async_trait]
impl CatalogSource for TmdbClient {
  async fn fetch_list(&self, query: &ListQuery) -> CatalogResult<RawListPage> {
    self.get_json(self.list_url(query)).await
  }

  async fn fetch_details(&self, id: i64) -> CatalogResult<RawDetails> {
    self.get_json(self.details_url(id)).await
  }
}

fn with_trailing_slash(mut url: Url) -> Url {
  if !url.path().ends_with('/') {
    let path = format!("{}/", url.path());
    url.set_path(&path);
  }
  url
}
