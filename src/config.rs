use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::catalog::{ListQuery, RemoteConfig};

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub tmdb: TmdbConfig,
  #[serde(default)]
  pub cache: CacheConfig,
  #[serde(default)]
  pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
  pub base_url: String,
  /// Per-request timeout for API calls
  pub timeout_secs: u64,
  pub include_adult: bool,
  pub include_video: bool,
  /// Catalog page fetched on refresh (1-based)
  pub page: u32,
}

impl Default for TmdbConfig {
  fn default() -> Self {
    let query = ListQuery::default();
    Self {
      base_url: DEFAULT_BASE_URL.to_string(),
      timeout_secs: 30,
      include_adult: query.include_adult,
      include_video: query.include_video,
      page: query.page,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheConfig {
  /// Database file (defaults to $XDG_DATA_HOME/reelsync/cache.db)
  pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
  /// Default filter when RUST_LOG is unset
  pub level: String,
  /// Write daily log files here instead of stderr
  pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      level: "warn".to_string(),
      directory: None,
    }
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./reelsync.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/reelsync/config.yaml
  ///
  /// With no file found, built-in defaults are used.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("reelsync.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("reelsync").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents).map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self> {
    let config: Config = serde_yaml::from_str(contents)?;
    if config.tmdb.page < ListQuery::FIRST_PAGE {
      return Err(eyre!("tmdb.page must be at least {}", ListQuery::FIRST_PAGE));
    }
    if config.tmdb.timeout_secs == 0 {
      return Err(eyre!("tmdb.timeout_secs must be greater than zero"));
    }
    Ok(config)
  }

  /// Query used when refreshing the catalog list.
  pub fn list_query(&self) -> ListQuery {
    ListQuery {
      include_adult: self.tmdb.include_adult,
      include_video: self.tmdb.include_video,
      page: self.tmdb.page,
    }
  }

  /// Build the remote connection settings, pulling the token from the environment.
  pub fn remote(&self) -> Result<RemoteConfig> {
    let base_url = Url::parse(&self.tmdb.base_url)
      .map_err(|e| eyre!("Invalid tmdb.base_url '{}': {}", self.tmdb.base_url, e))?;

    Ok(RemoteConfig {
      base_url,
      auth_token: Self::get_api_token()?,
      timeout: Duration::from_secs(self.tmdb.timeout_secs),
    })
  }

  /// Get the TMDB API token from environment variables.
  ///
  /// Checks REELSYNC_TMDB_TOKEN first, then TMDB_API_TOKEN as fallback.
  pub fn get_api_token() -> Result<String> {
    std::env::var("REELSYNC_TMDB_TOKEN")
      .or_else(|_| std::env::var("TMDB_API_TOKEN"))
      .map_err(|_| {
        eyre!("TMDB API token not found. Set REELSYNC_TMDB_TOKEN or TMDB_API_TOKEN environment variable.")
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_file_uses_defaults() {
    let config = Config::parse("{}").unwrap();
    assert_eq!(config.tmdb.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.tmdb.timeout_secs, 30);
    assert_eq!(config.list_query(), ListQuery::default());
    assert!(config.cache.path.is_none());
    assert_eq!(config.log.level, "warn");
  }

  #[test]
  fn test_partial_sections_fill_in_defaults() {
    let yaml = r#"
tmdb:
  page: 3
  include_video: true
cache:
  path: /tmp/reelsync-test/cache.db
log:
  level: debug
"#;
    let config = Config::parse(yaml).unwrap();
    assert_eq!(
      config.list_query(),
      ListQuery {
        include_adult: false,
        include_video: true,
        page: 3,
      }
    );
    assert_eq!(config.tmdb.base_url, DEFAULT_BASE_URL);
    assert_eq!(
      config.cache.path.as_deref(),
      Some(Path::new("/tmp/reelsync-test/cache.db"))
    );
    assert_eq!(config.log.level, "debug");
    assert!(config.log.directory.is_none());
  }

  #[test]
  fn test_page_zero_is_rejected() {
    assert!(Config::parse("tmdb:\n  page: 0\n").is_err());
  }

  #[test]
  fn test_zero_timeout_is_rejected() {
    let err = Config::parse("tmdb:\n  timeout_secs: 0\n").unwrap_err();
    assert!(err.to_string().contains("timeout_secs"));
    assert!(Config::parse("tmdb:\n  timeout_secs: 1\n").is_ok());
  }

  #[test]
  fn test_missing_explicit_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.yaml");
    assert!(Config::load(Some(missing.as_path())).is_err());
  }

  #[test]
  fn test_load_from_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reelsync.yaml");
    std::fs::write(&path, "tmdb:\n  base_url: https://proxy.example/3/\n").unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();
    assert_eq!(config.tmdb.base_url, "https://proxy.example/3/");
  }
}
