use clap::{Parser, Subcommand};
use color_eyre::{eyre::eyre, Report, Result};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

use reelsync::cache::{SnapshotStore, SqliteSnapshotStore};
use reelsync::catalog::{CatalogRepository, FetchResult, TmdbClient};
use reelsync::config::Config;
use reelsync::{logging, view, CatalogError};

#[derive(Parser, Debug)]
#[command(name = "reelsync")]
#[command(about = "Browse the TMDB catalog through a local snapshot cache")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/reelsync/config.yaml)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Cache database to use instead of the configured one
  #[arg(long, global = true)]
  cache: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Show the catalog list, from cache unless --refresh is given
  List {
    /// Fetch the list from TMDB even if a cached copy exists
    #[arg(short, long)]
    refresh: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
  },
  /// Show full details for one movie (always fetched)
  Details {
    /// TMDB movie id
    id: i64,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
  },
  /// Delete the cached list
  ClearCache,
}

type Repository = CatalogRepository<TmdbClient, SqliteSnapshotStore>;

fn build_repository(config: &Config, store: SqliteSnapshotStore) -> Result<Repository> {
  let client = TmdbClient::new(&config.remote()?)?;
  Ok(CatalogRepository::new(client, store).with_list_query(config.list_query()))
}

/// Cancel `token` on Ctrl-C.
fn cancel_on_interrupt(token: CancellationToken) {
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      tracing::info!("Interrupted, cancelling request");
      token.cancel();
    }
  });
}

fn failure(context: &'static str, message: Option<String>, cause: Option<CatalogError>) -> Report {
  match cause {
    Some(CatalogError::Cancelled) => eyre!("Interrupted"),
    Some(cause) => Report::new(cause).wrap_err(context),
    None => eyre!("{}: {}", context, message.as_deref().unwrap_or("unknown error")),
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Load configuration
  let config = Config::load(args.config.as_deref())?;
  let _log_guard = logging::init(&config.log)?;

  let cache_path = args.cache.or_else(|| config.cache.path.clone());
  let store = SqliteSnapshotStore::open(cache_path.as_deref())?;

  let cancel = CancellationToken::new();
  cancel_on_interrupt(cancel.clone());

  match args.command {
    Command::ClearCache => {
      store.clear()?;
      println!("Cache cleared");
    }
    Command::List { refresh, json } => {
      let repo = build_repository(&config, store)?;
      match repo.fetch_list(refresh, &cancel).await {
        FetchResult::Success(snapshot) if json => {
          println!("{}", serde_json::to_string_pretty(&snapshot)?)
        }
        FetchResult::Success(snapshot) => {
          let mut text = String::new();
          view::render_list(&mut text, &snapshot)?;
          print!("{}", text);
        }
        FetchResult::Error { message, cause } => {
          return Err(failure("Failed to load catalog list", message, cause))
        }
      }
    }
    Command::Details { id, json } => {
      let repo = build_repository(&config, store)?;
      match repo.fetch_details(id, &cancel).await {
        FetchResult::Success(details) if json => {
          println!("{}", serde_json::to_string_pretty(&details)?)
        }
        FetchResult::Success(details) => {
          let mut text = String::new();
          view::render_details(&mut text, &details)?;
          print!("{}", text);
        }
        FetchResult::Error { message, cause } => {
          return Err(failure("Failed to load movie details", message, cause))
        }
      }
    }
  }

  Ok(())
}
