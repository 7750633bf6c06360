use color_eyre::{eyre::eyre, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Install the global tracing subscriber.
///
/// Logs go to stderr unless `log.directory` is set, in which case they go to
/// a daily rolling file there. The returned guard flushes the file writer on
/// drop and must be held for the life of the program.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>> {
  // Config level is the default; RUST_LOG still wins.
  let default = format!("{level},rusqlite=warn,reqwest=warn", level = config.level);
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(true)
    .with_level(true);

  match &config.directory {
    Some(dir) => {
      std::fs::create_dir_all(dir)
        .map_err(|e| eyre!("Failed to create log directory {}: {}", dir.display(), e))?;
      let appender = tracing_appender::rolling::daily(dir, "reelsync.log");
      let (writer, guard) = tracing_appender::non_blocking(appender);
      builder
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("Failed to install logger: {}", e))?;
      Ok(Some(guard))
    }
    None => {
      builder
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| eyre!("Failed to install logger: {}", e))?;
      Ok(None)
    }
  }
}
