use color_eyre::{eyre::eyre, Result};
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_ENV: &str = "RMDEX_LOG";
const DEFAULT_FILTER: &str = "info";
const LOG_FILE_PREFIX: &str = "rmdex.log";

/// Send logs to a daily rolling file in `dir`.
///
/// The terminal belongs to the UI while the app runs, so nothing is
/// written to stdout or stderr. Verbosity comes from `RMDEX_LOG`.
pub fn init_logger(dir: &Path) -> Result<()> {
  std::fs::create_dir_all(dir)
    .map_err(|e| eyre!("Failed to create log directory {}: {}", dir.display(), e))?;

  let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
  let file_layer = tracing_subscriber::fmt::layer()
    .with_ansi(false)
    .with_writer(appender)
    .with_filter(env_filter(std::env::var(LOG_ENV).ok().as_deref()));

  tracing_subscriber::registry()
    .with(file_layer)
    .try_init()
    .map_err(|e| eyre!("Failed to initialize logging: {}", e))
}

/// Filter from the given directives, or the default if they don't parse.
fn env_filter(directives: Option<&str>) -> EnvFilter {
  directives
    .and_then(|d| EnvFilter::try_new(d).ok())
    .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
