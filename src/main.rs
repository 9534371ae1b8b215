mod app;
mod browse;
mod cache;
mod catalog;
mod config;
mod event;
mod i18n;
mod logger;
mod prefs;
mod query;
mod ui;

use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;
use std::sync::Arc;

use crate::browse::BrowseState;
use crate::cache::{PageTracker, QueryCache};
use crate::catalog::{CatalogClient, CharacterSource};
use crate::i18n::Locale;
use crate::prefs::{MemoryStore, PreferenceStore, Preferences, SqliteStore};
use crate::query::PagedQuery;
use crate::ui::views::CharacterListView;

#[derive(Parser, Debug)]
#[command(name = "rmdex")]
#[command(about = "A terminal browser for the Rick and Morty character catalog")]
#[command(version)]
struct Args {
  /// Path to config file (default: ./rmdex.yaml or $XDG_CONFIG_HOME/rmdex/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Start with this name search
  #[arg(short, long)]
  search: Option<String>,

  /// Start on this page
  #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
  page: Option<u32>,

  /// UI language for this session (e.g. en-US, pt-BR)
  #[arg(short, long)]
  lang: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  let config = config::Config::load(args.config.as_deref())?;
  logger::init_logger(&config.log_dir()?)?;

  let store: Box<dyn PreferenceStore> = match SqliteStore::open() {
    Ok(store) => Box::new(store),
    Err(e) => {
      // Preferences then last for this session only
      tracing::warn!(error = %e, "failed to open preference database");
      Box::new(MemoryStore::default())
    }
  };
  let prefs = Preferences::load(store);
  let locale = args
    .lang
    .as_deref()
    .map(Locale::normalize)
    .or(prefs.language())
    .unwrap_or_else(Locale::detect);

  // Services are built here and handed down; nothing is global
  let client = CatalogClient::new(&config.api)?;
  let cache = QueryCache::new(config.query.retention());
  let tracker = Arc::new(PageTracker::new(config.query.history_size));
  let source: Arc<dyn CharacterSource> = Arc::new(client.clone());
  let query = PagedQuery::new(source, cache, tracker, config.query.fetch_policy());

  let browse = BrowseState::new(
    args.search.as_deref().unwrap_or("").trim(),
    args.page.unwrap_or(1),
  );
  let root = CharacterListView::new(browse, query, client);

  let mut app = app::App::new(Box::new(root), prefs, locale);
  app.run().await?;

  Ok(())
}
