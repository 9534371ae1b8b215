use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::query::FetchPolicy;

const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";
const BASE_URL_ENV: &str = "RMDEX_BASE_URL";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
  #[serde(default)]
  pub api: ApiConfig,
  #[serde(default)]
  pub query: QueryConfig,
  /// Directory for log files (defaults to $XDG_DATA_HOME/rmdex/logs)
  pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
  pub base_url: String,
  /// Request timeout in seconds; none means the HTTP client's default
  pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.to_string(),
      timeout_secs: Some(30),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
  /// Total foreground attempts when the catalog is unreachable
  pub retry_attempts: u32,
  pub retry_delay_ms: u64,
  /// Minimum time the loading indicator stays up; 0 disables it
  pub min_loading_ms: u64,
  /// How long an unused page stays cached
  pub retention_secs: u64,
  /// Number of recently visited pages to remember
  pub history_size: usize,
}

impl Default for QueryConfig {
  fn default() -> Self {
    Self {
      retry_attempts: 3,
      retry_delay_ms: 1000,
      min_loading_ms: 200,
      retention_secs: 600,
      history_size: 5,
    }
  }
}

impl QueryConfig {
  pub fn fetch_policy(&self) -> FetchPolicy {
    FetchPolicy {
      max_attempts: self.retry_attempts,
      retry_delay: Duration::from_millis(self.retry_delay_ms),
      min_loading: Duration::from_millis(self.min_loading_ms),
    }
  }

  pub fn retention(&self) -> Duration {
    Duration::from_secs(self.retention_secs)
  }
}

impl Config {
  /// Load configuration from file, then apply environment overrides.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./rmdex.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/rmdex/config.yaml
  ///
  /// With no file found the built-in defaults are used.
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

    let mut config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => Config::default(),
    };

    if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
      config.api.base_url = base_url;
    }

    config.validate()?;
    Ok(config)
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("rmdex.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("rmdex").join("config.yaml");
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
    // An empty file deserializes to null
    if contents.trim().is_empty() {
      return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(contents)?)
  }

  /// Reject settings the rest of the program cannot work with.
  pub fn validate(&self) -> Result<()> {
    let url = Url::parse(&self.api.base_url)
      .map_err(|e| eyre!("Invalid api.base_url {:?}: {}", self.api.base_url, e))?;
    if url.cannot_be_a_base() {
      return Err(eyre!("Invalid api.base_url {:?}: not a base URL", self.api.base_url));
    }
    if self.api.timeout_secs == Some(0) {
      return Err(eyre!("api.timeout_secs must be greater than 0"));
    }
    if self.query.retry_attempts == 0 {
      return Err(eyre!("query.retry_attempts must be at least 1"));
    }
    if self.query.history_size == 0 {
      return Err(eyre!("query.history_size must be at least 1"));
    }
    if self.query.retention_secs == 0 {
      return Err(eyre!("query.retention_secs must be greater than 0"));
    }
    Ok(())
  }

  /// Where log files go.
  pub fn log_dir(&self) -> Result<PathBuf> {
    if let Some(dir) = &self.log_dir {
      return Ok(dir.clone());
    }
    let data_dir = dirs::data_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
      .ok_or_else(|| eyre!("Could not determine data directory"))?;
    Ok(data_dir.join("rmdex").join("logs"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.query.retry_attempts, 3);
    assert_eq!(config.query.retention(), Duration::from_secs(600));
    assert_eq!(config.query.history_size, 5);
    assert_eq!(config.query.fetch_policy().min_loading, Duration::from_millis(200));
    config.validate().unwrap();
  }

  #[test]
  fn test_partial_file_keeps_other_defaults() {
    let config = Config::parse(
      r#"
query:
  min_loading_ms: 0
  retry_attempts: 5
"#,
    )
    .unwrap();
    assert_eq!(config.query.min_loading_ms, 0);
    assert_eq!(config.query.retry_attempts, 5);
    assert_eq!(config.query.retry_delay_ms, 1000);
    assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
  }

  #[test]
  fn test_empty_file_is_defaults() {
    let config = Config::parse("\n").unwrap();
    assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
  }

  #[test]
  fn test_unknown_keys_are_rejected() {
    assert!(Config::parse("api:\n  base: http://x\n").is_err());
  }

  #[test]
  fn test_validate_rejects_bad_values() {
    let mut config = Config::default();
    config.api.base_url = "not a url".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.api.base_url = "mailto:rick@citadel".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.query.retry_attempts = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.query.history_size = 0;
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_load_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rmdex.yaml");
    std::fs::write(&path, "api:\n  base_url: http://localhost:9000/api\n").unwrap();

    let config = Config::load_from_path(&path).unwrap();
    assert_eq!(config.api.base_url, "http://localhost:9000/api");
  }

  #[test]
  fn test_load_missing_explicit_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Config::load(Some(&dir.path().join("missing.yaml"))).is_err());
  }
}
