//! Persisted user preferences: theme, decorative font and UI language.
//!
//! Each value is read once at startup and written back whenever it changes.
//! A missing or unreadable value falls back to the built-in default.

mod store;

use color_eyre::Result;
use std::fmt;
use tracing::warn;

use crate::i18n::Locale;

pub use store::{MemoryStore, PreferenceStore, SqliteStore};

const THEME_KEY: &str = "theme";
const FONT_KEY: &str = "font.decorative";
const LANGUAGE_KEY: &str = "language";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
  Light,
  #[default]
  Dark,
}

impl Theme {
  pub fn as_str(self) -> &'static str {
    match self {
      Theme::Light => "light",
      Theme::Dark => "dark",
    }
  }

  pub fn parse(value: &str) -> Option<Self> {
    match value {
      "light" => Some(Theme::Light),
      "dark" => Some(Theme::Dark),
      _ => None,
    }
  }

  pub fn toggled(self) -> Self {
    match self {
      Theme::Light => Theme::Dark,
      Theme::Dark => Theme::Light,
    }
  }
}

impl fmt::Display for Theme {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Current preference values plus the store they are saved to.
pub struct Preferences {
  store: Box<dyn PreferenceStore>,
  theme: Theme,
  decorative_font: bool,
  language: Option<Locale>,
}

impl Preferences {
  /// Read every preference from `store`.
  pub fn load(store: Box<dyn PreferenceStore>) -> Self {
    let theme = read(store.as_ref(), THEME_KEY, Theme::parse).unwrap_or_default();
    let decorative_font = read(store.as_ref(), FONT_KEY, |v| {
      serde_json::from_str::<bool>(v).ok()
    })
    .unwrap_or(true);
    let language = read(store.as_ref(), LANGUAGE_KEY, Locale::from_code);

    Self {
      store,
      theme,
      decorative_font,
      language,
    }
  }

  pub fn theme(&self) -> Theme {
    self.theme
  }

  pub fn decorative_font(&self) -> bool {
    self.decorative_font
  }

  /// The saved language, if one was ever chosen.
  pub fn language(&self) -> Option<Locale> {
    self.language
  }

  pub fn toggle_theme(&mut self) -> Result<Theme> {
    self.theme = self.theme.toggled();
    self.store.set(THEME_KEY, self.theme.as_str())?;
    Ok(self.theme)
  }

  pub fn toggle_decorative_font(&mut self) -> Result<bool> {
    self.decorative_font = !self.decorative_font;
    self
      .store
      .set(FONT_KEY, &serde_json::to_string(&self.decorative_font)?)?;
    Ok(self.decorative_font)
  }

  pub fn set_language(&mut self, locale: Locale) -> Result<()> {
    self.language = Some(locale);
    self.store.set(LANGUAGE_KEY, locale.code())
  }
}

fn read<T>(store: &dyn PreferenceStore, key: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
  let raw = match store.get(key) {
    Ok(raw) => raw?,
    Err(e) => {
      warn!(key, error = %e, "failed to read preference");
      return None;
    }
  };
  let parsed = parse(&raw);
  if parsed.is_none() {
    warn!(key, value = %raw, "ignoring unreadable preference");
  }
  parsed
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;

  /// Lets a test keep a handle on the store it hands to `Preferences`.
  struct Shared(Arc<MemoryStore>);

  impl PreferenceStore for Shared {
    fn get(&self, key: &str) -> Result<Option<String>> {
      self.0.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
      self.0.set(key, value)
    }
  }

  #[test]
  fn test_defaults_when_empty() {
    let prefs = Preferences::load(Box::new(MemoryStore::default()));
    assert_eq!(prefs.theme(), Theme::Dark);
    assert!(prefs.decorative_font());
    assert_eq!(prefs.language(), None);
  }

  #[test]
  fn test_toggles_are_written_through() {
    let store = Arc::new(MemoryStore::default());
    let mut prefs = Preferences::load(Box::new(Shared(Arc::clone(&store))));

    assert_eq!(prefs.toggle_theme().unwrap(), Theme::Light);
    assert!(!prefs.toggle_decorative_font().unwrap());
    prefs.set_language(Locale::PtBr).unwrap();

    assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    assert_eq!(store.get(FONT_KEY).unwrap().as_deref(), Some("false"));
    assert_eq!(store.get(LANGUAGE_KEY).unwrap().as_deref(), Some("pt-BR"));
  }

  #[test]
  fn test_unreadable_values_fall_back() {
    let store = MemoryStore::default();
    store.set(THEME_KEY, "sepia").unwrap();
    store.set(FONT_KEY, "maybe").unwrap();
    store.set(LANGUAGE_KEY, "en").unwrap();

    let prefs = Preferences::load(Box::new(store));
    assert_eq!(prefs.theme(), Theme::Dark);
    assert!(prefs.decorative_font());
    assert_eq!(prefs.language(), None);
  }

  #[test]
  fn test_theme_round_trips_across_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.db");

    let mut prefs = Preferences::load(Box::new(SqliteStore::open_at(&path).unwrap()));
    prefs.toggle_theme().unwrap();
    prefs.set_language(Locale::EnUs).unwrap();
    drop(prefs);

    let prefs = Preferences::load(Box::new(SqliteStore::open_at(&path).unwrap()));
    assert_eq!(prefs.theme(), Theme::Light);
    assert_eq!(prefs.language(), Some(Locale::EnUs));
  }
}
