//! UI language selection and message tables.

mod locales;

use std::fmt;

pub use locales::Messages;

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
  #[default]
  EnUs,
  PtBr,
}

impl Locale {
  pub const ALL: [Locale; 2] = [Locale::EnUs, Locale::PtBr];

  pub fn code(self) -> &'static str {
    match self {
      Locale::EnUs => "en-US",
      Locale::PtBr => "pt-BR",
    }
  }

  /// Exact match on a supported locale code.
  pub fn from_code(code: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|l| l.code() == code)
  }

  /// Map any language tag onto a supported locale: English variants become
  /// en-US, everything else pt-BR.
  pub fn normalize(language: &str) -> Self {
    if language.trim().to_lowercase().starts_with("en") {
      Locale::EnUs
    } else {
      Locale::PtBr
    }
  }

  /// Best guess from the environment (`LC_ALL`, `LC_MESSAGES`, `LANG`).
  /// Falls back to en-US when nothing usable is set.
  pub fn detect() -> Self {
    Self::detect_from(|key| std::env::var(key).ok())
  }

  fn detect_from(lookup: impl Fn(&str) -> Option<String>) -> Self {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
      .iter()
      .filter_map(|key| lookup(key))
      .map(|value| value.split('.').next().unwrap_or_default().to_string())
      .find(|tag| !tag.is_empty() && tag != "C" && tag != "POSIX")
      .map(|tag| Self::normalize(&tag))
      .unwrap_or_default()
  }

  /// The other locale; used by the language toggle.
  pub fn next(self) -> Self {
    match self {
      Locale::EnUs => Locale::PtBr,
      Locale::PtBr => Locale::EnUs,
    }
  }

  pub fn messages(self) -> &'static Messages {
    match self {
      Locale::EnUs => &locales::EN_US,
      Locale::PtBr => &locales::PT_BR,
    }
  }
}

impl fmt::Display for Locale {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.code())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect();
    move |key| vars.get(key).cloned()
  }

  #[test]
  fn test_normalize_english_variants() {
    assert_eq!(Locale::normalize("en"), Locale::EnUs);
    assert_eq!(Locale::normalize("en-GB"), Locale::EnUs);
    assert_eq!(Locale::normalize("EN_us"), Locale::EnUs);
  }

  #[test]
  fn test_normalize_everything_else_is_portuguese() {
    assert_eq!(Locale::normalize("pt-BR"), Locale::PtBr);
    assert_eq!(Locale::normalize("fr-FR"), Locale::PtBr);
    assert_eq!(Locale::normalize("de"), Locale::PtBr);
  }

  #[test]
  fn test_from_code_is_exact() {
    assert_eq!(Locale::from_code("en-US"), Some(Locale::EnUs));
    assert_eq!(Locale::from_code("pt-BR"), Some(Locale::PtBr));
    assert_eq!(Locale::from_code("en"), None);
  }

  #[test]
  fn test_detect_precedence() {
    let lookup = env(&[("LC_ALL", "pt_BR.UTF-8"), ("LANG", "en_US.UTF-8")]);
    assert_eq!(Locale::detect_from(lookup), Locale::PtBr);

    let lookup = env(&[("LANG", "en_GB.UTF-8")]);
    assert_eq!(Locale::detect_from(lookup), Locale::EnUs);
  }

  #[test]
  fn test_detect_falls_back_to_english() {
    assert_eq!(Locale::detect_from(env(&[])), Locale::EnUs);
    assert_eq!(Locale::detect_from(env(&[("LANG", "C")])), Locale::EnUs);
    assert_eq!(Locale::detect_from(env(&[("LANG", "C.UTF-8")])), Locale::EnUs);
  }

  #[test]
  fn test_next_cycles() {
    assert_eq!(Locale::EnUs.next(), Locale::PtBr);
    assert_eq!(Locale::PtBr.next(), Locale::EnUs);
  }
}
