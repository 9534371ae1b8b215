use crate::catalog::CharacterStatus;
use crate::i18n::Messages;

/// Truncate a string to at most `max_len` characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Localized label for a character status
pub fn status_label(status: CharacterStatus, messages: &Messages) -> &'static str {
  match status {
    CharacterStatus::Alive => messages.alive,
    CharacterStatus::Dead => messages.dead,
    CharacterStatus::Unknown => messages.unknown,
  }
}
