use ratatui::prelude::*;

use crate::catalog::CharacterStatus;
use crate::prefs::Theme;

/// Colors for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
  pub background: Color,
  pub text: Color,
  pub muted: Color,
  pub accent: Color,
  pub border: Color,
  pub highlight: Color,
  pub error: Color,
  pub alive: Color,
  pub dead: Color,
  pub unknown: Color,
}

const DARK: Palette = Palette {
  background: Color::Black,
  text: Color::White,
  muted: Color::DarkGray,
  accent: Color::LightGreen,
  border: Color::Green,
  highlight: Color::DarkGray,
  error: Color::LightRed,
  alive: Color::Green,
  dead: Color::Red,
  unknown: Color::Gray,
};

const LIGHT: Palette = Palette {
  background: Color::White,
  text: Color::Black,
  muted: Color::Gray,
  accent: Color::Green,
  border: Color::Cyan,
  highlight: Color::Gray,
  error: Color::Red,
  alive: Color::Green,
  dead: Color::Red,
  unknown: Color::DarkGray,
};

impl Palette {
  pub fn for_theme(theme: Theme) -> &'static Palette {
    match theme {
      Theme::Dark => &DARK,
      Theme::Light => &LIGHT,
    }
  }

  pub fn status(&self, status: CharacterStatus) -> Color {
    match status {
      CharacterStatus::Alive => self.alive,
      CharacterStatus::Dead => self.dead,
      CharacterStatus::Unknown => self.unknown,
    }
  }

  /// Style for headings; the decorative font is approximated with bold italics.
  pub fn heading(&self, decorative: bool) -> Style {
    let style = Style::default().fg(self.accent).bold();
    if decorative {
      style.italic()
    } else {
      style
    }
  }
}
