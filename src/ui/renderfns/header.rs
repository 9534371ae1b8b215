use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::i18n::Locale;
use crate::prefs::Theme;
use crate::ui::view::UiContext;

const PORTAL_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Draw the header bar with title, locale, theme and the global toggles
pub fn draw_header(
  frame: &mut Frame,
  area: Rect,
  ctx: &UiContext,
  locale: Locale,
  theme: Theme,
  tick: u64,
) {
  let palette = ctx.palette;
  let messages = ctx.messages;
  let sep = || Span::styled("│", Style::default().fg(palette.muted));
  let theme_label = match theme {
    Theme::Light => messages.light,
    Theme::Dark => messages.dark,
  };
  let portal_label = if ctx.show_portal {
    messages.hide_portal
  } else {
    messages.show_portal
  };

  let mut spans = vec![
    Span::styled(
      format!(" {} ", portal_glyph(ctx.show_portal, tick)),
      Style::default().fg(palette.accent),
    ),
    Span::styled(
      format!("{} ", messages.title),
      palette.heading(ctx.decorative_font),
    ),
    sep(),
    Span::styled(format!(" {} ", locale), Style::default().fg(palette.text)),
    sep(),
    Span::styled(
      format!(" {}: {} ", messages.theme, theme_label),
      Style::default().fg(palette.text),
    ),
    Span::raw("  "),
  ];

  // Keys highlighted, descriptions dimmed
  for (key, label) in [
    ("<t>", messages.theme),
    ("<f>", messages.font),
    ("<b>", portal_label),
    ("<L>", messages.change_language),
  ] {
    spans.push(Span::styled(key, Style::default().fg(palette.accent)));
    spans.push(Span::styled(
      format!(" {}   ", label),
      Style::default().fg(palette.muted),
    ));
  }

  let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(palette.background));
  frame.render_widget(paragraph, area);
}

/// The spinning portal shown while the decorative background is on
fn portal_glyph(show: bool, tick: u64) -> &'static str {
  if !show {
    return " ";
  }
  PORTAL_FRAMES[(tick % PORTAL_FRAMES.len() as u64) as usize]
}
