use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::ui::view::{Shortcut, UiContext};

/// Draw the footer bar: view breadcrumb on the left, shortcuts after it
pub fn draw_footer(
  frame: &mut Frame,
  area: Rect,
  breadcrumb: &[String],
  shortcuts: &[Shortcut],
  ctx: &UiContext,
) {
  let palette = ctx.palette;
  let mut spans = vec![Span::raw(" ")];

  for (i, part) in breadcrumb.iter().enumerate() {
    if i > 0 {
      spans.push(Span::styled(" > ", Style::default().fg(palette.muted)));
    }

    let style = if i == breadcrumb.len() - 1 {
      // Current view - highlighted
      Style::default().fg(palette.accent).bold()
    } else {
      Style::default().fg(palette.text)
    };

    spans.push(Span::styled(part.clone(), style));
  }

  let mut shortcuts = shortcuts.to_vec();
  shortcuts.sort_by_key(|s| s.priority);

  spans.push(Span::raw("    "));
  for shortcut in shortcuts {
    spans.push(Span::styled(
      format!("<{}>", shortcut.key),
      Style::default().fg(palette.accent),
    ));
    spans.push(Span::styled(
      format!(" {}  ", shortcut.label),
      Style::default().fg(palette.muted),
    ));
  }

  let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(palette.background));
  frame.render_widget(paragraph, area);
}
