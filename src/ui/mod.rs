mod components;
mod renderfns;
pub mod theme;
pub mod view;
pub mod views;

use crate::app::App;
use ratatui::prelude::*;
use ratatui::widgets::{Block, ListState};
use theme::Palette;
use view::UiContext;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
  let palette = Palette::for_theme(app.theme());
  let ctx = UiContext {
    palette,
    messages: app.locale().messages(),
    decorative_font: app.decorative_font(),
    show_portal: app.show_portal(),
  };

  frame.render_widget(
    Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
    frame.area(),
  );

  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Min(1),    // Main content
      Constraint::Length(1), // Footer
    ])
    .split(frame.area());

  renderfns::draw_header(frame, chunks[0], &ctx, app.locale(), app.theme(), app.ticks());

  let breadcrumb = app.breadcrumb(ctx.messages);
  let shortcuts = app.shortcuts(ctx.messages);
  if let Some(view) = app.current_view_mut() {
    view.render(frame, chunks[1], &ctx);
  }

  renderfns::draw_footer(frame, chunks[2], &breadcrumb, &shortcuts, &ctx);
}

/// Keep a list selection inside `0..len`, or clear it for an empty list
pub fn ensure_valid_selection(state: &mut ListState, len: usize) {
  if len == 0 {
    state.select(None);
    return;
  }
  match state.selected() {
    Some(i) if i >= len => state.select(Some(len - 1)),
    None => state.select(Some(0)),
    _ => {}
  }
}
