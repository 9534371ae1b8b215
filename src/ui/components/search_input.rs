use super::input::{InputResult, TextInput};
use super::KeyResult;
use crate::ui::view::UiContext;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Events emitted by the search overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
  /// Enter pressed with this text (possibly blank)
  Submitted(String),
}

/// Search overlay opened with `/`
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
  input: TextInput,
  active: bool,
}

impl SearchInput {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_active(&self) -> bool {
    self.active
  }

  /// Open the overlay, pre-filled with the current search
  pub fn activate(&mut self, current: &str) {
    self.active = true;
    self.input.set_value(current);
  }

  /// Handle a key event.
  /// Call this regardless of active state - it handles activation too
  pub fn handle_key(&mut self, key: KeyEvent, current: &str) -> KeyResult<SearchEvent> {
    if !self.active {
      if key.code == KeyCode::Char('/') {
        self.activate(current);
        return KeyResult::Handled;
      }
      return KeyResult::NotHandled;
    }

    match self.input.handle_key(key) {
      InputResult::Submitted(value) => {
        self.active = false;
        KeyResult::Event(SearchEvent::Submitted(value))
      }
      InputResult::Cancelled => {
        self.active = false;
        self.input.clear();
        KeyResult::Handled
      }
      // The overlay is modal; swallow everything else
      InputResult::Consumed | InputResult::NotHandled => KeyResult::Handled,
    }
  }

  /// Render the search overlay if active
  pub fn render_overlay(&self, frame: &mut Frame, area: Rect, ctx: &UiContext) {
    if !self.active {
      return;
    }

    let width = (area.width * 60 / 100).clamp(30, 60).min(area.width);
    let height = 3u16.min(area.height);
    let overlay_area = Rect::new(area.x + 1, area.y + 1, width.saturating_sub(1), height);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(ctx.palette.accent))
      .title(format!(" {} ", ctx.messages.search));

    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    if inner.height == 0 {
      return;
    }

    let (before, after) = self.input.split_at_cursor();
    let line = if before.is_empty() && after.is_empty() {
      Line::from(vec![
        Span::styled("_", Style::default().fg(ctx.palette.accent)),
        Span::styled(
          ctx.messages.search_placeholder,
          Style::default().fg(ctx.palette.muted),
        ),
      ])
    } else {
      Line::from(vec![
        Span::raw(before),
        Span::styled("_", Style::default().fg(ctx.palette.accent)), // Cursor
        Span::raw(after),
      ])
    };
    frame.render_widget(Paragraph::new(line), inner);
  }
}
