//! Page navigation bar: `< 1 ... 4 5 6 ... 42 >` plus "Page X of Y".

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::ui::view::UiContext;

const MAX_VISIBLE_BUTTONS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
  Page(u32),
  Ellipsis,
}

/// Page buttons to show for `current` out of `total` pages.
///
/// Up to five pages are listed in full. Beyond that: the first page, a
/// window of up to three middle pages around `current`, the last page, and
/// an ellipsis wherever pages are skipped.
pub fn page_window(current: u32, total: u32) -> Vec<PageItem> {
  if total <= MAX_VISIBLE_BUTTONS {
    return (1..=total).map(PageItem::Page).collect();
  }

  let (start, end) = if current <= 3 {
    (2, 3)
  } else if current >= total - 2 {
    (total - 2, total - 1)
  } else {
    (current - 1, current + 1)
  };

  let mut items = vec![PageItem::Page(1)];
  if start > 2 {
    items.push(PageItem::Ellipsis);
  }
  items.extend((start..=end).filter(|&p| p > 1 && p < total).map(PageItem::Page));
  if end < total - 1 {
    items.push(PageItem::Ellipsis);
  }
  items.push(PageItem::Page(total));
  items
}

pub fn has_previous(current: u32) -> bool {
  current > 1
}

pub fn has_next(current: u32, total: u32) -> bool {
  current < total
}

/// Draw the navigation bar on two lines. Nothing is drawn for a single page.
pub fn draw_pagination(frame: &mut Frame, area: Rect, current: u32, total: u32, ctx: &UiContext) {
  if total <= 1 {
    return;
  }
  let palette = ctx.palette;
  let enabled = Style::default().fg(palette.accent);
  let disabled = Style::default().fg(palette.muted);

  let mut spans = vec![Span::styled(
    "< ",
    if has_previous(current) { enabled } else { disabled },
  )];
  for item in page_window(current, total) {
    match item {
      PageItem::Page(page) if page == current => spans.push(Span::styled(
        format!("[{}]", page),
        Style::default().fg(palette.background).bg(palette.accent).bold(),
      )),
      PageItem::Page(page) => spans.push(Span::styled(
        format!(" {} ", page),
        Style::default().fg(palette.text),
      )),
      PageItem::Ellipsis => spans.push(Span::styled(" ... ", disabled)),
    }
  }
  spans.push(Span::styled(
    " >",
    if has_next(current, total) { enabled } else { disabled },
  ));

  let info = format!(
    "{} {} {} {}",
    ctx.messages.page, current, ctx.messages.of, total
  );
  let lines = vec![
    Line::from(spans),
    Line::from(Span::styled(info, Style::default().fg(palette.muted))),
  ];
  frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
  use super::*;
  use PageItem::{Ellipsis, Page};

  #[test]
  fn test_few_pages_listed_in_full() {
    assert_eq!(page_window(1, 1), vec![Page(1)]);
    assert_eq!(
      page_window(3, 5),
      vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
    );
  }

  #[test]
  fn test_window_near_start() {
    assert_eq!(
      page_window(2, 20),
      vec![Page(1), Page(2), Page(3), Ellipsis, Page(20)]
    );
    assert_eq!(
      page_window(3, 20),
      vec![Page(1), Page(2), Page(3), Ellipsis, Page(20)]
    );
  }

  #[test]
  fn test_window_in_middle_has_two_ellipses() {
    assert_eq!(
      page_window(10, 20),
      vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Ellipsis, Page(20)]
    );
  }

  #[test]
  fn test_window_near_end() {
    assert_eq!(
      page_window(19, 20),
      vec![Page(1), Ellipsis, Page(18), Page(19), Page(20)]
    );
    assert_eq!(
      page_window(18, 20),
      vec![Page(1), Ellipsis, Page(18), Page(19), Page(20)]
    );
  }

  #[test]
  fn test_window_with_six_pages() {
    assert_eq!(
      page_window(4, 6),
      vec![Page(1), Ellipsis, Page(4), Page(5), Page(6)]
    );
  }

  #[test]
  fn test_bounds() {
    assert!(!has_previous(1));
    assert!(has_previous(2));
    assert!(has_next(2, 3));
    assert!(!has_next(3, 3));
  }
}
