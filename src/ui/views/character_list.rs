use crate::browse::BrowseState;
use crate::catalog::{CatalogClient, Character, Page};
use crate::i18n::Messages;
use crate::query::PagedQuery;
use crate::ui::components::{
  draw_pagination, has_next, has_previous, KeyResult, SearchEvent, SearchInput,
};
use crate::ui::ensure_valid_selection;
use crate::ui::renderfns::{status_label, truncate};
use crate::ui::view::{Shortcut, UiContext, View, ViewAction};
use crate::ui::views::CharacterDetailView;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use std::sync::Arc;

/// Paged, searchable list of characters
pub struct CharacterListView {
  browse: BrowseState,
  query: PagedQuery,
  client: CatalogClient,
  list_state: ListState,
  search: SearchInput,
  /// Set when a blank search was submitted
  search_hint: bool,
}

impl CharacterListView {
  pub fn new(browse: BrowseState, query: PagedQuery, client: CatalogClient) -> Self {
    let mut view = Self {
      browse,
      query,
      client,
      list_state: ListState::default(),
      search: SearchInput::new(),
      search_hint: false,
    };
    view.sync();
    view
  }

  /// Point the query at the page and search currently selected
  fn sync(&mut self) {
    self
      .query
      .select(self.browse.current_page(), self.browse.search_query());
    self.list_state.select(Some(0));
  }

  fn page(&self) -> Option<&Arc<Page>> {
    self.query.data()
  }

  fn characters(&self) -> &[Character] {
    self.page().map(|p| p.results.as_slice()).unwrap_or(&[])
  }

  fn total_pages(&self) -> u32 {
    self.page().map(|p| p.info.pages).unwrap_or(0)
  }

  fn go_to(&mut self, page: u32) {
    if page != self.browse.current_page() {
      self.browse.set_page(page);
      self.sync();
    }
  }

  fn submit_search(&mut self, value: &str) {
    let term = value.trim();
    if term.is_empty() {
      self.search_hint = true;
      return;
    }
    self.search_hint = false;
    self.browse.set_search(term);
    self.sync();
  }

  fn render_search_line(&self, frame: &mut Frame, area: Rect, ctx: &UiContext) {
    let palette = ctx.palette;
    let line = if self.search_hint {
      Line::from(Span::styled(
        ctx.messages.enter_search_term,
        Style::default().fg(palette.error),
      ))
    } else if self.browse.search_query().is_empty() {
      Line::from(vec![
        Span::styled("/ ", Style::default().fg(palette.accent)),
        Span::styled(
          ctx.messages.search_placeholder,
          Style::default().fg(palette.muted),
        ),
      ])
    } else {
      Line::from(vec![
        Span::styled(
          format!("{}: ", ctx.messages.search),
          Style::default().fg(palette.muted),
        ),
        Span::styled(
          self.browse.search_query().to_string(),
          Style::default().fg(palette.text).bold(),
        ),
      ])
    };
    frame.render_widget(Paragraph::new(line), area);
  }

  fn render_list(&mut self, frame: &mut Frame, area: Rect, ctx: &UiContext) {
    let palette = ctx.palette;
    let messages = ctx.messages;
    let len = self.characters().len();
    ensure_valid_selection(&mut self.list_state, len);
    // Previous page stays on screen, muted, until the new one lands
    let name_color = if self.query.is_placeholder_data() {
      palette.muted
    } else {
      palette.text
    };

    let title = match (self.page(), self.query.is_fetching()) {
      (_, true) => format!(" {} ({}) ", messages.title, messages.loading),
      (Some(page), false) => format!(" {} ({}) ", messages.title, page.info.count),
      (None, false) => format!(" {} ", messages.title),
    };

    let block = Block::default()
      .title(Span::styled(title, palette.heading(ctx.decorative_font)))
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(palette.border));

    if self.page().is_none() {
      let (content, color) = match self.query.error() {
        Some(error) => (error.message(messages), palette.error),
        None => (messages.loading.to_string(), palette.muted),
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(color));
      frame.render_widget(paragraph, area);
      return;
    }

    let items: Vec<ListItem> = self
      .characters()
      .iter()
      .map(|character| {
        let line = Line::from(vec![
          Span::styled(
            format!("{:<28}", truncate(&character.name, 28)),
            Style::default().fg(name_color).bold(),
          ),
          Span::raw(" "),
          Span::styled("● ", Style::default().fg(palette.status(character.status))),
          Span::styled(
            format!("{:<14}", truncate(status_label(character.status, messages), 14)),
            Style::default().fg(palette.status(character.status)),
          ),
          Span::styled(
            format!("{:<16}", truncate(&character.species, 16)),
            Style::default().fg(palette.muted),
          ),
          Span::raw(truncate(&character.location.name, 40)),
        ]);
        ListItem::new(line)
      })
      .collect();

    let list = List::new(items)
      .block(block)
      .highlight_style(
        Style::default()
          .bg(palette.highlight)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut self.list_state);
  }
}

impl View for CharacterListView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    // Let search component try to handle first
    match self.search.handle_key(key, self.browse.search_query()) {
      KeyResult::Event(SearchEvent::Submitted(value)) => {
        self.submit_search(&value);
        return ViewAction::None;
      }
      KeyResult::Handled => return ViewAction::None,
      KeyResult::NotHandled => {}
    }

    let current = self.browse.current_page();
    let total = self.total_pages();
    match key.code {
      KeyCode::Char('j') | KeyCode::Down => self.list_state.select_next(),
      KeyCode::Char('k') | KeyCode::Up => self.list_state.select_previous(),
      KeyCode::Char('n') | KeyCode::Right if has_next(current, total) => self.go_to(current + 1),
      KeyCode::Char('p') | KeyCode::Left if has_previous(current) => self.go_to(current - 1),
      KeyCode::Char('g') | KeyCode::Home if total > 0 => self.go_to(1),
      KeyCode::Char('G') | KeyCode::End if total > 0 => self.go_to(total),
      // Bounds reached; swallow the key
      KeyCode::Char('n' | 'p' | 'g' | 'G') => {}
      KeyCode::Left | KeyCode::Right | KeyCode::Home | KeyCode::End => {}
      KeyCode::Char('r') => self.query.refetch(),
      KeyCode::Char('c') if !self.browse.search_query().is_empty() => {
        self.search_hint = false;
        self.browse.set_search("");
        self.sync();
      }
      KeyCode::Enter => {
        let selected = self
          .list_state
          .selected()
          .and_then(|idx| self.characters().get(idx));
        if let Some(character) = selected {
          return ViewAction::Push(Box::new(CharacterDetailView::new(
            character.clone(),
            self.client.clone(),
          )));
        }
      }
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      _ => return ViewAction::NotHandled,
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &UiContext) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(1), // Search line
        Constraint::Min(3),    // Results
        Constraint::Length(2), // Pagination
      ])
      .split(area);

    self.render_search_line(frame, chunks[0], ctx);
    self.render_list(frame, chunks[1], ctx);
    draw_pagination(
      frame,
      chunks[2],
      self.browse.current_page(),
      self.total_pages(),
      ctx,
    );
    // Let search component render its overlay
    self.search.render_overlay(frame, area, ctx);
  }

  fn breadcrumb_label(&self, messages: &Messages) -> String {
    let page = format!("{} {}", messages.page, self.browse.current_page());
    if self.browse.search_query().is_empty() {
      page
    } else {
      format!("\"{}\" {}", self.browse.search_query(), page)
    }
  }

  fn tick(&mut self) {
    self.query.poll();
  }

  fn shortcuts(&self, messages: &'static Messages) -> Vec<Shortcut> {
    vec![
      Shortcut::new("/", messages.search).with_priority(10),
      Shortcut::new("n/p", messages.page).with_priority(20),
      Shortcut::new("enter", messages.episodes).with_priority(30),
      Shortcut::new("r", messages.refresh).with_priority(40),
      Shortcut::new("q", messages.quit).with_priority(90),
    ]
  }
}
