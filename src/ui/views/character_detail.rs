use crate::catalog::{CatalogClient, Character, Episode};
use crate::i18n::Messages;
use crate::query::{Query, QueryState};
use crate::ui::renderfns::status_label;
use crate::ui::view::{Shortcut, UiContext, View, ViewAction};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState};

/// All fields of one character plus the episodes it appears in
pub struct CharacterDetailView {
  character: Character,
  episodes: Query<Vec<Episode>>,
  table_state: TableState,
}

impl CharacterDetailView {
  pub fn new(character: Character, client: CatalogClient) -> Self {
    let ids = character.episode_ids();
    let mut episodes = Query::new(move || {
      let client = client.clone();
      let ids = ids.clone();
      async move { client.fetch_episodes(&ids).await }
    });

    // Start fetching immediately
    episodes.fetch();

    Self {
      character,
      episodes,
      table_state: TableState::default(),
    }
  }

  fn field<'a>(label: &'a str, value: Span<'a>, ctx: &UiContext) -> Line<'a> {
    Line::from(vec![
      Span::styled(format!("{}: ", label), Style::default().fg(ctx.palette.muted)),
      value,
    ])
  }

  fn render_fields(&self, frame: &mut Frame, area: Rect, ctx: &UiContext) {
    let messages = ctx.messages;
    let text = Style::default().fg(ctx.palette.text);
    let c = &self.character;

    let lines = vec![
      Self::field(
        messages.status,
        Span::styled(
          format!("● {}", status_label(c.status, messages)),
          Style::default().fg(ctx.palette.status(c.status)),
        ),
        ctx,
      ),
      Self::field(messages.species, Span::styled(c.species.as_str(), text), ctx),
      Self::field(
        messages.kind,
        Span::styled(c.kind.as_deref().unwrap_or(messages.unknown), text),
        ctx,
      ),
      Self::field(messages.gender, Span::styled(c.gender.as_str(), text), ctx),
      Self::field(messages.origin, Span::styled(c.origin.name.as_str(), text), ctx),
      Self::field(
        messages.last_known_location,
        Span::styled(c.location.name.as_str(), text),
        ctx,
      ),
      Self::field(
        messages.first_seen_in,
        Span::styled(c.origin.name.as_str(), text),
        ctx,
      ),
      Self::field(
        messages.created,
        Span::styled(c.created.format("%Y-%m-%d").to_string(), text),
        ctx,
      ),
      Line::from(Span::styled(
        c.image.as_str(),
        Style::default().fg(ctx.palette.muted).italic(),
      )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
  }

  fn render_episodes(&mut self, frame: &mut Frame, area: Rect, ctx: &UiContext) {
    let messages = ctx.messages;
    let palette = ctx.palette;

    let count = self.episodes.data().map(Vec::len);
    let title = match count {
      Some(n) => format!(" {} ({}) ", messages.episodes, n),
      None => format!(" {} ", messages.episodes),
    };
    let block = Block::default()
      .title(Span::styled(title, palette.heading(ctx.decorative_font)))
      .borders(Borders::TOP)
      .border_style(Style::default().fg(palette.border));

    let episodes = match self.episodes.state() {
      QueryState::Success(episodes) => episodes,
      QueryState::Error(_) => {
        let paragraph = Paragraph::new(messages.error_loading_episodes)
          .block(block)
          .style(Style::default().fg(palette.error));
        frame.render_widget(paragraph, area);
        return;
      }
      QueryState::Idle | QueryState::Loading => {
        let paragraph = Paragraph::new(messages.loading)
          .block(block)
          .style(Style::default().fg(palette.muted));
        frame.render_widget(paragraph, area);
        return;
      }
    };

    let rows: Vec<Row> = episodes
      .iter()
      .map(|episode| {
        Row::new(vec![
          episode.code.clone(),
          episode.name.clone(),
          episode.air_date.clone(),
        ])
      })
      .collect();
    let header = Row::new(vec![messages.episode, messages.name, messages.air_date])
      .style(Style::default().fg(palette.accent).bold());

    let table = Table::new(
      rows,
      [
        Constraint::Length(8),
        Constraint::Min(20),
        Constraint::Length(20),
      ],
    )
    .header(header)
    .block(block)
    .style(Style::default().fg(palette.text))
    .row_highlight_style(Style::default().bg(palette.highlight));

    frame.render_stateful_widget(table, area, &mut self.table_state);
  }
}

impl View for CharacterDetailView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match key.code {
      KeyCode::Char('j') | KeyCode::Down => self.table_state.select_next(),
      KeyCode::Char('k') | KeyCode::Up => self.table_state.select_previous(),
      KeyCode::Char('r') => self.episodes.refetch(),
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      _ => return ViewAction::NotHandled,
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &UiContext) {
    let block = Block::default()
      .title(Span::styled(
        format!(" {} ", self.character.name),
        ctx.palette.heading(ctx.decorative_font),
      ))
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(ctx.palette.border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(9), // Fields
        Constraint::Min(3),    // Episodes
      ])
      .split(inner);

    self.render_fields(frame, chunks[0], ctx);
    self.render_episodes(frame, chunks[1], ctx);
  }

  fn breadcrumb_label(&self, _messages: &Messages) -> String {
    self.character.name.clone()
  }

  fn tick(&mut self) {
    self.episodes.poll();
  }

  fn shortcuts(&self, messages: &'static Messages) -> Vec<Shortcut> {
    vec![
      Shortcut::new("r", messages.refresh),
      Shortcut::new("q", messages.close).with_priority(90),
    ]
  }
}
