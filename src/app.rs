use crate::event::{Event, EventHandler};
use crate::i18n::{Locale, Messages};
use crate::prefs::{Preferences, Theme};
use crate::ui;
use crate::ui::view::{Shortcut, View, ViewAction};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tracing::{info, warn};

const TICK_RATE: Duration = Duration::from_millis(250);

/// Main application state
pub struct App {
  /// Navigation stack - root is always at index 0
  view_stack: Vec<Box<dyn View>>,

  /// Persisted theme, font and language choices
  prefs: Preferences,

  /// Active UI language
  locale: Locale,

  /// Decorative background; lasts for the session only
  show_portal: bool,

  /// Ticks since start, drives the portal animation
  ticks: u64,

  /// Whether to quit
  should_quit: bool,
}

impl App {
  pub fn new(root: Box<dyn View>, prefs: Preferences, locale: Locale) -> Self {
    Self {
      view_stack: vec![root],
      prefs,
      locale,
      show_portal: true,
      ticks: 0,
      should_quit: false,
    }
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let result = self.event_loop().await;

    // Cleanup terminal, even if the loop failed
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
  }

  async fn event_loop(&mut self) -> Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    let mut events = EventHandler::new(TICK_RATE);
    info!(locale = %self.locale, theme = %self.prefs.theme(), "started");

    while !self.should_quit {
      terminal.draw(|frame| ui::draw(frame, self))?;

      match events.next().await {
        Some(event) => self.handle_event(event),
        None => break,
      }
    }
    Ok(())
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Resize => {} // Redrawn on the next loop iteration
      Event::Tick => {
        self.ticks = self.ticks.wrapping_add(1);
        // Views underneath keep polling so their data is current on return
        for view in &mut self.view_stack {
          view.tick();
        }
      }
    }
  }

  fn handle_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    let Some(view) = self.view_stack.last_mut() else {
      self.should_quit = true;
      return;
    };
    match view.handle_key(key) {
      ViewAction::None => {}
      ViewAction::Push(view) => self.view_stack.push(view),
      ViewAction::Pop => {
        if self.view_stack.len() > 1 {
          self.view_stack.pop();
        } else {
          self.should_quit = true;
        }
      }
      ViewAction::NotHandled => self.handle_global_key(key),
    }
  }

  /// Shortcuts that work in every view
  fn handle_global_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('t') => match self.prefs.toggle_theme() {
        Ok(theme) => info!(%theme, "theme changed"),
        Err(e) => warn!(error = %e, "failed to save theme"),
      },
      KeyCode::Char('f') => match self.prefs.toggle_decorative_font() {
        Ok(decorative) => info!(decorative, "font changed"),
        Err(e) => warn!(error = %e, "failed to save font"),
      },
      KeyCode::Char('b') => self.show_portal = !self.show_portal,
      KeyCode::Char('L') => {
        self.locale = self.locale.next();
        info!(locale = %self.locale, "language changed");
        if let Err(e) = self.prefs.set_language(self.locale) {
          warn!(error = %e, "failed to save language");
        }
      }
      _ => {}
    }
  }

  // Accessors for UI rendering
  pub fn current_view_mut(&mut self) -> Option<&mut Box<dyn View>> {
    self.view_stack.last_mut()
  }

  pub fn theme(&self) -> Theme {
    self.prefs.theme()
  }

  pub fn decorative_font(&self) -> bool {
    self.prefs.decorative_font()
  }

  pub fn locale(&self) -> Locale {
    self.locale
  }

  pub fn show_portal(&self) -> bool {
    self.show_portal
  }

  pub fn ticks(&self) -> u64 {
    self.ticks
  }

  pub fn breadcrumb(&self, messages: &Messages) -> Vec<String> {
    self
      .view_stack
      .iter()
      .map(|v| v.breadcrumb_label(messages))
      .collect()
  }

  pub fn shortcuts(&self, messages: &'static Messages) -> Vec<Shortcut> {
    self
      .view_stack
      .last()
      .map(|v| v.shortcuts(messages))
      .unwrap_or_default()
  }
}
