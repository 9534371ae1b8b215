use crossterm::event::KeyEvent;
use ratatui::prelude::*;

use super::theme::Palette;
use crate::i18n::Messages;

/// A keyboard shortcut hint for display in the footer
#[derive(Debug, Clone)]
pub struct Shortcut {
  pub key: &'static str,
  pub label: &'static str,
  pub priority: u8, // Lower = shown first
}

impl Shortcut {
  pub const fn new(key: &'static str, label: &'static str) -> Self {
    Self {
      key,
      label,
      priority: 100,
    }
  }

  pub const fn with_priority(mut self, priority: u8) -> Self {
    self.priority = priority;
    self
  }
}

/// Everything a view needs to know about the global presentation settings
pub struct UiContext<'a> {
  pub palette: &'a Palette,
  pub messages: &'static Messages,
  pub decorative_font: bool,
  pub show_portal: bool,
}

/// Actions that a view can request in response to user input
pub enum ViewAction {
  /// Key consumed, nothing else to do
  None,
  /// Key not used by the view; the app may treat it as a global shortcut
  NotHandled,
  /// Push a new view onto the stack
  Push(Box<dyn View>),
  /// Pop current view from stack (go back)
  Pop,
}

/// Trait for view behavior
///
/// Views handle their own input modes (search overlay, scrolling) and
/// return actions for the App to execute: App → View → Components.
///
/// Views that load data asynchronously poll their queries in `tick()`.
pub trait View {
  /// Handle a key event, returning an action for App to execute
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction;

  /// Render the view to the frame
  fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &UiContext);

  /// Get the breadcrumb label for this view
  fn breadcrumb_label(&self, messages: &Messages) -> String;

  /// Called on each tick to allow views to poll async queries
  fn tick(&mut self) {}

  /// Keyboard shortcuts to display in the footer
  fn shortcuts(&self, messages: &'static Messages) -> Vec<Shortcut> {
    vec![Shortcut::new("q", messages.close).with_priority(90)]
  }
}
