//! Which page of which search the list is showing.

/// Current page number and search query for the character list.
///
/// Bounds are not checked here; the pagination control stops at the
/// page count of the last response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseState {
  current_page: u32,
  search_query: String,
}

impl BrowseState {
  pub fn new(search_query: &str, current_page: u32) -> Self {
    Self {
      current_page,
      search_query: search_query.to_string(),
    }
  }

  pub fn current_page(&self) -> u32 {
    self.current_page
  }

  pub fn search_query(&self) -> &str {
    &self.search_query
  }

  /// Start a new search. Always goes back to page 1, even for the same query.
  pub fn set_search(&mut self, query: &str) {
    self.search_query = query.to_string();
    self.current_page = 1;
  }

  pub fn set_page(&mut self, page: u32) {
    self.current_page = page;
  }
}

impl Default for BrowseState {
  fn default() -> Self {
    Self::new("", 1)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let state = BrowseState::default();
    assert_eq!(state.current_page(), 1);
    assert_eq!(state.search_query(), "");
  }

  #[test]
  fn test_search_resets_page() {
    let mut state = BrowseState::default();
    state.set_page(4);
    state.set_search("rick");
    assert_eq!(state.current_page(), 1);
    assert_eq!(state.search_query(), "rick");
  }

  #[test]
  fn test_same_search_still_resets_page() {
    let mut state = BrowseState::new("rick", 3);
    state.set_search("rick");
    assert_eq!(state.current_page(), 1);
  }

  #[test]
  fn test_set_page_is_unchecked() {
    let mut state = BrowseState::default();
    state.set_page(999);
    assert_eq!(state.current_page(), 999);
  }
}
