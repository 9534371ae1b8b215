use std::fmt;

/// Identity of one page of results: the trimmed name filter plus the page
/// number. An empty filter means "unfiltered".
///
/// Two identities are equal iff both parts are equal; this is the key for
/// the response cache, request dedup, and the page tracker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryIdentity {
  name: String,
  page: u32,
}

impl QueryIdentity {
  /// Pages start at 1; anything lower is clamped.
  pub fn new(name: &str, page: u32) -> Self {
    Self {
      name: name.trim().to_string(),
      page: page.max(1),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn page(&self) -> u32 {
    self.page
  }

  pub fn is_filtered(&self) -> bool {
    !self.name.is_empty()
  }

  /// Same filter, previous page. None on the first page.
  pub fn previous(&self) -> Option<Self> {
    (self.page > 1).then(|| Self {
      name: self.name.clone(),
      page: self.page - 1,
    })
  }

  /// Same filter, next page.
  pub fn next(&self) -> Self {
    Self {
      name: self.name.clone(),
      page: self.page.saturating_add(1),
    }
  }
}

impl fmt::Display for QueryIdentity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.name, self.page)
  }
}
