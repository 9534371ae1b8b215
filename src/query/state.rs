use crate::catalog::FetchError;
use crate::i18n::Messages;

/// The state of a query
#[derive(Debug, Clone)]
pub enum QueryState<T> {
  /// Query has not been started
  Idle,
  /// Query is fetching and has nothing settled to show yet
  Loading,
  /// Query completed successfully
  Success(T),
  /// Query failed; the error is terminal until the next fetch
  Error(QueryError),
}

impl<T> QueryState<T> {
  pub fn is_loading(&self) -> bool {
    matches!(self, QueryState::Loading)
  }

  pub fn is_success(&self) -> bool {
    matches!(self, QueryState::Success(_))
  }

  pub fn is_error(&self) -> bool {
    matches!(self, QueryState::Error(_))
  }

  pub fn data(&self) -> Option<&T> {
    match self {
      QueryState::Success(data) => Some(data),
      _ => None,
    }
  }

  pub fn error(&self) -> Option<&QueryError> {
    match self {
      QueryState::Error(e) => Some(e),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// The catalog has no rows for the request
  NotFound,
  /// Network or server failure, after retries
  Transport,
  /// The task producing the result went away
  Cancelled,
}

/// A user-facing query failure.
///
/// Holds no text of its own: the message is looked up in the active
/// locale's table whenever it is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
  kind: ErrorKind,
  filter: Option<String>,
}

impl QueryError {
  pub fn new(kind: ErrorKind) -> Self {
    Self { kind, filter: None }
  }

  /// Attach the name filter that was active for the failed request.
  /// Empty filters are dropped.
  pub fn with_filter(mut self, filter: &str) -> Self {
    let filter = filter.trim();
    self.filter = (!filter.is_empty()).then(|| filter.to_string());
    self
  }

  pub fn kind(&self) -> ErrorKind {
    self.kind
  }

  pub fn filter(&self) -> Option<&str> {
    self.filter.as_deref()
  }

  pub fn message(&self, messages: &Messages) -> String {
    match (self.kind, &self.filter) {
      (ErrorKind::NotFound, Some(name)) => messages.error_searching(name),
      (ErrorKind::NotFound, None) => messages.no_characters_found.to_string(),
      (ErrorKind::Transport | ErrorKind::Cancelled, _) => messages.error_loading.to_string(),
    }
  }
}

impl From<&FetchError> for QueryError {
  fn from(err: &FetchError) -> Self {
    match err {
      FetchError::NotFound => Self::new(ErrorKind::NotFound),
      FetchError::Transport { .. } => Self::new(ErrorKind::Transport),
    }
  }
}
