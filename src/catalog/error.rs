//! Error kinds for catalog requests.

use thiserror::Error;

/// Failure of a single catalog request.
///
/// `Clone` so that one in-flight result can be handed to every caller that
/// joined it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
  /// The catalog matched no rows for this page/filter combination (HTTP 404).
  #[error("no characters matched")]
  NotFound,
  /// Network failure or any non-404 error response.
  #[error("{}", fmt_transport(.status, .message))]
  Transport {
    status: Option<u16>,
    message: String,
  },
}

impl FetchError {
  pub fn is_not_found(&self) -> bool {
    matches!(self, FetchError::NotFound)
  }

  pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
    FetchError::Transport {
      status: err.status().map(|s| s.as_u16()),
      message: err.to_string(),
    }
  }
}

fn fmt_transport(status: &Option<u16>, message: &str) -> String {
  match status {
    Some(status) => format!("catalog request failed ({status}): {message}"),
    None => format!("catalog request failed: {message}"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_transport_display_with_status() {
    let err = FetchError::Transport {
      status: Some(502),
      message: "bad gateway".to_string(),
    };
    assert_eq!(err.to_string(), "catalog request failed (502): bad gateway");
    assert!(!err.is_not_found());
  }

  #[test]
  fn test_transport_display_without_status() {
    let err = FetchError::Transport {
      status: None,
      message: "connection refused".to_string(),
    };
    assert_eq!(err.to_string(), "catalog request failed: connection refused");
  }
}
