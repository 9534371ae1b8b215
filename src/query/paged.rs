//! Paged character query: drives the page on screen and keeps its
//! neighbours warm.
//!
//! On every `select(page, name)` that changes the active identity:
//!
//! 1. the identity is touched in the `PageTracker`
//! 2. the foreground request starts (or joins one already in flight)
//! 3. the previous page (when there is one) and the next page are
//!    prefetched in the background
//!
//! While the foreground request runs, whatever was on screen before stays
//! visible as placeholder data. Only the foreground request is retried and
//! only its failures reach `state()`; prefetch failures are logged and
//! dropped, and a prefetch that finds no rows just leaves an empty entry
//! in the cache.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

use super::state::{QueryError, QueryState};
use crate::cache::{Cached, PageTracker, QueryCache, QueryIdentity};
use crate::catalog::{CharacterSource, FetchError, Page};

const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Foreground request policy
#[derive(Debug, Clone)]
pub struct FetchPolicy {
  /// Total attempts for a transport failure, including the first
  pub max_attempts: u32,
  /// Backoff base; doubles per attempt up to 30s
  pub retry_delay: Duration,
  /// Minimum time a foreground request stays loading
  pub min_loading: Duration,
}

impl FetchPolicy {
  fn backoff(&self, attempt: u32) -> Duration {
    let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
    self
      .retry_delay
      .checked_mul(factor)
      .map_or(MAX_RETRY_DELAY, |delay| delay.min(MAX_RETRY_DELAY))
  }
}

impl Default for FetchPolicy {
  fn default() -> Self {
    Self {
      max_attempts: 3,
      retry_delay: Duration::from_secs(1),
      min_loading: Duration::from_millis(200),
    }
  }
}

type FetchResult = Result<Arc<Page>, FetchError>;

struct Outcome {
  generation: u64,
  result: FetchResult,
}

/// Query for one page of characters at a time.
pub struct PagedQuery {
  source: Arc<dyn CharacterSource>,
  cache: QueryCache,
  tracker: Arc<PageTracker>,
  policy: FetchPolicy,
  identity: Option<QueryIdentity>,
  state: QueryState<Arc<Page>>,
  placeholder: Option<Arc<Page>>,
  fetching: bool,
  generation: u64,
  tx: mpsc::UnboundedSender<Outcome>,
  rx: mpsc::UnboundedReceiver<Outcome>,
}

impl PagedQuery {
  pub fn new(
    source: Arc<dyn CharacterSource>,
    cache: QueryCache,
    tracker: Arc<PageTracker>,
    policy: FetchPolicy,
  ) -> Self {
    let (tx, rx) = mpsc::unbounded_channel();
    Self {
      source,
      cache,
      tracker,
      policy,
      identity: None,
      state: QueryState::Idle,
      placeholder: None,
      fetching: false,
      generation: 0,
      tx,
      rx,
    }
  }

  /// Make `(page, name)` the active identity. A no-op when it already is.
  pub fn select(&mut self, page: u32, name: &str) {
    let identity = QueryIdentity::new(name, page);
    if self.identity.as_ref() == Some(&identity) {
      return;
    }
    info!(%identity, "selecting page");

    self.tracker.touch(&identity);
    let previous = self.data().cloned();

    match self.cache.get(&identity) {
      Some(Cached::Page(page)) => {
        debug!(%identity, "showing cached page");
        self.state = QueryState::Success(page);
        self.placeholder = None;
      }
      Some(Cached::Empty) => {
        self.state = QueryState::Error(not_found(&identity));
        self.placeholder = None;
      }
      None => {
        self.state = QueryState::Loading;
        self.placeholder = previous;
      }
    }

    self.identity = Some(identity.clone());
    if self.cache.is_fresh(&identity) {
      self.fetching = false;
      self.generation += 1;
    } else {
      self.start(identity.clone());
    }

    if let Some(previous) = identity.previous() {
      self.prefetch(previous);
    }
    self.prefetch(identity.next());
  }

  /// Revalidate the active identity, keeping what is shown until it settles.
  pub fn refetch(&mut self) {
    if let Some(identity) = self.identity.clone() {
      self.start(identity);
    }
  }

  /// Apply finished foreground results. Returns `true` if anything changed.
  pub fn poll(&mut self) -> bool {
    let mut changed = false;
    while let Ok(outcome) = self.rx.try_recv() {
      changed |= self.receive(outcome);
    }
    if let Some(identity) = &self.identity {
      self.cache.mark_used(identity);
    }
    let evicted = self.cache.sweep();
    if evicted > 0 {
      debug!(evicted, "dropped unused pages");
    }
    changed
  }

  #[cfg(test)]
  pub fn state(&self) -> &QueryState<Arc<Page>> {
    &self.state
  }

  /// Settled data, or the placeholder while the active page is loading.
  pub fn data(&self) -> Option<&Arc<Page>> {
    self.state.data().or(self.placeholder.as_ref())
  }

  /// True when `data()` belongs to a page other than the active one.
  pub fn is_placeholder_data(&self) -> bool {
    self.state.data().is_none() && self.placeholder.is_some()
  }

  /// True while a foreground request is in flight, whatever is shown.
  pub fn is_fetching(&self) -> bool {
    self.fetching
  }

  pub fn error(&self) -> Option<&QueryError> {
    self.state.error()
  }

  #[cfg(test)]
  pub fn identity(&self) -> Option<&QueryIdentity> {
    self.identity.as_ref()
  }

  /// Wait for the foreground request to settle.
  #[cfg(test)]
  pub async fn settle(&mut self) {
    while self.fetching {
      match self.rx.recv().await {
        Some(outcome) => {
          self.receive(outcome);
        }
        None => break,
      }
    }
  }

  fn receive(&mut self, outcome: Outcome) -> bool {
    if outcome.generation != self.generation {
      debug!(generation = outcome.generation, "ignoring superseded result");
      return false;
    }
    self.fetching = false;
    self.placeholder = None;

    let Some(identity) = self.identity.as_ref() else {
      return false;
    };
    self.state = match outcome.result {
      Ok(page) => QueryState::Success(page),
      Err(FetchError::NotFound) => {
        debug!(%identity, "no characters for page");
        QueryState::Error(not_found(identity))
      }
      Err(err) => {
        warn!(%identity, %err, "failed to load page");
        QueryState::Error(QueryError::from(&err))
      }
    };
    true
  }

  fn start(&mut self, identity: QueryIdentity) {
    self.generation += 1;
    self.fetching = true;

    // Register the request now so that prefetches issued right after
    // this join it instead of starting their own
    let first = self.cache.fetch(&identity, || {
      self.source.fetch_page(identity.page(), identity.name())
    });

    let generation = self.generation;
    let cache = self.cache.clone();
    let source = Arc::clone(&self.source);
    let policy = self.policy.clone();
    let tx = self.tx.clone();

    tokio::spawn(async move {
      let request = async {
        let mut attempt = 1;
        let mut result = first.await;
        while let Err(FetchError::Transport { .. }) = &result {
          if attempt >= policy.max_attempts {
            break;
          }
          let delay = policy.backoff(attempt);
          debug!(%identity, attempt, ?delay, "retrying page request");
          sleep(delay).await;
          attempt += 1;
          result = cache
            .fetch(&identity, || source.fetch_page(identity.page(), identity.name()))
            .await;
        }
        result
      };
      let (_, result) = tokio::join!(sleep(policy.min_loading), request);
      let _ = tx.send(Outcome { generation, result });
    });
  }

  fn prefetch(&self, identity: QueryIdentity) {
    if self.cache.is_fresh(&identity) {
      return;
    }
    let request = self.cache.fetch(&identity, || {
      self.source.fetch_page(identity.page(), identity.name())
    });
    tokio::spawn(async move {
      match request.await {
        Ok(_) => debug!(%identity, "prefetched page"),
        Err(FetchError::NotFound) => debug!(%identity, "prefetch found no characters"),
        Err(err) => debug!(%identity, %err, "prefetch failed"),
      }
    });
  }
}

fn not_found(identity: &QueryIdentity) -> QueryError {
  QueryError::from(&FetchError::NotFound).with_filter(identity.name())
}
