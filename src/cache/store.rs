//! Keyed page cache with in-flight request sharing and time-based retention.

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::time::{Duration, Instant};
use tracing::debug;

use super::key::QueryIdentity;
use crate::catalog::{FetchError, Page};

/// Default residency for an unused entry.
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(10 * 60);

pub type FetchResult = Result<Arc<Page>, FetchError>;

/// A request any number of callers can await; all of them get the same result.
pub type SharedFetch = Shared<BoxFuture<'static, FetchResult>>;

/// What the cache holds for one identity
#[derive(Debug, Clone, PartialEq)]
pub enum Cached {
  Page(Arc<Page>),
  /// The catalog answered "no match" for this identity
  Empty,
}

impl Cached {
  pub fn page(&self) -> Option<&Arc<Page>> {
    match self {
      Cached::Page(page) => Some(page),
      Cached::Empty => None,
    }
  }
}

struct Entry {
  value: Option<Cached>,
  updated_at: Option<Instant>,
  last_used: Instant,
  in_flight: Option<SharedFetch>,
}

impl Entry {
  fn new(now: Instant) -> Self {
    Self {
      value: None,
      updated_at: None,
      last_used: now,
      in_flight: None,
    }
  }
}

type Entries = Mutex<HashMap<QueryIdentity, Entry>>;

/// Response cache shared by the foreground query and background prefetches.
///
/// - at most one request per identity is in flight; later callers join it
/// - a value is stale once `stale_time` has passed since it arrived
/// - an entry unused for `retention` is dropped, stale or not
///
/// Cloning is cheap and every clone sees the same entries.
#[derive(Clone)]
pub struct QueryCache {
  entries: Arc<Entries>,
  stale_time: Duration,
  retention: Duration,
}

impl QueryCache {
  pub fn new(retention: Duration) -> Self {
    Self {
      entries: Arc::new(Mutex::new(HashMap::new())),
      stale_time: Duration::ZERO,
      retention,
    }
  }

  /// Set how long a value counts as fresh. Zero means stale on arrival.
  #[cfg(test)]
  pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
    self.stale_time = stale_time;
    self
  }

  /// Last known value for an identity, if still resident.
  pub fn get(&self, identity: &QueryIdentity) -> Option<Cached> {
    let now = Instant::now();
    let mut entries = self.entries.lock();
    self.evict_expired(&mut entries, now);
    let entry = entries.get_mut(identity)?;
    entry.last_used = now;
    entry.value.clone()
  }

  /// Keep an entry resident, as if it had just been read.
  pub fn mark_used(&self, identity: &QueryIdentity) {
    if let Some(entry) = self.entries.lock().get_mut(identity) {
      entry.last_used = Instant::now();
    }
  }

  /// True while the value is younger than the stale time.
  pub fn is_fresh(&self, identity: &QueryIdentity) -> bool {
    let entries = self.entries.lock();
    entries
      .get(identity)
      .and_then(|entry| entry.updated_at)
      .is_some_and(|updated| updated.elapsed() < self.stale_time)
  }

  pub fn is_fetching(&self, identity: &QueryIdentity) -> bool {
    let entries = self.entries.lock();
    entries
      .get(identity)
      .is_some_and(|entry| entry.in_flight.is_some())
  }

  /// Start a request for `identity`, or join the one already in flight.
  ///
  /// `fetcher` is only called when no request is in flight. The returned
  /// future records its result in the cache when it completes, whoever
  /// drives it.
  pub fn fetch<F>(&self, identity: &QueryIdentity, fetcher: F) -> SharedFetch
  where
    F: FnOnce() -> BoxFuture<'static, Result<Page, FetchError>>,
  {
    let now = Instant::now();
    let mut entries = self.entries.lock();
    self.evict_expired(&mut entries, now);

    let entry = entries
      .entry(identity.clone())
      .or_insert_with(|| Entry::new(now));
    entry.last_used = now;

    if let Some(in_flight) = &entry.in_flight {
      debug!(%identity, "joining in-flight request");
      return in_flight.clone();
    }

    let request = fetcher();
    let cache = Arc::downgrade(&self.entries);
    let key = identity.clone();
    let shared = async move {
      let result = request.await.map(Arc::new);
      if let Some(entries) = cache.upgrade() {
        settle(&entries, &key, &result);
      }
      result
    }
    .boxed()
    .shared();

    entry.in_flight = Some(shared.clone());
    shared
  }

  /// Drop every entry unused for longer than the retention period.
  /// Returns how many were dropped.
  pub fn sweep(&self) -> usize {
    let mut entries = self.entries.lock();
    self.evict_expired(&mut entries, Instant::now())
  }

  #[cfg(test)]
  pub fn len(&self) -> usize {
    self.entries.lock().len()
  }

  fn evict_expired(&self, entries: &mut HashMap<QueryIdentity, Entry>, now: Instant) -> usize {
    let before = entries.len();
    entries.retain(|identity, entry| {
      let keep = entry.in_flight.is_some() || now.duration_since(entry.last_used) < self.retention;
      if !keep {
        debug!(%identity, "evicting cache entry");
      }
      keep
    });
    before - entries.len()
  }
}

impl Default for QueryCache {
  fn default() -> Self {
    Self::new(DEFAULT_RETENTION)
  }
}

fn settle(entries: &Entries, identity: &QueryIdentity, result: &FetchResult) {
  let now = Instant::now();
  let mut entries = entries.lock();
  let entry = entries
    .entry(identity.clone())
    .or_insert_with(|| Entry::new(now));
  entry.in_flight = None;
  entry.last_used = now;

  match result {
    Ok(page) => {
      entry.value = Some(Cached::Page(Arc::clone(page)));
      entry.updated_at = Some(now);
    }
    Err(FetchError::NotFound) => {
      entry.value = Some(Cached::Empty);
      entry.updated_at = Some(now);
    }
    Err(err) => {
      // Keep whatever was there before
      debug!(%identity, %err, "request failed");
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::fixtures::{page_of, transport_error};
  use std::sync::atomic::{AtomicUsize, Ordering};

  fn counting_fetcher(
    counter: &Arc<AtomicUsize>,
    result: Result<Page, FetchError>,
  ) -> impl FnOnce() -> BoxFuture<'static, Result<Page, FetchError>> {
    let counter = Arc::clone(counter);
    move || {
      counter.fetch_add(1, Ordering::SeqCst);
      async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        result
      }
      .boxed()
    }
  }

  #[tokio::test(start_paused = true)]
  async fn test_concurrent_fetches_share_one_request() {
    let cache = QueryCache::default();
    let identity = QueryIdentity::new("", 1);
    let counter = Arc::new(AtomicUsize::new(0));

    let first = cache.fetch(&identity, counting_fetcher(&counter, Ok(page_of("A", 1, 3))));
    let second = cache.fetch(&identity, counting_fetcher(&counter, Ok(page_of("B", 1, 3))));
    assert!(cache.is_fetching(&identity));

    let (a, b) = tokio::join!(first, second);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert_eq!(a.unwrap(), b.unwrap());
    assert!(!cache.is_fetching(&identity));
  }

  #[tokio::test(start_paused = true)]
  async fn test_fetch_after_completion_issues_new_request() {
    let cache = QueryCache::default();
    let identity = QueryIdentity::new("", 1);
    let counter = Arc::new(AtomicUsize::new(0));

    cache
      .fetch(&identity, counting_fetcher(&counter, Ok(page_of("A", 1, 3))))
      .await
      .unwrap();
    cache
      .fetch(&identity, counting_fetcher(&counter, Ok(page_of("B", 1, 3))))
      .await
      .unwrap();

    assert_eq!(counter.load(Ordering::SeqCst), 2);
    let cached = cache.get(&identity).unwrap();
    assert_eq!(cached.page().unwrap().results[0].name, "B 1.1");
  }

  #[tokio::test(start_paused = true)]
  async fn test_identities_are_independent() {
    let cache = QueryCache::default();
    let counter = Arc::new(AtomicUsize::new(0));
    let unfiltered = QueryIdentity::new("", 1);
    let filtered = QueryIdentity::new("rick", 1);

    cache
      .fetch(&unfiltered, counting_fetcher(&counter, Ok(page_of("All", 1, 3))))
      .await
      .unwrap();
    cache
      .fetch(&filtered, counting_fetcher(&counter, Ok(page_of("Rick", 1, 1))))
      .await
      .unwrap();

    let a = cache.get(&unfiltered).unwrap();
    let b = cache.get(&filtered).unwrap();
    assert_eq!(a.page().unwrap().results[0].name, "All 1.1");
    assert_eq!(b.page().unwrap().results[0].name, "Rick 1.1");
  }

  #[tokio::test(start_paused = true)]
  async fn test_not_found_is_cached_as_empty() {
    let cache = QueryCache::default();
    let identity = QueryIdentity::new("", 43);
    let counter = Arc::new(AtomicUsize::new(0));

    let result = cache
      .fetch(&identity, counting_fetcher(&counter, Err(FetchError::NotFound)))
      .await;

    assert_eq!(result, Err(FetchError::NotFound));
    assert_eq!(cache.get(&identity), Some(Cached::Empty));
  }

  #[tokio::test(start_paused = true)]
  async fn test_transport_error_keeps_previous_value() {
    let cache = QueryCache::default();
    let identity = QueryIdentity::new("", 1);
    let counter = Arc::new(AtomicUsize::new(0));

    cache
      .fetch(&identity, counting_fetcher(&counter, Ok(page_of("A", 1, 3))))
      .await
      .unwrap();
    let result = cache
      .fetch(&identity, counting_fetcher(&counter, Err(transport_error())))
      .await;

    assert!(result.is_err());
    let cached = cache.get(&identity).unwrap();
    assert_eq!(cached.page().unwrap().results[0].name, "A 1.1");
  }

  #[tokio::test(start_paused = true)]
  async fn test_unused_entries_are_evicted_after_retention() {
    let cache = QueryCache::new(Duration::from_secs(600));
    let identity = QueryIdentity::new("", 1);
    let counter = Arc::new(AtomicUsize::new(0));

    cache
      .fetch(&identity, counting_fetcher(&counter, Ok(page_of("A", 1, 3))))
      .await
      .unwrap();

    tokio::time::advance(Duration::from_secs(599)).await;
    assert_eq!(cache.sweep(), 0);
    assert!(cache.get(&identity).is_some());

    // The read above renewed the entry
    tokio::time::advance(Duration::from_secs(601)).await;
    assert_eq!(cache.sweep(), 1);
    assert!(cache.get(&identity).is_none());
    assert_eq!(cache.len(), 0);
  }

  #[tokio::test(start_paused = true)]
  async fn test_in_flight_entries_are_not_evicted() {
    let cache = QueryCache::new(Duration::from_secs(1));
    let identity = QueryIdentity::new("", 1);

    let pending = cache.fetch(&identity, || {
      async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(page_of("Slow", 1, 1))
      }
      .boxed()
    });

    tokio::time::advance(Duration::from_secs(2)).await;
    assert_eq!(cache.sweep(), 0);
    assert!(cache.is_fetching(&identity));

    pending.await.unwrap();
    assert!(cache.get(&identity).is_some());
  }

  #[tokio::test(start_paused = true)]
  async fn test_stale_on_arrival_by_default() {
    let cache = QueryCache::default();
    let identity = QueryIdentity::new("", 1);
    let counter = Arc::new(AtomicUsize::new(0));

    cache
      .fetch(&identity, counting_fetcher(&counter, Ok(page_of("A", 1, 3))))
      .await
      .unwrap();
    assert!(!cache.is_fresh(&identity));
  }

  #[tokio::test(start_paused = true)]
  async fn test_stale_time_window() {
    let cache = QueryCache::default().with_stale_time(Duration::from_secs(60));
    let identity = QueryIdentity::new("", 1);
    let counter = Arc::new(AtomicUsize::new(0));

    cache
      .fetch(&identity, counting_fetcher(&counter, Ok(page_of("A", 1, 3))))
      .await
      .unwrap();
    assert!(cache.is_fresh(&identity));

    tokio::time::advance(Duration::from_secs(61)).await;
    assert!(!cache.is_fresh(&identity));
  }
}
