//! Bounded record of recently visited page identities.

use parking_lot::RwLock;
use std::collections::VecDeque;

use super::key::QueryIdentity;

/// Default number of identities remembered.
pub const DEFAULT_HISTORY_SIZE: usize = 5;

/// Most-recently-touched set of query identities.
///
/// Records presence only, never payloads. Ordering is by recency of access:
/// `touch` moves an identity to the back and evicts from the front once the
/// bound is exceeded. Every touch runs under one write lock, so readers
/// never see a half-evicted list.
#[derive(Debug)]
pub struct PageTracker {
  pages: RwLock<VecDeque<QueryIdentity>>,
  max_size: usize,
}

impl PageTracker {
  pub fn new(max_size: usize) -> Self {
    Self {
      pages: RwLock::new(VecDeque::with_capacity(max_size + 1)),
      max_size,
    }
  }

  /// Mark an identity as most recently used.
  pub fn touch(&self, identity: &QueryIdentity) {
    let mut pages = self.pages.write();
    pages.retain(|existing| existing != identity);
    pages.push_back(identity.clone());
    while pages.len() > self.max_size {
      pages.pop_front();
    }
  }

  /// Membership test. Does not change order.
  pub fn seen(&self, identity: &QueryIdentity) -> bool {
    self.pages.read().contains(identity)
  }

  /// Tracked identities, least recently used first.
  #[cfg(test)]
  pub fn snapshot(&self) -> Vec<QueryIdentity> {
    self.pages.read().iter().cloned().collect()
  }
}

impl Default for PageTracker {
  fn default() -> Self {
    Self::new(DEFAULT_HISTORY_SIZE)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;

  fn page(n: u32) -> QueryIdentity {
    QueryIdentity::new("", n)
  }

  #[test]
  fn test_sixth_touch_evicts_first() {
    let tracker = PageTracker::new(5);
    for n in 1..=6 {
      tracker.touch(&page(n));
    }

    assert!(!tracker.seen(&page(1)));
    for n in 2..=6 {
      assert!(tracker.seen(&page(n)), "page {} should be tracked", n);
    }
  }

  #[test]
  fn test_touch_moves_to_end() {
    let tracker = PageTracker::new(3);
    tracker.touch(&page(1));
    tracker.touch(&page(2));
    tracker.touch(&page(3));
    // Re-touching 1 makes 2 the oldest
    tracker.touch(&page(1));
    tracker.touch(&page(4));

    assert_eq!(tracker.snapshot(), vec![page(3), page(1), page(4)]);
    assert!(!tracker.seen(&page(2)));
  }

  #[test]
  fn test_touch_same_identity_does_not_duplicate() {
    let tracker = PageTracker::new(5);
    tracker.touch(&page(1));
    tracker.touch(&page(1));
    assert_eq!(tracker.snapshot(), vec![page(1)]);
  }

  #[test]
  fn test_seen_does_not_reorder() {
    let tracker = PageTracker::new(2);
    tracker.touch(&page(1));
    tracker.touch(&page(2));
    assert!(tracker.seen(&page(1)));
    tracker.touch(&page(3));
    assert!(!tracker.seen(&page(1)));
  }

  #[test]
  fn test_filters_are_distinct_identities() {
    let tracker = PageTracker::new(5);
    tracker.touch(&QueryIdentity::new("rick", 1));
    assert!(tracker.seen(&QueryIdentity::new("rick", 1)));
    assert!(!tracker.seen(&QueryIdentity::new("", 1)));
  }

  #[test]
  fn test_concurrent_touches_keep_bound() {
    let tracker = Arc::new(PageTracker::new(5));
    let handles: Vec<_> = (0..8)
      .map(|t| {
        let tracker = Arc::clone(&tracker);
        std::thread::spawn(move || {
          for n in 0..100 {
            tracker.touch(&QueryIdentity::new("", t * 100 + n + 1));
          }
        })
      })
      .collect();
    for handle in handles {
      handle.join().unwrap();
    }

    let snapshot = tracker.snapshot();
    assert_eq!(snapshot.len(), 5);
    let unique: std::collections::HashSet<_> = snapshot.iter().collect();
    assert_eq!(unique.len(), 5);
  }
}
