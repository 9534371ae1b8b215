//! In-memory caching for catalog pages.
//!
//! - `QueryIdentity` names one page of results (filter + page number)
//! - `PageTracker` remembers which identities were visited recently
//! - `QueryCache` holds responses, shares in-flight requests, and drops
//!   entries that go unused for the retention period

mod key;
mod store;
mod tracker;

pub use key::QueryIdentity;
pub use store::{Cached, QueryCache};
pub use tracker::PageTracker;
