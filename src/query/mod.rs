//! Async query abstractions, loosely modelled on TanStack Query.
//!
//! - `Query<T>` runs one request and tracks its loading/success/error state
//! - `PagedQuery` drives the character listing through the shared cache,
//!   with prefetching, retries and placeholder data

mod paged;
mod single;
mod state;

pub use paged::{FetchPolicy, PagedQuery};
pub use single::Query;
pub use state::QueryState;
