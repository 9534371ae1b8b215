//! Client and types for the remote character catalog.

pub mod api_types;
pub mod client;
pub mod error;
#[cfg(test)]
pub mod fixtures;
pub mod types;

pub use client::{CatalogClient, CharacterSource};
pub use error::FetchError;
pub use types::{Character, CharacterStatus, Episode, Page};
