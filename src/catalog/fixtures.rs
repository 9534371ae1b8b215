//! Test doubles for catalog consumers.

use chrono::{TimeZone, Utc};
use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

use super::client::CharacterSource;
use super::error::FetchError;
use super::types::{Character, CharacterStatus, Page, PageInfo, Place};

pub fn character(id: u32, name: &str) -> Character {
  Character {
    id,
    name: name.to_string(),
    status: CharacterStatus::Alive,
    species: "Human".to_string(),
    kind: None,
    gender: "Male".to_string(),
    origin: Place {
      name: "Earth (C-137)".to_string(),
      url: "https://rickandmortyapi.com/api/location/1".to_string(),
    },
    location: Place {
      name: "Citadel of Ricks".to_string(),
      url: "https://rickandmortyapi.com/api/location/3".to_string(),
    },
    image: format!("https://rickandmortyapi.com/api/character/avatar/{}.jpeg", id),
    episodes: vec!["https://rickandmortyapi.com/api/episode/1".to_string()],
    url: format!("https://rickandmortyapi.com/api/character/{}", id),
    created: Utc.with_ymd_and_hms(2017, 11, 4, 18, 48, 46).unwrap(),
  }
}

/// A page whose characters are named `"{label} {page}.{i}"`.
pub fn page_of(label: &str, page: u32, pages: u32) -> Page {
  let results = (1..=3)
    .map(|i| character(page * 10 + i, &format!("{} {}.{}", label, page, i)))
    .collect();
  Page {
    info: PageInfo {
      count: pages * 3,
      pages,
      has_next: page < pages,
      has_prev: page > 1,
    },
    results,
  }
}

type Script = Box<dyn Fn(u32, &str) -> Result<Page, FetchError> + Send + Sync>;

/// Scripted `CharacterSource` that counts calls per (name, page).
pub struct ScriptedSource {
  script: Script,
  delay: Duration,
  calls: Mutex<HashMap<(String, u32), usize>>,
}

impl ScriptedSource {
  pub fn new<F>(script: F) -> Self
  where
    F: Fn(u32, &str) -> Result<Page, FetchError> + Send + Sync + 'static,
  {
    Self {
      script: Box::new(script),
      delay: Duration::from_millis(50),
      calls: Mutex::new(HashMap::new()),
    }
  }

  /// Answers every page up to `pages` and NotFound past it.
  pub fn catalog(pages: u32) -> Self {
    Self::new(move |page, name| {
      if page > pages {
        Err(FetchError::NotFound)
      } else {
        let label = if name.is_empty() { "Character" } else { name };
        Ok(page_of(label, page, pages))
      }
    })
  }

  pub fn with_delay(mut self, delay: Duration) -> Self {
    self.delay = delay;
    self
  }

  pub fn calls(&self, name: &str, page: u32) -> usize {
    self
      .calls
      .lock()
      .get(&(name.to_string(), page))
      .copied()
      .unwrap_or(0)
  }

  pub fn total_calls(&self) -> usize {
    self.calls.lock().values().sum()
  }
}

impl CharacterSource for ScriptedSource {
  fn fetch_page(&self, page: u32, name: &str) -> BoxFuture<'static, Result<Page, FetchError>> {
    *self.calls.lock().entry((name.to_string(), page)).or_insert(0) += 1;
    let result = (self.script)(page, name);
    let delay = self.delay;
    async move {
      tokio::time::sleep(delay).await;
      result
    }
    .boxed()
  }
}

pub fn transport_error() -> FetchError {
  FetchError::Transport {
    status: Some(500),
    message: "Internal Server Error".to_string(),
  }
}
