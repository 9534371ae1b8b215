//! Serde-deserializable types matching catalog API responses.
//!
//! These types are separate from domain types to allow clean deserialization
//! while keeping domain types focused on application needs.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::types::{Character, CharacterStatus, Episode, Page, PageInfo, Place};

// ============================================================================
// Character listing endpoint response
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ApiInfo {
  #[serde(default)]
  pub count: u32,
  #[serde(default)]
  pub pages: u32,
  pub next: Option<String>,
  pub prev: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiPlace {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiCharacter {
  pub id: u32,
  pub name: String,
  #[serde(default)]
  pub status: String,
  #[serde(default)]
  pub species: String,
  #[serde(rename = "type", default)]
  pub kind: String,
  #[serde(default)]
  pub gender: String,
  pub origin: ApiPlace,
  pub location: ApiPlace,
  #[serde(default)]
  pub image: String,
  #[serde(default)]
  pub episode: Vec<String>,
  #[serde(default)]
  pub url: String,
  pub created: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ApiCharactersResponse {
  pub info: ApiInfo,
  #[serde(default)]
  pub results: Vec<ApiCharacter>,
}

// ============================================================================
// Episode endpoint response
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ApiEpisode {
  pub id: u32,
  pub name: String,
  #[serde(default)]
  pub air_date: String,
  #[serde(default)]
  pub episode: String,
}

/// The episode endpoint answers a single id with an object and several ids
/// with an array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
  Many(Vec<T>),
  One(T),
}

impl<T> OneOrMany<T> {
  pub fn into_vec(self) -> Vec<T> {
    match self {
      OneOrMany::Many(items) => items,
      OneOrMany::One(item) => vec![item],
    }
  }
}

// ============================================================================
// Conversions to domain types
// ============================================================================

impl From<ApiPlace> for Place {
  fn from(place: ApiPlace) -> Self {
    Place {
      name: place.name,
      url: place.url,
    }
  }
}

impl From<ApiCharacter> for Character {
  fn from(c: ApiCharacter) -> Self {
    Character {
      id: c.id,
      name: c.name,
      status: CharacterStatus::from_api(&c.status),
      species: c.species,
      kind: Some(c.kind).filter(|k| !k.trim().is_empty()),
      gender: c.gender,
      origin: c.origin.into(),
      location: c.location.into(),
      image: c.image,
      episodes: c.episode,
      url: c.url,
      created: c.created,
    }
  }
}

impl From<ApiCharactersResponse> for Page {
  fn from(response: ApiCharactersResponse) -> Self {
    Page {
      info: PageInfo {
        count: response.info.count,
        pages: response.info.pages,
        has_next: response.info.next.is_some(),
        has_prev: response.info.prev.is_some(),
      },
      results: response.results.into_iter().map(Character::from).collect(),
    }
  }
}

impl From<ApiEpisode> for Episode {
  fn from(e: ApiEpisode) -> Self {
    Episode {
      id: e.id,
      name: e.name,
      air_date: e.air_date,
      code: e.episode,
    }
  }
}
