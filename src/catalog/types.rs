use chrono::{DateTime, Utc};

/// Life status as reported by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterStatus {
  Alive,
  Dead,
  Unknown,
}

impl CharacterStatus {
  pub fn from_api(status: &str) -> Self {
    match status {
      "Alive" => CharacterStatus::Alive,
      "Dead" => CharacterStatus::Dead,
      _ => CharacterStatus::Unknown,
    }
  }
}

/// A named place with its catalog reference url
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
  pub name: String,
  pub url: String,
}

/// A character from the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
  pub id: u32,
  pub name: String,
  pub status: CharacterStatus,
  pub species: String,
  pub kind: Option<String>, // "type" in the api, None when blank
  pub gender: String,
  pub origin: Place,
  pub location: Place,
  pub image: String,
  pub episodes: Vec<String>, // Episode reference urls, in appearance order
  pub url: String,
  pub created: DateTime<Utc>,
}

impl Character {
  /// Episode ids taken from the last path segment of each episode url.
  pub fn episode_ids(&self) -> Vec<u32> {
    self
      .episodes
      .iter()
      .filter_map(|url| url.trim_end_matches('/').rsplit('/').next())
      .filter_map(|id| id.parse().ok())
      .collect()
  }
}

/// Paging metadata for a character listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
  /// Total matches across all pages
  pub count: u32,
  /// Total page count
  pub pages: u32,
  pub has_next: bool,
  pub has_prev: bool,
}

/// One page of characters
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
  pub info: PageInfo,
  pub results: Vec<Character>,
}

/// Episode summary shown in the character detail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
  pub id: u32,
  pub name: String,
  pub air_date: String,
  pub code: String, // e.g. "S01E01"
}

#[cfg(test)]
mod tests {
  use super::*;

  fn character_with_episodes(episodes: &[&str]) -> Character {
    Character {
      id: 1,
      name: "Rick Sanchez".to_string(),
      status: CharacterStatus::Alive,
      species: "Human".to_string(),
      kind: None,
      gender: "Male".to_string(),
      origin: Place {
        name: "Earth (C-137)".to_string(),
        url: String::new(),
      },
      location: Place {
        name: "Citadel of Ricks".to_string(),
        url: String::new(),
      },
      image: String::new(),
      episodes: episodes.iter().map(|s| s.to_string()).collect(),
      url: String::new(),
      created: Utc::now(),
    }
  }

  #[test]
  fn test_status_from_api() {
    assert_eq!(CharacterStatus::from_api("Alive"), CharacterStatus::Alive);
    assert_eq!(CharacterStatus::from_api("Dead"), CharacterStatus::Dead);
    assert_eq!(CharacterStatus::from_api("unknown"), CharacterStatus::Unknown);
    assert_eq!(CharacterStatus::from_api(""), CharacterStatus::Unknown);
  }

  #[test]
  fn test_episode_ids_from_urls() {
    let character = character_with_episodes(&[
      "https://rickandmortyapi.com/api/episode/1",
      "https://rickandmortyapi.com/api/episode/28/",
      "https://rickandmortyapi.com/api/episode/not-a-number",
    ]);
    assert_eq!(character.episode_ids(), vec![1, 28]);
  }

  #[test]
  fn test_episode_ids_empty() {
    assert!(character_with_episodes(&[]).episode_ids().is_empty());
  }
}
