use crate::catalog::api_types::{ApiCharactersResponse, ApiEpisode, OneOrMany};
use crate::catalog::error::FetchError;
use crate::catalog::types::{Episode, Page};
use crate::config::ApiConfig;
use color_eyre::{eyre::eyre, Result};
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Anything that can answer a character page request.
///
/// The orchestrator only depends on this seam, so tests can inject a
/// scripted source instead of the HTTP client.
pub trait CharacterSource: Send + Sync + 'static {
  fn fetch_page(&self, page: u32, name: &str) -> BoxFuture<'static, Result<Page, FetchError>>;
}

/// HTTP client for the character catalog
#[derive(Clone)]
pub struct CatalogClient {
  http: reqwest::Client,
  base_url: Url,
}

impl CatalogClient {
  pub fn new(config: &ApiConfig) -> Result<Self> {
    let base_url = Url::parse(&config.base_url)
      .map_err(|e| eyre!("Invalid catalog url {}: {}", config.base_url, e))?;
    if base_url.cannot_be_a_base() {
      return Err(eyre!("Invalid catalog url {}: not a base url", config.base_url));
    }

    let mut builder = reqwest::Client::builder();
    if let Some(secs) = config.timeout_secs {
      builder = builder.timeout(Duration::from_secs(secs));
    }
    let http = builder
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { http, base_url })
  }

  /// Get one page of characters, optionally filtered by name.
  ///
  /// A 404 from the catalog means "nothing matched" and comes back as
  /// `FetchError::NotFound`. No retries happen here.
  pub async fn fetch_page(&self, page: u32, name: &str) -> Result<Page, FetchError> {
    let url = self.page_url(page, name);
    let response: ApiCharactersResponse = self.get_json(url).await?;
    Ok(response.into())
  }

  /// Get the episodes with the given ids.
  pub async fn fetch_episodes(&self, ids: &[u32]) -> Result<Vec<Episode>, FetchError> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }

    let joined = ids
      .iter()
      .map(|id| id.to_string())
      .collect::<Vec<_>>()
      .join(",");
    let url = self.endpoint(&["episode", &joined]);

    let response: OneOrMany<ApiEpisode> = self.get_json(url).await?;
    Ok(response.into_vec().into_iter().map(Episode::from).collect())
  }

  fn page_url(&self, page: u32, name: &str) -> Url {
    let mut url = self.endpoint(&["character"]);
    {
      let mut query = url.query_pairs_mut();
      query.append_pair("page", &page.to_string());
      if !name.is_empty() {
        query.append_pair("name", name);
      }
    }
    url
  }

  fn endpoint(&self, segments: &[&str]) -> Url {
    let mut url = self.base_url.clone();
    // Checked in new(): the base url can always take path segments
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty().extend(segments);
    }
    url
  }

  async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
    debug!(%url, "catalog request");

    let response = self
      .http
      .get(url)
      .send()
      .await
      .map_err(FetchError::from_reqwest)?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
      return Err(FetchError::NotFound);
    }
    if !status.is_success() {
      return Err(FetchError::Transport {
        status: Some(status.as_u16()),
        message: status
          .canonical_reason()
          .unwrap_or("unexpected status")
          .to_string(),
      });
    }

    let bytes = response.bytes().await.map_err(FetchError::from_reqwest)?;
    serde_json::from_slice(&bytes).map_err(|e| FetchError::Transport {
      status: Some(status.as_u16()),
      message: format!("invalid response body: {}", e),
    })
  }
}

impl CharacterSource for CatalogClient {
  fn fetch_page(&self, page: u32, name: &str) -> BoxFuture<'static, Result<Page, FetchError>> {
    let client = self.clone();
    let name = name.to_string();
    async move { CatalogClient::fetch_page(&client, page, &name).await }.boxed()
  }
}
