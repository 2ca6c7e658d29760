//! Client for the Mars rover photo service.

use std::time::Duration;

use photoroll_core::{MarsPhoto, PhotoSource};
use reqwest::Client;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Production base URL of the Mars photo service.
pub const MARS_BASE_URL: &str =
  "https://android-kotlin-fun-mars-server.appspot.com";

/// Async HTTP client for the Mars photo list endpoint.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct MarsApi {
  client:   Client,
  base_url: String,
}

impl MarsApi {
  /// Client against the production service.
  pub fn new() -> Result<Self> {
    Self::with_base_url(MARS_BASE_URL)
  }

  /// Client against a different server (used by tests).
  pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    let base_url = base_url.into().trim_end_matches('/').to_string();
    Ok(Self { client, base_url })
  }
}

impl PhotoSource for MarsApi {
  type Record = MarsPhoto;
  type Error = ClientError;

  fn label(&self) -> &str {
    "Mars photos"
  }

  /// `GET /photos`
  fn fetch_all(
    &self,
  ) -> impl Future<Output = Result<Vec<MarsPhoto>>> + Send + '_ {
    async move {
      let url = format!("{}/photos", self.base_url);
      debug!(%url, "fetching Mars photo list");

      let resp = self.client.get(&url).send().await?;
      if !resp.status().is_success() {
        return Err(ClientError::Status(resp.status()));
      }
      Ok(resp.json().await?)
    }
  }
}
