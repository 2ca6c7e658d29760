//! Client for the Picsum placeholder-photo service.

use std::time::Duration;

use photoroll_core::{PhotoSource, PicsumPhoto};
use reqwest::Client;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Production base URL of the Picsum service.
pub const PICSUM_BASE_URL: &str = "https://picsum.photos";

/// Async HTTP client for the Picsum photo list endpoint.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct PicsumApi {
  client:   Client,
  base_url: String,
}

impl PicsumApi {
  /// Client against the production service.
  pub fn new() -> Result<Self> {
    Self::with_base_url(PICSUM_BASE_URL)
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

impl PhotoSource for PicsumApi {
  type Record = PicsumPhoto;
  type Error = ClientError;

  fn label(&self) -> &str {
    "Picsum photos"
  }

  /// `GET /v2/list`
  fn fetch_all(
    &self,
  ) -> impl Future<Output = Result<Vec<PicsumPhoto>>> + Send + '_ {
    async move {
      let url = format!("{}/v2/list", self.base_url);
      debug!(%url, "fetching Picsum photo list");

      let resp = self.client.get(&url).send().await?;
      if !resp.status().is_success() {
        return Err(ClientError::Status(resp.status()));
      }
      Ok(resp.json().await?)
    }
  }
}
