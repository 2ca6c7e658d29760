//! [`FirebaseStore`] — the Realtime Database implementation of
//! [`PhotoSink`].

use std::time::Duration;

use photoroll_core::PhotoSink;
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{Error, Result};

/// A photo sink backed by a Firebase Realtime Database instance.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct FirebaseStore {
  client:   Client,
  base_url: String,
}

impl FirebaseStore {
  /// Client for the database at `base_url`
  /// (e.g. `https://my-project.firebaseio.com`).
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    let base_url = base_url.into().trim_end_matches('/').to_string();
    Ok(Self { client, base_url })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/{}.json", self.base_url, path.trim_matches('/'))
  }
}

impl PhotoSink for FirebaseStore {
  type Error = Error;

  /// `PUT <base>/<path>.json`
  fn write<T>(
    &self,
    path: &str,
    value: &T,
  ) -> impl Future<Output = Result<()>> + Send
  where
    T: Serialize + Sync,
  {
    let url = self.url(path);
    async move {
      debug!(%url, "writing to realtime database");

      let resp = self.client.put(&url).json(value).send().await?;
      if !resp.status().is_success() {
        return Err(Error::Status(resp.status()));
      }
      Ok(())
    }
  }

  /// `GET <base>/<path>.json` — the database answers `null` for absent
  /// keys, which decodes to `None`.
  fn read<T>(
    &self,
    path: &str,
  ) -> impl Future<Output = Result<Option<T>>> + Send
  where
    T: DeserializeOwned,
  {
    let url = self.url(path);
    async move {
      debug!(%url, "reading from realtime database");

      let resp = self.client.get(&url).send().await?;
      if !resp.status().is_success() {
        return Err(Error::Status(resp.status()));
      }
      Ok(resp.json::<Option<T>>().await?)
    }
  }
}
