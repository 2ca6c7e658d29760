//! Error types for `photoroll-store-firebase`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Transport failure or undecodable response body.
  #[error("request failed: {0}")]
  Request(#[from] reqwest::Error),

  /// The database answered with a non-2xx status.
  #[error("unexpected status: {0}")]
  Status(reqwest::StatusCode),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
