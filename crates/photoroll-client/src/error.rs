//! Error type shared by the photo API clients.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
  /// Transport failure or undecodable response body.
  #[error("request failed: {0}")]
  Request(#[from] reqwest::Error),

  /// The server answered with a non-2xx status.
  #[error("unexpected status: {0}")]
  Status(reqwest::StatusCode),
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
