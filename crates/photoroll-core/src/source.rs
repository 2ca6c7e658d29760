//! The `PhotoSource` trait — the fetch contract consumed by
//! [`PhotoFeed`](crate::feed::PhotoFeed).

use std::future::Future;

/// Abstraction over one remote photo listing.
///
/// A single request/response round trip against a fixed endpoint: no
/// pagination, no caching, no retries. Implemented by the HTTP clients in
/// `photoroll-client`; test doubles implement it directly.
pub trait PhotoSource: Send + Sync {
  /// Decoded record type returned by this source.
  type Record: Clone + Send + Sync + 'static;
  type Error: std::error::Error + Send + Sync + 'static;

  /// Short plural description of the records (e.g. "Mars photos"), used in
  /// the Success summary line.
  fn label(&self) -> &str;

  /// Fetch the full photo list in one round trip.
  fn fetch_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Self::Record>, Self::Error>> + Send + '_;
}
