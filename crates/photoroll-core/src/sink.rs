//! The `PhotoSink` trait — remote key-value persistence for photo picks.

use std::future::Future;

use serde::{Serialize, de::DeserializeOwned};

/// Abstraction over a hierarchical key-value remote store.
///
/// Paths are `/`-separated strings (e.g. `"mars/102693"`). Only the
/// presentation layer talks to the sink; the fetch state machine never
/// does.
pub trait PhotoSink: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Serialize `value` and write it at `path`, overwriting any previous
  /// value.
  fn write<T>(
    &self,
    path: &str,
    value: &T,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send
  where
    T: Serialize + Sync;

  /// Read and decode the value at `path`. Absent keys yield `Ok(None)`.
  fn read<T>(
    &self,
    path: &str,
  ) -> impl Future<Output = Result<Option<T>, Self::Error>> + Send
  where
    T: DeserializeOwned;
}
