//! HTTP clients for the two remote photo APIs.
//!
//! Both clients implement [`photoroll_core::PhotoSource`]: one bare
//! request/response round trip each, decoding a JSON array of photo
//! records. Transport, status, and decode failures all surface through
//! [`ClientError`].

pub mod error;
pub mod mars;
pub mod picsum;

pub use error::ClientError;
pub use mars::{MARS_BASE_URL, MarsApi};
pub use picsum::{PICSUM_BASE_URL, PicsumApi};

#[cfg(test)]
mod tests;
