//! Photo record types decoded from the remote photo APIs.
//!
//! The two sources return structurally similar but independently defined
//! records; both are immutable once decoded.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One photo returned by the Mars rover photo service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarsPhoto {
  pub id:      String,
  /// URL of the rover image itself.
  pub img_src: String,
}

/// One photo returned by the Picsum placeholder-photo service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicsumPhoto {
  pub id:           String,
  pub author:       String,
  pub width:        u32,
  pub height:       u32,
  /// Picsum page for the photo.
  pub url:          String,
  /// Direct image URL.
  pub download_url: String,
}

// ─── Collection ──────────────────────────────────────────────────────────────

/// The two photo collections, as they are keyed in the persistence sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
  Mars,
  Picsum,
}

impl Collection {
  /// Path segment used for this collection in sink paths.
  pub fn as_str(&self) -> &'static str {
    match self {
      Collection::Mars => "mars",
      Collection::Picsum => "picsum",
    }
  }
}

impl fmt::Display for Collection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
