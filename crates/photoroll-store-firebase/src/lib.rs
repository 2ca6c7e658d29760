//! Firebase Realtime Database backend for the photoroll persistence sink.
//!
//! Speaks the database's REST dialect: every value at path `p` is a JSON
//! document at `<base>/<p>.json`, written with `PUT` and read with `GET`.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::FirebaseStore;
