//! Core types and trait contracts for the photoroll demo.
//!
//! This crate is deliberately free of HTTP and terminal dependencies.
//! It defines the photo record types, the [`PhotoSource`] fetch contract,
//! the [`PhotoSink`] persistence contract, and the [`PhotoFeed`] state
//! machine that drives a presentation layer from a remote list fetch.

pub mod feed;
pub mod photo;
pub mod sink;
pub mod source;

pub use feed::{FetchState, PhotoFeed};
pub use photo::{Collection, MarsPhoto, PicsumPhoto};
pub use sink::PhotoSink;
pub use source::PhotoSource;
