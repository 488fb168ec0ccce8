//! Archive networking module
//!
//! Defines the Fetcher capability the catalog layer consumes and the
//! reqwest-backed implementation of it.

mod fetcher;

pub use fetcher::{FetchError, Fetcher, HttpFetcher};
