//! romseek: locate games in remote archive directory listings
//!
//! Takes informal game titles, matches them against the flat HTML directory
//! listings of a Myrient-style archive, and produces ranked direct download
//! links. This crate is the matching and ranking core; rendering, clipboard
//! and file export belong to the application embedding it.
//!
//! Pipeline: raw markup → parsed entries ([`listing`]) → cached catalog
//! ([`catalog`]) → scored matches ([`matching`]) → presented results
//! ([`search`]).

pub mod catalog;
pub mod config;
pub mod listing;
pub mod matching;
pub mod network;
pub mod normalize;
pub mod query;
pub mod search;

pub use catalog::CatalogCache;
pub use config::{ArchiveSettings, Collection, Settings};
pub use listing::CatalogEntry;
pub use network::{FetchError, Fetcher, HttpFetcher};
pub use query::GameQuery;
pub use search::{export_urls, SearchCoordinator, SearchProgress, SearchResult, SearchStatus};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
