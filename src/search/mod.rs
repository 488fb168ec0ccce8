//! Search orchestration module
//!
//! Coordinates catalog resolution and matching for single queries and
//! sequential batches, and shapes the results for presentation.

mod coordinator;
mod models;

pub use coordinator::SearchCoordinator;
pub use models::{export_urls, SearchProgress, SearchResult, SearchStatus};
