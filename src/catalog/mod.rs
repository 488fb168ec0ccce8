//! Collection catalog cache
//!
//! Holds the parsed catalog of every collection that has been fetched this
//! process lifetime. A collection is fetched at most once: lookups after the
//! first return the stored entries without touching the network, and
//! concurrent first lookups share a single in-flight fetch.

use crate::config::Collection;
use crate::listing::{self, CatalogEntry};
use crate::network::{FetchError, Fetcher};
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use moka::future::Cache;
use std::sync::Arc;
use tracing::info;

/// The parsed entries of one collection plus when they were fetched.
///
/// Entries keep source order: primary subtree first, then each supplementary
/// subtree in declared order, each in markup order.
#[derive(Debug, Clone)]
pub struct CachedCollection {
    pub entries: Vec<CatalogEntry>,
    pub fetched_at: DateTime<Utc>,
}

/// Per-collection catalog store with fetch deduplication.
///
/// There is deliberately no TTL and no invalidation: once populated, a
/// collection stays as-is until the process exits. Mismatches against the
/// live archive are an accepted trade-off.
pub struct CatalogCache {
    fetcher: Arc<dyn Fetcher>,
    base_url: String,
    collections: Cache<String, Arc<CachedCollection>>,
}

impl CatalogCache {
    /// Create a cache that fetches through `fetcher` under `base_url`.
    pub fn new(fetcher: Arc<dyn Fetcher>, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            collections: Cache::builder().max_capacity(64).build(),
        }
    }

    /// Get the catalog for a collection, fetching it on first use.
    ///
    /// Concurrent calls for the same collection converge on one underlying
    /// fetch; a failed fetch is handed to every waiter and caches nothing,
    /// so the next call retries.
    pub async fn get_collection(
        &self,
        collection: &Collection,
    ) -> Result<Arc<CachedCollection>, FetchError> {
        self.collections
            .try_get_with(collection.name.clone(), self.fetch_collection(collection))
            .await
            .map_err(|err| (*err).clone())
    }

    /// Fetch and parse every source subtree of a collection.
    async fn fetch_collection(
        &self,
        collection: &Collection,
    ) -> Result<Arc<CachedCollection>, FetchError> {
        info!("fetching catalog for {}", collection.name);

        let urls = collection.source_urls(&self.base_url);
        let pages = try_join_all(urls.iter().map(|url| self.fetcher.fetch(url))).await?;

        let mut entries = Vec::new();
        for (url, markup) in urls.iter().zip(&pages) {
            entries.extend(listing::parse(markup, url));
        }

        info!("cached {} entries for {}", entries.len(), collection.name);

        Ok(Arc::new(CachedCollection {
            entries,
            fetched_at: Utc::now(),
        }))
    }
}
