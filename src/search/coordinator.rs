//! Search coordination
//!
//! Ties the pipeline together: resolve a collection's catalog through the
//! cache, rank it against each query, and assemble presenter-ready results.
//! This is the only surface the surrounding application talks to.

use super::models::{SearchProgress, SearchResult};
use crate::catalog::CatalogCache;
use crate::config::{Collection, Settings};
use crate::matching;
use crate::network::HttpFetcher;
use crate::query::GameQuery;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Coordinates catalog lookup, matching and result assembly.
///
/// Owns the catalog cache; one coordinator is meant to live as long as the
/// application session.
pub struct SearchCoordinator {
    catalog: CatalogCache,
    search_delay: Duration,
}

impl SearchCoordinator {
    /// Create a coordinator around an existing catalog cache.
    pub fn new(catalog: CatalogCache) -> Self {
        Self {
            catalog,
            search_delay: Duration::from_millis(100),
        }
    }

    /// Build the whole pipeline from settings: HTTP fetcher, catalog cache
    /// and the configured courtesy delay.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::with_settings(&settings.archive)?);
        let catalog = CatalogCache::new(fetcher, settings.archive.base_url.clone());

        Ok(Self {
            catalog,
            search_delay: Duration::from_millis(settings.archive.search_delay_ms),
        })
    }

    /// Override the courtesy pause between batch items.
    pub fn with_search_delay(mut self, delay: Duration) -> Self {
        self.search_delay = delay;
        self
    }

    /// Search one query against a collection.
    ///
    /// Never fails: a catalog fetch error is reported as a single not-found
    /// row so a batch (and the UI above it) keeps going.
    pub async fn search(&self, query_text: &str, collection: &Collection) -> Vec<SearchResult> {
        let query = GameQuery::parse(query_text);

        let catalog = match self.catalog.get_collection(collection).await {
            Ok(catalog) => catalog,
            Err(err) => {
                warn!("catalog for {} unavailable: {}", collection.name, err);
                return vec![SearchResult::not_found(query.raw.as_str(), query.clean.as_str())];
            }
        };

        let candidates = matching::rank(&query, &catalog.entries);
        if candidates.is_empty() {
            debug!("no match for {:?}", query.raw);
            return vec![SearchResult::not_found(query.raw.as_str(), query.clean.as_str())];
        }

        candidates
            .into_iter()
            .map(|candidate| {
                SearchResult::found(
                    query.raw.as_str(),
                    candidate.entry.name.as_str(),
                    candidate.entry.url.as_str(),
                    candidate.entry.region.as_str(),
                )
            })
            .collect()
    }

    /// Search a batch of queries strictly one at a time.
    ///
    /// Blank queries are dropped before counting. `on_progress` fires once
    /// per query, after its results are in; a fixed pause follows each item
    /// so the remote source isn't hammered.
    pub async fn search_batch(
        &self,
        queries: &[String],
        collection: &Collection,
        mut on_progress: impl FnMut(SearchProgress),
    ) -> Vec<SearchResult> {
        let queries: Vec<&str> = queries
            .iter()
            .map(|q| q.trim())
            .filter(|q| !q.is_empty())
            .collect();
        let total = queries.len();

        let mut results = Vec::new();
        for (index, query_text) in queries.iter().enumerate() {
            results.extend(self.search(query_text, collection).await);
            on_progress(SearchProgress {
                current: index + 1,
                total,
            });

            tokio::time::sleep(self.search_delay).await;
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{FetchError, Fetcher};
    use crate::search::models::{export_urls, SearchStatus};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct PageFetcher {
        page: String,
        fail: bool,
    }

    #[async_trait]
    impl Fetcher for PageFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            if self.fail {
                return Err(FetchError::Transport("connection refused".to_string()));
            }
            Ok(self.page.clone())
        }
    }

    fn coordinator(page: &str, fail: bool) -> SearchCoordinator {
        let fetcher = Arc::new(PageFetcher {
            page: page.to_string(),
            fail,
        });
        let cache = CatalogCache::new(fetcher, "https://archive.example/files");
        SearchCoordinator::new(cache).with_search_delay(Duration::ZERO)
    }

    const ZELDA_PAGE: &str = concat!(
        r#"<a href="../">../</a>"#,
        r#"<a href="Legend%20of%20Zelda%20-%20Ocarina%20of%20Time%20(USA).zip">"#,
        r#"Legend of Zelda - Ocarina of Time (USA).zip</a> 01-Jan-2024 10:00 32M"#,
    );

    #[tokio::test]
    async fn test_batch_end_to_end() {
        let coordinator = coordinator(ZELDA_PAGE, false);
        let collection = Collection::new("Nintendo - Nintendo 64", &[]);
        let queries = vec![
            "Zelda Ocarina of Time".to_string(),
            "NonexistentGameXYZ".to_string(),
        ];

        let mut progress = Vec::new();
        let results = coordinator
            .search_batch(&queries, &collection, |p| progress.push(p))
            .await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].status, SearchStatus::Found);
        assert!(results[0].matched_name.contains("Ocarina of Time (USA)"));
        assert!(results[0].enabled);
        assert_eq!(results[0].region.as_deref(), Some("USA"));

        assert_eq!(results[1].status, SearchStatus::NotFound);
        assert!(!results[1].enabled);
        assert_eq!(results[1].url, None);

        assert_eq!(
            progress,
            vec![
                SearchProgress { current: 1, total: 2 },
                SearchProgress { current: 2, total: 2 },
            ]
        );
    }

    #[test]
    fn test_from_settings() {
        assert!(SearchCoordinator::from_settings(&Settings::default()).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_failure_yields_single_error_row() {
        let coordinator = coordinator(ZELDA_PAGE, true);
        let collection = Collection::new("Nintendo - Nintendo 64", &[]);

        let results = coordinator.search("Zelda Ocarina of Time", &collection).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, SearchStatus::NotFound);
        assert_eq!(results[0].url, None);
        assert_eq!(results[0].region, None);
    }

    #[tokio::test]
    async fn test_blank_queries_skipped_in_batch() {
        let coordinator = coordinator(ZELDA_PAGE, false);
        let collection = Collection::new("Nintendo - Nintendo 64", &[]);
        let queries = vec!["".to_string(), "  ".to_string(), "Zelda Ocarina of Time".to_string()];

        let mut progress = Vec::new();
        let results = coordinator
            .search_batch(&queries, &collection, |p| progress.push(p))
            .await;

        assert_eq!(results.len(), 1);
        assert_eq!(progress, vec![SearchProgress { current: 1, total: 1 }]);
    }

    #[tokio::test]
    async fn test_export_payload_from_batch() {
        let coordinator = coordinator(ZELDA_PAGE, false);
        let collection = Collection::new("Nintendo - Nintendo 64", &[]);
        let queries = vec!["Zelda Ocarina of Time".to_string(), "NonexistentGameXYZ".to_string()];

        let results = coordinator.search_batch(&queries, &collection, |_| {}).await;
        let payload = export_urls(&results);

        assert_eq!(payload.lines().count(), 1);
        assert!(payload.ends_with("Legend%20of%20Zelda%20-%20Ocarina%20of%20Time%20(USA).zip"));
    }
}
