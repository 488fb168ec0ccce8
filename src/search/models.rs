//! Search result and progress data models

use serde::{Deserialize, Serialize};

/// Outcome of matching one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Found,
    NotFound,
}

/// One row handed to the presenter.
///
/// `enabled` is the per-row inclusion toggle for the export payload; it is
/// the only field the presenter is expected to change, and doing so has no
/// effect on the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// The query text this row answers.
    pub query: String,
    /// Display name of the matched entry, or the cleaned query when nothing
    /// was found.
    pub matched_name: String,
    /// Direct download URL. Always present when found, never otherwise.
    pub url: Option<String>,
    /// Region of the matched entry.
    pub region: Option<String>,
    pub status: SearchStatus,
    pub enabled: bool,
}

impl SearchResult {
    /// A found row, enabled by default.
    pub fn found(
        query: impl Into<String>,
        matched_name: impl Into<String>,
        url: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            matched_name: matched_name.into(),
            url: Some(url.into()),
            region: Some(region.into()),
            status: SearchStatus::Found,
            enabled: true,
        }
    }

    /// A not-found row. Covers both "no match" and "catalog unavailable".
    pub fn not_found(query: impl Into<String>, matched_name: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            matched_name: matched_name.into(),
            url: None,
            region: None,
            status: SearchStatus::NotFound,
            enabled: false,
        }
    }
}

/// Batch progress, reported after each query completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchProgress {
    pub current: usize,
    pub total: usize,
}

/// Build the flat export payload: one absolute URL per line for every found,
/// still-enabled result. No trailing newline, no metadata.
pub fn export_urls(results: &[SearchResult]) -> String {
    results
        .iter()
        .filter(|r| r.status == SearchStatus::Found && r.enabled)
        .filter_map(|r| r.url.as_deref())
        .collect::<Vec<_>>()
        .join("\n")
}
