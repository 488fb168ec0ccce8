//! Query parsing module
//!
//! Handles the one piece of special syntax a game query may carry: a region
//! token (e.g. "Final Fantasy VII (Europe)" or "zelda usa"). The token is
//! resolved through the region alias table and removed from the text used
//! for name matching.

use crate::matching::regions::{aliases_for, detect_region_token, strip_tags};
use serde::{Deserialize, Serialize};

/// A parsed game query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameQuery {
    /// Original raw query text.
    pub raw: String,
    /// Query text used for name matching, with region syntax removed.
    pub clean: String,
    /// Regions to prefer, best first. `None` means the caller falls back to
    /// the global default priority order.
    pub preferred_regions: Option<Vec<String>>,
}

impl GameQuery {
    /// Parse a raw query string.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        match detect_region_token(raw) {
            Some(token) => {
                let preferred = aliases_for(token);
                // Region tokens normally arrive as parenthesized tags, so
                // drop every tag from the matching text.
                let clean = strip_tags(raw);

                Self {
                    raw: raw.to_string(),
                    clean,
                    preferred_regions: Some(preferred),
                }
            }
            None => Self {
                raw: raw.to_string(),
                clean: raw.to_string(),
                preferred_regions: None,
            },
        }
    }

    /// Check if the query has no matchable text.
    pub fn is_empty(&self) -> bool {
        self.clean.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_query() {
        let query = GameQuery::parse("Super Mario 64");
        assert_eq!(query.clean, "Super Mario 64");
        assert!(query.preferred_regions.is_none());
    }

    #[test]
    fn test_region_tag_query() {
        let query = GameQuery::parse("Final Fantasy VII (Europe)");
        assert_eq!(query.clean, "Final Fantasy VII");
        assert_eq!(
            query.preferred_regions,
            Some(vec!["Europe".to_string(), "En".to_string()])
        );
    }

    #[test]
    fn test_lowercase_region_token() {
        let query = GameQuery::parse("metal gear solid (usa)");
        assert_eq!(query.clean, "metal gear solid");
        assert_eq!(
            query.preferred_regions,
            Some(vec!["USA".to_string(), "En".to_string()])
        );
    }

    #[test]
    fn test_untagged_region_word() {
        // A bare region word is recognized too; tag stripping then leaves
        // the rest of the text alone.
        let query = GameQuery::parse("zelda japan");
        assert_eq!(query.clean, "zelda japan");
        assert_eq!(
            query.preferred_regions,
            Some(vec!["Japan".to_string(), "Ja".to_string()])
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(GameQuery::parse("  ").is_empty());
        assert!(!GameQuery::parse("halo").is_empty());
    }
}
