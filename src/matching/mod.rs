//! Match scoring and ranking
//!
//! Given a parsed query and a collection's catalog, finds the entries whose
//! names match and orders them by a two-part key: region correctness
//! dominates, name quality breaks ties.

pub mod regions;

use crate::listing::{strip_archive_extension, CatalogEntry};
use crate::normalize::{names_match_ignoring_article, normalize};
use crate::query::GameQuery;
use regions::{region_priority, strip_tags};
use tracing::debug;

/// A scored candidate match, discarded once results are assembled.
#[derive(Debug, Clone)]
pub struct MatchCandidate<'a> {
    /// The catalog entry this candidate refers to.
    pub entry: &'a CatalogEntry,
    /// Name quality, 0 is an exact match.
    pub name_score: u32,
    /// Region preference index, 0 is best.
    pub region_score: u32,
    /// `region_score * 10000 + name_score`.
    pub combined_score: u32,
}

/// Whether every word of the query appears in the entry name.
///
/// The word "the" is exempt because article placement is handled separately:
/// names equal modulo articles always match.
pub fn matches_all_words(query: &str, name: &str) -> bool {
    if names_match_ignoring_article(query, name) {
        return true;
    }

    let normalized_name = normalize(name);
    normalize(query)
        .split_whitespace()
        .filter(|word| *word != "the")
        .all(|word| normalized_name.contains(word))
}

/// Score name quality, lower is better. 0 = equal after normalization,
/// 1 = name starts with query, 2 = query is a substring, otherwise a
/// last-resort rank on length difference (candidates reaching it already
/// passed the all-words filter).
fn match_score(query: &str, name: &str) -> u32 {
    let search = normalize(query);
    let game = normalize(name);

    if game == search {
        return 0;
    }
    if game.starts_with(&search) {
        return 1;
    }
    if game.contains(&search) {
        return 2;
    }

    10 + game.chars().count().abs_diff(search.chars().count()) as u32
}

/// Rank a catalog against a query.
///
/// Returns every surviving candidate sorted ascending by combined score
/// (stable, so equal scores keep catalog order) — the caller decides how
/// many to keep. An empty result means no acceptable match exists.
pub fn rank<'a>(query: &GameQuery, entries: &'a [CatalogEntry]) -> Vec<MatchCandidate<'a>> {
    let preferred = query.preferred_regions.as_deref();

    let mut candidates: Vec<MatchCandidate<'a>> = entries
        .iter()
        .filter_map(|entry| {
            let bare = strip_archive_extension(&strip_tags(&entry.name));
            if !matches_all_words(&query.clean, &bare) {
                return None;
            }

            let name_score = match_score(&query.clean, &bare)
                .min(match_score(&normalize(&query.clean), &normalize(&bare)));
            let region_score = region_priority(&entry.name, preferred);

            Some(MatchCandidate {
                entry,
                name_score,
                region_score,
                combined_score: region_score * 10_000 + name_score,
            })
        })
        .collect();

    // Entries whose region clearly mismatches an explicit request drop out;
    // unregioned and World content stays in.
    candidates.retain(|c| c.combined_score < 20_000 && c.name_score < 15);
    candidates.sort_by_key(|c| c.combined_score);

    debug!(
        "query {:?} matched {} of {} entries",
        query.clean,
        candidates.len(),
        entries.len()
    );

    candidates
}
