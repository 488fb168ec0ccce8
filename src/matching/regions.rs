//! Region tables and tag handling
//!
//! Archive display names carry parenthesized tags such as `(USA)` or
//! `(En,Fr,De)`. The tables here are plain data so the priority logic can be
//! tested independently of the scoring formula.

use once_cell::sync::Lazy;
use regex::Regex;

/// Global region priority order, best first. Used when the query does not
/// name a region itself.
pub const REGION_PRIORITY: [&str; 6] = ["World", "USA", "En", "Europe", "Japan", "Ja"];

/// Maps a region token found in a query to the ordered list of region texts
/// to prefer in entry tags.
pub const REGION_ALIASES: [(&str, &[&str]); 10] = [
    ("US", &["USA", "En"]),
    ("USA", &["USA", "En"]),
    ("EU", &["Europe", "En"]),
    ("Europe", &["Europe", "En"]),
    ("PAL", &["Europe", "En"]),
    ("JP", &["Japan", "Ja"]),
    ("Japan", &["Japan", "Ja"]),
    ("World", &["World"]),
    ("En", &["En", "USA", "Europe"]),
    ("Ja", &["Ja", "Japan"]),
];

/// Whole-word region tokens recognized inside a query.
static REGION_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(World|USA|US|Europe|EU|PAL|Japan|JP|En|Ja)\b").unwrap());

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]+)\)").unwrap());

static TAG_STRIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").unwrap());

/// Extract every parenthesized tag from a display name, in order.
pub fn parenthesized_tags(name: &str) -> Vec<&str> {
    TAG_RE
        .captures_iter(name)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
        .collect()
}

/// Remove all parenthesized tags from a display name.
pub fn strip_tags(name: &str) -> String {
    TAG_STRIP_RE.replace_all(name, "").trim().to_string()
}

/// Find the first region token in a query, if any.
pub fn detect_region_token(query: &str) -> Option<&str> {
    REGION_TOKEN_RE
        .captures(query)
        .and_then(|cap| cap.get(1).map(|m| m.as_str()))
}

/// Resolve a region token to its preference list. The lookup ignores case;
/// unknown tokens fall back to themselves.
pub fn aliases_for(token: &str) -> Vec<String> {
    REGION_ALIASES
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(token))
        .map(|(_, regions)| regions.iter().map(|r| r.to_string()).collect())
        .unwrap_or_else(|| vec![token.to_string()])
}

/// Score how well an entry's region tags match the preferred regions.
/// Lower is better.
///
/// Untagged entries score 0 (universally acceptable), as does anything tagged
/// World or DLC. An entry whose tags miss every preferred region scores 1000
/// when the preference was explicit, 100 when it came from the default order.
pub fn region_priority(raw_name: &str, preferred: Option<&[String]>) -> u32 {
    let tags = parenthesized_tags(raw_name);

    if tags.is_empty() {
        return 0;
    }

    match preferred {
        Some(order) => {
            for (index, wanted) in order.iter().enumerate() {
                if tags.iter().any(|tag| tag.contains(wanted.as_str())) {
                    return index as u32;
                }
            }
        }
        None => {
            for (index, wanted) in REGION_PRIORITY.iter().enumerate() {
                if tags.iter().any(|tag| tag.contains(wanted)) {
                    return index as u32;
                }
            }
        }
    }

    if tags.iter().any(|tag| tag.contains("World") || tag.contains("DLC")) {
        return 0;
    }

    if preferred.is_some() { 1000 } else { 100 }
}
