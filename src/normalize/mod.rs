//! Title normalization
//!
//! Canonicalizes free-text game titles so that informal user input and the
//! archive's display names can be compared directly.

/// Normalize a game title for comparison.
///
/// Lower-cases, strips trademark glyphs, folds punctuation into spaces and
/// collapses whitespace. A leading article is rotated to the end, so
/// "The Darkness" and "Darkness, The" both canonicalize to "darkness the".
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(name: &str) -> String {
    let folded: String = name
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '™' | '®' | '©'))
        .map(|c| match c {
            ':' | ',' | '-' | '–' | '—' => ' ',
            other => other,
        })
        .collect();

    let mut normalized = folded.split_whitespace().collect::<Vec<_>>().join(" ");

    // "the X" -> "X the". Skipped when the remainder itself starts with
    // another article, otherwise repeated application would keep rotating.
    if let Some(rest) = normalized.strip_prefix("the ") {
        if !rest.starts_with("the ") {
            normalized = format!("{} the", rest);
        }
    }

    normalized
}

/// Remove every standalone "the" from an already-normalized title.
pub fn without_article(normalized: &str) -> String {
    normalized
        .split_whitespace()
        .filter(|word| *word != "the")
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether two titles are the same name modulo article placement.
///
/// Handles "The Darkness" vs "Darkness, The" vs "Darkness".
pub fn names_match_ignoring_article(a: &str, b: &str) -> bool {
    let norm_a = normalize(a);
    let norm_b = normalize(b);

    if norm_a == norm_b {
        return true;
    }

    without_article(&norm_a) == without_article(&norm_b)
}
