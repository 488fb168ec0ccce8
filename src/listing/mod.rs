//! Directory listing parser
//!
//! Converts the flat HTML directory listings served by the archive into
//! structured catalog entries. The listings are machine-generated and very
//! regular, so a tolerant regex scanner over the raw markup is used instead
//! of a full HTML parser; anchors that don't fit the shape are skipped.

use crate::matching::regions::parenthesized_tags;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One downloadable file discovered in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Human-readable display name, decoded from the markup.
    pub name: String,
    /// Absolute download URL, percent-encoding preserved as served.
    pub url: String,
    /// Region inferred from the first parenthesized tag, "World" when the
    /// name carries none.
    pub region: String,
}

/// Anchor rows as the archive renders them: a link, then optionally a
/// modification date and a size column.
static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)<a href="([^"]+)"[^>]*>([^<]+)</a>\s*(\d{2}-\w{3}-\d{4}\s+\d{2}:\d{2})?\s*([0-9.]+[KMGT]?)?"#,
    )
    .unwrap()
});

/// Archive and disc-image formats worth offering for download.
static FILE_EXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(zip|7z|rar|iso|cue|bin|chd)$").unwrap());

/// Parse a directory listing into catalog entries.
///
/// `base_url` is the fully-qualified URL of the directory itself and is
/// prepended verbatim to each raw href. Output order follows the markup.
pub fn parse(markup: &str, base_url: &str) -> Vec<CatalogEntry> {
    let mut entries = Vec::new();

    for captures in LINK_RE.captures_iter(markup) {
        let href = &captures[1];
        let text = &captures[2];

        // Parent/self directory rows
        if href == "../" || href == "/" {
            continue;
        }

        if !FILE_EXT_RE.is_match(href) {
            continue;
        }

        let unescaped = decode_entities(text);
        let name = match urlencoding::decode(unescaped.trim()) {
            Ok(decoded) => decoded.into_owned(),
            Err(err) => {
                warn!("failed to decode listing name {:?}, skipping: {}", text, err);
                continue;
            }
        };

        let region = parenthesized_tags(&name)
            .first()
            .map(|tag| tag.to_string())
            .unwrap_or_else(|| "World".to_string());

        entries.push(CatalogEntry {
            name,
            url: format!("{}{}", base_url, href),
            region,
        });
    }

    entries
}

/// Remove a trailing allow-listed extension from a display name.
pub fn strip_archive_extension(name: &str) -> String {
    FILE_EXT_RE.replace(name, "").trim().to_string()
}

/// Decode the handful of HTML entities the listings actually use.
fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://archive.example/files/Redump/Sony%20-%20PlayStation%202/";

    fn listing() -> String {
        concat!(
            r#"<html><body><table>"#,
            r#"<a href="../">../</a>"#,
            r#"<a href="Gran%20Turismo%204%20(USA).zip">Gran Turismo 4 (USA).zip</a> 01-Jan-2024 14:22 4.2G"#,
            r#"<a href="Jak%20%26%20Daxter%20(Europe).zip">Jak &amp; Daxter (Europe).zip</a> 02-Feb-2024 09:10 1.1G"#,
            r#"<a href="notes.txt">notes.txt</a>"#,
            r#"<a href="Shadow%20of%20the%20Colossus.iso">Shadow of the Colossus.iso</a>"#,
            r#"</table></body></html>"#,
        )
        .to_string()
    }

    #[test]
    fn test_parse_listing() {
        let entries = parse(&listing(), BASE);
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].name, "Gran Turismo 4 (USA).zip");
        assert_eq!(
            entries[0].url,
            format!("{}Gran%20Turismo%204%20(USA).zip", BASE)
        );
        assert_eq!(entries[0].region, "USA");
    }

    #[test]
    fn test_entity_and_percent_decoding() {
        let entries = parse(&listing(), BASE);
        assert_eq!(entries[1].name, "Jak & Daxter (Europe).zip");
        // The raw href keeps its server-side encoding
        assert!(entries[1].url.ends_with("Jak%20%26%20Daxter%20(Europe).zip"));
    }

    #[test]
    fn test_region_defaults_to_world() {
        let entries = parse(&listing(), BASE);
        assert_eq!(entries[2].region, "World");
    }

    #[test]
    fn test_extension_allow_list() {
        let markup = r#"<a href="a.txt">a.txt</a><a href="b.ZIP">b.ZIP</a><a href="c.chd">c.chd</a>"#;
        let entries = parse(markup, BASE);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| !e.url.is_empty()));
    }

    #[test]
    fn test_parent_links_skipped() {
        let markup = r#"<a href="../">../</a><a href="/">/</a>"#;
        assert!(parse(markup, BASE).is_empty());
    }

    #[test]
    fn test_markup_order_preserved() {
        let markup = concat!(
            r#"<a href="b.zip">B Game (Europe).zip</a>"#,
            r#"<a href="a.zip">A Game (USA).zip</a>"#,
        );
        let entries = parse(markup, BASE);
        assert_eq!(entries[0].name, "B Game (Europe).zip");
        assert_eq!(entries[1].name, "A Game (USA).zip");
    }

    #[test]
    fn test_strip_archive_extension() {
        assert_eq!(strip_archive_extension("Super Mario 64 .zip"), "Super Mario 64");
        assert_eq!(strip_archive_extension("Game.CHD"), "Game");
        assert_eq!(strip_archive_extension("Game v1.2"), "Game v1.2");
    }

    #[test]
    fn test_undecodable_name_skipped() {
        let markup = concat!(
            r#"<a href="ok.zip">Fine%20Name.zip</a>"#,
            r#"<a href="bad.zip">Broken%FF%FEName.zip</a>"#,
        );
        let entries = parse(markup, BASE);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Fine Name.zip");
    }
}
