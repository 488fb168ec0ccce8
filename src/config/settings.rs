//! Settings structures for romseek configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub archive: ArchiveSettings,
    pub collections: Vec<Collection>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            archive: ArchiveSettings::default(),
            collections: default_collections(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (ROMSEEK_* prefix).
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("ROMSEEK_BASE_URL") {
            self.archive.base_url = val;
        }
        if let Ok(val) = std::env::var("ROMSEEK_REQUEST_TIMEOUT") {
            if let Ok(timeout) = val.parse() {
                self.archive.request_timeout = timeout;
            }
        }
        if let Ok(val) = std::env::var("ROMSEEK_SEARCH_DELAY_MS") {
            if let Ok(delay) = val.parse() {
                self.archive.search_delay_ms = delay;
            }
        }
    }

    /// Get a collection by display name.
    pub fn get_collection(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }
}

/// Settings for talking to the remote archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveSettings {
    /// Root of the archive's file tree, without a trailing slash.
    pub base_url: String,
    /// Request timeout in seconds.
    pub request_timeout: f64,
    /// Courtesy pause between batch queries in milliseconds.
    pub search_delay_ms: u64,
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self {
            base_url: "https://myrient.erista.me/files".to_string(),
            request_timeout: 30.0,
            search_delay_ms: 100,
        }
    }
}

/// One searchable archive subtree: a Redump console catalog plus any
/// No-Intro digital/DLC subtrees unioned into it.
///
/// Defined at configuration time and immutable afterwards. The display name
/// doubles as the Redump path segment, matching how the archive names its
/// directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Display name and `/Redump/` path segment.
    pub name: String,
    /// Supplementary `/No-Intro/` path segments.
    #[serde(default)]
    pub extra_names: Vec<String>,
}

impl Collection {
    pub fn new(name: impl Into<String>, extra_names: &[&str]) -> Self {
        Self {
            name: name.into(),
            extra_names: extra_names.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// Fully-qualified, percent-encoded directory URLs for this collection,
    /// primary subtree first.
    pub fn source_urls(&self, base_url: &str) -> Vec<String> {
        let mut urls = vec![format!(
            "{}/Redump/{}/",
            base_url,
            urlencoding::encode(&self.name)
        )];

        for extra in &self.extra_names {
            urls.push(format!(
                "{}/No-Intro/{}/",
                base_url,
                urlencoding::encode(extra)
            ));
        }

        urls
    }
}

/// The consoles searchable out of the box.
fn default_collections() -> Vec<Collection> {
    vec![
        Collection::new("Microsoft - Xbox 360", &["Microsoft - Xbox 360 (Digital)"]),
        Collection::new("Microsoft - Xbox", &[]),
        Collection::new(
            "Sony - PlayStation 3",
            &[
                "Sony - PlayStation 3 (PSN) (DLC)",
                "Sony - PlayStation 3 (PSN) (Content)",
                "Sony - PlayStation 3 (PSN) (Updates)",
            ],
        ),
        Collection::new("Sony - PlayStation 2", &[]),
        Collection::new("Sony - PlayStation", &[]),
    ]
}
