use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::error::BuildError;

/// File name of the manifest inside the input directory.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// What the site builder hands the indexer: which pages exist and how the
/// site is configured.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SiteManifest {
    pub version: u32,
    /// Base path the site is served under.
    #[serde(default = "default_base")]
    pub base: String,
    pub pages: Vec<PageEntry>,
    #[serde(default)]
    pub search: SearchConfig,
}

/// One rendered page, relative to the input directory.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct PageEntry {
    /// Path of the page source, relative to the input directory.
    pub source: String,
    /// Output-relative link for search results.
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
}

fn default_base() -> String {
    "/".to_string()
}

impl SiteManifest {
    /// Read `manifest.json` from `input_dir`.
    pub fn read(input_dir: &Path) -> Result<Self, BuildError> {
        let path = input_dir.join(MANIFEST_FILE_NAME);
        let content = fs::read_to_string(&path).map_err(|source| BuildError::ReadManifest {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content)
            .map_err(|source| BuildError::InvalidManifest { path, source })
    }
}
