// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search configuration as the site builder sees it.
//!
//! Lives in the `search` block of `manifest.json`. Every field has a default,
//! so `"search": {}` (or no block at all) means "on, with stock settings".
//! These settings gate behaviour only; none of them touch the scoring formula.

use serde::{Deserialize, Serialize};

use crate::search::{SearchOptions, DEFAULT_LIMIT};

/// File name of the binary index under the output directory.
pub const INDEX_FILE_NAME: &str = "search-index.bin";

/// File name of the optional JSON index under the output directory.
pub const INDEX_JSON_FILE_NAME: &str = "search-index.json";

/// URL the client fetches the index from, given the site's base path.
///
/// ```
/// use docseek::client_index_url;
///
/// assert_eq!(client_index_url("/docs/"), "/docs/search-index.bin");
/// assert_eq!(client_index_url("/docs"), "/docs/search-index.bin");
/// assert_eq!(client_index_url(""), "/search-index.bin");
/// ```
pub fn client_index_url(base: &str) -> String {
    let base = base.trim_end_matches('/');
    format!("{}/{}", base, INDEX_FILE_NAME)
}

/// Site-level search settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Build and ship an index at all.
    pub enabled: bool,
    /// Maximum results shown.
    pub limit: usize,
    /// Complete the last word while typing.
    pub prefix: bool,
    /// Search box placeholder text.
    pub placeholder: String,
    /// Key that focuses the search box.
    pub hotkey: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            limit: DEFAULT_LIMIT,
            prefix: true,
            placeholder: "Search documentation...".to_string(),
            hotkey: "/".to_string(),
        }
    }
}

impl SearchConfig {
    /// Query options implied by this configuration.
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            limit: self.limit,
            prefix: self.prefix,
            ..SearchOptions::default()
        }
    }

    /// The settings the search UI needs, as JSON for inlining into pages.
    pub fn client_json(&self, base: &str) -> serde_json::Value {
        serde_json::json!({
            "placeholder": self.placeholder,
            "hotkey": self.hotkey,
            "limit": self.limit,
            "prefix": self.prefix,
            "indexUrl": client_index_url(base),
        })
    }
}
