// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Arbitrary queries against a fixed index.
//!
//! Whatever lands in the search box (emoji, RTL text, null bytes, a pasted
//! novel) must produce a well-formed, bounded, sorted result list.

#![no_main]

use std::sync::OnceLock;

use docseek::testing::sample_index;
use docseek::{search, SearchIndex};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|query: &[u8]| {
    static INDEX: OnceLock<SearchIndex> = OnceLock::new();
    let index = INDEX.get_or_init(sample_index);

    let query = String::from_utf8_lossy(query);
    let query: String = query.chars().take(200).collect();

    let results = search(index, &query, 10);

    assert!(results.len() <= 10);
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score, "results out of order");
    }
    for result in &results {
        assert!(result.score.is_finite() && result.score > 0.0);
        assert!(!result.matches.is_empty());
        // Snippet is a window of the body, plus at most two ellipses.
        let body = &index
            .documents
            .iter()
            .find(|d| d.id == result.id)
            .expect("result names an indexed document")
            .body;
        assert!(result.snippet.chars().count() <= body.chars().count() + 6);
    }
});
