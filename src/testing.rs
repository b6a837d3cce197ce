//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::index::build_index;
use crate::types::{SearchDocument, SearchIndex};

/// Create a document with a title and body, id and url derived from `id`.
///
/// This is the canonical implementation used across all tests.
pub fn make_doc(id: &str, title: &str, body: &str) -> SearchDocument {
    SearchDocument {
        id: id.to_string(),
        title: title.to_string(),
        url: format!("/{}.html", id),
        body: body.to_string(),
        headings: Vec::new(),
        code: Vec::new(),
    }
}

/// Create a document with every field populated.
pub fn make_full_doc(
    id: &str,
    title: &str,
    body: &str,
    headings: &[&str],
    code: &[&str],
) -> SearchDocument {
    SearchDocument {
        headings: headings.iter().map(|h| h.to_string()).collect(),
        code: code.iter().map(|c| c.to_string()).collect(),
        ..make_doc(id, title, body)
    }
}

/// Build an index from `(id, title, body)` triples.
pub fn index_of(docs: &[(&str, &str, &str)]) -> SearchIndex {
    build_index(
        docs.iter()
            .map(|(id, title, body)| make_doc(id, title, body))
            .collect(),
    )
}

/// A small documentation site: install guide, API reference, config page,
/// changelog, and a Japanese page.
pub fn sample_corpus() -> Vec<SearchDocument> {
    vec![
        make_full_doc(
            "guide/install",
            "Installation",
            "Install the toolchain with the installer script. Installing takes about a minute \
             on a fast connection. After installation, run the version command to check.",
            &["Requirements", "Installing from source"],
            &["curl -sSf https://example.com/install.sh | sh"],
        ),
        make_full_doc(
            "reference/api",
            "API Reference",
            "Every public function is listed here with its parameters and return type. \
             Search the reference for a function name.",
            &["Functions", "Types"],
            &["fn search(index: &Index, query: &str) -> Vec<Hit>"],
        ),
        make_full_doc(
            "guide/config",
            "Configuration",
            "The configuration file controls search behaviour. Set the limit to change how \
             many results appear. Disable search entirely with enabled false.",
            &["Search options", "Theme"],
            &["search:\n  limit: 5"],
        ),
        make_doc(
            "changelog",
            "Changelog",
            "Version two rewrote the search engine. Version one was the first release.",
        ),
        make_doc(
            "ja/intro",
            "はじめに",
            "検索エンジンの使い方を説明します。東京からのアクセスも速いです。",
        ),
    ]
}

/// [`sample_corpus`] as an index.
pub fn sample_index() -> SearchIndex {
    build_index(sample_corpus())
}
