// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! BM25 full-text search for static documentation sites.
//!
//! The crate covers both halves of site search: a build-time indexer that turns
//! rendered pages into a compact binary index, and a query engine that ranks
//! documents for a query and cuts a snippet out of each hit.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  extract/    │────▶│  index.rs   │────▶│  binary/     │────▶│  loader.rs  │
//! │ (Page → Doc) │     │ (postings,  │     │ (serialize,  │     │ (IndexHandle│
//! │              │     │  df, avg_dl)│     │  deserialize)│     │  once-load) │
//! └──────────────┘     └─────────────┘     └──────────────┘     └─────────────┘
//!        │                    │                                        │
//!        ▼                    ▼                                        ▼
//! ┌──────────────────────────────────────┐     ┌──────────────────────────────┐
//! │            tokenizer.rs              │◀────│  search/ + scoring/          │
//! │  (same function at index and query)  │     │  (BM25, prefix, snippets)    │
//! └──────────────────────────────────────┘     └──────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use docseek::{search, SearchIndexBuilder};
//!
//! let mut builder = SearchIndexBuilder::new();
//! builder.add_simple("intro", "Getting Started", "/intro.html", "Install the toolchain first.");
//! builder.add_simple("api", "API Reference", "/api.html", "Every function, documented.");
//! let index = builder.build();
//!
//! let results = search(&index, "install", 10);
//! assert_eq!(results[0].id, "intro");
//! ```

pub mod binary;
pub mod build;
pub mod config;
pub mod error;
pub mod extract;
mod index;
#[cfg(feature = "loader")]
pub mod loader;
mod scoring;
mod search;
#[doc(hidden)]
pub mod testing;
mod tokenizer;
mod types;

#[cfg(feature = "wasm")]
mod wasm;

// Re-exports for public API
pub use binary::decode_index;
pub use config::{client_index_url, SearchConfig, INDEX_FILE_NAME, INDEX_JSON_FILE_NAME};
pub use error::{BuildError, ExtractError, FormatError, LoadError, PageError};
pub use extract::{extract, Extraction, Page, PageFormat, TitleSource};
pub use index::{build_index, SearchIndexBuilder};
#[cfg(feature = "loader")]
pub use loader::{BytesSource, FileSource, IndexHandle, IndexSource};
pub use scoring::{bm25_term_score, idf, B, K1};
pub use search::{generate_snippet, search, search_with_options, SearchOptions};
pub use tokenizer::{is_cjk, tokenize};
pub use types::{Field, Posting, SearchDocument, SearchIndex, SearchResult};
