// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a search index.
//!
//! These types define how documents, fields, and postings fit together. The
//! whole index is plain data: build it once, serialize it, load it, query it.
//! Nothing mutates it after `build()` returns.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Posting**: `doc_idx < documents.len()`
//!   Every posting points at a real document.
//!
//! - **SearchIndex**: `doc_count = documents.len()` and `df.keys() = index.keys()`
//!   The corpus stats line up with the data they summarize.
//!
//! - **df**: `df[term]` = number of distinct documents in `index[term]`, counted
//!   across all fields. There is no per-field df; IDF is shared by every field.
//!
//! - **avg_dl**: mean of `body.chars().count()` over all documents, 0 for an
//!   empty corpus.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// =============================================================================
// FIELDS
// =============================================================================

/// Which part of a document a term was found in.
///
/// The boost is a multiplier on the BM25 contribution, so unlike a bucket
/// ranking a body match with many occurrences can still beat a weak title
/// match. Title > Heading > Body > Code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Heading,
    Body,
    Code,
}

impl Field {
    /// All fields in index order.
    pub const ALL: [Field; 4] = [Field::Title, Field::Heading, Field::Body, Field::Code];

    /// Score multiplier for matches in this field.
    #[inline]
    pub fn boost(self) -> f64 {
        match self {
            Field::Title => 10.0,
            Field::Heading => 5.0,
            Field::Body => 1.0,
            Field::Code => 0.5,
        }
    }

    /// Tag byte used by the binary format.
    #[inline]
    pub fn to_u8(self) -> u8 {
        match self {
            Field::Title => 0,
            Field::Heading => 1,
            Field::Body => 2,
            Field::Code => 3,
        }
    }

    /// Inverse of [`Field::to_u8`]. Unknown tags are rejected, not defaulted.
    #[inline]
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Field::Title),
            1 => Some(Field::Heading),
            2 => Some(Field::Body),
            3 => Some(Field::Code),
            _ => None,
        }
    }
}

// =============================================================================
// DOCUMENTS
// =============================================================================

/// One page, flattened into searchable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDocument {
    /// Stable source identifier (usually the source path).
    pub id: String,
    pub title: String,
    /// Output-relative link followed when the result is clicked.
    pub url: String,
    /// Plain prose text. Drives length normalization and snippets.
    pub body: String,
    #[serde(default)]
    pub headings: Vec<String>,
    #[serde(default)]
    pub code: Vec<String>,
}

impl SearchDocument {
    /// Stand-in for a page that could not be read or extracted.
    ///
    /// Keeps the page reachable by title search on its id without pretending
    /// to know anything about its content.
    pub fn placeholder(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: crate::extract::PLACEHOLDER_TITLE.to_string(),
            url: url.into(),
            body: String::new(),
            headings: Vec::new(),
            code: Vec::new(),
        }
    }

    /// Body length used for BM25 length normalization, in characters.
    #[inline]
    pub fn body_len(&self) -> usize {
        self.body.chars().count()
    }
}

// =============================================================================
// INVERTED INDEX
// =============================================================================

/// One (term, document, field) occurrence record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// Index into `SearchIndex::documents`.
    pub doc_idx: usize,
    /// Occurrences of the term in this field of this document.
    pub tf: u32,
    pub field: Field,
}

/// The complete searchable index.
///
/// Terms are kept in a `BTreeMap` so prefix expansion is a range scan and the
/// binary encoding comes out in the same order every build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchIndex {
    pub documents: Vec<SearchDocument>,
    /// Term → postings, sorted by `doc_idx`.
    pub index: BTreeMap<String, Vec<Posting>>,
    /// Term → number of distinct documents containing it in any field.
    pub df: BTreeMap<String, usize>,
    /// Mean body length in characters.
    pub avg_dl: f64,
    pub doc_count: usize,
}

impl SearchIndex {
    /// An index with no documents. Answers every query with nothing.
    pub fn empty() -> Self {
        Self {
            documents: Vec::new(),
            index: BTreeMap::new(),
            df: BTreeMap::new(),
            avg_dl: 0.0,
            doc_count: 0,
        }
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.index.len()
    }

    /// Total postings across all terms.
    pub fn posting_count(&self) -> usize {
        self.index.values().map(Vec::len).sum()
    }

    /// Serialize to JSON for JavaScript consumers.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse an index previously written by [`SearchIndex::to_json`].
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A ranked hit, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub url: String,
    pub score: f64,
    /// Indexed terms that matched (after prefix expansion).
    pub matches: Vec<String>,
    pub snippet: String,
}
