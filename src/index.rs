// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inverted index construction.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **POSTING_PER_FIELD**: one posting per distinct (term, document, field)
//! 2. **POSTING_LIST_SORTED**: each posting list is sorted by `doc_idx`
//! 3. **DOC_FREQ_CORRECT**: `df[term]` equals the count of distinct `doc_idx`
//!    in `index[term]`, whatever the field
//! 4. **AVG_DL_GLOBAL**: `avg_dl` is computed once, after every document
//!
//! Construction is single-threaded and visits documents in order. Sortedness
//! falls out of that for free: a document's postings are appended after every
//! posting of the documents before it.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::tokenizer::tokenize;
use crate::types::{Field, Posting, SearchDocument, SearchIndex};

/// Builder for constructing a search index.
#[derive(Debug, Default)]
pub struct SearchIndexBuilder {
    documents: Vec<SearchDocument>,
}

impl SearchIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document to the index.
    pub fn add_document(&mut self, doc: SearchDocument) -> &mut Self {
        self.documents.push(doc);
        self
    }

    /// Adds a document with just id, title, url and body.
    pub fn add_simple(&mut self, id: &str, title: &str, url: &str, body: &str) -> &mut Self {
        self.documents.push(SearchDocument {
            id: id.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            body: body.to_string(),
            headings: Vec::new(),
            code: Vec::new(),
        });
        self
    }

    /// Number of documents queued so far.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Builds the search index.
    pub fn build(self) -> SearchIndex {
        build_index(self.documents)
    }
}

/// Build an index over `documents`, in the order given.
pub fn build_index(documents: Vec<SearchDocument>) -> SearchIndex {
    let mut index: BTreeMap<String, Vec<Posting>> = BTreeMap::new();
    let mut df: BTreeMap<String, usize> = BTreeMap::new();
    let mut total_len = 0usize;

    for (doc_idx, doc) in documents.iter().enumerate() {
        total_len += doc.body_len();

        // Terms already counted toward df for this document, whatever field.
        let mut seen_in_doc: HashSet<String> = HashSet::new();

        for field in Field::ALL {
            for (term, tf) in field_term_frequencies(doc, field) {
                index.entry(term.clone()).or_default().push(Posting { doc_idx, tf, field });
                if seen_in_doc.insert(term.clone()) {
                    *df.entry(term).or_insert(0) += 1;
                }
            }
        }
    }

    let doc_count = documents.len();
    let avg_dl = if doc_count > 0 {
        total_len as f64 / doc_count as f64
    } else {
        0.0
    };

    let built = SearchIndex {
        documents,
        index,
        df,
        avg_dl,
        doc_count,
    };

    tracing::debug!(
        documents = built.doc_count,
        terms = built.term_count(),
        postings = built.posting_count(),
        avg_dl = built.avg_dl,
        "built search index"
    );

    built
}

/// Term frequencies for one field of one document, in first-occurrence order.
///
/// Headings and code blocks are tokenized per entry and counted together, the
/// same as tokenizing their concatenation with a separator.
fn field_term_frequencies(doc: &SearchDocument, field: Field) -> Vec<(String, u32)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u32> = HashMap::new();

    let mut count = |text: &str| {
        for term in tokenize(text) {
            match counts.get_mut(&term) {
                Some(tf) => *tf += 1,
                None => {
                    counts.insert(term.clone(), 1);
                    order.push(term);
                }
            }
        }
    };

    match field {
        Field::Title => count(&doc.title),
        Field::Heading => doc.headings.iter().for_each(|h| count(h)),
        Field::Body => count(&doc.body),
        Field::Code => doc.code.iter().for_each(|c| count(c)),
    }

    order
        .into_iter()
        .map(|term| {
            let tf = counts[&term];
            (term, tf)
        })
        .collect()
}
