// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query evaluation: tokenize, retrieve, score, rank, snip.
//!
//! Every query term except the last is looked up exactly. The last one is
//! also expanded to every indexed term it prefixes, so results keep up while
//! the user is still typing the word. Expansion needs at least two characters;
//! a single letter (or a single CJK character) would pull in half the
//! vocabulary.
//!
//! Nothing here mutates the index, so any number of queries can share one
//! `&SearchIndex`.

mod snippet;

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use serde::{Deserialize, Serialize};

pub use snippet::generate_snippet;

use crate::scoring::ranking::{rank, Candidate};
use crate::scoring::{bm25_term_score, idf};
use crate::tokenizer::tokenize;
use crate::types::{SearchIndex, SearchResult};

/// Default number of results.
pub const DEFAULT_LIMIT: usize = 10;

/// Minimum length, in characters, of a query term eligible for prefix expansion.
pub const MIN_PREFIX_CHARS: usize = 2;

/// Knobs a caller may turn. None of them alter the scoring formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Maximum number of results.
    pub limit: usize,
    /// Expand the last query term to indexed terms it prefixes.
    pub prefix: bool,
    /// Drop documents scoring below this.
    pub threshold: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            prefix: true,
            threshold: 0.0,
        }
    }
}

/// Rank documents for `query` and return at most `limit` results.
///
/// ```
/// use docseek::{search, SearchIndexBuilder};
///
/// let mut builder = SearchIndexBuilder::new();
/// builder.add_simple("md", "Markdown", "/md.html", "Write pages in markdown.");
/// let index = builder.build();
///
/// // "mark" is the last term and at least two characters, so it expands.
/// let results = search(&index, "mark", 10);
/// assert_eq!(results[0].matches, vec!["markdown"]);
/// ```
pub fn search(index: &SearchIndex, query: &str, limit: usize) -> Vec<SearchResult> {
    search_with_options(
        index,
        query,
        &SearchOptions {
            limit,
            ..SearchOptions::default()
        },
    )
}

/// Rank documents for `query` with explicit options.
pub fn search_with_options(
    index: &SearchIndex,
    query: &str,
    options: &SearchOptions,
) -> Vec<SearchResult> {
    if query.trim().is_empty() || options.limit == 0 {
        return Vec::new();
    }

    let tokens = tokenize(query);
    let Some(last) = tokens.len().checked_sub(1) else {
        return Vec::new();
    };

    // doc_idx → (score, matched terms in first-match order)
    let mut scores: BTreeMap<usize, (f64, Vec<String>)> = BTreeMap::new();
    let mut doc_lens: HashMap<usize, usize> = HashMap::new();

    for (i, token) in tokens.iter().enumerate() {
        let expand = i == last && options.prefix && token.chars().count() >= MIN_PREFIX_CHARS;
        for term in matching_terms(index, token, expand) {
            accumulate(index, term, &mut scores, &mut doc_lens);
        }
    }

    let candidates: Vec<Candidate> = scores
        .into_iter()
        .map(|(doc_idx, (score, matches))| Candidate {
            doc_idx,
            score,
            matches,
        })
        .collect();
    let candidate_count = candidates.len();
    let ranked = rank(candidates, options.threshold, options.limit);

    tracing::debug!(
        query,
        terms = tokens.len(),
        candidates = candidate_count,
        returned = ranked.len(),
        "search"
    );

    ranked
        .into_iter()
        .filter_map(|c| {
            let doc = index.documents.get(c.doc_idx)?;
            Some(SearchResult {
                id: doc.id.clone(),
                title: doc.title.clone(),
                url: doc.url.clone(),
                score: c.score,
                snippet: generate_snippet(&doc.body, &c.matches),
                matches: c.matches,
            })
        })
        .collect()
}

/// Indexed terms a query token resolves to: itself if present, plus every
/// term it prefixes when `expand` is set.
fn matching_terms<'a>(index: &'a SearchIndex, token: &'a str, expand: bool) -> Vec<&'a str> {
    if !expand {
        return index
            .index
            .get_key_value(token)
            .map(|(term, _)| vec![term.as_str()])
            .unwrap_or_default();
    }

    index
        .index
        .range::<str, _>((Bound::Included(token), Bound::Unbounded))
        .take_while(|(term, _)| term.starts_with(token))
        .map(|(term, _)| term.as_str())
        .collect()
}

fn accumulate(
    index: &SearchIndex,
    term: &str,
    scores: &mut BTreeMap<usize, (f64, Vec<String>)>,
    doc_lens: &mut HashMap<usize, usize>,
) {
    let Some(postings) = index.index.get(term) else {
        return;
    };
    let df = index.df.get(term).copied().unwrap_or(postings.len());
    let term_idf = idf(index.doc_count, df);

    for posting in postings {
        let Some(doc) = index.documents.get(posting.doc_idx) else {
            continue;
        };
        let doc_len = *doc_lens
            .entry(posting.doc_idx)
            .or_insert_with(|| doc.body_len());
        let contribution = bm25_term_score(posting.tf, doc_len, index.avg_dl, term_idf, posting.field);

        match scores.entry(posting.doc_idx) {
            Entry::Vacant(slot) => {
                slot.insert((contribution, vec![term.to_string()]));
            }
            Entry::Occupied(mut slot) => {
                let (score, matches) = slot.get_mut();
                *score += contribution;
                if !matches.iter().any(|m| m == term) {
                    matches.push(term.to_string());
                }
            }
        }
    }
}
