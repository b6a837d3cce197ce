// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how scored documents get sorted.
//!
//! Sort order:
//! 1. **Score** - descending, higher wins
//! 2. **Doc index** - ascending, so equal scores keep corpus order
//!
//! Scores are finite by construction (idf > 0, denominators > 0), but the
//! comparison uses `total_cmp` anyway so a NaN could never make the sort
//! inconsistent.

use std::cmp::Ordering;

/// A document that matched at least one query term.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub doc_idx: usize,
    pub score: f64,
    /// Indexed terms that contributed, in first-match order.
    pub matches: Vec<String>,
}

/// Compare two candidates for ranking.
pub fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.doc_idx.cmp(&b.doc_idx))
}

/// Drop candidates under `threshold`, sort, and keep the best `limit`.
pub fn rank(mut candidates: Vec<Candidate>, threshold: f64, limit: usize) -> Vec<Candidate> {
    candidates.retain(|c| c.score >= threshold);
    candidates.sort_by(compare_candidates);
    candidates.truncate(limit);
    candidates
}
