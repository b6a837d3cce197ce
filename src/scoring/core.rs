// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind search ranking.
//!
//! Okapi BM25 with a per-field multiplier:
//!
//! ```text
//! score(term, posting) = idf(term)
//!                      * tf * (k1 + 1) / (tf + k1 * (1 - b + b * docLen / avgDl))
//!                      * boost(field)
//!
//! idf(term) = ln((N - df + 0.5) / (df + 0.5) + 1)
//! ```
//!
//! The `+ 1` inside the log keeps IDF positive even for a term present in
//! every document, so adding a matching term can never lower a score.
//!
//! # Constants
//!
//! | Name | Value | Meaning |
//! |------|-------|---------|
//! | `K1` | 1.2   | Term frequency saturation |
//! | `B`  | 0.75  | Strength of length normalization |
//!
//! df is shared across fields: a term in one document's title and another
//! document's body has df = 2 for both postings.

use crate::types::Field;

/// Term frequency saturation.
pub const K1: f64 = 1.2;

/// Length normalization strength.
pub const B: f64 = 0.75;

/// Inverse document frequency.
///
/// Strictly decreasing in `df` for a fixed `doc_count`, and always positive.
#[inline]
pub fn idf(doc_count: usize, df: usize) -> f64 {
    let n = doc_count as f64;
    let df = df as f64;
    ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
}

/// BM25 contribution of one posting.
///
/// `avg_dl == 0` only happens when every body is empty; the length ratio is
/// then 0 rather than NaN.
#[inline]
pub fn bm25_term_score(tf: u32, doc_len: usize, avg_dl: f64, idf: f64, field: Field) -> f64 {
    let tf = f64::from(tf);
    let length_ratio = if avg_dl > 0.0 {
        doc_len as f64 / avg_dl
    } else {
        0.0
    };
    let saturation = (tf * (K1 + 1.0)) / (tf + K1 * (1.0 - B + B * length_ratio));
    idf * saturation * field.boost()
}
