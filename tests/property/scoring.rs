//! BM25 scoring properties.

use docseek::{bm25_term_score, idf, Field};
use proptest::prelude::*;

proptest! {
    /// idf is positive and never increases as df grows.
    #[test]
    fn prop_idf_positive_and_monotone(n in 1usize..10_000, a in 1usize..10_000, b in 1usize..10_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let (lo, hi) = (lo.min(n), hi.min(n));
        prop_assert!(idf(n, lo) > 0.0);
        prop_assert!(idf(n, hi) > 0.0);
        prop_assert!(idf(n, lo) >= idf(n, hi));
    }

    /// More occurrences never lower the score, and it stays under the
    /// saturation ceiling idf * (k1 + 1) * boost.
    #[test]
    fn prop_tf_saturates(tf in 1u32..1000, doc_len in 0usize..5000, avg_dl in 0.0f64..2000.0) {
        let value = idf(100, 3);
        let s1 = bm25_term_score(tf, doc_len, avg_dl, value, Field::Body);
        let s2 = bm25_term_score(tf + 1, doc_len, avg_dl, value, Field::Body);
        prop_assert!(s1.is_finite());
        prop_assert!(s2 >= s1);
        prop_assert!(s2 < value * (docseek::K1 + 1.0) + 1e-9);
    }

    /// Longer documents never score higher for the same tf.
    #[test]
    fn prop_length_normalization(tf in 1u32..50, a in 0usize..5000, b in 0usize..5000, avg_dl in 1.0f64..2000.0) {
        let (short, long) = if a <= b { (a, b) } else { (b, a) };
        let value = idf(50, 5);
        prop_assert!(
            bm25_term_score(tf, short, avg_dl, value, Field::Body)
                >= bm25_term_score(tf, long, avg_dl, value, Field::Body)
        );
    }

    /// Boost order holds for any inputs: title > heading > body > code.
    #[test]
    fn prop_field_boost_order(tf in 1u32..50, doc_len in 0usize..5000, avg_dl in 0.0f64..2000.0) {
        let value = idf(10, 2);
        let score = |field| bm25_term_score(tf, doc_len, avg_dl, value, field);
        prop_assert!(score(Field::Title) > score(Field::Heading));
        prop_assert!(score(Field::Heading) > score(Field::Body));
        prop_assert!(score(Field::Body) > score(Field::Code));
    }
}
