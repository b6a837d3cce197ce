//! Search result properties.

use crate::strategies::{corpus_strategy, query_strategy};
use docseek::{build_index, search, search_with_options, tokenize, SearchOptions};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Never more than `limit` results, never the same document twice.
    #[test]
    fn prop_limit_respected(corpus in corpus_strategy(), query in query_strategy(), limit in 0usize..6) {
        let index = build_index(corpus);
        let results = search(&index, &query, limit);
        prop_assert!(results.len() <= limit);

        let mut ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), results.len());
    }

    /// Results come sorted by score, best first, all positive and finite.
    #[test]
    fn prop_results_sorted(corpus in corpus_strategy(), query in query_strategy()) {
        let index = build_index(corpus);
        let results = search(&index, &query, 20);
        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        for r in &results {
            prop_assert!(r.score.is_finite() && r.score > 0.0);
        }
    }

    /// Every reported match is an indexed term that the query names, either
    /// exactly or (for the last token) as a prefix.
    #[test]
    fn prop_matches_come_from_query(corpus in corpus_strategy(), query in query_strategy()) {
        let index = build_index(corpus);
        let tokens = tokenize(&query);
        for result in search(&index, &query, 20) {
            prop_assert!(!result.matches.is_empty());
            for term in &result.matches {
                prop_assert!(index.index.contains_key(term));
                let exact = tokens.iter().any(|t| t == term);
                let prefixed = tokens
                    .last()
                    .map(|t| t.chars().count() >= 2 && term.starts_with(t.as_str()))
                    .unwrap_or(false);
                prop_assert!(exact || prefixed, "{} not named by {:?}", term, tokens);
            }
        }
    }

    /// Turning prefix expansion off can only remove results.
    #[test]
    fn prop_prefix_only_adds(corpus in corpus_strategy(), query in query_strategy()) {
        let index = build_index(corpus);
        let exact = search_with_options(&index, &query, &SearchOptions {
            limit: usize::MAX,
            prefix: false,
            ..SearchOptions::default()
        });
        let expanded = search(&index, &query, usize::MAX);
        for r in &exact {
            prop_assert!(expanded.iter().any(|e| e.id == r.id));
        }
    }

    /// A smaller limit returns a prefix of the larger result list.
    #[test]
    fn prop_limit_is_prefix(corpus in corpus_strategy(), query in query_strategy(), limit in 0usize..5) {
        let index = build_index(corpus);
        let all = search(&index, &query, 20);
        let some = search(&index, &query, limit);
        prop_assert_eq!(&all[..some.len()], &some[..]);
    }
}
