//! Edge cases: empty inputs, punctuation-only queries, absent terms.

use crate::common::{index_of, sample_index};
use docseek::{search, search_with_options, SearchIndex, SearchOptions};

#[test]
fn test_empty_query() {
    let index = sample_index();
    assert!(search(&index, "", 10).is_empty());
    assert!(search(&index, "   \t ", 10).is_empty());
}

#[test]
fn test_punctuation_only_query() {
    let index = sample_index();
    assert!(search(&index, "!!! ... ???", 10).is_empty());
}

#[test]
fn test_zero_limit() {
    let index = sample_index();
    assert!(search(&index, "search", 0).is_empty());
}

#[test]
fn test_empty_index() {
    let index = SearchIndex::empty();
    assert!(search(&index, "anything", 10).is_empty());

    let built = index_of(&[]);
    assert_eq!(built.avg_dl, 0.0);
    assert!(search(&built, "anything", 10).is_empty());
}

#[test]
fn test_absent_term() {
    let index = sample_index();
    assert!(search(&index, "xylophone", 10).is_empty());
}

#[test]
fn test_query_is_case_insensitive() {
    let index = sample_index();
    let lower = search(&index, "configuration", 10);
    let upper = search(&index, "CONFIGURATION", 10);
    assert!(!lower.is_empty());
    assert_eq!(lower, upper);
}

#[test]
fn test_repeated_query_term_counts_twice() {
    let index = index_of(&[("a", "A", "cache layer"), ("b", "B", "other words")]);
    let once = search(&index, "cache", 10);
    let twice = search(&index, "cache cache", 10);
    assert_eq!(twice.len(), 1);
    assert!((twice[0].score - 2.0 * once[0].score).abs() < 1e-9);
    assert_eq!(twice[0].matches, vec!["cache"]);
}

#[test]
fn test_all_empty_bodies() {
    let index = index_of(&[("a", "Alpha", ""), ("b", "Beta", "")]);
    assert_eq!(index.avg_dl, 0.0);
    let results = search(&index, "alpha", 10);
    assert_eq!(results.len(), 1);
    assert!(results[0].score.is_finite());
    assert!(results[0].score > 0.0);
}

#[test]
fn test_threshold_filters_weak_results() {
    let index = index_of(&[
        ("title", "Cache", "unrelated"),
        ("body", "Other", "cache mentioned once in a longer body"),
    ]);
    let all = search(&index, "cache", 10);
    assert_eq!(all.len(), 2);

    let cutoff = (all[0].score + all[1].score) / 2.0;
    let strong = search_with_options(
        &index,
        "cache",
        &SearchOptions {
            threshold: cutoff,
            ..SearchOptions::default()
        },
    );
    assert_eq!(strong.len(), 1);
    assert_eq!(strong[0].id, "title");
}

#[test]
fn test_term_present_in_every_document_still_scores() {
    let index = index_of(&[("a", "A", "docs"), ("b", "B", "docs"), ("c", "C", "docs")]);
    let results = search(&index, "docs", 10);
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.score > 0.0));
}
