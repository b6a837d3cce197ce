//! Ranking tests: field boosts, term rarity, length normalization, ties.

use crate::common::{index_of, make_doc, make_full_doc, sample_index};
use docseek::{build_index, search};

fn ids(results: &[docseek::SearchResult]) -> Vec<&str> {
    results.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn test_title_match_beats_body_match() {
    let index = index_of(&[
        ("body", "Other", "A page that mentions rust in passing."),
        ("title", "Rust", "A page about something else entirely."),
    ]);
    let results = search(&index, "rust", 10);
    assert_eq!(ids(&results), vec!["title", "body"]);
}

#[test]
fn test_heading_match_beats_body_match() {
    let index = build_index(vec![
        make_doc("body", "One", "configure the cache before use"),
        make_full_doc("heading", "Two", "configure things before use", &["Cache"], &[]),
    ]);
    let results = search(&index, "cache", 10);
    assert_eq!(ids(&results), vec!["heading", "body"]);
}

#[test]
fn test_body_match_beats_code_match() {
    let index = build_index(vec![
        make_full_doc("code", "One", "a short body", &[], &["let token = parse();"]),
        make_doc("body", "Two", "a token body"),
    ]);
    let results = search(&index, "token", 10);
    assert_eq!(ids(&results), vec!["body", "code"]);
}

#[test]
fn test_higher_term_frequency_wins() {
    let index = index_of(&[
        ("once", "A", "cache other words here"),
        ("thrice", "B", "cache cache cache other"),
    ]);
    let results = search(&index, "cache", 10);
    assert_eq!(ids(&results), vec!["thrice", "once"]);
}

#[test]
fn test_shorter_document_wins_at_equal_frequency() {
    let index = index_of(&[
        ("long", "A", "cache appears once in this considerably longer body of prose text"),
        ("short", "B", "cache here"),
    ]);
    let results = search(&index, "cache", 10);
    assert_eq!(ids(&results), vec!["short", "long"]);
}

#[test]
fn test_rare_term_outweighs_common_term() {
    let index = index_of(&[
        ("common", "A", "common filler"),
        ("rare", "B", "rare filler"),
        ("c2", "C", "common alpha"),
        ("c3", "D", "common beta"),
        ("c4", "E", "common gamma"),
    ]);
    let results = search(&index, "common rare", 10);
    assert_eq!(results[0].id, "rare");
    assert_eq!(results.len(), 5);
}

#[test]
fn test_matching_more_terms_ranks_higher() {
    let index = index_of(&[
        ("one", "A", "search engine"),
        ("both", "B", "search index"),
    ]);
    let results = search(&index, "search index", 10);
    assert_eq!(results[0].id, "both");
    assert_eq!(results[0].matches, vec!["search", "index"]);
    assert_eq!(results[1].matches, vec!["search"]);
}

#[test]
fn test_equal_scores_keep_corpus_order() {
    let index = index_of(&[
        ("first", "Same", "identical body text"),
        ("second", "Same", "identical body text"),
        ("third", "Same", "identical body text"),
    ]);
    let results = search(&index, "identical", 10);
    assert_eq!(ids(&results), vec!["first", "second", "third"]);
    assert_eq!(results[0].score, results[2].score);
}

#[test]
fn test_scores_are_positive_and_descending() {
    let index = sample_index();
    let results = search(&index, "search", 10);
    assert!(results.len() >= 2);
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert!(results.iter().all(|r| r.score > 0.0));
}

#[test]
fn test_sample_corpus_install_query() {
    let index = sample_index();
    let results = search(&index, "installation", 10);
    assert_eq!(results[0].id, "guide/install");
    assert_eq!(results[0].title, "Installation");
    assert_eq!(results[0].url, "/guide/install.html");
}

#[test]
fn test_limit_truncates_after_ranking() {
    let index = index_of(&[
        ("weak", "A", "topic mentioned once among many many other words"),
        ("strong", "Topic", "topic topic"),
        ("medium", "B", "topic topic here"),
    ]);
    let all = search(&index, "topic", 10);
    let top = search(&index, "topic", 1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].id, all[0].id);
    assert_eq!(top[0].id, "strong");
}

#[test]
fn test_score_is_bm25_sum_over_fields() {
    // "widget" once in every field of A, twice in C's body, absent from B.
    let index = build_index(vec![
        make_full_doc("a", "Widget", "the widget body text", &["Widget setup"], &["widget()"]),
        make_doc("b", "Other", "nothing relevant here"),
        make_doc("c", "Gadget", "a widget widget"),
    ]);
    let results = search(&index, "widget", 10);
    assert_eq!(ids(&results), vec!["a", "c"]);

    // Body lengths in characters: 20, 21, 15.
    let avg_dl = (20.0 + 21.0 + 15.0) / 3.0;
    let idf = ((3.0 - 2.0 + 0.5) / (2.0 + 0.5) + 1.0f64).ln();
    let term = |tf: f64, len: f64, boost: f64| {
        idf * (tf * 2.2) / (tf + 1.2 * (0.25 + 0.75 * len / avg_dl)) * boost
    };

    let expected_a = term(1.0, 20.0, 10.0) + term(1.0, 20.0, 5.0) + term(1.0, 20.0, 1.0) + term(1.0, 20.0, 0.5);
    let expected_c = term(2.0, 15.0, 1.0);
    assert!((results[0].score - expected_a).abs() < 1e-9, "a: {} vs {}", results[0].score, expected_a);
    assert!((results[1].score - expected_c).abs() < 1e-9, "c: {} vs {}", results[1].score, expected_c);
}
