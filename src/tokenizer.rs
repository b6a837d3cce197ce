// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text to terms.
//!
//! One function, used at index time and at query time. If those two ever
//! disagree, a query can never find the document it was typed to find, so
//! there is exactly one tokenizer and no knobs on it.
//!
//! The rules are a two-state machine over code points:
//!
//! - `[A-Za-z0-9_]` extends the current Latin run.
//! - A CJK character flushes the run and becomes a term on its own. Without a
//!   segmenter there is no better unit for Chinese or Japanese text.
//! - Anything else flushes the run and is dropped.

/// Is this character in one of the CJK blocks we split per character?
///
/// Covers CJK Unified Ideographs (plus Extension A), Hiragana, Katakana and
/// Hangul Syllables.
#[inline]
pub fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}' |   // CJK Unified Ideographs
        '\u{3400}'..='\u{4DBF}' |   // CJK Extension A
        '\u{3040}'..='\u{309F}' |   // Hiragana
        '\u{30A0}'..='\u{30FF}' |   // Katakana
        '\u{AC00}'..='\u{D7AF}'     // Hangul Syllables
    )
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split text into normalized search terms.
///
/// ```
/// use docseek::tokenize;
///
/// assert_eq!(tokenize("Hello World"), vec!["hello", "world"]);
/// assert_eq!(tokenize("東京Tower"), vec!["東", "京", "tower"]);
/// assert!(tokenize("").is_empty());
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut run = String::new();

    for c in text.chars() {
        if is_cjk(c) {
            flush(&mut run, &mut terms);
            terms.push(c.to_string());
        } else if is_word_char(c) {
            run.push(c.to_ascii_lowercase());
        } else {
            flush(&mut run, &mut terms);
        }
    }
    flush(&mut run, &mut terms);

    terms
}

#[inline]
fn flush(run: &mut String, terms: &mut Vec<String>) {
    if !run.is_empty() {
        terms.push(std::mem::take(run));
    }
}
