// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Snippet extraction: a short window of body text around the first match.

/// Characters kept before the anchor.
pub const CONTEXT_BEFORE: usize = 50;

/// Characters kept from the anchor onward.
pub const CONTEXT_AFTER: usize = 100;

const ELLIPSIS: &str = "...";

/// Cut a window of `body` around the earliest occurrence of any matched term.
///
/// Matching is case-insensitive and offsets are in characters, so the window
/// never splits a UTF-8 sequence. When no term occurs in the body (a title-only
/// match, say) the window starts at the beginning.
///
/// ```
/// use docseek::generate_snippet;
///
/// let snippet = generate_snippet("The quick brown fox jumps", &["fox".to_string()]);
/// assert_eq!(snippet, "The quick brown fox jumps");
/// ```
pub fn generate_snippet(body: &str, matches: &[String]) -> String {
    if body.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = body.chars().collect();
    let anchor = first_match_offset(body, matches).unwrap_or(0);

    let start = anchor.saturating_sub(CONTEXT_BEFORE);
    let end = (anchor + CONTEXT_AFTER).min(chars.len());

    let mut snippet = String::with_capacity(end - start + 2 * ELLIPSIS.len());
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.extend(&chars[start..end]);
    if end < chars.len() {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}

/// Character offset in `body` of the earliest case-insensitive occurrence of
/// any term in `matches`.
fn first_match_offset(body: &str, matches: &[String]) -> Option<usize> {
    // Lowercasing can turn one character into several ('İ' → "i̇"), so keep
    // the original character index for every lowercased character.
    let mut lowered = String::with_capacity(body.len());
    let mut origin: Vec<usize> = Vec::with_capacity(body.len());
    for (char_idx, c) in body.chars().enumerate() {
        for lc in c.to_lowercase() {
            lowered.push(lc);
            origin.push(char_idx);
        }
    }

    matches
        .iter()
        .filter(|term| !term.is_empty())
        .filter_map(|term| lowered.find(&term.to_lowercase()))
        .min()
        .map(|byte_pos| origin[lowered[..byte_pos].chars().count()])
}
