// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! HTML pages, scanned tag by tag.
//!
//! This is not an HTML parser. Rendered doc pages are well-formed output of a
//! static-site generator, so a linear scan that tracks which element the text
//! is inside is enough: `<title>`, `<h1>`..`<h6>`, `<pre>`, and everything
//! else. `<script>` and `<style>` bodies are skipped unread.

use super::{collapse_whitespace, ParsedPage};

/// Inline elements whose boundaries do not separate words.
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "cite", "code", "data", "dfn", "em", "i", "kbd", "mark", "q",
    "s", "samp", "small", "span", "strong", "sub", "sup", "time", "u", "var",
];

/// Which sink text currently flows into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sink {
    Body,
    Title,
    Heading(u8),
    Pre,
}

struct Scanner {
    sink: Sink,
    title: String,
    buffer: String,
    body: String,
    headings: Vec<(u8, String)>,
    code: Vec<String>,
    /// Nested `<pre>` depth.
    pre_depth: usize,
}

impl Scanner {
    fn new() -> Self {
        Self {
            sink: Sink::Body,
            title: String::new(),
            buffer: String::new(),
            body: String::new(),
            headings: Vec::new(),
            code: Vec::new(),
            pre_depth: 0,
        }
    }

    fn text(&mut self, raw: &str) {
        let decoded = decode_entities(raw);
        match self.sink {
            Sink::Body => self.body.push_str(&decoded),
            Sink::Title => self.title.push_str(&decoded),
            Sink::Heading(_) | Sink::Pre => self.buffer.push_str(&decoded),
        }
    }

    fn open(&mut self, name: &str) {
        match (self.sink, name) {
            (Sink::Body, "title") => self.sink = Sink::Title,
            (Sink::Body, _) if is_heading(name) => {
                self.sink = Sink::Heading(name.as_bytes()[1] - b'0');
                self.buffer.clear();
            }
            (Sink::Body, "pre") => {
                self.sink = Sink::Pre;
                self.pre_depth = 1;
                self.buffer.clear();
            }
            (Sink::Pre, "pre") => self.pre_depth += 1,
            (Sink::Body, "br") => self.body.push(' '),
            (Sink::Heading(_), "br") => self.buffer.push(' '),
            (Sink::Pre, "br") => self.buffer.push('\n'),
            (Sink::Body, _) if !INLINE_TAGS.contains(&name) => self.body.push(' '),
            _ => {}
        }
    }

    fn close(&mut self, name: &str) {
        match (self.sink, name) {
            (Sink::Title, "title") => self.sink = Sink::Body,
            (Sink::Heading(level), _) if is_heading(name) => {
                let text = collapse_whitespace(&self.buffer);
                if !text.is_empty() {
                    self.headings.push((level, text));
                }
                self.buffer.clear();
                self.sink = Sink::Body;
                self.body.push(' ');
            }
            (Sink::Pre, "pre") => {
                self.pre_depth -= 1;
                if self.pre_depth == 0 {
                    let code = self.buffer.trim_matches('\n').trim_end();
                    if !code.is_empty() {
                        self.code.push(code.to_string());
                    }
                    self.buffer.clear();
                    self.sink = Sink::Body;
                    self.body.push(' ');
                }
            }
            (Sink::Body, _) if !INLINE_TAGS.contains(&name) => self.body.push(' '),
            _ => {}
        }
    }

    fn finish(self) -> Result<ParsedPage, String> {
        match self.sink {
            Sink::Body => {}
            Sink::Title => return Err("unterminated <title> element".to_string()),
            Sink::Heading(level) => return Err(format!("unterminated <h{}> element", level)),
            Sink::Pre => return Err("unterminated <pre> element".to_string()),
        }

        let title = collapse_whitespace(&self.title);
        Ok(ParsedPage {
            embedded_title: (!title.is_empty()).then_some(title),
            headings: self.headings,
            body: collapse_whitespace(&self.body),
            code: self.code,
        })
    }
}

/// Split an HTML page into title, headings, prose and code.
///
/// Fails on an unterminated tag or comment, and on a `<title>`, heading, `<pre>`,
/// `<script>` or `<style>` element that is never closed.
pub(super) fn parse(content: &str) -> Result<ParsedPage, String> {
    let mut scanner = Scanner::new();
    let mut rest = content;

    while let Some(lt) = rest.find('<') {
        scanner.text(&rest[..lt]);
        rest = &rest[lt..];

        // A bare '<' in text, like "1 < 2".
        if !starts_tag(&rest[1..]) {
            scanner.text("<");
            rest = &rest[1..];
            continue;
        }

        if let Some(after) = rest.strip_prefix("<!--") {
            let end = after
                .find("-->")
                .ok_or_else(|| "unterminated comment".to_string())?;
            rest = &after[end + 3..];
            continue;
        }

        let end = tag_end(rest).ok_or_else(|| {
            format!("unterminated tag starting '{}'", rest.chars().take(20).collect::<String>())
        })?;
        let tag = &rest[1..end];
        rest = &rest[end + 1..];

        // <!DOCTYPE ...>, <?xml ...?>
        if tag.starts_with('!') || tag.starts_with('?') {
            continue;
        }

        let (closing, name) = match tag.strip_prefix('/') {
            Some(name) => (true, tag_name(name)),
            None => (false, tag_name(tag)),
        };
        if closing {
            scanner.close(&name);
            continue;
        }

        if (name == "script" || name == "style") && !tag.ends_with('/') {
            rest = skip_raw_text(rest, &name)?;
            continue;
        }
        scanner.open(&name);
    }
    scanner.text(rest);

    scanner.finish()
}

/// Does the text right after a '<' open a tag, closing tag, comment or
/// declaration?
fn starts_tag(after_lt: &str) -> bool {
    let mut chars = after_lt.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => true,
        Some('/') => chars.next().is_some_and(|c| c.is_ascii_alphabetic()),
        Some('!' | '?') => true,
        _ => false,
    }
}

fn is_heading(name: &str) -> bool {
    matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// Byte offset of the `>` that closes the tag at the start of `s`, skipping
/// quoted attribute values.
fn tag_end(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices().skip(1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            _ => {}
        }
    }
    None
}

fn tag_name(tag: &str) -> String {
    tag.chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Skip past `</name>` for raw-text elements whose content is never markup.
fn skip_raw_text<'a>(rest: &'a str, name: &str) -> Result<&'a str, String> {
    let closing = format!("</{}", name);
    let lower = rest.to_ascii_lowercase();
    let start = lower
        .find(&closing)
        .ok_or_else(|| format!("unterminated <{}> element", name))?;
    let after = &rest[start..];
    let end = after
        .find('>')
        .ok_or_else(|| format!("unterminated </{}> tag", name))?;
    Ok(&after[end + 1..])
}

/// Decode the handful of entities doc generators actually emit.
///
/// Unknown entities are left as written.
pub(crate) fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&rest[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        "copy" => Some('©'),
        "reg" => Some('®'),
        "trade" => Some('™'),
        "ndash" => Some('–'),
        "mdash" => Some('—'),
        "hellip" => Some('…'),
        "lsquo" => Some('‘'),
        "rsquo" => Some('’'),
        "ldquo" => Some('“'),
        "rdquo" => Some('”'),
        "laquo" => Some('«'),
        "raquo" => Some('»'),
        "middot" => Some('·'),
        "bull" => Some('•'),
        "times" => Some('×'),
        "deg" => Some('°'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}
