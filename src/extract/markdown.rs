// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Markdown pages, parsed with comrak and walked once.

use comrak::{
    nodes::{AstNode, NodeValue},
    parse_document, Arena, Options,
};

use super::{collapse_whitespace, ParsedPage};

/// Split a Markdown page into title, headings, prose and code.
///
/// Markdown has no malformed input; anything comrak does not recognize is
/// plain text.
pub(super) fn parse(content: &str) -> ParsedPage {
    let (front_title, markdown) = split_front_matter(content);

    let arena = Arena::new();
    let root = parse_document(&arena, markdown, &Options::default());

    let mut parts = Parts::default();
    walk(root, &mut parts);

    ParsedPage {
        embedded_title: front_title,
        headings: parts.headings,
        body: collapse_whitespace(&parts.body),
        code: parts.code,
    }
}

#[derive(Default)]
struct Parts {
    headings: Vec<(u8, String)>,
    body: String,
    code: Vec<String>,
}

fn walk<'a>(node: &'a AstNode<'a>, parts: &mut Parts) {
    match &node.data.borrow().value {
        NodeValue::Heading(heading) => {
            let text = collapse_whitespace(&inline_text(node));
            if !text.is_empty() {
                parts.headings.push((heading.level, text));
            }
            return;
        }
        NodeValue::CodeBlock(block) => {
            let code = block.literal.trim_end();
            if !code.is_empty() {
                parts.code.push(code.to_string());
            }
            return;
        }
        NodeValue::HtmlBlock(_) | NodeValue::HtmlInline(_) => return,
        NodeValue::Text(value) => parts.body.push_str(value),
        NodeValue::Code(value) => parts.body.push_str(&value.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => parts.body.push(' '),
        value if value.block() => parts.body.push(' '),
        _ => {}
    }

    for child in node.children() {
        walk(child, parts);
    }
}

fn inline_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    for child in node.children() {
        push_inline(child, &mut out);
    }
    out
}

fn push_inline<'a>(node: &'a AstNode<'a>, out: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(value) => out.push_str(value),
        NodeValue::Code(value) => out.push_str(&value.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => out.push(' '),
        NodeValue::HtmlInline(_) => {}
        _ => {
            for child in node.children() {
                push_inline(child, out);
            }
        }
    }
}

/// Strip a leading `---` YAML block and pull `title:` out of it.
///
/// An opening fence with no closing fence is not front matter; the whole page
/// is Markdown.
fn split_front_matter(content: &str) -> (Option<String>, &str) {
    let rest = match content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    {
        Some(rest) => rest,
        None => return (None, content),
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            return (front_matter_title(yaml), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }
    (None, content)
}

fn front_matter_title(yaml: &str) -> Option<String> {
    yaml.lines().find_map(|line| {
        let value = line.strip_prefix("title:")?.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
            .unwrap_or(value);
        (!value.is_empty()).then(|| value.to_string())
    })
}
