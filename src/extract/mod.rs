// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Page extraction: rendered page in, multi-field document out.
//!
//! Each format has its own parser that splits the page into an optional
//! embedded title, headings, prose and code. This module then picks the title
//! and assembles the [`SearchDocument`].
//!
//! Title resolution, first hit wins:
//!
//! 1. `Page::title`, when the site builder already knows it
//! 2. The page's own title (front matter `title:` or `<title>`)
//! 3. The first level-1 heading
//! 4. The first heading of any level
//! 5. [`PLACEHOLDER_TITLE`]
//!
//! Falling back is normal, not an error. The chosen source is reported so the
//! build can log it.

mod html;
mod markdown;

use std::path::Path;

use crate::error::ExtractError;
use crate::types::SearchDocument;

/// Title used when a page has no title and no headings.
pub const PLACEHOLDER_TITLE: &str = "Untitled";

/// Markup language of a page's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    Markdown,
    Html,
}

impl PageFormat {
    /// Infer the format from a file extension.
    ///
    /// `.md` and `.markdown` are Markdown, `.html` and `.htm` are HTML.
    /// Anything else is not a page.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "md" | "markdown" => Some(PageFormat::Markdown),
            "html" | "htm" => Some(PageFormat::Html),
            _ => None,
        }
    }
}

/// One page as handed over by the site builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Stable source identifier.
    pub id: String,
    /// Output-relative link.
    pub url: String,
    /// Explicit title, if the site builder has one.
    pub title: Option<String>,
    pub content: String,
    pub format: PageFormat,
}

/// Where a document's title came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSource {
    /// `Page::title`.
    Explicit,
    /// Front matter or `<title>`.
    Embedded,
    /// A heading in the page.
    FirstHeading,
    /// Nothing usable, [`PLACEHOLDER_TITLE`] was used.
    Placeholder,
}

/// The extracted document and how its title was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub document: SearchDocument,
    pub title_source: TitleSource,
}

/// What a format parser pulls out of a page.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct ParsedPage {
    pub embedded_title: Option<String>,
    /// (level, text) in document order.
    pub headings: Vec<(u8, String)>,
    pub body: String,
    pub code: Vec<String>,
}

/// Extract a searchable document from a rendered page.
///
/// ```
/// use docseek::{extract, Page, PageFormat, TitleSource};
///
/// let page = Page {
///     id: "intro.md".into(),
///     url: "/intro.html".into(),
///     title: None,
///     content: "# Welcome\n\nStart here.\n".into(),
///     format: PageFormat::Markdown,
/// };
/// let extraction = extract(&page).unwrap();
/// assert_eq!(extraction.document.title, "Welcome");
/// assert_eq!(extraction.title_source, TitleSource::FirstHeading);
/// ```
pub fn extract(page: &Page) -> Result<Extraction, ExtractError> {
    let parsed = match page.format {
        PageFormat::Markdown => markdown::parse(&page.content),
        PageFormat::Html => html::parse(&page.content).map_err(|reason| ExtractError::Malformed {
            id: page.id.clone(),
            reason,
        })?,
    };

    let (title, title_source) = resolve_title(page.title.as_deref(), &parsed);
    if title_source != TitleSource::Explicit {
        tracing::debug!(id = %page.id, ?title_source, title = %title, "title fallback");
    }

    Ok(Extraction {
        document: SearchDocument {
            id: page.id.clone(),
            title,
            url: page.url.clone(),
            body: parsed.body,
            headings: parsed.headings.into_iter().map(|(_, text)| text).collect(),
            code: parsed.code,
        },
        title_source,
    })
}

fn resolve_title(explicit: Option<&str>, parsed: &ParsedPage) -> (String, TitleSource) {
    let non_empty = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };

    if let Some(title) = explicit.and_then(non_empty) {
        return (title, TitleSource::Explicit);
    }
    if let Some(title) = parsed.embedded_title.as_deref().and_then(non_empty) {
        return (title, TitleSource::Embedded);
    }
    let h1 = parsed.headings.iter().find(|(level, _)| *level == 1);
    if let Some(title) = h1.or(parsed.headings.first()).and_then(|(_, text)| non_empty(text)) {
        return (title, TitleSource::FirstHeading);
    }
    (PLACEHOLDER_TITLE.to_string(), TitleSource::Placeholder)
}

/// Collapse runs of whitespace to single spaces and trim the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
