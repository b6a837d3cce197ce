// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Page extraction on arbitrary Markdown and HTML.
//!
//! Rendered pages come from whatever the site builder produced. Extraction
//! may reject a page but must never panic on it.

#![no_main]

use arbitrary::Arbitrary;
use docseek::{extract, Page, PageFormat};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    html: bool,
    title: Option<String>,
    content: String,
}

fuzz_target!(|input: Input| {
    let page = Page {
        id: "fuzz".to_string(),
        url: "/fuzz.html".to_string(),
        title: input.title,
        content: input.content,
        format: if input.html {
            PageFormat::Html
        } else {
            PageFormat::Markdown
        },
    };

    if let Ok(extraction) = extract(&page) {
        let doc = extraction.document;
        assert!(!doc.title.trim().is_empty());
        assert_eq!(doc.body, doc.body.split_whitespace().collect::<Vec<_>>().join(" "));
    }
});
