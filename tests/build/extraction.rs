//! Page extraction against the fixture site.

use crate::common::BUILD_FIXTURES_DIR;
use docseek::build::{load_page, load_pages, PageEntry, SiteManifest};
use docseek::{extract, Page, PageError, PageFormat, TitleSource};
use std::path::Path;

fn fixtures() -> &'static Path {
    Path::new(BUILD_FIXTURES_DIR)
}

fn entry(source: &str) -> PageEntry {
    PageEntry {
        source: source.to_string(),
        url: format!("/docs/{}", source),
        title: None,
    }
}

#[test]
fn test_markdown_front_matter_title() {
    let extraction = load_page(&fixtures().join("valid"), &entry("index.md")).unwrap();
    let doc = &extraction.document;

    assert_eq!(doc.title, "Welcome");
    assert_eq!(extraction.title_source, TitleSource::Embedded);
    assert_eq!(doc.headings, vec!["Getting Started", "Next steps"]);
    assert!(doc.body.starts_with("This site documents the widget toolkit."));
    assert!(!doc.body.contains("layout"));
    assert!(doc.code.is_empty());
}

#[test]
fn test_markdown_code_and_raw_html() {
    let extraction = load_page(&fixtures().join("valid"), &entry("guide/install.md")).unwrap();
    let doc = &extraction.document;

    assert_eq!(doc.title, "Installation");
    assert_eq!(extraction.title_source, TitleSource::FirstHeading);
    assert_eq!(doc.headings, vec!["Installation", "Verifying"]);
    assert_eq!(doc.code, vec!["curl -sSf https://example.com/install.sh | sh"]);
    // Inline code stays in the prose.
    assert!(doc.body.contains("widget --version"));
    // Raw HTML blocks are dropped.
    assert!(!doc.body.contains("Raw HTML"));
}

#[test]
fn test_html_page() {
    let extraction = load_page(&fixtures().join("valid"), &entry("guide/config.html")).unwrap();
    let doc = &extraction.document;

    assert_eq!(doc.title, "Configuration");
    assert_eq!(extraction.title_source, TitleSource::Embedded);
    assert_eq!(doc.headings, vec!["Configuration & Options", "Theme"]);
    assert_eq!(doc.code, vec!["theme = \"dark\""]);
    assert!(doc.body.contains("Set the limit to change how many results appear."));
    assert!(!doc.body.contains("color: red"));
    assert!(!doc.body.contains("var config"));
    assert!(!doc.body.contains("internal note"));
}

#[test]
fn test_manifest_title_overrides_page() {
    let dir = fixtures().join("valid");
    let manifest = SiteManifest::read(&dir).unwrap();
    let extraction = load_page(&dir, &manifest.pages[3]).unwrap();
    assert_eq!(extraction.document.title, "API Reference");
    assert_eq!(extraction.title_source, TitleSource::Explicit);
    assert_eq!(extraction.document.headings, vec!["Functions", "Types"]);
}

#[test]
fn test_missing_page_error() {
    let err = load_page(&fixtures().join("valid"), &entry("missing.md")).unwrap_err();
    assert!(matches!(err, PageError::Read { .. }));
}

#[test]
fn test_load_pages_counts_failures_and_fallbacks() {
    let dir = fixtures().join("valid");
    let manifest = SiteManifest::read(&dir).unwrap();
    let loaded = load_pages(&dir, &manifest);

    assert_eq!(loaded.documents.len(), 5);
    assert_eq!(loaded.failed, 1);
    assert_eq!(loaded.title_fallbacks, 1);

    let ids: Vec<&str> = loaded.documents.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["index.md", "guide/install.md", "guide/config.html", "reference.html", "missing.md"]
    );
    assert_eq!(loaded.documents[4].title, "Untitled");
    assert_eq!(loaded.documents[4].url, "/docs/missing.html");
}

#[test]
fn test_extract_in_memory_page() {
    let page = Page {
        id: "inline".into(),
        url: "/inline.html".into(),
        title: None,
        content: "<h2>Only &lt;h2&gt;</h2><p>Body&nbsp;text</p>".into(),
        format: PageFormat::Html,
    };
    let extraction = extract(&page).unwrap();
    assert_eq!(extraction.document.title, "Only <h2>");
    assert_eq!(extraction.document.body, "Body text");
}
