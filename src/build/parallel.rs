// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel page loading and extraction.
//!
//! Reading a page from disk and stripping its markup is independent per page,
//! so with the `parallel` feature it runs on rayon's pool. The index itself is
//! built afterwards, sequentially, from documents in manifest order: rayon's
//! indexed `collect` keeps input order, so no re-sort is needed.
//!
//! A page that cannot be read or extracted is not fatal. It becomes a
//! placeholder document (title "Untitled", empty body) and is counted.

use std::fs;
use std::path::{Component, Path};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::PageError;
use crate::extract::{extract, Extraction, Page, PageFormat, TitleSource};
use crate::types::SearchDocument;

use super::manifest::{PageEntry, SiteManifest};

/// Documents ready for indexing, in manifest order.
#[derive(Debug, Default)]
pub struct LoadedPages {
    pub documents: Vec<SearchDocument>,
    /// Pages replaced by a placeholder.
    pub failed: usize,
    /// Pages whose title came from a fallback rather than the page itself.
    pub title_fallbacks: usize,
}

enum Outcome {
    Loaded(Extraction),
    Failed(SearchDocument),
}

/// Read and extract one page.
pub fn load_page(input_dir: &Path, entry: &PageEntry) -> Result<Extraction, PageError> {
    if !is_plain_relative(&entry.source) {
        return Err(PageError::OutsideInput {
            page: entry.source.clone(),
        });
    }
    let path = input_dir.join(&entry.source);
    let format = PageFormat::from_path(&path).ok_or_else(|| PageError::UnknownFormat {
        path: path.clone(),
    })?;
    let content = fs::read_to_string(&path).map_err(|source| PageError::Read {
        path: path.clone(),
        source,
    })?;

    let page = Page {
        id: entry.source.clone(),
        url: entry.url.clone(),
        title: entry.title.clone(),
        content,
        format,
    };
    Ok(extract(&page)?)
}

/// Only plain relative paths stay inside the input directory: no root, no
/// drive prefix, no `..`.
fn is_plain_relative(source: &str) -> bool {
    !source.is_empty()
        && Path::new(source)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn load_or_placeholder(input_dir: &Path, entry: &PageEntry) -> Outcome {
    match load_page(input_dir, entry) {
        Ok(extraction) => Outcome::Loaded(extraction),
        Err(err) => {
            tracing::warn!(page = %entry.source, error = %err, "page replaced by placeholder");
            let mut doc = SearchDocument::placeholder(entry.source.clone(), entry.url.clone());
            if let Some(title) = entry.title.as_deref().filter(|t| !t.trim().is_empty()) {
                doc.title = title.trim().to_string();
            }
            Outcome::Failed(doc)
        }
    }
}

fn tally(outcomes: Vec<Outcome>) -> LoadedPages {
    let mut loaded = LoadedPages {
        documents: Vec::with_capacity(outcomes.len()),
        ..LoadedPages::default()
    };
    for outcome in outcomes {
        match outcome {
            Outcome::Loaded(extraction) => {
                if matches!(
                    extraction.title_source,
                    TitleSource::FirstHeading | TitleSource::Placeholder
                ) {
                    loaded.title_fallbacks += 1;
                }
                loaded.documents.push(extraction.document);
            }
            Outcome::Failed(doc) => {
                loaded.failed += 1;
                loaded.documents.push(doc);
            }
        }
    }
    loaded
}

/// Load every page in the manifest.
#[cfg(feature = "parallel")]
pub fn load_pages(input_dir: &Path, manifest: &SiteManifest) -> LoadedPages {
    let outcomes = manifest
        .pages
        .par_iter()
        .map(|entry| load_or_placeholder(input_dir, entry))
        .collect();
    tally(outcomes)
}

/// Load every page in the manifest.
#[cfg(not(feature = "parallel"))]
pub fn load_pages(input_dir: &Path, manifest: &SiteManifest) -> LoadedPages {
    let outcomes = manifest
        .pages
        .iter()
        .map(|entry| load_or_placeholder(input_dir, entry))
        .collect();
    tally(outcomes)
}

/// Load every page in the manifest, advancing `progress` as pages finish.
#[cfg(feature = "parallel")]
pub fn load_pages_with_progress(
    input_dir: &Path,
    manifest: &SiteManifest,
    progress: &ProgressBar,
) -> LoadedPages {
    let counter = AtomicUsize::new(0);
    let total = manifest.pages.len();

    let outcomes = manifest
        .pages
        .par_iter()
        .map(|entry| {
            let outcome = load_or_placeholder(input_dir, entry);

            let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
            progress.set_position(count as u64);
            if count % 10 == 0 || count == total {
                progress.set_message(format!("{}/{}", count, total));
            }
            outcome
        })
        .collect();
    tally(outcomes)
}
