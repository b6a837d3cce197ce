//! The `docseek index` pipeline: manifest in, index file out.
//!
//! 1. Read `manifest.json` from the input directory
//! 2. Load and extract every listed page (in parallel with `parallel`)
//! 3. Build the index, sequentially, in manifest order
//! 4. Write `search-index.bin` (and `search-index.json` on request)
//!
//! Only a missing or invalid manifest, or an unwritable output directory,
//! stops the build. Broken pages become placeholders.

pub mod manifest;
pub mod parallel;

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::binary;
use crate::config::{INDEX_FILE_NAME, INDEX_JSON_FILE_NAME};
use crate::error::BuildError;
use crate::index::build_index;

pub use manifest::{PageEntry, SiteManifest, MANIFEST_FILE_NAME};
pub use parallel::{load_page, load_pages, LoadedPages};

/// What a build did.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    /// False when the manifest disables search; nothing was written.
    pub enabled: bool,
    pub documents: usize,
    pub terms: usize,
    pub postings: usize,
    /// Pages that could not be loaded and were replaced by placeholders.
    pub failed_pages: usize,
    /// Pages whose title came from a heading or the placeholder.
    pub title_fallbacks: usize,
    pub index_path: Option<PathBuf>,
    pub index_bytes: usize,
    pub json_path: Option<PathBuf>,
    /// UI settings for the site builder to inline into pages.
    pub client_config: serde_json::Value,
}

/// Create a progress style for the main progress bars
#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .map(|style| style.progress_chars("━━╸"))
    .unwrap_or_else(|_| ProgressStyle::default_bar())
}

pub fn run_build(
    input_dir: &Path,
    output_dir: &Path,
    emit_json: bool,
) -> Result<BuildSummary, BuildError> {
    // 1. Read manifest
    let manifest = SiteManifest::read(input_dir)?;
    let client_config = manifest.search.client_json(&manifest.base);

    if !manifest.search.enabled {
        tracing::info!(input = %input_dir.display(), "search disabled in manifest, no index written");
        return Ok(BuildSummary {
            enabled: false,
            documents: 0,
            terms: 0,
            postings: 0,
            failed_pages: 0,
            title_fallbacks: 0,
            index_path: None,
            index_bytes: 0,
            json_path: None,
            client_config,
        });
    }

    // 2. Load pages
    #[cfg(feature = "parallel")]
    let loaded = {
        let multi = MultiProgress::new();
        let load_pb = multi.add(ProgressBar::new(manifest.pages.len() as u64));
        load_pb.set_style(create_progress_style());
        load_pb.set_prefix("Loading");
        load_pb.set_message("pages...");

        let loaded = parallel::load_pages_with_progress(input_dir, &manifest, &load_pb);
        load_pb.finish_with_message(format!("loaded {} pages", loaded.documents.len()));
        loaded
    };

    #[cfg(not(feature = "parallel"))]
    let loaded = parallel::load_pages(input_dir, &manifest);

    let failed_pages = loaded.failed;
    let title_fallbacks = loaded.title_fallbacks;

    // 3. Build
    let index = build_index(loaded.documents);
    let bytes = binary::serialize(&index)?;

    // 4. Write
    fs::create_dir_all(output_dir).map_err(|source| BuildError::CreateOutput {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let index_path = output_dir.join(INDEX_FILE_NAME);
    write_file(&index_path, &bytes)?;

    let json_path = if emit_json {
        let json = index.to_json().map_err(BuildError::EncodeJson)?;
        let path = output_dir.join(INDEX_JSON_FILE_NAME);
        write_file(&path, json.as_bytes())?;
        Some(path)
    } else {
        None
    };

    let summary = BuildSummary {
        enabled: true,
        documents: index.doc_count,
        terms: index.term_count(),
        postings: index.posting_count(),
        failed_pages,
        title_fallbacks,
        index_path: Some(index_path),
        index_bytes: bytes.len(),
        json_path,
        client_config,
    };

    tracing::info!(
        documents = summary.documents,
        terms = summary.terms,
        bytes = summary.index_bytes,
        failed_pages = summary.failed_pages,
        "index written"
    );

    Ok(summary)
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), BuildError> {
    fs::write(path, contents).map_err(|source| BuildError::WriteIndex {
        path: path.to_path_buf(),
        source,
    })
}
