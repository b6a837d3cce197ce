//! End-to-end tests for the build workflow.

use crate::common::{assert_index_well_formed, BUILD_FIXTURES_DIR};
use docseek::build::run_build;
use docseek::{binary, search, BuildError, SearchIndex, INDEX_FILE_NAME, INDEX_JSON_FILE_NAME};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn valid_input() -> PathBuf {
    Path::new(BUILD_FIXTURES_DIR).join("valid")
}

#[test]
fn test_run_build_e2e_basic() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output");

    let summary = run_build(&valid_input(), &output_path, false).unwrap();

    assert!(summary.enabled);
    assert_eq!(summary.documents, 5);
    assert_eq!(summary.failed_pages, 1);
    assert_eq!(summary.title_fallbacks, 1);
    assert!(output_path.join(INDEX_FILE_NAME).exists());
    assert!(!output_path.join(INDEX_JSON_FILE_NAME).exists());
    assert_eq!(summary.index_path.as_deref(), Some(output_path.join(INDEX_FILE_NAME).as_path()));

    let bytes = fs::read(output_path.join(INDEX_FILE_NAME)).unwrap();
    assert_eq!(bytes.len(), summary.index_bytes);
    assert_eq!(&bytes[..4], b"DSEK");

    let index = binary::deserialize(&bytes).unwrap();
    assert_index_well_formed(&index);
    assert_eq!(index.term_count(), summary.terms);
    assert_eq!(index.posting_count(), summary.postings);
}

#[test]
fn test_run_build_e2e_search_results() {
    let temp_dir = TempDir::new().unwrap();
    run_build(&valid_input(), temp_dir.path(), false).unwrap();
    let index = binary::deserialize(&fs::read(temp_dir.path().join(INDEX_FILE_NAME)).unwrap()).unwrap();

    let results = search(&index, "installation", 10);
    assert_eq!(results[0].url, "/docs/guide/install.html");

    let results = search(&index, "theme", 10);
    assert_eq!(results[0].title, "Configuration");

    // Script contents never reach the index.
    assert!(search(&index, "var", 10).is_empty());

    // Failed pages are still findable by their placeholder title.
    let results = search(&index, "untitled", 10);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "missing.md");
}

#[test]
fn test_run_build_e2e_with_json() {
    let temp_dir = TempDir::new().unwrap();
    let summary = run_build(&valid_input(), temp_dir.path(), true).unwrap();

    let json_path = temp_dir.path().join(INDEX_JSON_FILE_NAME);
    assert_eq!(summary.json_path.as_deref(), Some(json_path.as_path()));

    let from_json = SearchIndex::from_json(&fs::read_to_string(&json_path).unwrap()).unwrap();
    let from_binary =
        binary::deserialize(&fs::read(temp_dir.path().join(INDEX_FILE_NAME)).unwrap()).unwrap();
    assert_eq!(from_json, from_binary);
}

#[test]
fn test_run_build_e2e_client_config() {
    let temp_dir = TempDir::new().unwrap();
    let summary = run_build(&valid_input(), temp_dir.path(), false).unwrap();

    let config = &summary.client_config;
    assert_eq!(config["indexUrl"], "/docs/search-index.bin");
    assert_eq!(config["limit"], 8);
    assert_eq!(config["placeholder"], "Search the docs...");
    assert_eq!(config["prefix"], true);
}

#[test]
fn test_run_build_e2e_is_deterministic() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    run_build(&valid_input(), a.path(), false).unwrap();
    run_build(&valid_input(), b.path(), false).unwrap();
    assert_eq!(
        fs::read(a.path().join(INDEX_FILE_NAME)).unwrap(),
        fs::read(b.path().join(INDEX_FILE_NAME)).unwrap()
    );
}

#[test]
fn test_run_build_e2e_missing_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output");

    let err = run_build(temp_dir.path(), &output_path, false).unwrap_err();

    assert!(matches!(err, BuildError::ReadManifest { .. }));
    assert!(!output_path.exists(), "nothing should be written");
}

#[test]
fn test_run_build_e2e_invalid_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let input = Path::new(BUILD_FIXTURES_DIR).join("invalid-manifest");
    let err = run_build(&input, temp_dir.path(), false).unwrap_err();
    assert!(matches!(err, BuildError::InvalidManifest { .. }));
}

#[test]
fn test_run_build_e2e_disabled() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output");
    let input = Path::new(BUILD_FIXTURES_DIR).join("disabled");

    let summary = run_build(&input, &output_path, true).unwrap();
    assert!(!summary.enabled);
    assert!(summary.index_path.is_none());
    assert!(summary.json_path.is_none());
    assert!(!output_path.exists());
}

#[test]
fn test_run_build_e2e_unwritable_output() {
    let temp_dir = TempDir::new().unwrap();
    // A file where the output directory should be.
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, b"not a directory").unwrap();

    let err = run_build(&valid_input(), &blocker, false).unwrap_err();
    assert!(matches!(err, BuildError::CreateOutput { .. }));
}
