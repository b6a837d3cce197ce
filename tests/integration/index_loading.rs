//! Lazy, single-flight index loading.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::common::sample_index;
use docseek::binary::serialize;
use docseek::{FileSource, IndexHandle, IndexSource, LoadError, SearchOptions};
use tempfile::TempDir;

/// Serves fixed bytes after a delay and counts how often it was asked.
#[derive(Debug, Clone)]
struct CountingSource {
    bytes: Arc<Vec<u8>>,
    fetches: Arc<AtomicUsize>,
    delay: Duration,
}

impl CountingSource {
    fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Arc::new(bytes),
            fetches: Arc::new(AtomicUsize::new(0)),
            delay: Duration::from_millis(20),
        }
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl IndexSource for CountingSource {
    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(self.bytes.as_ref().clone())
    }

    fn describe(&self) -> String {
        "counting source".to_string()
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_searches_share_one_fetch() {
    let source = CountingSource::new(serialize(&sample_index()).unwrap());
    let handle = Arc::new(IndexHandle::new(source.clone()));

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let handle = Arc::clone(&handle);
            tokio::spawn(async move { handle.search("install", &SearchOptions::default()).await })
        })
        .collect();

    for task in tasks {
        let results = task.await.unwrap();
        assert_eq!(results[0].id, "guide/install");
    }
    assert_eq!(source.fetches(), 1);
}

#[tokio::test]
async fn test_later_searches_reuse_loaded_index() {
    let source = CountingSource::new(serialize(&sample_index()).unwrap());
    let handle = IndexHandle::new(source.clone());

    for query in ["install", "search", "config", "nothing-here"] {
        handle.search(query, &SearchOptions::default()).await;
    }
    assert_eq!(source.fetches(), 1);
}

#[tokio::test]
async fn test_empty_query_does_not_trigger_load() {
    let source = CountingSource::new(serialize(&sample_index()).unwrap());
    let handle = IndexHandle::new(source.clone());

    assert!(handle.search("   ", &SearchOptions::default()).await.is_empty());
    assert_eq!(source.fetches(), 0);
    assert!(!handle.is_settled());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_failed_load_is_cached() {
    let source = CountingSource::new(b"DSEK but not really an index".to_vec());
    let handle = Arc::new(IndexHandle::new(source.clone()));

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let handle = Arc::clone(&handle);
            tokio::spawn(async move { handle.search("install", &SearchOptions::default()).await })
        })
        .collect();
    for task in tasks {
        assert!(task.await.unwrap().is_empty());
    }

    assert!(handle.is_settled());
    assert!(handle.get().is_none());
    assert!(handle.load().await.is_err());
    assert_eq!(source.fetches(), 1);
}

#[tokio::test]
async fn test_file_source_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("search-index.bin");
    std::fs::write(&path, serialize(&sample_index()).unwrap()).unwrap();

    let handle = IndexHandle::new(FileSource::new(&path));
    let index = handle.load().await.unwrap();
    assert_eq!(*index, sample_index());

    let options = SearchOptions {
        limit: 1,
        ..SearchOptions::default()
    };
    assert_eq!(handle.search("search", &options).await.len(), 1);
}

#[tokio::test]
async fn test_missing_file_disables_search() {
    let dir = TempDir::new().unwrap();
    let handle = IndexHandle::new(FileSource::new(dir.path().join("absent.bin")));

    assert!(handle.search("install", &SearchOptions::default()).await.is_empty());
    let err = handle.load().await.unwrap_err();
    assert!(matches!(*err, LoadError::Io { .. }));
}
