// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lazy, single-flight index loading for the query side.
//!
//! An [`IndexHandle`] owns a source and a once-cell. The first caller to
//! need the index triggers the fetch; everyone who arrives while it is in
//! flight awaits the same fetch. The outcome is cached for the life of the
//! handle, failure included: a missing or corrupt index turns search into a
//! no-op instead of refetching on every keystroke.
//!
//! There is no global. Whoever needs an index holds a handle, and tests make
//! a fresh one each.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::binary::decode_index;
use crate::error::LoadError;
use crate::search::{search_with_options, SearchOptions};
use crate::types::{SearchIndex, SearchResult};

/// Where index bytes come from.
pub trait IndexSource: Send + Sync {
    /// Fetch the raw index bytes, binary or JSON.
    fn fetch(&self) -> impl Future<Output = Result<Vec<u8>, LoadError>> + Send;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// Reads the index from a file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl IndexSource for FileSource {
    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves index bytes already in memory.
#[derive(Debug, Clone)]
pub struct BytesSource {
    bytes: Arc<[u8]>,
}

impl BytesSource {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl IndexSource for BytesSource {
    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        Ok(self.bytes.to_vec())
    }

    fn describe(&self) -> String {
        format!("<{} bytes in memory>", self.bytes.len())
    }
}

type LoadOutcome = Result<Arc<SearchIndex>, Arc<LoadError>>;

/// A lazily loaded, shareable index.
pub struct IndexHandle<S> {
    source: S,
    cell: OnceCell<LoadOutcome>,
}

impl<S: fmt::Debug> fmt::Debug for IndexHandle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexHandle")
            .field("source", &self.source)
            .field("loaded", &self.cell.initialized())
            .finish()
    }
}

impl<S: IndexSource> IndexHandle<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
        }
    }

    /// A handle that is already loaded, for callers that built the index
    /// in-process.
    pub fn from_index(source: S, index: SearchIndex) -> Self {
        Self {
            source,
            cell: OnceCell::new_with(Some(Ok(Arc::new(index)))),
        }
    }

    /// Load the index, or return the outcome of the load that already ran.
    ///
    /// Concurrent callers share one fetch. A failure is logged once, when it
    /// happens, and returned to every later caller.
    pub async fn load(&self) -> Result<Arc<SearchIndex>, Arc<LoadError>> {
        self.cell
            .get_or_init(|| async {
                let loaded = self
                    .source
                    .fetch()
                    .await
                    .and_then(|bytes| decode_index(&bytes));
                match loaded {
                    Ok(index) => {
                        tracing::debug!(
                            source = %self.source.describe(),
                            documents = index.doc_count,
                            terms = index.term_count(),
                            "index loaded"
                        );
                        Ok(Arc::new(index))
                    }
                    Err(err) => {
                        tracing::warn!(
                            source = %self.source.describe(),
                            error = %err,
                            "search index unavailable, search disabled"
                        );
                        Err(Arc::new(err))
                    }
                }
            })
            .await
            .clone()
    }

    /// The loaded index, if a load has finished successfully.
    pub fn get(&self) -> Option<Arc<SearchIndex>> {
        self.cell.get().and_then(|outcome| outcome.as_ref().ok().cloned())
    }

    /// Has a load finished, successfully or not?
    pub fn is_settled(&self) -> bool {
        self.cell.initialized()
    }

    /// Search, loading first if needed. An unavailable index gives no results.
    pub async fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        match self.load().await {
            Ok(index) => search_with_options(&index, query, options),
            Err(_) => Vec::new(),
        }
    }
}
