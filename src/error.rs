// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types, one enum per stage.
//!
//! None of these are allowed to escape to the person typing in the search box.
//! Extraction errors turn into placeholder documents, load errors turn into
//! empty result lists. Only whole-build failures (no manifest, unwritable
//! output directory) stop anything.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A single page could not be turned into a document.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("malformed page '{id}': {reason}")]
    Malformed { id: String, reason: String },
}

/// One page could not be loaded. The build recovers with a placeholder.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("page source escapes the input directory: {page}")]
    OutsideInput { page: String },

    #[error("unsupported page format: {}", path.display())]
    UnknownFormat { path: PathBuf },

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// A whole build could not proceed.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to read manifest {}: {source}", path.display())]
    ReadManifest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid manifest JSON in {}: {source}", path.display())]
    InvalidManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to create output dir {}: {source}", path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    WriteIndex {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode index: {0}")]
    Encode(#[from] FormatError),

    #[error("failed to encode index JSON: {0}")]
    EncodeJson(#[source] serde_json::Error),
}

/// The binary index bytes are not a valid index.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("file too small ({size} bytes, minimum {min})")]
    TooSmall { size: usize, min: usize },

    #[error("{what} {value} exceeds limit {limit}")]
    TooLarge {
        what: &'static str,
        value: usize,
        limit: usize,
    },

    #[error("invalid magic bytes: expected {expected:?}, got {found:?}")]
    BadMagic { expected: [u8; 4], found: [u8; 4] },

    #[error("unsupported format version {found} (expected {expected})")]
    UnsupportedVersion { found: u8, expected: u8 },

    #[error("CRC32 mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("truncated {0}")]
    Truncated(&'static str),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// The query side could not obtain a usable index.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch index from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corrupt index: {0}")]
    Format(#[from] FormatError),

    #[error("invalid index JSON: {0}")]
    Json(#[from] serde_json::Error),
}
