// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the docseek command-line interface.
//!
//! Three subcommands: `index` builds `search-index.bin` from a site manifest,
//! `inspect` prints the layout of an index file, and `search` runs a query
//! against one through the same lazy loader a client uses.

pub mod display;
pub mod logging;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "docseek",
    about = "BM25 full-text search index builder for static documentation sites",
    version
)]
pub struct Cli {
    /// Log build and load details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a search index from a directory with manifest.json and rendered pages
    Index {
        /// Input directory containing manifest.json and page files
        #[arg(short, long)]
        input: String,

        /// Output directory for search-index.bin
        #[arg(short, long)]
        output: String,

        /// Also write search-index.json (same content, for debugging)
        #[arg(long)]
        json: bool,
    },

    /// Inspect a search-index.bin file structure
    Inspect {
        /// Path to index file
        file: String,
    },

    /// Search an index file and display results
    Search {
        /// Path to index file (binary or JSON)
        file: String,

        /// Search query
        query: String,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Match the last query word exactly instead of as a prefix
        #[arg(long)]
        no_prefix: bool,
    },
}
