// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers.
//!
//! `core` holds the BM25 arithmetic, `ranking` turns per-document totals into
//! an ordered, truncated candidate list.

mod core;
pub mod ranking;

pub use self::core::*;
