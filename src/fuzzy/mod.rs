// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy matching: edit distance over raw bytes.
//!
//! Two entry points here: an exact Levenshtein distance for the tree (which
//! needs the true value to prune), and a bounded check that gives up early,
//! used by the linear scan baseline.

mod levenshtein;
mod scan;

pub use levenshtein::*;
pub use scan::scan;
