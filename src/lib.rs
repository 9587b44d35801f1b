// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Approximate string lookup with BK-trees over Levenshtein distance.
//!
//! A [`BkTree`] stores a vocabulary so that "every term within `k` edits of
//! this query" can be answered without comparing the query against every
//! term. Trees are built once (usually offline), saved to a compact binary
//! file, and loaded by whatever needs to query them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  fuzzy/     │────▶│  tree/       │────▶│  binary/     │
//! │ (distance,  │     │ (insert,     │     │ (save, load, │
//! │  scan)      │     │  search,     │     │  BKTREE1)    │
//! └─────────────┘     │  index form) │     └──────────────┘
//!                     └──────────────┘
//!        │                   │                    │
//!        ▼                   ▼                    ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                      verify/                         │
//! │  (check_invariants, debug-build result contracts)   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! `terms` and `build` turn vocabulary files into trees, `batch` fans many
//! queries out over a shared tree. `bench` times tree search against a linear
//! scan.
//!
//! # Usage
//!
//! ```
//! use bkmatch::BkTree;
//!
//! let tree: BkTree = ["book", "books", "cake", "boo", "cape", "cart"].into_iter().collect();
//!
//! let bytes = tree.to_bytes().unwrap();
//! let loaded = BkTree::from_bytes(&bytes).unwrap();
//!
//! let hits: Vec<_> = loaded.search("caqe", 1).iter().map(|m| m.to_owned_pair()).collect();
//! assert_eq!(hits, vec![("cake".to_string(), 1), ("cape".to_string(), 1)]);
//! ```

pub mod batch;
pub mod bench;
pub mod binary;
pub mod build;
mod error;
pub mod fuzzy;
pub mod terms;
#[doc(hidden)]
pub mod testing;
mod tree;
mod types;
pub mod verify;

pub use batch::search_many;
pub use bench::{run_bench, BenchSummary, LatencySummary};
pub use binary::{TreeHeader, MAGIC};
pub use build::{
    build_from_reader, run_build, sidecar_path, write_metadata, BuildMetadata, BuildReport,
    BuildSummary, JobStatus,
};
pub use error::{BkError, Result};
pub use fuzzy::{distance, distance_within, scan};
pub use terms::{read_terms, TermBatch, TermFormat};
pub use tree::{BkTree, TreeStats};
pub use types::{Distance, IndexForm, Match, NodeId, SerializedNode};
pub use verify::{check_invariants, InvariantError};
