// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Many queries against one tree.
//!
//! Search only reads the tree, and the tree has no interior mutability, so a
//! shared `&BkTree` can serve any number of threads at once. With the
//! `parallel` feature, rayon spreads the queries over its pool. Without it,
//! they run one after another. Either way results come back in query order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::tree::BkTree;
use crate::types::Match;

/// Run `tree.search(query, max_dist)` for every query.
pub fn search_many<'t, Q>(tree: &'t BkTree, queries: &[Q], max_dist: i64) -> Vec<Vec<Match<'t>>>
where
    Q: AsRef<[u8]> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        queries
            .par_iter()
            .map(|query| tree.search(query, max_dist))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        queries
            .iter()
            .map(|query| tree.search(query, max_dist))
            .collect()
    }
}
