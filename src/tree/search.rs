// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Range search with distance-band pruning.

use super::BkTree;
use crate::fuzzy::distance;
use crate::types::{sort_matches, Match, NodeId};
use crate::verify::contracts::{check_results_sorted, check_results_within};

impl BkTree {
    /// Every stored term within `max_dist` edits of `query`, with its distance.
    ///
    /// Sorted by ascending distance, ties broken by byte order of the term.
    /// The sort runs over the collected matches, so traversal order never
    /// leaks into the result.
    ///
    /// A negative `max_dist` matches nothing: no distance is ever below zero,
    /// and the pruning band `[d - k, d + k]` is empty for negative `k`.
    pub fn search<Q: AsRef<[u8]>>(&self, query: Q, max_dist: i64) -> Vec<Match<'_>> {
        let query = query.as_ref();
        let mut matches = Vec::new();
        if self.is_empty() {
            return matches;
        }

        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            let d = distance(&node.term, query);
            let wide = i64::from(d);
            if wide <= max_dist {
                matches.push(Match {
                    distance: d,
                    term: &*node.term,
                });
            }

            let low = wide.saturating_sub(max_dist);
            let high = wide.saturating_add(max_dist);
            stack.extend(
                node.children
                    .iter()
                    .filter(|edge| (low..=high).contains(&i64::from(edge.distance)))
                    .map(|edge| edge.child),
            );
        }

        sort_matches(&mut matches);
        check_results_sorted(&matches);
        check_results_within(&matches, max_dist);
        matches
    }

    /// The stored term closest to `query` within `max_dist`, if any.
    ///
    /// Ties resolve the same way as [`search`](Self::search): smallest term wins.
    pub fn nearest<Q: AsRef<[u8]>>(&self, query: Q, max_dist: i64) -> Option<Match<'_>> {
        self.search(query, max_dist).into_iter().next()
    }
}
