// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Linear scan: the baseline every tree query is measured against.

use super::levenshtein::distance_within;
use crate::types::{sort_matches, Distance, Match};
use crate::verify::contracts::check_results_sorted;

/// Check every term against `query` and keep those within `max_dist`.
///
/// Results come back in the same order as [`BkTree::search`](crate::BkTree::search)
/// (distance, then term), and a term listed twice is reported once, so
/// the two are directly comparable.
pub fn scan<'a, I, T>(terms: I, query: &[u8], max_dist: i64) -> Vec<Match<'a>>
where
    I: IntoIterator<Item = &'a T>,
    T: AsRef<[u8]> + ?Sized + 'a,
{
    if max_dist < 0 {
        return Vec::new();
    }
    let max = Distance::try_from(max_dist).unwrap_or(Distance::MAX);

    let mut matches: Vec<Match<'a>> = terms
        .into_iter()
        .filter_map(|term| {
            let term = term.as_ref();
            distance_within(term, query, max).map(|distance| Match { distance, term })
        })
        .collect();

    sort_matches(&mut matches);
    // Equal terms have equal distances, so duplicates are adjacent after sorting
    matches.dedup_by(|a, b| a.term == b.term);
    check_results_sorted(&matches);
    matches
}
