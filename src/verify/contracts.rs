// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Debug-mode assertions on search results.
//!
//! Zero-cost in release builds (`debug_assert!` only). Called from the search
//! paths so every test run checks the promises those paths make.

use crate::types::Match;

/// Results are ascending by distance, then by term.
///
/// # Panics (debug builds only)
/// Panics if two neighbours are out of order.
#[inline]
pub fn check_results_sorted(matches: &[Match<'_>]) {
    debug_assert!(
        matches.windows(2).all(|w| w[0] <= w[1]),
        "search results out of order"
    );
}

/// Every result is within `max_dist` of the query.
///
/// # Panics (debug builds only)
/// Panics on the first result further away than `max_dist`.
#[inline]
pub fn check_results_within(matches: &[Match<'_>], max_dist: i64) {
    debug_assert!(
        matches.iter().all(|m| i64::from(m.distance) <= max_dist),
        "search returned a match beyond max_dist {}",
        max_dist
    );
}
