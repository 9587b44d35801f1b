// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Levenshtein distance, exact and bounded.
//!
//! Both functions work on bytes, not chars: a multi-byte UTF-8 character
//! that changes counts as several edits. The BK-tree only needs a metric,
//! and byte distance is one.
//!
//! The key insight for the bounded variant: `|len(a) - len(b)|` is a lower
//! bound on edit distance, and so is the minimum of any DP row. Either one
//! exceeding the threshold means we can stop.

use crate::types::Distance;

/// Edit distance between `a` and `b`: the minimum number of single-byte
/// insertions, deletions and substitutions turning one into the other.
///
/// Classic DP with two rolling rows. The shorter input runs along the row,
/// so memory is O(min(|a|, |b|)).
pub fn distance(a: &[u8], b: &[u8]) -> Distance {
    if a.is_empty() {
        return b.len() as Distance;
    }
    if b.is_empty() {
        return a.len() as Distance;
    }

    // Symmetric, so the orientation is ours to pick
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut row: Vec<Distance> = (0..=short.len() as Distance).collect();
    for (i, &lc) in long.iter().enumerate() {
        let mut diag = row[0];
        row[0] = i as Distance + 1;

        for (j, &sc) in short.iter().enumerate() {
            let above = row[j + 1];
            let cost = Distance::from(lc != sc);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diag + cost);
            diag = above;
        }
    }

    row[short.len()]
}

/// Are these sequences within `max` edits of each other? If so, how far?
///
/// Returns `Some(d)` exactly when `distance(a, b) == d` and `d <= max`.
/// Two early exits:
/// 1. Length difference exceeds `max`: no DP at all
/// 2. Every cell of a DP row exceeds `max`: abandon the rest
pub fn distance_within(a: &[u8], b: &[u8], max: Distance) -> Option<Distance> {
    let len_diff = a.len().abs_diff(b.len());
    if len_diff > max as usize {
        return None;
    }
    if a.is_empty() || b.is_empty() {
        return Some(len_diff as Distance);
    }

    let mut dp: Vec<Distance> = (0..=b.len() as Distance).collect();
    for (i, &ac) in a.iter().enumerate() {
        let mut prev = dp[0];
        dp[0] = i as Distance + 1;
        let mut min_row = dp[0];

        for (j, &bc) in b.iter().enumerate() {
            let temp = dp[j + 1];
            let cost = Distance::from(ac != bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
            min_row = min_row.min(dp[j + 1]);
        }

        if min_row > max {
            return None;
        }
    }

    let d = dp[b.len()];
    (d <= max).then_some(d)
}
