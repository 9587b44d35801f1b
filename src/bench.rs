// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query benchmark behind `bkmatch bench`.
//!
//! Every query is timed on its own, once against the tree and once against a
//! linear [`scan`] over the same terms, so the summary carries a latency
//! distribution rather than a single mean. The batched path
//! ([`search_many`]) is timed as a whole.
//!
//! Percentiles interpolate linearly between the two nearest samples, so the
//! p50 of an even-sized sample is the mean of the middle pair.

use std::time::{Duration, Instant};

use log::debug;
use serde::Serialize;

use crate::batch::search_many;
use crate::fuzzy::scan;
use crate::testing::perturb;
use crate::tree::BkTree;

/// Percentile of an ascending sample, interpolated between neighbours.
///
/// `pct` is on the 0..=100 scale. Returns `None` for an empty sample.
pub fn percentile(sorted: &[f64], pct: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let k = (pct / 100.0) * last as f64;
    let floor = (k.floor() as usize).min(last);
    let ceil = (floor + 1).min(last);
    if floor == ceil {
        return Some(sorted[floor]);
    }
    let frac = k - floor as f64;
    Some(sorted[floor] * (1.0 - frac) + sorted[ceil] * frac)
}

/// Latency distribution in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatencySummary {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
    pub p50: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
}

impl LatencySummary {
    /// Summarize per-query timings. `None` when there are none.
    pub fn from_durations(samples: &[Duration]) -> Option<Self> {
        let mut ms: Vec<f64> = samples
            .iter()
            .map(|d| d.as_nanos() as f64 / 1e6)
            .collect();
        ms.sort_by(f64::total_cmp);

        let at = |pct| percentile(&ms, pct);
        Some(Self {
            min: *ms.first()?,
            avg: ms.iter().sum::<f64>() / ms.len() as f64,
            max: *ms.last()?,
            p50: at(50.0)?,
            p90: at(90.0)?,
            p95: at(95.0)?,
            p99: at(99.0)?,
        })
    }
}

/// Throughput and latency of one search method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MethodTiming {
    pub total_seconds: f64,
    /// Queries per second. 0 when nothing was measured.
    pub qps: f64,
    /// Per-query distribution; absent for methods timed as a whole.
    pub latency_ms: Option<LatencySummary>,
}

impl MethodTiming {
    fn whole(total: Duration, queries: usize) -> Self {
        let total_seconds = total.as_secs_f64();
        let qps = if total_seconds > 0.0 {
            queries as f64 / total_seconds
        } else {
            0.0
        };
        Self {
            total_seconds,
            qps,
            latency_ms: None,
        }
    }

    fn per_query(samples: &[Duration]) -> Self {
        Self {
            latency_ms: LatencySummary::from_durations(samples),
            ..Self::whole(samples.iter().sum(), samples.len())
        }
    }
}

/// Everything `bkmatch bench` reports, also written by `--out-json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchSummary {
    pub terms: usize,
    pub queries: usize,
    pub max_dist: i64,
    /// Time to rebuild the tree from its stored terms.
    pub build_seconds: f64,
    /// Total hits across all queries.
    pub matches: usize,
    pub tree: MethodTiming,
    pub scan: MethodTiming,
    pub batch: MethodTiming,
    /// How many times faster the tree answered than the scan.
    pub speedup_scan_over_tree: Option<f64>,
    /// Queries where the tree and the scan disagreed.
    pub mismatches: usize,
    pub batch_agrees: bool,
}

/// Stored terms with one edit applied, strided through the vocabulary.
pub fn bench_queries(tree: &BkTree, count: usize) -> Vec<String> {
    let terms: Vec<&[u8]> = tree.terms().collect();
    if terms.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|i| {
            let term = String::from_utf8_lossy(terms[i.wrapping_mul(7919) % terms.len()]);
            perturb(&term, i)
        })
        .collect()
}

/// Run `query_count` perturbed queries through tree search, linear scan and
/// batched search, and time a rebuild of the tree.
pub fn run_bench(tree: &BkTree, query_count: usize, max_dist: i64) -> BenchSummary {
    let terms: Vec<&[u8]> = tree.terms().collect();
    let queries = bench_queries(tree, query_count);

    let start = Instant::now();
    let rebuilt: BkTree = terms.iter().collect();
    let build_time = start.elapsed();
    debug!("rebuilt {} terms in {:?}", rebuilt.len(), build_time);

    let mut tree_samples = Vec::with_capacity(queries.len());
    let tree_results: Vec<_> = queries
        .iter()
        .map(|q| {
            let start = Instant::now();
            let hits = tree.search(q, max_dist);
            tree_samples.push(start.elapsed());
            hits
        })
        .collect();

    let mut scan_samples = Vec::with_capacity(queries.len());
    let scan_results: Vec<_> = queries
        .iter()
        .map(|q| {
            let start = Instant::now();
            let hits = scan(terms.iter(), q.as_bytes(), max_dist);
            scan_samples.push(start.elapsed());
            hits
        })
        .collect();

    let start = Instant::now();
    let batch_results = search_many(tree, &queries, max_dist);
    let batch_time = start.elapsed();

    let mismatches = tree_results
        .iter()
        .zip(&scan_results)
        .filter(|(t, s)| t != s)
        .count();

    let tree_timing = MethodTiming::per_query(&tree_samples);
    let scan_timing = MethodTiming::per_query(&scan_samples);
    let speedup = (tree_timing.total_seconds > 0.0)
        .then(|| scan_timing.total_seconds / tree_timing.total_seconds);

    BenchSummary {
        terms: terms.len(),
        queries: queries.len(),
        max_dist,
        build_seconds: build_time.as_secs_f64(),
        matches: tree_results.iter().map(Vec::len).sum(),
        tree: tree_timing,
        scan: scan_timing,
        batch: MethodTiming::whole(batch_time, queries.len()),
        speedup_scan_over_tree: speedup,
        mismatches,
        batch_agrees: batch_results == tree_results,
    }
}
