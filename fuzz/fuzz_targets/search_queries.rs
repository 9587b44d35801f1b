// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tree search versus linear scan on arbitrary vocabularies.
//!
//! The pruning band is the only clever part of search. If it ever skips a
//! subtree holding a real match, the scan disagrees and this target fails.

#![no_main]

use arbitrary::Arbitrary;
use bkmatch::{scan, BkTree};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    words: Vec<Vec<u8>>,
    query: Vec<u8>,
    max_dist: i8,
}

fuzz_target!(|input: Input| {
    let words: Vec<&[u8]> = input.words.iter().map(|w| &w[..w.len().min(16)]).collect();
    let query = &input.query[..input.query.len().min(16)];
    let max_dist = i64::from(input.max_dist);

    let tree: BkTree = words.iter().collect();
    assert_eq!(tree.search(query, max_dist), scan(words.iter(), query, max_dist));
});
