// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index-form reconstruction from arbitrary records.
//!
//! Child indices are unconstrained, so most inputs describe cycles, shared
//! children or dangling references. Those must be rejected; whatever is
//! accepted must be a tree that search can walk without looping.

#![no_main]

use arbitrary::Arbitrary;
use bkmatch::{BkError, BkTree, SerializedNode};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Record {
    term: Vec<u8>,
    children: Vec<(u32, u8)>,
}

#[derive(Arbitrary, Debug)]
struct Input {
    records: Vec<Record>,
    query: Vec<u8>,
    max_dist: i8,
}

fuzz_target!(|input: Input| {
    let len = input.records.len();
    let form: Vec<SerializedNode> = input
        .records
        .into_iter()
        .map(|r| {
            let children = r
                .children
                .into_iter()
                .map(|(d, i)| (d, u32::from(i)))
                .collect();
            SerializedNode::new(r.term, children)
        })
        .collect();

    match BkTree::from_serializable(form) {
        Ok(tree) => {
            assert_eq!(tree.len(), len);
            assert_eq!(tree.stats().edges, len.saturating_sub(1));
            // Edge weights are arbitrary, so results may miss terms, but the
            // walk must terminate
            let _ = tree.search(&input.query, i64::from(input.max_dist));
        }
        Err(BkError::IndexOutOfRange { index, len: reported }) => {
            assert_eq!(reported, len);
            assert!(index >= len as u64);
        }
        Err(BkError::Format(_)) => {}
        Err(e) => panic!("unexpected error: {e}"),
    }
});
