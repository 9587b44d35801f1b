// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format parsing under adversarial input.
//!
//! A crafted `.bkt` file should produce an error, not a crash or a giant
//! allocation. Counts that claim billions of nodes, term lengths past the end
//! of the buffer, child indices pointing anywhere: all must come back as Err.

#![no_main]

use bkmatch::{BkTree, MAGIC};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Most random inputs die at the magic check; prepend it half the time so
    // the record parser sees traffic too
    let prefixed;
    let input = if data.first().is_some_and(|b| b & 1 == 1) {
        prefixed = [&MAGIC[..], &data[1..]].concat();
        &prefixed[..]
    } else {
        data
    };

    if let Ok(tree) = BkTree::from_bytes(input) {
        // A successful parse holds exactly the records it read, and writes
        // back to the same number of bytes
        let bytes = tree.to_bytes().expect("loaded terms fit their length prefix");
        assert_eq!(bytes.len(), input.len());

        let reparsed = BkTree::from_bytes(&bytes).expect("own output must parse");
        assert_eq!(reparsed.len(), tree.len());
        assert_eq!(reparsed.stats().edges, tree.len().saturating_sub(1));
    }
});
