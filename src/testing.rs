// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit tests, integration tests and benches.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixtures and query generators to avoid duplication.

#![doc(hidden)]

use crate::tree::BkTree;
use crate::types::{Distance, Match};

/// The six-word vocabulary used throughout the examples.
pub const SCENARIO_WORDS: [&str; 6] = ["book", "books", "cake", "boo", "cape", "cart"];

/// A spelling-correction flavoured vocabulary with clusters of near neighbours.
pub const CLINICAL_WORDS: &[&str] = &[
    "abdomen",
    "abdominal",
    "anemia",
    "anaemia",
    "angina",
    "aorta",
    "aortic",
    "arrhythmia",
    "artery",
    "arteries",
    "asthma",
    "atrial",
    "bradycardia",
    "bronchitis",
    "cardiac",
    "cardiology",
    "carotid",
    "cataract",
    "diabetes",
    "diabetic",
    "dyspnea",
    "dyspnoea",
    "edema",
    "oedema",
    "embolism",
    "fever",
    "fibrillation",
    "gastric",
    "hepatic",
    "hepatitis",
    "hypertension",
    "hypotension",
    "infarction",
    "insulin",
    "ischemia",
    "ischaemia",
    "lesion",
    "migraine",
    "myocardial",
    "nausea",
    "neuropathy",
    "pneumonia",
    "renal",
    "sepsis",
    "stenosis",
    "stroke",
    "tachycardia",
    "thrombosis",
    "valve",
    "vascular",
];

/// Build the six-word scenario tree, inserted in the listed order.
pub fn scenario_tree() -> BkTree {
    SCENARIO_WORDS.into_iter().collect()
}

/// Build a tree over the clinical vocabulary.
pub fn clinical_tree() -> BkTree {
    CLINICAL_WORDS.iter().collect()
}

/// Detach matches from the tree as `(text, distance)` pairs.
pub fn owned(matches: &[Match<'_>]) -> Vec<(String, Distance)> {
    matches.iter().map(Match::to_owned_pair).collect()
}

/// Deterministically damage a term: one edit chosen by `seed`.
///
/// Cycles through deleting, substituting, inserting and swapping a byte,
/// which is what typo-tolerant lookups have to absorb.
pub fn perturb(term: &str, seed: usize) -> String {
    let mut bytes = term.as_bytes().to_vec();
    if bytes.is_empty() {
        return "x".to_string();
    }
    let at = seed % bytes.len();
    match seed % 4 {
        0 => {
            bytes.remove(at);
        }
        1 => bytes[at] = if bytes[at] == b'x' { b'y' } else { b'x' },
        2 => bytes.insert(at, b'e'),
        _ => {
            let next = (at + 1) % bytes.len();
            bytes.swap(at, next);
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Deterministic pseudo-random words over a small alphabet.
///
/// A small alphabet makes near neighbours common, which is the interesting
/// case for range search.
pub fn synthetic_words(count: usize, seed: u64) -> Vec<String> {
    const ALPHABET: &[u8] = b"abcdeilmnorst";
    let mut state = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
    let mut next = move || {
        // xorshift64*
        state ^= state >> 12;
        state ^= state << 25;
        state ^= state >> 27;
        state.wrapping_mul(0x2545_F491_4F6C_DD1D)
    };

    (0..count)
        .map(|_| {
            let len = 3 + (next() % 8) as usize;
            (0..len)
                .map(|_| ALPHABET[(next() % ALPHABET.len() as u64) as usize] as char)
                .collect()
        })
        .collect()
}
