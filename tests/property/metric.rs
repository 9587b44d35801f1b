//! Levenshtein distance is a metric, and agrees with an independent implementation.

use bkmatch::{distance, distance_within, Distance};
use proptest::prelude::*;

use crate::common::oracle_distance;

/// Short byte strings over the full byte range, including invalid UTF-8.
fn bytes_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..12)
}

/// Words over a tiny alphabet, so pairs are often close.
fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[abc]{0,8}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn prop_matches_strsim(a in bytes_strategy(), b in bytes_strategy()) {
        prop_assert_eq!(distance(&a, &b) as usize, oracle_distance(&a, &b));
    }

    #[test]
    fn prop_matches_strsim_on_near_words(a in word_strategy(), b in word_strategy()) {
        prop_assert_eq!(
            distance(a.as_bytes(), b.as_bytes()) as usize,
            oracle_distance(a.as_bytes(), b.as_bytes())
        );
    }

    #[test]
    fn prop_identity(a in bytes_strategy(), b in bytes_strategy()) {
        prop_assert_eq!(distance(&a, &a), 0);
        prop_assert_eq!(distance(&a, &b) == 0, a == b);
    }

    #[test]
    fn prop_symmetry(a in bytes_strategy(), b in bytes_strategy()) {
        prop_assert_eq!(distance(&a, &b), distance(&b, &a));
    }

    #[test]
    fn prop_triangle_inequality(
        a in word_strategy(),
        b in word_strategy(),
        c in word_strategy(),
    ) {
        let (a, b, c) = (a.as_bytes(), b.as_bytes(), c.as_bytes());
        prop_assert!(distance(a, c) <= distance(a, b) + distance(b, c));
    }

    #[test]
    fn prop_length_bounds(a in bytes_strategy(), b in bytes_strategy()) {
        let d = distance(&a, &b) as usize;
        prop_assert!(d >= a.len().abs_diff(b.len()));
        prop_assert!(d <= a.len().max(b.len()));
    }

    #[test]
    fn prop_bounded_agrees_with_full(
        a in word_strategy(),
        b in word_strategy(),
        max in 0u32..6,
    ) {
        let full: Distance = distance(a.as_bytes(), b.as_bytes());
        let bounded = distance_within(a.as_bytes(), b.as_bytes(), max);
        if full <= max {
            prop_assert_eq!(bounded, Some(full));
        } else {
            prop_assert_eq!(bounded, None);
        }
    }
}
