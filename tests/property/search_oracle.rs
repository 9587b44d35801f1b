//! Differential tests: tree search against a brute-force scan.
//!
//! The pruning band can only ever skip subtrees; if it skipped one holding a
//! real match, these catch it.

use bkmatch::{scan, search_many, BkTree};
use proptest::prelude::*;

use crate::common::{assert_sorted_unique, oracle_search, owned, search_owned};

fn vocabulary_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::string::string_regex("[a-e]{0,7}").unwrap(), 0..60)
}

fn query_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-f]{0,8}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_search_matches_oracle(
        words in vocabulary_strategy(),
        query in query_strategy(),
        max_dist in -1i64..5,
    ) {
        let tree: BkTree = words.iter().collect();
        prop_assert_eq!(search_owned(&tree, &query, max_dist), oracle_search(&words, &query, max_dist));
    }

    #[test]
    fn prop_search_matches_scan(
        words in vocabulary_strategy(),
        query in query_strategy(),
        max_dist in 0i64..4,
    ) {
        let tree: BkTree = words.iter().collect();
        let from_tree = tree.search(&query, max_dist);
        let from_scan = scan(words.iter(), query.as_bytes(), max_dist);
        prop_assert_eq!(owned(&from_tree), owned(&from_scan));
    }

    #[test]
    fn prop_results_sorted_and_unique(
        words in vocabulary_strategy(),
        query in query_strategy(),
        max_dist in 0i64..6,
    ) {
        let tree: BkTree = words.iter().collect();
        assert_sorted_unique(&tree.search(&query, max_dist));
    }

    #[test]
    fn prop_insertion_order_does_not_change_results(
        words in vocabulary_strategy(),
        query in query_strategy(),
        max_dist in 0i64..4,
    ) {
        let forward: BkTree = words.iter().collect();
        let backward: BkTree = words.iter().rev().collect();
        prop_assert_eq!(search_owned(&forward, &query, max_dist), search_owned(&backward, &query, max_dist));
    }

    #[test]
    fn prop_every_stored_term_finds_itself(words in vocabulary_strategy()) {
        let tree: BkTree = words.iter().collect();
        for word in &words {
            prop_assert!(tree.contains(word));
            let hits = tree.search(word, 0);
            prop_assert_eq!(hits.len(), 1);
            prop_assert_eq!(hits[0].term, word.as_bytes());
        }
    }

    #[test]
    fn prop_batch_matches_single(
        words in vocabulary_strategy(),
        queries in prop::collection::vec(query_strategy(), 0..10),
        max_dist in 0i64..3,
    ) {
        let tree: BkTree = words.iter().collect();
        let batched = search_many(&tree, &queries, max_dist);
        prop_assert_eq!(batched.len(), queries.len());
        for (query, results) in queries.iter().zip(&batched) {
            prop_assert_eq!(results, &tree.search(query, max_dist));
        }
    }
}
