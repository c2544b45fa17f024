use super::FrequencyIndex;
use super::hash::{HashIndex, ProbingMethod};
use super::tree::{TreeIndex, TreeVariant};

use proptest::prelude::*;
use std::collections::BTreeMap;

const METHODS: [ProbingMethod; 2] = [ProbingMethod::LinearProbing, ProbingMethod::DoubleHashing];
const VARIANTS: [TreeVariant; 2] = [TreeVariant::Plain, TreeVariant::RedBlack];

/// Large enough for every word `[a-e]{1,3}` can produce.
const ROOMY_CAPACITY: usize = 1009;

fn words_strategy(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-e]{1,3}", 1..max)
}

fn reference_counts(words: &[String]) -> BTreeMap<&str, u32> {
    let mut counts = BTreeMap::new();
    for word in words {
        *counts.entry(word.as_str()).or_insert(0) += 1;
    }
    counts
}

fn check_exact_frequencies(index: &mut dyn FrequencyIndex, words: &[String]) {
    let mut running: BTreeMap<&str, u32> = BTreeMap::new();
    for word in words {
        let expected = running.entry(word.as_str()).or_insert(0);
        *expected += 1;
        assert_eq!(index.insert(word).unwrap(), *expected, "insert {word}");
    }

    let counts = reference_counts(words);
    assert_eq!(index.len(), counts.len());
    for (word, count) in &counts {
        assert_eq!(index.frequency(word), *count, "frequency of {word}");
    }
    assert_eq!(index.frequency("zzzz"), 0);

    let mut visited = BTreeMap::new();
    index.for_each_entry(&mut |freq: u32, key: &str| {
        assert!(visited.insert(key.to_string(), freq).is_none(), "{key} seen twice");
    });
    let visited: BTreeMap<&str, u32> = visited.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    assert_eq!(visited, counts);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn hash_frequencies_are_exact(words in words_strategy(400)) {
        for method in METHODS {
            let mut index = HashIndex::new(ROOMY_CAPACITY, method).unwrap();
            check_exact_frequencies(&mut index, &words);
            prop_assert_eq!(index.collision_counts().len(), index.len());
        }
    }

    #[test]
    fn tree_frequencies_are_exact(words in words_strategy(400)) {
        for variant in VARIANTS {
            let mut tree = TreeIndex::new(variant);
            check_exact_frequencies(&mut tree, &words);
        }
    }

    #[test]
    fn inorder_is_sorted_for_any_insertion_order(words in words_strategy(400)) {
        let expected: Vec<&str> = reference_counts(&words).into_keys().collect();
        for variant in VARIANTS {
            let mut tree = TreeIndex::new(variant);
            for word in &words {
                tree.insert(word);
            }
            let mut keys = Vec::new();
            tree.inorder(|key| keys.push(key.to_string()));
            prop_assert_eq!(&keys, &expected);
        }
    }

    #[test]
    fn red_black_has_no_red_red_after_each_insert(
        words in prop::collection::vec("[a-z]{1,6}", 1..500)
    ) {
        let mut tree = TreeIndex::new(TreeVariant::RedBlack);
        for word in &words {
            tree.insert(word);
            prop_assert_eq!(tree.red_red_violations(), 0);
        }
    }

    #[test]
    fn full_table_search_terminates(
        absent in prop::collection::vec("x[0-9]{1,5}", 1..50)
    ) {
        for method in METHODS {
            let mut index = HashIndex::new(31, method).unwrap();
            for i in 0..31 {
                index.insert(&format!("k{i}")).unwrap();
            }
            prop_assert_eq!(index.len(), 31);
            prop_assert!(index.insert("overflow").is_err());
            for word in &absent {
                prop_assert_eq!(index.search(word), 0);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn red_black_large_sequences(
        words in prop::collection::vec("[a-z]{1,8}", 1..10_000)
    ) {
        let mut tree = TreeIndex::new(TreeVariant::RedBlack);
        for (i, word) in words.iter().enumerate() {
            tree.insert(word);
            if i % 1000 == 0 {
                prop_assert_eq!(tree.red_red_violations(), 0);
            }
        }
        prop_assert_eq!(tree.red_red_violations(), 0);

        let mut keys = Vec::new();
        tree.inorder(|key| keys.push(key.to_string()));
        prop_assert_eq!(keys.len(), tree.len());
        prop_assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
