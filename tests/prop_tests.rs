use std::collections::BTreeMap;

use proptest::collection::vec;
use proptest::prelude::*;

use artree::AdaptiveRadixTree;

fn keys() -> impl Strategy<Value = Vec<u8>> {
    // Short keys over a small alphabet force heavy prefix sharing, leaf
    // splits, and duplicate overwrites.
    vec(0u8..4, 0..12)
}

proptest! {
    #[test]
    fn matches_btreemap(ops in vec((keys(), any::<u32>()), 1..200)) {
        let mut tree = AdaptiveRadixTree::new();
        let mut model = BTreeMap::new();

        for (key, value) in &ops {
            let replaced = tree.insert(key, *value);
            let expected = model.insert(key.clone(), *value);
            prop_assert_eq!(replaced, expected);
            prop_assert_eq!(tree.len(), model.len());
        }

        for (key, value) in &model {
            prop_assert_eq!(tree.get(key), Some(value));
        }
        for (key, _) in &ops {
            prop_assert_eq!(tree.get(key), model.get(key));
        }
    }

    #[test]
    fn absent_keys_stay_absent(present in vec(keys(), 1..50), probe in keys()) {
        let mut tree = AdaptiveRadixTree::new();
        let mut model = BTreeMap::new();
        for key in &present {
            tree.insert(key, ());
            model.insert(key.clone(), ());
        }
        prop_assert_eq!(tree.get(&probe).is_some(), model.contains_key(&probe));
    }

    #[test]
    fn wide_random_keys(entries in vec((vec(any::<u8>(), 0..40), any::<u64>()), 1..100)) {
        let mut tree = AdaptiveRadixTree::new();
        let mut model = BTreeMap::new();
        for (key, value) in &entries {
            tree.insert(key, *value);
            model.insert(key.clone(), *value);
        }
        prop_assert_eq!(tree.len(), model.len());
        for (key, value) in &model {
            prop_assert_eq!(tree.get(key), Some(value));
        }
    }
}
