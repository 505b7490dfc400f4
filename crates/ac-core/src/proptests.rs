//! Property-based tests for both engines.
//!
//! Random insert/remove sequences run against a plain map model; after every
//! step both trees must keep their structural invariants and agree with the
//! model (and therefore with each other) on every query.

use std::collections::HashMap;

use proptest::prelude::*;

use crate::testutil::{assert_tree, chars, Layout};
use crate::{Autocompleter, CompressedTrie, SimpleTrie, WeightPolicy};

#[derive(Debug, Clone)]
enum Op {
    Insert(String, u8),
    Remove(String),
}

fn arb_word() -> impl Strategy<Value = String> {
    // Tiny alphabet so paths share prefixes and edges split and splice often.
    prop::collection::vec(prop::sample::select(vec!['a', 'b', 'c']), 0..6)
        .prop_map(|units| units.into_iter().collect())
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (arb_word(), 1u8..10).prop_map(|(w, weight)| Op::Insert(w, weight)),
        1 => arb_word().prop_map(Op::Remove),
    ]
}

fn arb_policy() -> impl Strategy<Value = WeightPolicy> {
    prop_oneof![Just(WeightPolicy::Sum), Just(WeightPolicy::Average)]
}

/// value → accumulated weight; the value doubles as its path.
type Model = HashMap<String, f64>;

fn expected(model: &Model, query: &str) -> Vec<(String, f64)> {
    let mut out: Vec<(String, f64)> = model
        .iter()
        .filter(|(value, _)| value.starts_with(query))
        .map(|(value, weight)| (value.clone(), *weight))
        .collect();
    out.sort_by(|a, b| a.0.cmp(&b.0));
    out
}

fn sorted_by_value(mut found: Vec<(String, f64)>) -> Vec<(String, f64)> {
    assert!(
        found.windows(2).all(|w| w[0].1 >= w[1].1),
        "results not ordered by weight: {found:?}"
    );
    found.sort_by(|a, b| a.0.cmp(&b.0));
    found
}

fn queries(model: &Model) -> Vec<String> {
    let mut qs: Vec<String> = vec![String::new(), "a".into(), "ab".into(), "ca".into(), "bbb".into()];
    for value in model.keys() {
        for end in 0..=value.len() {
            qs.push(value[..end].to_string());
        }
        qs.push(format!("{value}a"));
    }
    qs
}

fn check(
    model: &Model,
    simple: &SimpleTrie<String, char>,
    compressed: &CompressedTrie<String, char>,
    policy: WeightPolicy,
) {
    assert_tree(simple.root(), policy, Layout::Simple);
    assert_tree(compressed.root(), policy, Layout::Compressed);
    assert_eq!(simple.len(), model.len());
    assert_eq!(compressed.len(), model.len());
    for q in queries(model) {
        let path = chars(&q);
        let want = expected(model, &q);
        let got_simple = sorted_by_value(simple.autocomplete(&path, None).unwrap());
        let got_compressed = sorted_by_value(compressed.autocomplete(&path, None).unwrap());
        assert_eq!(got_simple, want, "simple, query {q:?}");
        assert_eq!(got_compressed, want, "compressed, query {q:?}");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn engines_match_model(
        policy in arb_policy(),
        ops in prop::collection::vec(arb_op(), 1..60),
    ) {
        let mut model = Model::new();
        let mut simple = SimpleTrie::new(policy);
        let mut compressed = CompressedTrie::new(policy);
        for op in &ops {
            match op {
                Op::Insert(word, weight) => {
                    let weight = f64::from(*weight);
                    *model.entry(word.clone()).or_insert(0.0) += weight;
                    simple.insert(word.clone(), weight, &chars(word)).unwrap();
                    compressed.insert(word.clone(), weight, &chars(word)).unwrap();
                }
                Op::Remove(prefix) => {
                    let before = model.len();
                    model.retain(|value, _| !value.starts_with(prefix.as_str()));
                    let removed = before - model.len();
                    prop_assert_eq!(simple.remove(&chars(prefix)), removed);
                    prop_assert_eq!(compressed.remove(&chars(prefix)), removed);
                }
            }
            check(&model, &simple, &compressed, policy);
        }
    }

    #[test]
    fn limit_returns_ordered_subset(
        words in prop::collection::vec((arb_word(), 1u8..10), 1..30),
        limit in 1usize..8,
    ) {
        let mut compressed: CompressedTrie<String, char> = CompressedTrie::new(WeightPolicy::Sum);
        for (word, weight) in &words {
            compressed.insert(word.clone(), f64::from(*weight), &chars(word)).unwrap();
        }
        let all = compressed.autocomplete(&[], None).unwrap();
        let capped = compressed.autocomplete(&[], Some(limit)).unwrap();
        prop_assert_eq!(capped.len(), limit.min(all.len()));
        prop_assert!(capped.windows(2).all(|w| w[0].1 >= w[1].1));
        for item in &capped {
            prop_assert!(all.contains(item));
        }
    }
}
