#![cfg(test)]

use std::fmt::Debug;

use crate::node::{Branch, Node};
use crate::weight::{Weight, WeightPolicy};

pub fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Simple,
    Compressed,
}

/// Walks the whole tree and panics on the first broken structural invariant.
pub fn assert_tree<V, U, W>(root: &Branch<V, U, W>, policy: WeightPolicy, layout: Layout)
where
    V: Debug + PartialEq,
    U: Debug + PartialEq,
    W: Weight + Into<f64>,
{
    assert!(root.prefix().is_empty(), "root prefix must be empty");
    if root.is_empty() {
        assert!(root.children().is_empty(), "empty root still has children");
        assert!(root.weight() == W::ZERO, "empty root has weight {}", root.weight());
        return;
    }
    check_branch(root, policy, layout, true);
}

fn check_branch<V, U, W>(
    branch: &Branch<V, U, W>,
    policy: WeightPolicy,
    layout: Layout,
    is_root: bool,
) -> (f64, usize)
where
    V: Debug + PartialEq,
    U: Debug + PartialEq,
    W: Weight + Into<f64>,
{
    let prefix = branch.prefix();
    let depth = prefix.len();
    assert!(
        !branch.children().is_empty(),
        "branch {prefix:?} has no children"
    );
    assert!(branch.weight().is_strictly_positive(), "branch {prefix:?} has zero weight");

    for pair in branch.children().windows(2) {
        assert!(
            pair[0].weight() >= pair[1].weight(),
            "children of {prefix:?} not sorted: {} before {}",
            pair[0].weight(),
            pair[1].weight()
        );
    }

    if layout == Layout::Compressed && !is_root && branch.children().len() == 1 {
        assert!(
            branch.children()[0].is_leaf(),
            "compressible branch {prefix:?}"
        );
    }

    let mut sum = 0.0;
    let mut count = 0;
    let mut leaf_values: Vec<&V> = Vec::new();
    let mut next_units: Vec<&U> = Vec::new();
    for child in branch.children() {
        match child {
            Node::Leaf(leaf) => {
                assert!(leaf.weight.is_strictly_positive(), "leaf {:?} not positive", leaf.value);
                assert!(
                    !leaf_values.contains(&&leaf.value),
                    "duplicate leaf {:?} under {prefix:?}",
                    leaf.value
                );
                leaf_values.push(&leaf.value);
                sum += leaf.weight.into();
                count += 1;
            }
            Node::Branch(c) => {
                assert!(!c.is_empty(), "empty child under {prefix:?}");
                assert!(
                    c.prefix().len() > depth && c.prefix().starts_with(prefix),
                    "child {:?} does not extend {prefix:?}",
                    c.prefix()
                );
                if layout == Layout::Simple {
                    assert_eq!(c.prefix().len(), depth + 1, "simple edge longer than one unit");
                }
                let unit = &c.prefix()[depth];
                assert!(
                    !next_units.contains(&unit),
                    "siblings under {prefix:?} share unit {unit:?}"
                );
                next_units.push(unit);
                let (s, n) = check_branch(c, policy, layout, false);
                sum += s;
                count += n;
            }
        }
    }

    assert_eq!(branch.len(), count, "leaf count of {prefix:?}");
    let stored: f64 = branch.leaf_sum().into();
    assert!(
        (stored - sum).abs() <= 1e-6 * sum.abs().max(1.0),
        "leaf sum of {prefix:?}: stored {stored}, actual {sum}"
    );
    assert!(
        branch.weight() == policy.aggregate(branch.leaf_sum(), branch.len()),
        "weight of {prefix:?} does not follow {policy}"
    );
    (sum, count)
}
