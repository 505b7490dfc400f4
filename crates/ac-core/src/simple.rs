//! Uncompressed prefix tree: every edge advances the prefix by one unit.
//!
//! A branch at depth `d` has a prefix of exactly `d` units, and each child
//! branch extends it by one. Lookups therefore match a child by the last unit
//! of its prefix alone.


use std::fmt;
use std::hash::Hash;

use tracing::{debug, debug_span, trace};

use crate::autocompleter::{check_limit, check_total, check_weight, Autocompleter};
use crate::error::Result;
use crate::index::ValueIndex;
use crate::node::{Branch, Node};
use crate::weight::{Weight, WeightPolicy};

#[derive(Debug, Clone)]
pub struct SimpleTrie<V, U, W = f64> {
    root: Branch<V, U, W>,
    policy: WeightPolicy,
    index: ValueIndex<V, U>,
}

/// Position of the child branch reached by appending `unit`.
fn step<V, U: PartialEq, W: Weight>(node: &Branch<V, U, W>, unit: &U) -> Option<usize> {
    node.children().iter().position(|child| match child {
        Node::Branch(b) => b.prefix().last() == Some(unit),
        Node::Leaf(_) => false,
    })
}

fn insert_into<V, U, W>(
    node: &mut Branch<V, U, W>,
    value: V,
    weight: W,
    rest: &[U],
    is_new: bool,
    policy: WeightPolicy,
) where
    V: PartialEq,
    U: Clone + PartialEq,
    W: Weight,
{
    match rest.split_first() {
        None => node.attach_leaf(value, weight),
        Some((unit, tail)) => {
            let idx = match step(node, unit) {
                Some(idx) => idx,
                None => {
                    let mut prefix = node.prefix().to_vec();
                    prefix.push(unit.clone());
                    trace!(depth = prefix.len(), "new branch");
                    node.children_mut().push(Node::Branch(Branch::new(prefix)));
                    node.children().len() - 1
                }
            };
            let Node::Branch(child) = &mut node.children_mut()[idx] else {
                unreachable!("step only matches branches")
            };
            insert_into(child, value, weight, tail, is_new, policy);
        }
    }
    node.record_insert(weight, is_new, policy);
}

/// Detaches the branch at `rest` below `node`, pruning branches it empties.
fn remove_from<V, U, W>(
    node: &mut Branch<V, U, W>,
    rest: &[U],
    policy: WeightPolicy,
) -> Option<Node<V, U, W>>
where
    U: PartialEq,
    W: Weight,
{
    let (unit, tail) = rest.split_first()?;
    let idx = step(node, unit)?;
    if tail.is_empty() {
        return Some(node.detach(idx, policy));
    }
    let Node::Branch(child) = &mut node.children_mut()[idx] else {
        unreachable!("step only matches branches")
    };
    let removed = remove_from(child, tail, policy)?;
    if child.is_empty() {
        node.children_mut().remove(idx);
    }
    node.record_removal(removed.leaf_sum(), removed.len(), policy);
    Some(removed)
}

impl<V, U, W> SimpleTrie<V, U, W>
where
    V: Clone + Eq + Hash,
    U: Clone + PartialEq,
    W: Weight,
{
    pub fn new(policy: WeightPolicy) -> Self {
        Self {
            root: Branch::new(Vec::new()),
            policy,
            index: ValueIndex::new(),
        }
    }

    pub fn root(&self) -> &Branch<V, U, W> {
        &self.root
    }

    /// Path `value` was inserted under, if it is stored.
    pub fn path_of(&self, value: &V) -> Option<&[U]> {
        self.index.path_of(value)
    }

    /// Nodes in the tree, root and leaves included; zero when empty.
    pub fn node_count(&self) -> usize {
        if self.root.is_empty() {
            0
        } else {
            self.root.node_count()
        }
    }

    fn locate(&self, path: &[U]) -> Option<&Branch<V, U, W>> {
        path.iter().try_fold(&self.root, |node, unit| {
            step(node, unit).and_then(|idx| node.children()[idx].as_branch())
        })
    }
}

impl<V, U, W> Default for SimpleTrie<V, U, W>
where
    V: Clone + Eq + Hash,
    U: Clone + PartialEq,
    W: Weight,
{
    fn default() -> Self {
        Self::new(WeightPolicy::default())
    }
}

impl<V, U, W> Autocompleter<V, U, W> for SimpleTrie<V, U, W>
where
    V: Clone + Eq + Hash,
    U: Clone + PartialEq,
    W: Weight,
{
    fn len(&self) -> usize {
        self.root.len()
    }

    fn weight(&self) -> W {
        self.root.weight()
    }

    fn policy(&self) -> WeightPolicy {
        self.policy
    }

    fn insert(&mut self, value: V, weight: W, path: &[U]) -> Result<()> {
        let _span = debug_span!("simple_insert", path_len = path.len()).entered();
        check_weight(weight)?;
        let is_new = self.index.admit(&value, path)?;
        check_total(self.root.leaf_sum(), weight)?;
        if is_new {
            self.index.record(value.clone(), path);
        }
        insert_into(&mut self.root, value, weight, path, is_new, self.policy);
        debug_assert_eq!(self.root.len(), self.index.len());
        debug!(is_new, size = self.root.len());
        Ok(())
    }

    fn autocomplete(&self, path: &[U], limit: Option<usize>) -> Result<Vec<(V, W)>> {
        let _span = debug_span!("simple_autocomplete", path_len = path.len(), ?limit).entered();
        check_limit(limit)?;
        if self.root.is_empty() {
            return Ok(Vec::new());
        }
        let found = self
            .locate(path)
            .map(|node| node.top_leaves(limit))
            .unwrap_or_default();
        debug!(matches = found.len());
        Ok(found)
    }

    fn remove(&mut self, path: &[U]) -> usize {
        let _span = debug_span!("simple_remove", path_len = path.len()).entered();
        if self.root.is_empty() {
            return 0;
        }
        let mut values = Vec::new();
        if path.is_empty() {
            for child in self.root.clear() {
                child.drain_values(&mut values);
            }
        } else if let Some(removed) = remove_from(&mut self.root, path, self.policy) {
            removed.drain_values(&mut values);
        }
        let count = values.len();
        self.index.forget(values);
        debug_assert_eq!(self.root.len(), self.index.len());
        debug!(removed = count, size = self.root.len());
        count
    }
}

impl<V: fmt::Debug, U: fmt::Debug, W: Weight> fmt::Display for SimpleTrie<V, U, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.write_indented(f, 0)
    }
}
