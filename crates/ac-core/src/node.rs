//! Tree nodes shared by both engines.
//!
//! A `Branch` owns its children and keeps incremental leaf counters, so a
//! mutation only refreshes the branches on its own root path. A `Leaf` is a
//! stored value; it is never addressed as a prefix.

use std::cmp::Ordering;
use std::fmt;

use crate::weight::{Weight, WeightPolicy};

#[derive(Debug, Clone, PartialEq)]
pub struct Leaf<V, W> {
    pub value: V,
    pub weight: W,
}

#[derive(Debug, Clone)]
pub struct Branch<V, U, W> {
    /// Common prefix of every leaf below, measured from the root.
    prefix: Vec<U>,
    weight: W,
    leaf_sum: W,
    leaf_count: usize,
    /// Sorted by non-increasing weight; never holds an empty branch.
    children: Vec<Node<V, U, W>>,
}

#[derive(Debug, Clone)]
pub enum Node<V, U, W> {
    Leaf(Leaf<V, W>),
    Branch(Branch<V, U, W>),
}

impl<V, U, W: Weight> Node<V, U, W> {
    pub fn weight(&self) -> W {
        match self {
            Self::Leaf(leaf) => leaf.weight,
            Self::Branch(branch) => branch.weight,
        }
    }

    /// Number of values stored in this subtree.
    pub fn len(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Branch(branch) => branch.leaf_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    pub fn as_branch(&self) -> Option<&Branch<V, U, W>> {
        match self {
            Self::Branch(branch) => Some(branch),
            Self::Leaf(_) => None,
        }
    }

    pub(crate) fn leaf_sum(&self) -> W {
        match self {
            Self::Leaf(leaf) => leaf.weight,
            Self::Branch(branch) => branch.leaf_sum,
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Branch(branch) => branch.node_count(),
        }
    }

    /// Moves every stored value of this subtree into `out`.
    pub(crate) fn drain_values(self, out: &mut Vec<V>) {
        match self {
            Self::Leaf(leaf) => out.push(leaf.value),
            Self::Branch(branch) => {
                for child in branch.children {
                    child.drain_values(out);
                }
            }
        }
    }
}

impl<V, U, W: Weight> Branch<V, U, W> {
    pub(crate) fn new(prefix: Vec<U>) -> Self {
        Self {
            prefix,
            weight: W::ZERO,
            leaf_sum: W::ZERO,
            leaf_count: 0,
            children: Vec::new(),
        }
    }

    /// Wraps `child` in a new branch labelled `prefix`, carrying its counters.
    pub(crate) fn adopt(prefix: Vec<U>, child: Node<V, U, W>, policy: WeightPolicy) -> Self {
        let leaf_sum = child.leaf_sum();
        let leaf_count = child.len();
        Self {
            prefix,
            weight: policy.aggregate(leaf_sum, leaf_count),
            leaf_sum,
            leaf_count,
            children: vec![child],
        }
    }

    pub fn prefix(&self) -> &[U] {
        &self.prefix
    }

    pub fn weight(&self) -> W {
        self.weight
    }

    pub fn len(&self) -> usize {
        self.leaf_count
    }

    pub fn is_empty(&self) -> bool {
        self.leaf_count == 0
    }

    pub fn children(&self) -> &[Node<V, U, W>] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<Node<V, U, W>> {
        &mut self.children
    }

    pub(crate) fn leaf_sum(&self) -> W {
        self.leaf_sum
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Adds `weight` to the leaf equal to `value`, or appends a new leaf.
    pub(crate) fn attach_leaf(&mut self, value: V, weight: W)
    where
        V: PartialEq,
    {
        let existing = self.children.iter_mut().find_map(|child| match child {
            Node::Leaf(leaf) if leaf.value == value => Some(leaf),
            _ => None,
        });
        match existing {
            Some(leaf) => leaf.weight = leaf.weight + weight,
            None => self.children.push(Node::Leaf(Leaf { value, weight })),
        }
    }

    /// Accounts for `weight` having been inserted somewhere below.
    pub(crate) fn record_insert(&mut self, weight: W, is_new: bool, policy: WeightPolicy) {
        self.leaf_sum = self.leaf_sum + weight;
        if is_new {
            self.leaf_count += 1;
        }
        self.refresh(policy);
    }

    /// Accounts for a detached subtree holding `leaf_count` values summing to `leaf_sum`.
    pub(crate) fn record_removal(&mut self, leaf_sum: W, leaf_count: usize, policy: WeightPolicy) {
        debug_assert!(leaf_count <= self.leaf_count);
        self.leaf_count -= leaf_count;
        // Float residue must not leave a positive weight on an empty branch.
        self.leaf_sum = if self.leaf_count == 0 {
            W::ZERO
        } else {
            self.leaf_sum - leaf_sum
        };
        self.refresh(policy);
    }

    /// Unlinks child `idx` and subtracts its counters.
    pub(crate) fn detach(&mut self, idx: usize, policy: WeightPolicy) -> Node<V, U, W> {
        let child = self.children.remove(idx);
        self.record_removal(child.leaf_sum(), child.len(), policy);
        child
    }

    /// Drops every child and resets the counters.
    pub(crate) fn clear(&mut self) -> Vec<Node<V, U, W>> {
        self.weight = W::ZERO;
        self.leaf_sum = W::ZERO;
        self.leaf_count = 0;
        std::mem::take(&mut self.children)
    }

    fn refresh(&mut self, policy: WeightPolicy) {
        self.weight = policy.aggregate(self.leaf_sum, self.leaf_count);
        // Stable, so equal weights keep their insertion order.
        self.children
            .sort_by(|a, b| b.weight().partial_cmp(&a.weight()).unwrap_or(Ordering::Equal));
    }

    /// Up to `limit` leaves below this branch, by non-increasing weight.
    pub(crate) fn top_leaves(&self, limit: Option<usize>) -> Vec<(V, W)>
    where
        V: Clone,
    {
        let mut out = Vec::new();
        self.collect_leaves(limit, &mut out);
        // Children are ordered by aggregate weight, not by their leaves.
        out.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        out
    }

    fn collect_leaves(&self, limit: Option<usize>, out: &mut Vec<(V, W)>)
    where
        V: Clone,
    {
        for child in &self.children {
            if limit.is_some_and(|limit| out.len() >= limit) {
                break;
            }
            match child {
                Node::Leaf(leaf) => out.push((leaf.value.clone(), leaf.weight)),
                Node::Branch(branch) => branch.collect_leaves(limit, out),
            }
        }
    }
}

impl<V: fmt::Debug, U: fmt::Debug, W: Weight> Node<V, U, W> {
    pub(crate) fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            Self::Leaf(leaf) => writeln!(f, "{indent}{:?} ({})", leaf.value, leaf.weight),
            Self::Branch(branch) => branch.write_indented(f, depth),
        }
    }
}

impl<V: fmt::Debug, U: fmt::Debug, W: Weight> Branch<V, U, W> {
    pub(crate) fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        writeln!(f, "{}{:?} ({})", "  ".repeat(depth), self.prefix, self.weight)?;
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}
