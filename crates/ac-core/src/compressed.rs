//! Path-compressed prefix tree.
//!
//! Branch prefixes are full paths from the root, so an edge spans every unit
//! between a branch and its parent. The root is a permanent sentinel with an
//! empty prefix. Below it, no branch has a lone child that is itself a
//! branch: inserts split edges where paths diverge, removals splice such
//! chains back into a single edge.


use std::fmt;
use std::hash::Hash;

use tracing::{debug, debug_span, trace};

use crate::autocompleter::{check_limit, check_total, check_weight, Autocompleter};
use crate::error::Result;
use crate::index::ValueIndex;
use crate::node::{Branch, Node};
use crate::weight::{Weight, WeightPolicy};

#[derive(Debug, Clone)]
pub struct CompressedTrie<V, U, W = f64> {
    root: Branch<V, U, W>,
    policy: WeightPolicy,
    index: ValueIndex<V, U>,
}

fn common_run<U: PartialEq>(a: &[U], b: &[U]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Child branch whose prefix agrees with `path` over their overlap.
///
/// Returns its position and prefix length. At most one child can agree,
/// since sibling edges never share a first unit.
fn overlapping<V, U: PartialEq, W: Weight>(
    node: &Branch<V, U, W>,
    path: &[U],
) -> Option<(usize, usize)> {
    let depth = node.prefix().len();
    node.children()
        .iter()
        .enumerate()
        .find_map(|(idx, child)| match child {
            Node::Branch(b) => {
                let end = b.prefix().len().min(path.len());
                (b.prefix()[depth..end] == path[depth..end]).then_some((idx, b.prefix().len()))
            }
            Node::Leaf(_) => None,
        })
}

fn insert_into<V, U, W>(
    node: &mut Branch<V, U, W>,
    value: V,
    weight: W,
    path: &[U],
    is_new: bool,
    policy: WeightPolicy,
) where
    V: PartialEq,
    U: Clone + PartialEq,
    W: Weight,
{
    debug_assert!(path.starts_with(node.prefix()));
    let depth = node.prefix().len();
    if path.len() == depth {
        node.attach_leaf(value, weight);
    } else {
        let shared = node
            .children()
            .iter()
            .enumerate()
            .find_map(|(idx, child)| match child {
                Node::Branch(b) => {
                    let run = common_run(&path[depth..], &b.prefix()[depth..]);
                    (run > 0).then_some((idx, depth + run, b.prefix().len()))
                }
                Node::Leaf(_) => None,
            });
        let idx = match shared {
            None => {
                trace!(depth, label_len = path.len(), "new edge");
                node.children_mut()
                    .push(Node::Branch(Branch::new(path.to_vec())));
                node.children().len() - 1
            }
            Some((idx, run_end, label_len)) if run_end == label_len => idx,
            Some((idx, run_end, label_len)) => {
                trace!(run_end, label_len, "split edge");
                let existing = node.children_mut().remove(idx);
                let mid = Branch::adopt(path[..run_end].to_vec(), existing, policy);
                node.children_mut().push(Node::Branch(mid));
                node.children().len() - 1
            }
        };
        let Node::Branch(child) = &mut node.children_mut()[idx] else {
            unreachable!("insert only descends into branches")
        };
        insert_into(child, value, weight, path, is_new, policy);
    }
    node.record_insert(weight, is_new, policy);
}

/// Drops child `idx` if it emptied, or splices it out if its only child is a branch.
fn settle<V, U, W: Weight>(node: &mut Branch<V, U, W>, idx: usize) {
    let children = node.children_mut();
    let Node::Branch(child) = &mut children[idx] else {
        return;
    };
    if child.is_empty() {
        children.remove(idx);
    } else if child.children().len() == 1 && !child.children()[0].is_leaf() {
        let only = child.children_mut().pop();
        if let Some(only) = only {
            trace!("splice compressible branch");
            children[idx] = only;
        }
    }
}

fn remove_from<V, U, W>(
    node: &mut Branch<V, U, W>,
    path: &[U],
    policy: WeightPolicy,
) -> Option<Node<V, U, W>>
where
    U: PartialEq,
    W: Weight,
{
    let (idx, label_len) = overlapping(node, path)?;
    if path.len() <= label_len {
        return Some(node.detach(idx, policy));
    }
    let Node::Branch(child) = &mut node.children_mut()[idx] else {
        unreachable!("overlapping only matches branches")
    };
    let removed = remove_from(child, path, policy)?;
    settle(node, idx);
    node.record_removal(removed.leaf_sum(), removed.len(), policy);
    Some(removed)
}

impl<V, U, W> CompressedTrie<V, U, W>
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

    /// The sentinel root; its prefix is always empty.
    pub fn root(&self) -> &Branch<V, U, W> {
        &self.root
    }

    pub fn path_of(&self, value: &V) -> Option<&[U]> {
        self.index.path_of(value)
    }

    /// Nodes in the tree, sentinel and leaves included; zero when empty.
    pub fn node_count(&self) -> usize {
        if self.root.is_empty() {
            0
        } else {
            self.root.node_count()
        }
    }

    fn locate(&self, path: &[U]) -> Option<&Branch<V, U, W>> {
        let mut node = &self.root;
        while path.len() > node.prefix().len() {
            let (idx, _) = overlapping(node, path)?;
            node = node.children()[idx].as_branch()?;
        }
        Some(node)
    }
}

impl<V, U, W> Default for CompressedTrie<V, U, W>
where
    V: Clone + Eq + Hash,
    U: Clone + PartialEq,
    W: Weight,
{
    fn default() -> Self {
        Self::new(WeightPolicy::default())
    }
}

impl<V, U, W> Autocompleter<V, U, W> for CompressedTrie<V, U, W>
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
        let _span = debug_span!("compressed_insert", path_len = path.len()).entered();
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
        let _span =
            debug_span!("compressed_autocomplete", path_len = path.len(), ?limit).entered();
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
        let _span = debug_span!("compressed_remove", path_len = path.len()).entered();
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

impl<V: fmt::Debug, U: fmt::Debug, W: Weight> fmt::Display for CompressedTrie<V, U, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.write_indented(f, 0)
    }
}
