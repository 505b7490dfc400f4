use crate::error::{AutocompleteError, Result};
use crate::weight::{Weight, WeightPolicy};

/// Weighted prefix search over values keyed by unit sequences.
///
/// Implemented by [`SimpleTrie`](crate::SimpleTrie) (one unit per edge) and
/// [`CompressedTrie`](crate::CompressedTrie) (multi-unit edges). Object safe,
/// so callers can hold a `Box<dyn Autocompleter<V, U, W>>`.
pub trait Autocompleter<V, U, W: Weight> {
    /// Number of distinct values stored.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Aggregate weight of the whole tree, zero when empty.
    fn weight(&self) -> W;

    fn policy(&self) -> WeightPolicy;

    /// Stores `value` under `path`, or adds `weight` to it if already stored.
    ///
    /// Fails without mutating when `weight` is not positive or when `value`
    /// is already stored under a different path.
    fn insert(&mut self, value: V, weight: W, path: &[U]) -> Result<()>;

    /// Up to `limit` values whose path starts with `path`, by non-increasing
    /// weight. `None` returns every match; `Some(0)` is rejected.
    fn autocomplete(&self, path: &[U], limit: Option<usize>) -> Result<Vec<(V, W)>>;

    /// Removes every value whose path starts with `path` and returns how many
    /// were removed. An empty `path` clears the tree.
    fn remove(&mut self, path: &[U]) -> usize;
}

pub(crate) fn check_weight<W: Weight>(weight: W) -> Result<()> {
    if weight.is_strictly_positive() {
        Ok(())
    } else {
        Err(AutocompleteError::NonPositiveWeight)
    }
}

/// Rejects a weight that would push the tree total out of range. Weights are
/// positive, so the root sum bounds every leaf and branch sum on the insert
/// path and one check covers them all.
pub(crate) fn check_total<W: Weight>(total: W, weight: W) -> Result<()> {
    match total.checked_add(weight) {
        Some(_) => Ok(()),
        None => Err(AutocompleteError::WeightOverflow),
    }
}

pub(crate) fn check_limit(limit: Option<usize>) -> Result<()> {
    match limit {
        Some(0) => Err(AutocompleteError::InvalidLimit),
        _ => Ok(()),
    }
}
