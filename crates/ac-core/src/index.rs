//! value → path registry backing duplicate detection.
//!
//! The tree itself only finds a value by scanning the leaves under its path;
//! this map answers "is it already stored, and where" without a walk.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{AutocompleteError, Result};

#[derive(Debug, Clone)]
pub(crate) struct ValueIndex<V, U> {
    paths: HashMap<V, Vec<U>>,
}

impl<V: Eq + Hash, U: Clone + PartialEq> ValueIndex<V, U> {
    pub fn new() -> Self {
        Self {
            paths: HashMap::new(),
        }
    }

    /// `Ok(true)` if `value` is new, `Ok(false)` if it is stored under `path`.
    pub fn admit(&self, value: &V, path: &[U]) -> Result<bool> {
        match self.paths.get(value) {
            None => Ok(true),
            Some(stored) if stored.as_slice() == path => Ok(false),
            Some(_) => Err(AutocompleteError::ConflictingPath),
        }
    }

    pub fn record(&mut self, value: V, path: &[U]) {
        self.paths.entry(value).or_insert_with(|| path.to_vec());
    }

    pub fn forget(&mut self, values: impl IntoIterator<Item = V>) {
        for value in values {
            self.paths.remove(&value);
        }
    }

    pub fn path_of(&self, value: &V) -> Option<&[U]> {
        self.paths.get(value).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }
}
