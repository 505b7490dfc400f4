//! Weighted prefix search over unit sequences.
//!
//! Values are stored under a path of comparable units together with a
//! positive weight. Queries return the heaviest values whose path starts with
//! a given prefix. Two interchangeable tree layouts implement
//! [`Autocompleter`]: [`SimpleTrie`] advances one unit per edge, while
//! [`CompressedTrie`] collapses single-branch chains into multi-unit edges.
//!
//! ```
//! use ac_core::{Autocompleter, CompressedTrie, WeightPolicy};
//!
//! let mut tree: CompressedTrie<&str, char> = CompressedTrie::new(WeightPolicy::Sum);
//! tree.insert("cat", 3.0, &['c', 'a', 't']).unwrap();
//! tree.insert("car", 5.0, &['c', 'a', 'r']).unwrap();
//! tree.insert("cap", 1.0, &['c', 'a', 'p']).unwrap();
//!
//! let top = tree.autocomplete(&['c', 'a'], Some(2)).unwrap();
//! assert_eq!(top, vec![("car", 5.0), ("cat", 3.0)]);
//! ```

mod autocompleter;
mod compressed;
pub mod engine;
pub mod error;
mod index;
pub mod node;
pub mod settings;
mod simple;
#[cfg(test)]
mod proptests;
#[cfg(test)]
pub(crate) mod testutil;
pub mod weight;

pub use autocompleter::Autocompleter;
pub use compressed::CompressedTrie;
pub use engine::{Engine, EngineKind};
pub use error::{AutocompleteError, Result};
pub use node::{Branch, Leaf, Node};
pub use simple::SimpleTrie;
pub use weight::{Weight, WeightPolicy};
