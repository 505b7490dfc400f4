use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::Deserialize;

use crate::autocompleter::Autocompleter;
use crate::compressed::CompressedTrie;
use crate::error::{AutocompleteError, Result};
use crate::settings::EngineSettings;
use crate::simple::SimpleTrie;
use crate::weight::{Weight, WeightPolicy};

/// Which tree layout backs an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Simple,
    #[default]
    Compressed,
}

impl EngineKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Compressed => "compressed",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = AutocompleteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "compressed" => Ok(Self::Compressed),
            _ => Err(AutocompleteError::InvalidEngine(s.to_string())),
        }
    }
}

macro_rules! dispatch {
    ($engine:expr, $tree:ident => $call:expr) => {
        match $engine {
            Engine::Simple($tree) => $call,
            Engine::Compressed($tree) => $call,
        }
    };
}

/// Either engine behind one type, dispatching every call to the active tree.
#[derive(Debug, Clone)]
pub enum Engine<V, U, W = f64> {
    Simple(SimpleTrie<V, U, W>),
    Compressed(CompressedTrie<V, U, W>),
}

impl<V, U, W> Engine<V, U, W>
where
    V: Clone + Eq + Hash,
    U: Clone + PartialEq,
    W: Weight,
{
    pub fn new(kind: EngineKind, policy: WeightPolicy) -> Self {
        match kind {
            EngineKind::Simple => Self::Simple(SimpleTrie::new(policy)),
            EngineKind::Compressed => Self::Compressed(CompressedTrie::new(policy)),
        }
    }

    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self::new(settings.kind, settings.policy)
    }

    pub fn kind(&self) -> EngineKind {
        match self {
            Self::Simple(_) => EngineKind::Simple,
            Self::Compressed(_) => EngineKind::Compressed,
        }
    }

    pub fn node_count(&self) -> usize {
        dispatch!(self, t => t.node_count())
    }

    pub fn path_of(&self, value: &V) -> Option<&[U]> {
        dispatch!(self, t => t.path_of(value))
    }
}

impl<V, U, W> Autocompleter<V, U, W> for Engine<V, U, W>
where
    V: Clone + Eq + Hash,
    U: Clone + PartialEq,
    W: Weight,
{
    fn len(&self) -> usize {
        dispatch!(self, t => t.len())
    }

    fn weight(&self) -> W {
        dispatch!(self, t => t.weight())
    }

    fn policy(&self) -> WeightPolicy {
        dispatch!(self, t => t.policy())
    }

    fn insert(&mut self, value: V, weight: W, path: &[U]) -> Result<()> {
        dispatch!(self, t => t.insert(value, weight, path))
    }

    fn autocomplete(&self, path: &[U], limit: Option<usize>) -> Result<Vec<(V, W)>> {
        dispatch!(self, t => t.autocomplete(path, limit))
    }

    fn remove(&mut self, path: &[U]) -> usize {
        dispatch!(self, t => t.remove(path))
    }
}

impl<V: fmt::Debug, U: fmt::Debug, W: Weight> fmt::Display for Engine<V, U, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple(t) => fmt::Display::fmt(t, f),
            Self::Compressed(t) => fmt::Display::fmt(t, f),
        }
    }
}
