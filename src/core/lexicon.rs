/// Lexicon runtime — named vocabulary pools, RON packs, and merging.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// A set of named vocabulary pools: category name → ordered list of
/// literal fragments. Pools are immutable after startup; nothing is ever
/// written back.
///
/// `FxHashMap` keeps iteration order stable across process runs, so a
/// fixed seed reproduces the same output even when a draw spans the union
/// of several pools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    pub pools: FxHashMap<String, Vec<String>>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a lexicon from static literal tables.
    pub fn from_tables(tables: &[(&str, &[&str])]) -> Lexicon {
        let mut pools = FxHashMap::default();
        for (name, entries) in tables {
            pools.insert(
                name.to_string(),
                entries.iter().map(|s| s.to_string()).collect(),
            );
        }
        Lexicon { pools }
    }

    pub fn insert(&mut self, name: &str, entries: Vec<String>) {
        self.pools.insert(name.to_string(), entries);
    }

    pub fn entries(&self, name: &str) -> Option<&[String]> {
        self.pools.get(name).map(Vec::as_slice)
    }

    /// Number of fragments in a named pool; 0 for unknown pools.
    pub fn pool_len(&self, name: &str) -> usize {
        self.pools.get(name).map_or(0, Vec::len)
    }

    /// Draw one fragment uniformly at random from a named pool.
    pub fn pick<'a>(&'a self, name: &str, rng: &mut StdRng) -> Option<&'a str> {
        self.pools
            .get(name)
            .and_then(|pool| pool.choose(rng))
            .map(String::as_str)
    }

    /// Merge another lexicon into this one. Pools from `other` override
    /// pools in `self` with the same name.
    pub fn merge(&mut self, other: Lexicon) {
        for (name, pool) in other.pools {
            self.pools.insert(name, pool);
        }
    }

    /// Load a lexicon pack from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Lexicon, LexiconError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a lexicon pack from a RON string. The format is a map from
    /// pool name to a list of fragments.
    pub fn parse_ron(input: &str) -> Result<Lexicon, LexiconError> {
        let pools: FxHashMap<String, Vec<String>> = ron::from_str(input)?;
        Ok(Lexicon { pools })
    }
}
