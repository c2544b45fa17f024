//! Configuration for building a word index.
//!
//! An [`IndexConfig`] names the structure to build and its parameters. It can
//! be assembled in code, loaded from a JSON file, or both, with later sources
//! overriding earlier ones:
//!
//! ```
//! use spellindex::config::{IndexConfig, IndexStructure};
//! use spellindex::index::tree::TreeVariant;
//!
//! let config = IndexConfig::default()
//!     .with_structure(IndexStructure::Tree)
//!     .with_tree_variant(TreeVariant::RedBlack);
//! assert!(config.validate().is_ok());
//!
//! let json = r#"{ "capacity": 8, "probing": "double_hashing" }"#;
//! let config: IndexConfig = serde_json::from_str(json).unwrap();
//! assert_eq!(config.snapshots, 10);
//! assert!(config.validate().is_err()); // 8 is not prime
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::DEFAULT_MAX_WORD_LEN;
use crate::error::{Result, SpellIndexError};
use crate::index::hash::ProbingMethod;
use crate::index::tree::TreeVariant;
use crate::util::prime::is_prime;

/// Default hash table capacity.
pub const DEFAULT_CAPACITY: usize = 113;

/// Default number of statistics snapshots.
pub const DEFAULT_SNAPSHOTS: usize = 10;

/// Which index structure to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexStructure {
    /// Open-addressing hash table
    #[default]
    HashTable,
    /// Binary search tree
    Tree,
}

/// Parameters for building and reporting on an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Structure to build.
    pub structure: IndexStructure,

    /// Collision resolution for hash tables.
    pub probing: ProbingMethod,

    /// Hash table capacity.
    pub capacity: usize,

    /// Balancing discipline for trees.
    pub tree_variant: TreeVariant,

    /// Number of statistics snapshots to report.
    pub snapshots: usize,

    /// Longest word the tokenizer emits before splitting.
    pub max_word_len: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            structure: IndexStructure::HashTable,
            probing: ProbingMethod::LinearProbing,
            capacity: DEFAULT_CAPACITY,
            tree_variant: TreeVariant::Plain,
            snapshots: DEFAULT_SNAPSHOTS,
            max_word_len: DEFAULT_MAX_WORD_LEN,
        }
    }
}

impl IndexConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config: IndexConfig = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    pub fn with_structure(mut self, structure: IndexStructure) -> Self {
        self.structure = structure;
        self
    }

    pub fn with_probing(mut self, probing: ProbingMethod) -> Self {
        self.probing = probing;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_tree_variant(mut self, variant: TreeVariant) -> Self {
        self.tree_variant = variant;
        self
    }

    pub fn with_snapshots(mut self, snapshots: usize) -> Self {
        self.snapshots = snapshots;
        self
    }

    pub fn with_max_word_len(mut self, max_word_len: usize) -> Self {
        self.max_word_len = max_word_len;
        self
    }

    /// Check that the configuration can build a working index.
    pub fn validate(&self) -> Result<()> {
        if self.max_word_len == 0 {
            return Err(SpellIndexError::invalid_config(
                "max_word_len must be positive",
            ));
        }

        if self.structure == IndexStructure::HashTable {
            if self.capacity == 0 {
                return Err(SpellIndexError::invalid_config("capacity must be positive"));
            }
            if self.probing == ProbingMethod::DoubleHashing && !is_prime(self.capacity) {
                return Err(SpellIndexError::invalid_config(format!(
                    "double hashing needs a prime capacity, got {}",
                    self.capacity
                )));
            }
        }

        Ok(())
    }
}
