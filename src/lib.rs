//! # spellindex
//!
//! Word-frequency indexing for spellchecking against a dictionary built from
//! input text.
//!
//! ## Features
//!
//! - Fixed-capacity open-addressing hash table with linear probing or double
//!   hashing, plus collision statistics snapshots
//! - Binary search tree with an optional red-black balancing discipline
//! - A word tokenizer for lowercase alphanumeric words
//! - A CLI driver that lists, summarizes or spellchecks

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod util;

pub mod prelude {
    pub use crate::config::{IndexConfig, IndexStructure};
    pub use crate::error::{Result, SpellIndexError};
    pub use crate::index::FrequencyIndex;
    pub use crate::index::hash::{HashIndex, ProbingMethod};
    pub use crate::index::tree::{TreeIndex, TreeVariant};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
