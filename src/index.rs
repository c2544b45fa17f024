//! Word-frequency indexes.
//!
//! Two interchangeable structures count how often each word was inserted:
//!
//! - [`hash::HashIndex`] - fixed-capacity open addressing with linear probing
//!   or double hashing, recording per-insertion collision counts
//! - [`tree::TreeIndex`] - a binary search tree with an optional red-black
//!   balancing discipline
//!
//! Both implement [`FrequencyIndex`], which is all a driver needs to fill an
//! index and probe it.
//!
//! # Examples
//!
//! ```
//! use spellindex::index::FrequencyIndex;
//! use spellindex::index::hash::{HashIndex, ProbingMethod};
//! use spellindex::index::tree::{TreeIndex, TreeVariant};
//!
//! fn fill(index: &mut dyn FrequencyIndex) {
//!     for word in ["cat", "dog", "cat"] {
//!         index.insert(word).unwrap();
//!     }
//! }
//!
//! let mut table = HashIndex::new(7, ProbingMethod::LinearProbing).unwrap();
//! let mut tree = TreeIndex::new(TreeVariant::RedBlack);
//! fill(&mut table);
//! fill(&mut tree);
//!
//! assert_eq!(table.frequency("cat"), 2);
//! assert_eq!(tree.frequency("cat"), 2);
//! assert!(!tree.contains("bird"));
//! ```

pub mod hash;
pub mod tree;

use crate::error::Result;

/// Common contract of the word-frequency indexes.
pub trait FrequencyIndex {
    /// Count one more occurrence of `word` and return its new frequency.
    fn insert(&mut self, word: &str) -> Result<u32>;

    /// Get the frequency of `word`, 0 when it was never inserted.
    fn frequency(&self, word: &str) -> u32;

    /// Check whether `word` was ever inserted.
    fn contains(&self, word: &str) -> bool {
        self.frequency(word) > 0
    }

    /// Number of distinct words held.
    fn len(&self) -> usize;

    /// Check if no word has been inserted.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit every entry as `(frequency, word)` in the index's natural order.
    fn for_each_entry(&self, visitor: &mut dyn FnMut(u32, &str));
}

#[cfg(test)]
mod proptests;
