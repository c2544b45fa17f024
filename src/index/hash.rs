//! Fixed-capacity open-addressing hash index.
//!
//! Words are hashed with a polynomial rolling hash (`h = c + 31 * h` over the
//! bytes, wrapping at 32 bits) and reduced modulo the capacity to a home slot.
//! Collisions are resolved by probing with a fixed step: `1` for linear
//! probing, `1 + home % (capacity - 1)` for double hashing. The table never
//! grows and never rehashes, so a key keeps its slot for the lifetime of the
//! index.
//!
//! Every newly placed key records how many probes it took to place. These
//! counts are kept in insertion order and drive [`HashIndex::statistics`],
//! which reports how the table behaved as it filled up.
//!
//! # Examples
//!
//! ```
//! use spellindex::index::hash::{HashIndex, ProbingMethod};
//!
//! let mut index = HashIndex::new(7, ProbingMethod::LinearProbing).unwrap();
//! index.insert("cat").unwrap();
//! index.insert("dog").unwrap();
//! assert_eq!(index.insert("cat").unwrap(), 2);
//!
//! assert_eq!(index.search("cat"), 2);
//! assert_eq!(index.search("bird"), 0);
//! ```

use std::fmt;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpellIndexError};
use crate::index::FrequencyIndex;
use crate::util::prime::is_prime;

/// Collision resolution strategy, fixed when the index is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbingMethod {
    /// Probe the next slot each time.
    #[default]
    LinearProbing,
    /// Probe with a step derived from the home slot.
    DoubleHashing,
}

impl ProbingMethod {
    /// Human-readable name used in statistics reports.
    pub fn name(&self) -> &'static str {
        match self {
            ProbingMethod::LinearProbing => "Linear Probing",
            ProbingMethod::DoubleHashing => "Double Hashing",
        }
    }
}

impl fmt::Display for ProbingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Polynomial rolling hash of a word.
pub fn hash_word(word: &str) -> u32 {
    word.bytes()
        .fold(0u32, |h, b| u32::from(b).wrapping_add(h.wrapping_mul(31)))
}

#[derive(Debug, Clone)]
struct Slot {
    key: String,
    frequency: u32,
    collisions: u32,
}

/// A view of one occupied slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashEntry<'a> {
    /// Physical slot index.
    pub slot: usize,
    /// The stored word.
    pub key: &'a str,
    /// Number of times the word was inserted.
    pub frequency: u32,
    /// Probes it took to place the word.
    pub collisions: u32,
}

/// Open-addressing word-frequency table.
#[derive(Debug, Clone)]
pub struct HashIndex {
    slots: Vec<Option<Slot>>,
    /// Collisions per placed key, indexed by insertion order.
    collision_counts: Vec<u32>,
    method: ProbingMethod,
}

impl HashIndex {
    /// Create an empty table with `capacity` slots.
    ///
    /// Double hashing needs a prime capacity for its probe sequence to reach
    /// every slot, so a composite capacity is rejected for that method.
    pub fn new(capacity: usize, method: ProbingMethod) -> Result<Self> {
        if capacity == 0 {
            return Err(SpellIndexError::invalid_argument(
                "hash table capacity must be positive",
            ));
        }
        if method == ProbingMethod::DoubleHashing && !is_prime(capacity) {
            return Err(SpellIndexError::invalid_argument(format!(
                "double hashing requires a prime capacity, got {capacity}"
            )));
        }

        log::debug!("creating hash index: capacity={capacity}, method={method}");

        Ok(HashIndex {
            slots: vec![None; capacity],
            collision_counts: Vec::new(),
            method,
        })
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The probing method in use.
    pub fn method(&self) -> ProbingMethod {
        self.method
    }

    /// Number of distinct keys placed.
    pub fn len(&self) -> usize {
        self.collision_counts.len()
    }

    /// Check if the table holds no keys.
    pub fn is_empty(&self) -> bool {
        self.collision_counts.is_empty()
    }

    /// Collision counts in insertion order.
    pub fn collision_counts(&self) -> &[u32] {
        &self.collision_counts
    }

    fn home_slot(&self, word: &str) -> usize {
        hash_word(word) as usize % self.capacity()
    }

    fn step(&self, home: usize) -> usize {
        match self.method {
            ProbingMethod::LinearProbing => 1,
            ProbingMethod::DoubleHashing => 1 + home % (self.capacity() - 1),
        }
    }

    /// Count one more occurrence of `word`, returning its new frequency.
    ///
    /// Fails with [`SpellIndexError::IndexFull`] when the probe sequence
    /// returns to the home slot without finding the word or a free slot.
    pub fn insert(&mut self, word: &str) -> Result<u32> {
        let capacity = self.capacity();
        let home = self.home_slot(word);
        let step = self.step(home);

        let mut slot = home;
        let mut collisions = 0u32;
        loop {
            let entry = match self.slots[slot].as_mut() {
                None => break,
                Some(entry) => entry,
            };
            if entry.key == word {
                entry.frequency += 1;
                return Ok(entry.frequency);
            }

            slot = (slot + step) % capacity;
            collisions += 1;
            if slot == home {
                return Err(SpellIndexError::index_full(capacity));
            }
        }

        self.slots[slot] = Some(Slot {
            key: word.to_string(),
            frequency: 1,
            collisions,
        });
        self.collision_counts.push(collisions);

        Ok(1)
    }

    /// Get the frequency of `word`, 0 if it is absent.
    ///
    /// Follows the same probe sequence as [`insert`](Self::insert) and gives
    /// up after `capacity` probes, so a full table cannot loop forever.
    pub fn search(&self, word: &str) -> u32 {
        let capacity = self.capacity();
        let home = self.home_slot(word);
        let step = self.step(home);

        let mut slot = home;
        for _ in 0..capacity {
            match &self.slots[slot] {
                None => return 0,
                Some(entry) if entry.key == word => return entry.frequency,
                Some(_) => slot = (slot + step) % capacity,
            }
        }

        0
    }

    /// Iterate over occupied slots in slot order.
    pub fn entries(&self) -> impl Iterator<Item = HashEntry<'_>> {
        self.slots.iter().enumerate().filter_map(|(slot, entry)| {
            entry.as_ref().map(|entry| HashEntry {
                slot,
                key: &entry.key,
                frequency: entry.frequency,
                collisions: entry.collisions,
            })
        })
    }

    /// Call `visitor(frequency, key)` for each occupied slot in slot order.
    pub fn iterate<F>(&self, mut visitor: F)
    where
        F: FnMut(u32, &str),
    {
        for entry in self.entries() {
            visitor(entry.frequency, entry.key);
        }
    }

    /// Summarize collision behaviour at `num_snapshots` evenly spaced fill levels.
    ///
    /// Snapshot `i` covers the first `capacity * percent / 100` keys inserted,
    /// where `percent = 100 * i / num_snapshots`. Snapshots covering zero keys
    /// or more keys than were ever inserted are left out of the report.
    pub fn statistics(&self, num_snapshots: usize) -> StatisticsReport {
        let capacity = self.capacity();
        let mut rows = Vec::new();

        for i in 1..=num_snapshots {
            let percent_full = 100 * i / num_snapshots;
            let current_entries = capacity.saturating_mul(percent_full) / 100;
            if current_entries == 0 || current_entries > self.len() {
                continue;
            }

            let prefix = &self.collision_counts[..current_entries];
            let at_home = prefix.iter().filter(|&&c| c == 0).count();
            let total: u64 = prefix.iter().map(|&c| u64::from(c)).sum();
            let max_collisions = prefix.iter().copied().max().unwrap_or(0);

            rows.push(StatisticsRow {
                percent_full,
                current_entries,
                percent_at_home: at_home as f64 * 100.0 / current_entries as f64,
                average_collisions: total as f64 / current_entries as f64,
                max_collisions,
            });
        }

        StatisticsReport {
            method: self.method,
            rows,
        }
    }

    /// Write every occupied slot as `slot frequency collisions key`.
    pub fn write_entire_table<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "  Pos  Freq  Stats  Word")?;
        writeln!(out, "{}", "-".repeat(40))?;
        for entry in self.entries() {
            writeln!(
                out,
                "{:5} {:5} {:5}   {}",
                entry.slot, entry.frequency, entry.collisions, entry.key
            )?;
        }
        Ok(())
    }
}

impl FrequencyIndex for HashIndex {
    fn insert(&mut self, word: &str) -> Result<u32> {
        HashIndex::insert(self, word)
    }

    fn frequency(&self, word: &str) -> u32 {
        self.search(word)
    }

    fn len(&self) -> usize {
        HashIndex::len(self)
    }

    fn for_each_entry(&self, visitor: &mut dyn FnMut(u32, &str)) {
        self.iterate(visitor);
    }
}

/// One snapshot of collision behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsRow {
    pub percent_full: usize,
    pub current_entries: usize,
    pub percent_at_home: f64,
    pub average_collisions: f64,
    pub max_collisions: u32,
}

/// Collision statistics for a table, rendered as a fixed-width report by `Display`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsReport {
    pub method: ProbingMethod,
    pub rows: Vec<StatisticsRow>,
}

const STATS_RULE: &str = "-----------------------------------------------------";

impl fmt::Display for StatisticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}\n\n", self.method)?;
        writeln!(f, "Percent   Current   Percent    Average      Maximum")?;
        writeln!(f, " Full     Entries   At Home   Collisions   Collisions")?;
        writeln!(f, "{STATS_RULE}")?;
        for row in &self.rows {
            writeln!(
                f,
                "{:4} {:10} {:10.1} {:10.2} {:11}",
                row.percent_full,
                row.current_entries,
                row.percent_at_home,
                row.average_collisions,
                row.max_collisions
            )?;
        }
        write!(f, "{STATS_RULE}\n\n")
    }
}
