//! Command line argument parsing for the spellindex CLI using clap.

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::config::{IndexConfig, IndexStructure};
use crate::error::Result;
use crate::index::hash::ProbingMethod;
use crate::index::tree::TreeVariant;
use crate::util::prime::next_prime;

/// Default file name for the tree's DOT output.
pub const DEFAULT_DOT_PATH: &str = "tree-view.dot";

/// spellindex - count words from stdin and spellcheck files against them
#[derive(Parser, Debug, Clone)]
#[command(name = "spellindex")]
#[command(about = "Build a word-frequency index from stdin, then list, summarize or spellcheck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SpellIndexArgs {
    /// Use a binary search tree instead of a hash table
    #[arg(short = 'T', long)]
    pub tree: bool,

    /// Print every word of FILE that is not in the index
    #[arg(short = 'c', long, value_name = "FILE")]
    pub check: Option<PathBuf>,

    /// Resolve hash collisions by double hashing
    #[arg(short = 'd', long)]
    pub double_hashing: bool,

    /// Dump every occupied hash table slot
    #[arg(short = 'e', long)]
    pub entire_table: bool,

    /// Write a Graphviz DOT view of the tree
    #[arg(short = 'o', long)]
    pub output_dot: bool,

    /// Where to write the DOT view
    #[arg(long, value_name = "FILE", default_value = DEFAULT_DOT_PATH)]
    pub dot_path: PathBuf,

    /// Print hash table collision statistics
    #[arg(short = 'p', long)]
    pub print_stats: bool,

    /// Balance the tree as a red-black tree
    #[arg(short = 'r', long)]
    pub red_black: bool,

    /// Number of statistics snapshots
    #[arg(short = 's', long, value_name = "N")]
    pub snapshots: Option<usize>,

    /// Hash table size, rounded up to the next prime
    #[arg(short = 't', long, value_name = "N")]
    pub table_size: Option<usize>,

    /// JSON configuration file; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,
}

impl SpellIndexArgs {
    /// Get the effective verbosity level: 0 when quiet, otherwise 1 plus one per `-v`.
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }

    /// Log level for the effective verbosity.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity() {
            0 => LevelFilter::Error, // Quiet mode
            1 => LevelFilter::Warn,  // Default
            2 => LevelFilter::Info,  // -v
            _ => LevelFilter::Debug, // -vv and up
        }
    }

    /// Resolve the index configuration: defaults, then the config file, then flags.
    pub fn index_config(&self) -> Result<IndexConfig> {
        let mut config = match &self.config {
            Some(path) => IndexConfig::load_from_file(path)?,
            None => IndexConfig::default(),
        };

        if self.tree {
            config.structure = IndexStructure::Tree;
        }

        match config.structure {
            IndexStructure::HashTable => {
                if self.red_black {
                    log::warn!("-r only applies to trees; ignoring it");
                }
                if self.output_dot {
                    log::warn!("-o only applies to trees; ignoring it");
                }
                if self.double_hashing {
                    config.probing = ProbingMethod::DoubleHashing;
                }
                if let Some(size) = self.table_size {
                    config.capacity = next_prime(size);
                }
                if let Some(snapshots) = self.snapshots {
                    config.snapshots = snapshots;
                }
            }
            IndexStructure::Tree => {
                for (set, flag) in [
                    (self.double_hashing, "-d"),
                    (self.entire_table, "-e"),
                    (self.print_stats, "-p"),
                    (self.snapshots.is_some(), "-s"),
                    (self.table_size.is_some(), "-t"),
                ] {
                    if set {
                        log::warn!("{flag} only applies to hash tables; ignoring it");
                    }
                }
                if self.red_black {
                    config.tree_variant = TreeVariant::RedBlack;
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> SpellIndexArgs {
        SpellIndexArgs::try_parse_from(std::iter::once("spellindex").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = parse(&[]).index_config().unwrap();
        assert_eq!(config, IndexConfig::default());
    }

    #[test]
    fn test_hash_flags() {
        let args = parse(&["-d", "-t", "100", "-s", "5", "-p"]);
        assert!(args.print_stats);

        let config = args.index_config().unwrap();
        assert_eq!(config.structure, IndexStructure::HashTable);
        assert_eq!(config.probing, ProbingMethod::DoubleHashing);
        assert_eq!(config.capacity, 101);
        assert_eq!(config.snapshots, 5);
    }

    #[test]
    fn test_tree_flags() {
        let args = parse(&["-T", "-r", "-o", "-t", "50"]);
        let config = args.index_config().unwrap();
        assert_eq!(config.structure, IndexStructure::Tree);
        assert_eq!(config.tree_variant, TreeVariant::RedBlack);
        // Table size is ignored for trees.
        assert_eq!(config.capacity, 113);
        assert_eq!(args.dot_path, PathBuf::from(DEFAULT_DOT_PATH));
    }

    #[test]
    fn test_red_black_without_tree_is_ignored() {
        let config = parse(&["-r"]).index_config().unwrap();
        assert_eq!(config.structure, IndexStructure::HashTable);
        assert_eq!(config.tree_variant, TreeVariant::Plain);
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(parse(&[]).verbosity(), 1);
        assert_eq!(parse(&["-v"]).verbosity(), 2);
        assert_eq!(parse(&["-vvv"]).verbosity(), 4);
        assert_eq!(parse(&["-vv", "-q"]).verbosity(), 0);
    }

    #[test]
    fn test_log_level() {
        assert_eq!(parse(&[]).log_level(), LevelFilter::Warn);
        assert_eq!(parse(&["-v"]).log_level(), LevelFilter::Info);
        assert_eq!(parse(&["-vv"]).log_level(), LevelFilter::Debug);
        assert_eq!(parse(&["-vvvv"]).log_level(), LevelFilter::Debug);
        assert_eq!(parse(&["-v", "-q"]).log_level(), LevelFilter::Error);
    }

    #[test]
    fn test_check_file_argument() {
        let args = parse(&["-c", "words.txt"]);
        assert_eq!(args.check, Some(PathBuf::from("words.txt")));
    }
}
