//! Text analysis for building word-frequency indexes.
//!
//! The only stage is tokenization: turning a character stream into the
//! lowercase words that the indexes count.

pub mod tokenizer;
