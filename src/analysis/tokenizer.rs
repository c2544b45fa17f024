//! Word tokenizer feeding the frequency indexes.
//!
//! A word is a maximal run of ASCII alphanumeric characters, lowercased.
//! Apostrophes inside a run do not break it but are dropped from the output,
//! so `Don't` yields `dont`. Runs longer than the configured maximum are cut
//! into consecutive words of at most that many characters.
//!
//! # Examples
//!
//! ```
//! use spellindex::analysis::tokenizer::WordTokenizer;
//!
//! let tokenizer = WordTokenizer::new(99).unwrap();
//! let words: Vec<String> = tokenizer.words("Don't PANIC, 42 times!").collect();
//! assert_eq!(words, vec!["dont", "panic", "42", "times"]);
//! ```

use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::Arc;

use regex::Regex;

use crate::error::{Result, SpellIndexError};

/// Matches a run that starts on an alphanumeric and may carry apostrophes.
const WORD_PATTERN: &str = r"[A-Za-z0-9][A-Za-z0-9']*";

/// Default maximum word length, one less than a 100-byte word buffer.
pub const DEFAULT_MAX_WORD_LEN: usize = 99;

/// Extracts normalized words from text.
#[derive(Clone, Debug)]
pub struct WordTokenizer {
    pattern: Arc<Regex>,
    max_len: usize,
}

impl WordTokenizer {
    /// Create a tokenizer that cuts words at `max_len` characters.
    pub fn new(max_len: usize) -> Result<Self> {
        if max_len == 0 {
            return Err(SpellIndexError::invalid_argument(
                "maximum word length must be positive",
            ));
        }

        let regex = Regex::new(WORD_PATTERN)
            .map_err(|e| SpellIndexError::other(format!("Invalid word pattern: {e}")))?;

        Ok(WordTokenizer {
            pattern: Arc::new(regex),
            max_len,
        })
    }

    /// Get the maximum word length.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Iterate over the words of `text` in order of appearance.
    pub fn words<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        self.pattern.find_iter(text).flat_map(move |mat| {
            let normalized: Vec<u8> = mat
                .as_str()
                .bytes()
                .filter(|&b| b != b'\'')
                .map(|b| b.to_ascii_lowercase())
                .collect();

            normalized
                .chunks(self.max_len)
                .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
                .collect::<Vec<_>>()
        })
    }

    /// Wrap a buffered reader into a stream of words.
    pub fn stream<R: BufRead>(&self, reader: R) -> WordStream<R> {
        WordStream {
            tokenizer: self.clone(),
            reader,
            line: Vec::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WORD_LEN).expect("Default word pattern should be valid")
    }
}

/// Lazily reads words from a buffered reader, one line at a time.
///
/// Words never span lines because a newline always ends a run.
pub struct WordStream<R> {
    tokenizer: WordTokenizer,
    reader: R,
    line: Vec<u8>,
    pending: VecDeque<String>,
    done: bool,
}

impl<R: BufRead> WordStream<R> {
    /// Return the next word, `Ok(None)` once the stream is exhausted.
    pub fn next_word(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(word) = self.pending.pop_front() {
                return Ok(Some(word));
            }
            if self.done {
                return Ok(None);
            }

            self.line.clear();
            if self.reader.read_until(b'\n', &mut self.line)? == 0 {
                self.done = true;
                continue;
            }

            let text = String::from_utf8_lossy(&self.line);
            self.pending.extend(self.tokenizer.words(&text));
        }
    }
}

impl<R: BufRead> Iterator for WordStream<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_word().transpose()
    }
}
