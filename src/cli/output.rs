//! Output formatting for CLI commands.

use std::io::Write;
use std::time::Duration;

use crate::error::Result;
use crate::index::FrequencyIndex;

/// Timing and outcome of a spellcheck run.
#[derive(Debug, Clone, PartialEq)]
pub struct SpellcheckReport {
    pub fill_seconds: f64,
    pub search_seconds: f64,
    pub unknown_words: usize,
}

impl SpellcheckReport {
    pub fn new(fill: Duration, search: Duration, unknown_words: usize) -> Self {
        SpellcheckReport {
            fill_seconds: fill.as_secs_f64(),
            search_seconds: search.as_secs_f64(),
            unknown_words,
        }
    }

    /// Write the timing summary printed after the unknown words.
    pub fn write_summary(&self, err: &mut dyn Write) -> Result<()> {
        writeln!(err, "Fill time\t: {:8.7}", self.fill_seconds)?;
        writeln!(err, "Search time\t: {:8.7}", self.search_seconds)?;
        writeln!(err, "Unknown words = {}", self.unknown_words)?;
        Ok(())
    }
}

/// Write one `frequency word` listing line.
pub fn write_entry(out: &mut dyn Write, frequency: u32, word: &str) -> Result<()> {
    writeln!(out, "{frequency:<4} {word}")?;
    Ok(())
}

/// List every entry of an index in its natural order.
pub fn write_entries(index: &dyn FrequencyIndex, out: &mut dyn Write) -> Result<()> {
    let mut result = Ok(());
    index.for_each_entry(&mut |frequency: u32, word: &str| {
        if result.is_ok() {
            result = write_entry(&mut *out, frequency, word);
        }
    });
    result
}
