//! Command implementations for the spellindex CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::analysis::tokenizer::WordTokenizer;
use crate::cli::args::SpellIndexArgs;
use crate::cli::output::{SpellcheckReport, write_entries};
use crate::config::{IndexConfig, IndexStructure};
use crate::error::{Result, SpellIndexError};
use crate::index::FrequencyIndex;
use crate::index::hash::HashIndex;
use crate::index::tree::TreeIndex;

/// Execute the CLI against the process's standard streams.
pub fn execute_command(args: SpellIndexArgs) -> Result<()> {
    let config = args.index_config()?;
    let check = args.check.as_deref().map(open_for_reading).transpose()?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = BufWriter::new(stdout.lock());

    run(&args, &config, stdin.lock(), check, &mut out, &mut stderr.lock())?;
    out.flush()?;
    Ok(())
}

/// Open the spellcheck file, naming it in the error when it cannot be read.
pub fn open_for_reading(path: &Path) -> Result<BufReader<File>> {
    File::open(path).map(BufReader::new).map_err(|e| {
        SpellIndexError::other(format!("Failed to open file {}: {e}", path.display()))
    })
}

/// Build the configured index from `input`, then list it, summarize it or
/// spellcheck `check` against it.
pub fn run<R, C>(
    args: &SpellIndexArgs,
    config: &IndexConfig,
    input: R,
    check: Option<C>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()>
where
    R: BufRead,
    C: BufRead,
{
    let tokenizer = WordTokenizer::new(config.max_word_len)?;

    match config.structure {
        IndexStructure::HashTable => {
            let mut index = HashIndex::new(config.capacity, config.probing)?;
            let fill_time = fill(&mut index, &tokenizer, input)?;

            if args.entire_table {
                index.write_entire_table(&mut *out)?;
            }

            if let Some(check) = check {
                spellcheck(&index, &tokenizer, check, fill_time, out, err)?;
            } else if args.print_stats {
                write!(out, "{}", index.statistics(config.snapshots))?;
            } else {
                write_entries(&index, &mut *out)?;
            }
        }
        IndexStructure::Tree => {
            let mut tree = TreeIndex::new(config.tree_variant);
            let fill_time = fill(&mut tree, &tokenizer, input)?;

            if let Some(check) = check {
                spellcheck(&tree, &tokenizer, check, fill_time, out, err)?;
            } else {
                write_entries(&tree, &mut *out)?;
                if args.output_dot {
                    write_dot_file(&tree, &args.dot_path)?;
                    writeln!(out, "Creating dot file '{}'", args.dot_path.display())?;
                }
            }
        }
    }

    Ok(())
}

/// Insert every word of `input`, returning how long it took.
///
/// Words that no longer fit into a full hash table are dropped with a warning.
fn fill<R: BufRead>(
    index: &mut dyn FrequencyIndex,
    tokenizer: &WordTokenizer,
    input: R,
) -> Result<Duration> {
    let start = Instant::now();
    let mut total = 0usize;
    let mut dropped = 0usize;

    for word in tokenizer.stream(input) {
        let word = word?;
        total += 1;
        match index.insert(&word) {
            Ok(_) => {}
            Err(SpellIndexError::IndexFull { .. }) => dropped += 1,
            Err(e) => return Err(e),
        }
    }

    let elapsed = start.elapsed();
    if dropped > 0 {
        log::warn!("index full: {dropped} words could not be stored");
    }
    log::debug!(
        "filled index with {total} words ({} distinct) in {elapsed:?}",
        index.len()
    );

    Ok(elapsed)
}

/// Print each word of `check` missing from `index`, then the timing summary.
fn spellcheck<C: BufRead>(
    index: &dyn FrequencyIndex,
    tokenizer: &WordTokenizer,
    check: C,
    fill_time: Duration,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<SpellcheckReport> {
    let start = Instant::now();
    let mut unknown = 0usize;

    for word in tokenizer.stream(check) {
        let word = word?;
        if !index.contains(&word) {
            writeln!(out, "{word}")?;
            unknown += 1;
        }
    }

    let report = SpellcheckReport::new(fill_time, start.elapsed(), unknown);
    report.write_summary(err)?;
    log::info!("spellcheck found {unknown} unknown words");

    Ok(report)
}

fn write_dot_file(tree: &TreeIndex, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    tree.write_dot(&mut writer)?;
    writer.flush()?;
    Ok(())
}
