use std::fs::File;
use std::io::{self as stdio, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;

use pdb_trace::io::{Extraction, IoContext, open_input, read_pdb_trace};

pub mod extract;
pub mod survey;

/// Exit status for inputs that violate the fixed-column format or cannot be read.
pub const FORMAT_VIOLATION_EXIT: u8 = 64;

/// Aggregated IO parameters shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct IoParameters {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// Runs the record processor over the configured input source.
///
/// Paths ending in `.gz` are decompressed on the fly; stdin is read as plain text.
pub fn load_input(params: &IoParameters, ctx: &IoContext) -> Result<Extraction> {
    if let Some(path) = &params.input {
        let reader = open_input(path)
            .with_context(|| format!("Failed to open input file {}", path.display()))?;
        read_pdb_trace(reader, ctx)
            .map_err(|e| e.with_path(path))
            .with_context(|| format!("Failed to parse PDB input from {}", path.display()))
    } else {
        let stdin = stdio::stdin();
        if stdin.is_terminal() {
            bail!(
                "No --input provided and stdin is a TTY. Provide -i/--input or pipe a PDB file into pdbtrace."
            );
        }
        let reader = BufReader::new(stdin.lock());
        read_pdb_trace(reader, ctx).context("Failed to parse PDB input from stdin")
    }
}

/// Opens the configured output destination, falling back to stdout.
pub fn open_output(params: &IoParameters) -> Result<Box<dyn Write>> {
    match &params.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(stdio::stdout().lock()))),
    }
}

/// Wraps long-running operations with a spinner rendered to stderr.
pub fn run_with_spinner<T, F>(message: &str, work: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());

    let result = work();

    // the spinner line must not precede the reason code on stderr
    spinner.finish_and_clear();

    result
}

/// Prints a rounded box around a section title.
pub fn print_boxed_label<W: Write>(writer: &mut W, title: &str) -> stdio::Result<()> {
    let inner = format!(" {title} ");
    let width = inner.chars().count();
    writeln!(writer, "╭{}╮", "─".repeat(width))?;
    writeln!(writer, "│{}│", inner)?;
    writeln!(writer, "╰{}╯", "─".repeat(width))?;
    Ok(())
}
