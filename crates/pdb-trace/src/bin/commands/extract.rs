use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use pdb_trace::ParseCode;
use pdb_trace::io::{IoContext, write_diagnostics, write_report};

use crate::commands::{IoParameters, load_input, open_output, run_with_spinner};

/// Extracts the alpha-carbon trace of a single PDB stream.
#[derive(Debug, Default, Args)]
pub struct ExtractArgs {}

/// Writes the trace report and returns the acceptance code.
///
/// Rejected structures get the report header and sequence block on the output, the code name on
/// stderr, then the gap diagnostics on the output.
pub fn run(io_params: &IoParameters, ctx: &IoContext, _args: &ExtractArgs) -> Result<ParseCode> {
    let extraction = run_with_spinner("Extracting alpha-carbon trace", || {
        load_input(io_params, ctx)
    })?;

    let mut writer = open_output(io_params)?;
    write_report(&mut writer, &extraction.report).context("Failed to write trace report")?;

    if !extraction.is_success() {
        writer.flush().context("Failed to flush output writer")?;
        eprintln!("{}", extraction.code);
        write_diagnostics(&mut writer, &extraction.diagnostics)
            .context("Failed to write gap diagnostics")?;
    }

    writer.flush().context("Failed to flush output writer")?;
    Ok(extraction.code)
}
