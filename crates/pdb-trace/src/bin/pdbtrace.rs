use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::{ArgAction, Parser, Subcommand};

mod commands;

use commands::{FORMAT_VIOLATION_EXIT, IoParameters};
use commands::{extract, survey};

use pdb_trace::io::IoContext;

#[derive(Parser, Debug)]
#[command(
    name = "pdbtrace",
    about = "Extracts gap-checked alpha-carbon traces and sequences from legacy PDB files.",
    version,
    author,
    arg_required_else_help = true
)]
struct Cli {
    /// Input file path (`.gz` is decompressed). When omitted, stdin is used.
    #[arg(short, long, value_name = "FILE", global = true)]
    input: Option<PathBuf>,
    /// Output file path. When omitted, stdout is used.
    #[arg(short, long, value_name = "FILE", global = true)]
    output: Option<PathBuf>,
    /// Reject structures whose resolution is at or above this value (Å).
    #[arg(long, value_name = "ANGSTROM", global = true)]
    max_resolution: Option<f64>,
    /// Keep reading after a nucleic-acid header or a low resolution instead of stopping early.
    #[arg(long, global = true)]
    full_scan: bool,
    /// Increase verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process one PDB stream and print its trace report.
    Extract(extract::ExtractArgs),
    /// Process every PDB file under the given paths and tally the outcomes.
    Survey(survey::SurveyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(FORMAT_VIOLATION_EXIT)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let io_params = IoParameters {
        input: cli.input.clone(),
        output: cli.output.clone(),
    };
    let io_context = build_context(&cli)?;

    match cli.command {
        Command::Extract(args) => {
            let code = extract::run(&io_params, &io_context, &args)?;
            Ok(ExitCode::from(code.exit_code()))
        }
        Command::Survey(args) => {
            let summary = survey::run(&io_context, &args)?;
            if summary.failures.is_empty() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(FORMAT_VIOLATION_EXIT))
            }
        }
    }
}

fn build_context(cli: &Cli) -> Result<IoContext> {
    let mut context = IoContext::new_default();

    if let Some(max_resolution) = cli.max_resolution {
        if !(max_resolution.is_finite() && max_resolution > 0.0) {
            bail!("--max-resolution must be a positive number, got {max_resolution}.");
        }
        context = context.with_max_resolution(max_resolution);
    }

    if cli.full_scan {
        context.stop_on_rejected_header = false;
        context.stop_on_low_resolution = false;
    }

    Ok(context)
}
