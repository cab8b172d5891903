use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use prettytable::{Table, format, row};

use pdb_trace::ParseCode;
use pdb_trace::io::{Error, Extraction, IoContext, write_report};
use pdb_trace::ops::{SurveyObserver, SurveySummary, survey};

use crate::commands::{FORMAT_VIOLATION_EXIT, print_boxed_label};

/// Processes every PDB file under the given paths and tallies the outcomes.
#[derive(Debug, Args)]
pub struct SurveyArgs {
    /// Files or directories to process. Directories are searched recursively.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
    /// File name suffix selecting PDB files inside directories.
    #[arg(long, value_name = "SUFFIX", default_value = "ent.gz")]
    pub extension: String,
    /// Write every accepted report to `<DIR>/<pdb_id>.trace`. Existing files are kept.
    #[arg(long, value_name = "DIR")]
    pub report_dir: Option<PathBuf>,
    /// Maximum number of worker threads (default: all available).
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

/// Runs the survey and prints the tally table to stderr.
///
/// Returns the summary so the caller can pick the exit status.
pub fn run(ctx: &IoContext, args: &SurveyArgs) -> Result<SurveySummary> {
    configure_threads(args.jobs)?;

    let paths = collect_paths(&args.paths, &args.extension)?;
    if paths.is_empty() {
        bail!(
            "No files ending in '.{}' found under the given paths.",
            args.extension.trim_start_matches('.')
        );
    }
    info!("Collected {} files", paths.len());

    if let Some(dir) = &args.report_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create report directory {}", dir.display()))?;
    }

    let observer = ProgressObserver::new(paths.len() as u64, args.report_dir.as_deref());
    let summary = survey(&paths, ctx, &observer);
    observer.bar.finish_and_clear();

    print_summary(&summary)?;
    Ok(summary)
}

#[cfg(feature = "parallel")]
fn configure_threads(jobs: Option<usize>) -> Result<()> {
    if let Some(num_threads) = jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .context("Failed to configure worker threads")?;
        info!("Using {num_threads} threads");
    }
    Ok(())
}

#[cfg(not(feature = "parallel"))]
fn configure_threads(jobs: Option<usize>) -> Result<()> {
    if jobs.is_some() {
        warn!("Built without the `parallel` feature; --jobs is ignored");
    }
    Ok(())
}

/// Expands directories into the sorted list of files whose names end in `.<extension>`.
///
/// Paths given explicitly are kept whatever their name.
fn collect_paths(roots: &[PathBuf], extension: &str) -> Result<Vec<PathBuf>> {
    let suffix = format!(".{}", extension.trim_start_matches('.'));
    let mut files = Vec::new();

    for root in roots {
        if root.is_dir() {
            walk(root, &suffix, &mut files)?;
        } else if root.exists() {
            files.push(root.clone());
        } else {
            bail!("Input path {} does not exist.", root.display());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn walk(dir: &Path, suffix: &str, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;

    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read directory {}", dir.display()))?
            .path();
        if path.is_dir() {
            walk(&path, suffix, files)?;
        } else if path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(suffix))
        {
            files.push(path);
        }
    }
    Ok(())
}

struct ProgressObserver<'a> {
    bar: ProgressBar,
    report_dir: Option<&'a Path>,
}

impl<'a> ProgressObserver<'a> {
    fn new(len: u64, report_dir: Option<&'a Path>) -> Self {
        let bar = ProgressBar::new(len);
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style.progress_chars("=> "));
        Self { bar, report_dir }
    }
}

impl SurveyObserver for ProgressObserver<'_> {
    fn on_extraction(&self, path: &Path, extraction: &Extraction) -> Result<(), Error> {
        let Some(dir) = self.report_dir else {
            return Ok(());
        };
        if !extraction.is_success() {
            return Ok(());
        }

        let target = dir.join(format!("{}.trace", report_stem(path, extraction)));
        // create_new keeps the first report when two files share an identifier
        let file = match OpenOptions::new().write(true).create_new(true).open(&target) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                warn!(
                    "Skipping report for {}: {} already exists",
                    path.display(),
                    target.display()
                );
                return Ok(());
            }
            Err(e) => return Err(Error::from_io(e, Some(target))),
        };
        write_report(BufWriter::new(file), &extraction.report).map_err(|e| e.with_path(&target))
    }

    fn on_complete(&self, _path: &Path) {
        self.bar.inc(1);
    }
}

/// Report file stem: the structure identifier, or the file name up to its first dot.
fn report_stem(path: &Path, extraction: &Extraction) -> String {
    let identifier = extraction.report.identifier.trim();
    if !identifier.is_empty() {
        return identifier.to_string();
    }
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .unwrap_or("unnamed")
        .to_string()
}

fn print_summary(summary: &SurveySummary) -> Result<()> {
    let mut stderr = io::stderr().lock();

    print_boxed_label(&mut stderr, "Survey Summary")?;

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row!["Code", "Exit", "Files"]);
    for code in ParseCode::ALL {
        let count = summary.count(code);
        if count > 0 {
            table.add_row(row![code.name(), code.exit_code(), count]);
        }
    }
    if !summary.failures.is_empty() {
        table.add_row(row![
            "FORMAT_VIOLATION",
            FORMAT_VIOLATION_EXIT,
            summary.failures.len()
        ]);
    }
    table.add_row(row!["TOTAL", "", summary.total()]);
    table
        .print(&mut stderr)
        .context("Failed to render survey summary")?;

    for (path, err) in &summary.failures {
        writeln!(&mut stderr, "{}: {err}", path.display())?;
    }
    Ok(())
}
