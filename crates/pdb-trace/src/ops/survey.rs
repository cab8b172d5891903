//! Batch processing of many independent PDB files with a per-code tally.
//!
//! Each file gets its own parse state, so files are processed in parallel when the `parallel`
//! feature is enabled. Callers observe per-file results through [`SurveyObserver`], which is how
//! the CLI drives its progress bar and writes accepted reports.

use crate::io::{Error, Extraction, IoContext, open_input, read_pdb_trace};
use crate::ops::validity::ParseCode;
use crate::utils::parallel::*;
use log::{info, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Hooks invoked while a survey runs. Calls may arrive from several threads at once.
pub trait SurveyObserver: Sync {
    /// Called for every file that was processed without a fatal error.
    ///
    /// Returning an error turns the file into a survey failure.
    fn on_extraction(&self, _path: &Path, _extraction: &Extraction) -> Result<(), Error> {
        Ok(())
    }

    /// Called once per file after it has been handled, whatever the outcome.
    fn on_complete(&self, _path: &Path) {}
}

impl SurveyObserver for () {}

/// Outcome counts of a survey.
#[derive(Debug, Default)]
pub struct SurveySummary {
    /// Files per acceptance code.
    pub counts: BTreeMap<ParseCode, usize>,
    /// Files that aborted with a fatal error, in input order.
    pub failures: Vec<(PathBuf, Error)>,
}

impl SurveySummary {
    pub fn count(&self, code: ParseCode) -> usize {
        self.counts.get(&code).copied().unwrap_or(0)
    }

    pub fn accepted(&self) -> usize {
        self.count(ParseCode::Success)
    }

    /// Number of files that received a code (failures excluded).
    pub fn processed(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn total(&self) -> usize {
        self.processed() + self.failures.len()
    }
}

/// Runs every file through the record processor and tallies the codes.
///
/// # Arguments
///
/// * `paths` - Files to process; `.gz` paths are decompressed transparently.
/// * `context` - Residue table and acceptance policy shared by all files.
/// * `observer` - Per-file hooks.
///
/// # Returns
///
/// A [`SurveySummary`]; fatal errors are collected instead of aborting the survey.
pub fn survey<O: SurveyObserver>(
    paths: &[PathBuf],
    context: &IoContext,
    observer: &O,
) -> SurveySummary {
    let results: Vec<Result<ParseCode, Error>> = paths
        .par_iter()
        .map(|path| {
            let result = process_file(path, context, observer);
            observer.on_complete(path);
            result
        })
        .collect();

    let mut summary = SurveySummary::default();
    for (path, result) in paths.iter().zip(results) {
        match result {
            Ok(code) => *summary.counts.entry(code).or_default() += 1,
            Err(err) => {
                warn!("{err}");
                summary.failures.push((path.clone(), err));
            }
        }
    }

    info!(
        "Surveyed {} files: {} accepted, {} rejected, {} failed",
        summary.total(),
        summary.accepted(),
        summary.processed() - summary.accepted(),
        summary.failures.len()
    );
    summary
}

fn process_file<O: SurveyObserver>(
    path: &Path,
    context: &IoContext,
    observer: &O,
) -> Result<ParseCode, Error> {
    let reader = open_input(path)?;
    let extraction = read_pdb_trace(reader, context).map_err(|e| e.with_path(path))?;
    observer
        .on_extraction(path, &extraction)
        .map_err(|e| e.with_path(path))?;
    Ok(extraction.code)
}
