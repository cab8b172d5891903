//! Canonical error type for PDB stream processing and trace report IO.
//!
//! Structural rejections (low resolution, gaps, missing cross-references, ...) are *not* errors;
//! they are reported as [`crate::ParseCode`] values. This enum covers the conditions that abort a
//! stream: IO failures, records that violate the fixed-column format, and malformed reports.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading PDB streams or trace reports.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper around operating-system level I/O failures.
    #[error(
        "I/O error for {path_desc}: {source}",
        path_desc = PathDisplay(path)
    )]
    Io {
        /// Path to the file involved in the failed operation, if any.
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// A numeric fixed-column field could not be decoded.
    ///
    /// Most callers downgrade this to "value absent"; it only aborts a stream when it hits the
    /// residue number or coordinates of an alpha-carbon record.
    #[error(
        "malformed {record} field '{field}' in {path_desc}: '{value}' (line {line_number})",
        path_desc = PathDisplay(path)
    )]
    MalformedField {
        /// Record tag the field belongs to (e.g. `"ATOM"`).
        record: &'static str,
        /// Field name from the column layout.
        field: &'static str,
        /// Trimmed text found in the field.
        value: String,
        path: Option<PathBuf>,
        /// One-based line number.
        line_number: usize,
    },

    /// An alpha-carbon record names a residue outside the amino-acid table.
    #[error(
        "unexpected residue '{name}' in {path_desc} (line {line_number})",
        path_desc = PathDisplay(path)
    )]
    UnexpectedResidue {
        name: String,
        path: Option<PathBuf>,
        line_number: usize,
    },

    /// A trace report does not follow the expected line layout.
    #[error(
        "malformed trace report {path_desc}: {details} (line {line_number})",
        path_desc = PathDisplay(path)
    )]
    MalformedReport {
        path: Option<PathBuf>,
        line_number: usize,
        details: String,
    },
}

impl Error {
    /// Constructs an [`Error::Io`] variant from a standard I/O error.
    ///
    /// # Arguments
    ///
    /// * `source` - The original `std::io::Error` emitted by the OS or runtime.
    /// * `path` - Optional file path associated with the operation.
    pub fn from_io(source: std::io::Error, path: Option<PathBuf>) -> Self {
        Self::Io { path, source }
    }

    /// Builds an [`Error::MalformedField`] for a field that failed numeric decoding.
    pub fn malformed_field(
        record: &'static str,
        field: &'static str,
        value: impl Into<String>,
        line_number: usize,
    ) -> Self {
        Self::MalformedField {
            record,
            field,
            value: value.into(),
            path: None,
            line_number,
        }
    }

    /// Generates an [`Error::UnexpectedResidue`] for a residue missing from the table.
    pub fn unexpected_residue(name: impl Into<String>, line_number: usize) -> Self {
        Self::UnexpectedResidue {
            name: name.into(),
            path: None,
            line_number,
        }
    }

    /// Creates an [`Error::MalformedReport`] describing a layout violation.
    pub fn malformed_report(line_number: usize, details: impl Into<String>) -> Self {
        Self::MalformedReport {
            path: None,
            line_number,
            details: details.into(),
        }
    }

    /// Attaches a source path to errors raised while the path was still unknown.
    ///
    /// Readers work on anonymous streams; callers that opened a file use this to make the
    /// message point at it. Errors that already carry a path keep it.
    pub fn with_path(mut self, source_path: impl Into<PathBuf>) -> Self {
        let slot = match &mut self {
            Self::Io { path, .. }
            | Self::MalformedField { path, .. }
            | Self::UnexpectedResidue { path, .. }
            | Self::MalformedReport { path, .. } => path,
        };
        if slot.is_none() {
            *slot = Some(source_path.into());
        }
        self
    }
}

/// Lightweight formatter for optional paths used in error messages.
///
/// When a path is present it prints `file '<path>'`; otherwise it emits `stream source` so
/// error messages remain grammatically consistent.
struct PathDisplay<'a>(&'a Option<PathBuf>);

impl<'a> fmt::Display for PathDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(p) => write!(f, "file '{}'", p.display()),
            None => write!(f, "stream source"),
        }
    }
}
