//! Transparent gzip transport for PDB archives (`*.ent.gz`, `*.pdb.gz`).

use crate::io::error::Error;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// True when the path ends in a `.gz` extension (any case).
pub fn is_gzip_path(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.eq_ignore_ascii_case("gz"))
}

/// Opens a PDB file for buffered reading, decompressing it when the path names a gzip file.
///
/// # Errors
///
/// Returns [`Error::Io`] carrying the path when the file cannot be opened.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead + Send>, Error> {
    let file = File::open(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;

    if is_gzip_path(path) {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
