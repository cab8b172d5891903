//! Fixed-column field layout of the PDB records the processor consumes.
//!
//! Offsets are zero-based byte positions. Lines shorter than a field yield whatever part of the
//! field is present (possibly nothing) instead of failing, so truncated records degrade to
//! "value absent".

use crate::io::error::Error;

/// A named fixed-width field inside one record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub record: &'static str,
    pub name: &'static str,
    pub start: usize,
    pub len: usize,
}

impl Field {
    pub const fn new(record: &'static str, name: &'static str, start: usize, len: usize) -> Self {
        Self {
            record,
            name,
            start,
            len,
        }
    }

    /// Raw, untrimmed field text.
    pub fn slice<'a>(&self, line: &'a str) -> &'a str {
        let end = (self.start + self.len).min(line.len());
        if self.start >= end {
            return "";
        }
        line.get(self.start..end).unwrap_or("")
    }

    /// Field text with surrounding whitespace removed.
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        self.slice(line).trim()
    }

    /// First whitespace-delimited token of the field, if any.
    pub fn token<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.slice(line).split_whitespace().next()
    }

    /// First character of the field, if the line reaches it.
    pub fn char(&self, line: &str) -> Option<char> {
        self.slice(line).chars().next()
    }

    /// Decodes the field as a signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedField`] when the trimmed text is empty or not an integer.
    pub fn parse_i32(&self, line: &str, line_number: usize) -> Result<i32, Error> {
        let text = self.text(line);
        text.parse::<i32>()
            .map_err(|_| Error::malformed_field(self.record, self.name, text, line_number))
    }

    /// Decodes the field as a finite floating-point number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedField`] when the trimmed text is empty, not a number, or not
    /// finite (placeholders such as `NOT APPLICABLE` land here).
    pub fn parse_f64(&self, line: &str, line_number: usize) -> Result<f64, Error> {
        let text = self.text(line);
        text.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| Error::malformed_field(self.record, self.name, text, line_number))
    }
}

pub const HEADER_CLASSIFICATION: Field = Field::new("HEADER", "classification", 10, 40);
pub const HEADER_ID_CODE: Field = Field::new("HEADER", "idCode", 62, 4);

pub const REMARK_NUMBER: Field = Field::new("REMARK", "remarkNum", 7, 3);
pub const REMARK_RESOLUTION: Field = Field::new("REMARK", "resolution", 23, 7);

pub const DBREF_DATABASE: Field = Field::new("DBREF", "database", 26, 6);
pub const DBREF_ACCESSION: Field = Field::new("DBREF", "dbAccession", 33, 8);
pub const DBREF1_DATABASE: Field = Field::new("DBREF1", "database", 26, 6);
pub const DBREF2_ACCESSION: Field = Field::new("DBREF2", "dbAccession", 18, 22);

pub const SEQRES_CHAIN: Field = Field::new("SEQRES", "chainID", 11, 1);
pub const SEQRES_RESIDUES: Field = Field::new("SEQRES", "resName", 19, 51);

pub const ATOM_NAME: Field = Field::new("ATOM", "name", 12, 4);
pub const ATOM_RES_NAME: Field = Field::new("ATOM", "resName", 17, 3);
pub const ATOM_RES_SEQ: Field = Field::new("ATOM", "resSeq", 22, 4);
pub const ATOM_X: Field = Field::new("ATOM", "x", 30, 8);
pub const ATOM_Y: Field = Field::new("ATOM", "y", 38, 8);
pub const ATOM_Z: Field = Field::new("ATOM", "z", 46, 8);
