use super::types::{AminoAcid, Point};
use std::fmt;

/// One accepted alpha-carbon of a traced chain.
#[derive(Debug, Clone, PartialEq)]
pub struct CaResidue {
    /// Residue sequence number from the `ATOM` record. Reports read back from text do not carry
    /// numbers, so this is `None` for those.
    pub number: Option<i32>,
    pub residue: AminoAcid,
    pub pos: Point,
}

impl CaResidue {
    pub fn new(number: i32, residue: AminoAcid, pos: Point) -> Self {
        Self {
            number: Some(number),
            residue,
            pos,
        }
    }

    pub fn unnumbered(residue: AminoAcid, pos: Point) -> Self {
        Self {
            number: None,
            residue,
            pos,
        }
    }

    pub fn one_letter(&self) -> char {
        self.residue.one_letter()
    }
}

/// Formats the coordinate line `<one-letter> <x> <y> <z>` at the three-decimal precision of the
/// PDB coordinate columns.
impl fmt::Display for CaResidue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.3} {:.3} {:.3}",
            self.one_letter(),
            self.pos.x,
            self.pos.y,
            self.pos.z
        )
    }
}
