//! Immutable snapshot of one processed structure, as written to and read from trace reports.

use super::residue::CaResidue;

/// Everything a trace report carries for one structure.
///
/// Rejected structures keep the header and sequence block but never carry coordinates or a
/// first-residue number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceReport {
    pub success: bool,
    pub identifier: String,
    /// `None` when no resolution remark was parsed; written as `-1`.
    pub resolution: Option<f64>,
    pub cross_ref_ids: Vec<String>,
    /// Reference sequence that contains the parsed sequence, if any.
    pub matched_sequence: Option<String>,
    /// Sequence built from accepted alpha-carbons in atom order.
    pub parsed_sequence: String,
    /// Remaining distinct reference sequences.
    pub other_sequences: Vec<String>,
    pub first_residue: Option<i32>,
    pub residues: Vec<CaResidue>,
}

impl TraceReport {
    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }
}
