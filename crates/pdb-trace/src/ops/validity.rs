//! Acceptance codes and the fixed-priority evaluation that assigns exactly one of them to a
//! structure.

use crate::model::context::StructureContext;
use std::fmt;

/// Outcome of processing one PDB stream.
///
/// The discriminant doubles as the process exit status of the extractor. Status 8 is unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ParseCode {
    Success = 0,
    ResolutionTooLow = 1,
    ResolutionNotSpecified = 2,
    MissingNonTerminalResidues = 3,
    NoAlphaCarbonAtomsFound = 4,
    IsNotProtein = 5,
    ExcludeRareAminoAcids = 6,
    HasUnknownResidue = 7,
    NoUniprotId = 9,
}

impl ParseCode {
    pub const ALL: [ParseCode; 9] = [
        ParseCode::Success,
        ParseCode::ResolutionTooLow,
        ParseCode::ResolutionNotSpecified,
        ParseCode::MissingNonTerminalResidues,
        ParseCode::NoAlphaCarbonAtomsFound,
        ParseCode::IsNotProtein,
        ParseCode::ExcludeRareAminoAcids,
        ParseCode::HasUnknownResidue,
        ParseCode::NoUniprotId,
    ];

    /// Upper-case name printed on stderr for rejected structures.
    pub fn name(&self) -> &'static str {
        match self {
            ParseCode::Success => "SUCCESS",
            ParseCode::ResolutionTooLow => "RESOLUTION_TOO_LOW",
            ParseCode::ResolutionNotSpecified => "RESOLUTION_NOT_SPECIFIED",
            ParseCode::MissingNonTerminalResidues => "MISSING_NON_TERMINAL_RESIDUES",
            ParseCode::NoAlphaCarbonAtomsFound => "NO_ALPHA_CARBON_ATOMS_FOUND",
            ParseCode::IsNotProtein => "IS_NOT_PROTEIN",
            ParseCode::ExcludeRareAminoAcids => "EXCLUDE_RARE_AMINO_ACIDS",
            ParseCode::HasUnknownResidue => "HAS_UNKNOWN_RESIDUE",
            ParseCode::NoUniprotId => "NO_UNIPROT_ID",
        }
    }

    pub fn exit_code(&self) -> u8 {
        *self as u8
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ParseCode::Success)
    }
}

impl fmt::Display for ParseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns `true` when a `HEADER` classification marks the entry as a nucleic acid.
///
/// Nucleic-acid *binding proteins* are still proteins.
pub fn classifies_as_non_protein(classification: &str) -> bool {
    let dna = classification.contains("DNA") && !classification.contains("DNA BINDING PROTEIN");
    let rna = classification.contains("RNA") && !classification.contains("RNA BINDING PROTEIN");
    dna || rna
}

/// Assigns the acceptance code for the current state of a structure.
///
/// Checks run in a fixed order and the first failing one wins, so every structure receives
/// exactly one code. Model-scoped checks (excluded residues, gaps, missing alpha-carbons) look at
/// the model being parsed; the rest look at the whole stream.
///
/// # Arguments
///
/// * `structure` - Accumulated parse state.
/// * `max_resolution` - Cutoff in ångströms; resolutions at or above it are rejected.
///
/// # Returns
///
/// [`ParseCode::Success`] when the current model is acceptable, otherwise the first rejection
/// reason.
pub fn evaluate(structure: &StructureContext, max_resolution: f64) -> ParseCode {
    if structure.is_non_protein() {
        return ParseCode::IsNotProtein;
    }
    if structure.has_rare_residue() {
        return ParseCode::ExcludeRareAminoAcids;
    }
    if structure.has_unknown_residue() {
        return ParseCode::HasUnknownResidue;
    }

    match structure.resolution() {
        Some(resolution) if resolution >= max_resolution => return ParseCode::ResolutionTooLow,
        None => return ParseCode::ResolutionNotSpecified,
        Some(_) => {}
    }

    if structure.has_gap() {
        return ParseCode::MissingNonTerminalResidues;
    }

    if structure.prev_residue().is_none() {
        // an earlier model had residues, this one lost them
        return if structure.ever_had_coordinates() {
            ParseCode::MissingNonTerminalResidues
        } else {
            ParseCode::NoAlphaCarbonAtomsFound
        };
    }

    if structure.cross_ref_ids().is_empty() {
        return ParseCode::NoUniprotId;
    }

    ParseCode::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::{AminoAcid, Point};

    const CUTOFF: f64 = 2.5;

    fn acceptable() -> StructureContext {
        let mut structure = StructureContext::new();
        structure.set_identifier("1ABC");
        structure.set_resolution(1.9);
        structure.add_cross_ref_id("P69905");
        for number in 1..=3 {
            structure.record_alpha_carbon(number, AminoAcid::ALA, Point::origin());
        }
        structure
    }

    #[test]
    fn acceptable_structure_succeeds() {
        assert_eq!(evaluate(&acceptable(), CUTOFF), ParseCode::Success);
    }

    #[test]
    fn exit_codes_match_discriminants() {
        assert_eq!(ParseCode::Success.exit_code(), 0);
        assert_eq!(ParseCode::ResolutionTooLow.exit_code(), 1);
        assert_eq!(ParseCode::HasUnknownResidue.exit_code(), 7);
        assert_eq!(ParseCode::NoUniprotId.exit_code(), 9);
        assert!(ParseCode::ALL.iter().all(|code| code.exit_code() != 8));
    }

    #[test]
    fn display_uses_upper_case_names() {
        assert_eq!(ParseCode::NoUniprotId.to_string(), "NO_UNIPROT_ID");
        assert_eq!(
            ParseCode::MissingNonTerminalResidues.to_string(),
            "MISSING_NON_TERMINAL_RESIDUES"
        );
    }

    #[test]
    fn header_classification_detects_nucleic_acids() {
        assert!(classifies_as_non_protein("DNA                                     "));
        assert!(classifies_as_non_protein("RIBOSOMAL RNA"));
        assert!(classifies_as_non_protein("DNA-RNA HYBRID"));
        assert!(!classifies_as_non_protein("DNA BINDING PROTEIN"));
        assert!(!classifies_as_non_protein("RNA BINDING PROTEIN"));
        assert!(!classifies_as_non_protein("HYDROLASE"));
        assert!(!classifies_as_non_protein(""));
    }

    #[test]
    fn binding_protein_exemption_is_per_nucleic_acid() {
        assert!(classifies_as_non_protein("DNA BINDING PROTEIN/RNA"));
    }

    #[test]
    fn non_protein_outranks_everything() {
        let mut structure = StructureContext::new();
        structure.mark_non_protein();
        structure.record_alpha_carbon(1, AminoAcid::SEC, Point::origin());
        assert_eq!(evaluate(&structure, CUTOFF), ParseCode::IsNotProtein);
    }

    #[test]
    fn rare_residue_outranks_unknown_residue() {
        let mut structure = acceptable();
        structure.record_alpha_carbon(4, AminoAcid::UNK, Point::origin());
        assert_eq!(evaluate(&structure, CUTOFF), ParseCode::HasUnknownResidue);

        structure.record_alpha_carbon(5, AminoAcid::PYL, Point::origin());
        assert_eq!(evaluate(&structure, CUTOFF), ParseCode::ExcludeRareAminoAcids);
    }

    #[test]
    fn resolution_checks_use_inclusive_cutoff() {
        let mut structure = acceptable();
        structure.set_resolution(2.49);
        assert_eq!(evaluate(&structure, CUTOFF), ParseCode::Success);

        structure.set_resolution(2.5);
        assert_eq!(evaluate(&structure, CUTOFF), ParseCode::ResolutionTooLow);

        structure.set_resolution(3.2);
        assert_eq!(evaluate(&structure, CUTOFF), ParseCode::ResolutionTooLow);
        assert_eq!(evaluate(&structure, 4.0), ParseCode::Success);
    }

    #[test]
    fn missing_resolution_is_rejected() {
        let mut structure = StructureContext::new();
        structure.add_cross_ref_id("P69905");
        structure.record_alpha_carbon(1, AminoAcid::ALA, Point::origin());
        assert_eq!(evaluate(&structure, CUTOFF), ParseCode::ResolutionNotSpecified);
    }

    #[test]
    fn resolution_outranks_gaps() {
        let mut structure = acceptable();
        structure.record_alpha_carbon(9, AminoAcid::ALA, Point::origin());
        assert_eq!(evaluate(&structure, CUTOFF), ParseCode::MissingNonTerminalResidues);

        structure.set_resolution(3.0);
        assert_eq!(evaluate(&structure, CUTOFF), ParseCode::ResolutionTooLow);
    }

    #[test]
    fn empty_model_reports_missing_alpha_carbons() {
        let mut structure = StructureContext::new();
        structure.set_resolution(1.5);
        structure.add_cross_ref_id("P69905");
        assert_eq!(evaluate(&structure, CUTOFF), ParseCode::NoAlphaCarbonAtomsFound);
    }

    #[test]
    fn empty_model_after_populated_model_reports_missing_residues() {
        let mut structure = acceptable();
        structure.reset_model();
        assert_eq!(evaluate(&structure, CUTOFF), ParseCode::MissingNonTerminalResidues);
    }

    #[test]
    fn missing_cross_reference_is_checked_last() {
        let mut structure = StructureContext::new();
        structure.set_resolution(1.5);
        structure.record_alpha_carbon(1, AminoAcid::ALA, Point::origin());
        assert_eq!(evaluate(&structure, CUTOFF), ParseCode::NoUniprotId);
    }
}
