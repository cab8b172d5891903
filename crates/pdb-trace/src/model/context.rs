//! Mutable parse state for one PDB stream.
//!
//! [`StructureContext`] separates two lifetimes explicitly. Stream-wide fields (identifier,
//! resolution, cross-references, reference sequences, the non-protein flag, gap diagnostics, and
//! whether any model ever produced coordinates) accumulate until the stream ends. Model-scoped
//! fields (coordinates, the parsed sequence, residue numbering, gap and excluded-residue flags)
//! are cleared by [`StructureContext::reset_model`] whenever a model is rejected.

use super::residue::CaResidue;
use super::sequencer::{ResidueConfirmation, ResidueSequencer};
use super::types::{AminoAcid, Point};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default)]
pub struct StructureContext {
    identifier: String,
    resolution: Option<f64>,
    cross_ref_ids: BTreeSet<String>,
    reference_sequences: BTreeMap<char, String>,
    is_non_protein: bool,
    ever_had_coordinates: bool,
    errors: Vec<String>,

    coordinates: Vec<CaResidue>,
    parsed_sequence: String,
    sequencer: ResidueSequencer,
    has_gap: bool,
    has_rare_residue: bool,
    has_unknown_residue: bool,
}

impl StructureContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn set_identifier(&mut self, identifier: impl Into<String>) {
        self.identifier = identifier.into();
    }

    /// Resolution in ångströms, `None` until a resolution remark has been parsed.
    pub fn resolution(&self) -> Option<f64> {
        self.resolution
    }

    pub fn set_resolution(&mut self, resolution: f64) {
        self.resolution = Some(resolution);
    }

    pub fn cross_ref_ids(&self) -> &BTreeSet<String> {
        &self.cross_ref_ids
    }

    pub fn add_cross_ref_id(&mut self, id: impl Into<String>) {
        self.cross_ref_ids.insert(id.into());
    }

    /// Reference sequences declared by `SEQRES` records, keyed by chain identifier.
    pub fn reference_sequences(&self) -> &BTreeMap<char, String> {
        &self.reference_sequences
    }

    /// Returns the reference sequence for `chain`, creating an empty one on first use.
    pub fn reference_sequence_mut(&mut self, chain: char) -> &mut String {
        self.reference_sequences.entry(chain).or_default()
    }

    pub fn is_non_protein(&self) -> bool {
        self.is_non_protein
    }

    pub fn mark_non_protein(&mut self) {
        self.is_non_protein = true;
    }

    pub fn ever_had_coordinates(&self) -> bool {
        self.ever_had_coordinates
    }

    /// Gap diagnostics collected over every model of the stream.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn coordinates(&self) -> &[CaResidue] {
        &self.coordinates
    }

    pub fn parsed_sequence(&self) -> &str {
        &self.parsed_sequence
    }

    /// Last accepted alpha-carbon residue number in the current model.
    pub fn prev_residue(&self) -> Option<i32> {
        self.sequencer.previous()
    }

    /// Whether `number` repeats the last accepted residue of the current model.
    pub fn is_duplicate_residue(&self, number: i32) -> bool {
        self.prev_residue() == Some(number)
    }

    pub fn first_residue(&self) -> Option<i32> {
        self.sequencer.first()
    }

    pub fn has_gap(&self) -> bool {
        self.has_gap
    }

    pub fn has_rare_residue(&self) -> bool {
        self.has_rare_residue
    }

    pub fn has_unknown_residue(&self) -> bool {
        self.has_unknown_residue
    }

    /// Feeds one alpha-carbon into the current model.
    ///
    /// Duplicates leave the context untouched. Every other residue is appended to both the
    /// coordinate list and the parsed sequence; out-of-sequence residues additionally record a
    /// gap diagnostic and mark the model as gapped.
    ///
    /// # Arguments
    ///
    /// * `number` - Residue sequence number from the `ATOM` record.
    /// * `residue` - Classified amino acid.
    /// * `pos` - Alpha-carbon coordinates.
    ///
    /// # Returns
    ///
    /// The [`ResidueConfirmation`] reported by the sequencer.
    pub fn record_alpha_carbon(
        &mut self,
        number: i32,
        residue: AminoAcid,
        pos: Point,
    ) -> ResidueConfirmation {
        let confirmation = self.sequencer.validate(number);

        match confirmation {
            ResidueConfirmation::Duplicate => return confirmation,
            ResidueConfirmation::OutOfSequence { .. } => {
                self.errors.push(confirmation.to_string());
                self.has_gap = true;
            }
            ResidueConfirmation::Valid => {}
        }

        if residue.is_rare() {
            self.has_rare_residue = true;
        }
        if residue.is_unknown() {
            self.has_unknown_residue = true;
        }

        self.parsed_sequence.push(residue.one_letter());
        self.coordinates.push(CaResidue::new(number, residue, pos));

        confirmation
    }

    /// Clears the model-scoped state so the next model can be parsed from scratch.
    ///
    /// Remembers whether the discarded model had produced coordinates.
    pub fn reset_model(&mut self) {
        if !self.coordinates.is_empty() {
            self.ever_had_coordinates = true;
        }

        self.coordinates.clear();
        self.parsed_sequence.clear();
        self.sequencer.reset();
        self.has_gap = false;
        self.has_rare_residue = false;
        self.has_unknown_residue = false;
    }

    /// Moves the accepted coordinates out of the context.
    pub fn take_coordinates(&mut self) -> Vec<CaResidue> {
        std::mem::take(&mut self.coordinates)
    }
}
