//! Lookup tables and policy switches shared by every PDB stream a caller processes.

use crate::model::types::AminoAcid;
use std::collections::HashMap;

/// Resolution cutoff in ångströms; structures at or above it are rejected.
pub const MAX_RESOLUTION: f64 = 2.5;

/// Database tag of `DBREF`/`DBREF1` records whose accessions count as cross-references.
pub const UNIPROT_DATABASE: &str = "UNP";

/// Residue vocabulary and acceptance policy for the PDB record processor.
///
/// The residue map translates three-letter residue names to [`AminoAcid`] values, including the
/// histidine protonation variants. The remaining fields are the tunable parts of the acceptance
/// policy; [`IoContext::new_default`] reproduces the standard cutoffs.
#[derive(Debug, Clone)]
pub struct IoContext {
    residue_map: HashMap<String, AminoAcid>,
    /// Structures whose resolution is at or above this value are rejected.
    pub max_resolution: f64,
    /// Only `DBREF`/`DBREF1` records from this database contribute cross-reference IDs.
    pub cross_reference_database: String,
    /// Stop reading as soon as the header classifies the entry as DNA or RNA.
    pub stop_on_rejected_header: bool,
    /// Stop reading as soon as a resolution at or above the cutoff is parsed.
    pub stop_on_low_resolution: bool,
}

impl IoContext {
    pub fn new_default() -> Self {
        let residue_map = AminoAcid::ALL
            .into_iter()
            .map(|residue| (residue.to_string(), residue))
            .collect();

        let mut context = Self {
            residue_map,
            max_resolution: MAX_RESOLUTION,
            cross_reference_database: UNIPROT_DATABASE.to_string(),
            stop_on_rejected_header: true,
            stop_on_low_resolution: true,
        };

        context.add_alias("HIP", AminoAcid::HIS);
        context.add_alias("HIE", AminoAcid::HIS);
        // pyrrolysine as deposited in 1L2Q
        context.add_alias("XPL", AminoAcid::PYL);

        context
    }

    /// Maps a three-letter residue name to its [`AminoAcid`], or `None` when it is not in the
    /// table.
    pub fn classify_residue(&self, name: &str) -> Option<AminoAcid> {
        self.residue_map.get(name).copied()
    }

    /// Registers an extra residue name that maps onto an existing [`AminoAcid`].
    pub fn add_alias(&mut self, alias: impl Into<String>, residue: AminoAcid) {
        self.residue_map.insert(alias.into(), residue);
    }

    /// Returns a copy of the context with a different resolution cutoff.
    pub fn with_max_resolution(mut self, max_resolution: f64) -> Self {
        self.max_resolution = max_resolution;
        self
    }

    /// True when `database` (already trimmed) names the cross-reference database.
    pub fn is_cross_reference_database(&self, database: &str) -> bool {
        database == self.cross_reference_database
    }
}

impl Default for IoContext {
    fn default() -> Self {
        Self::new_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_context_new_default_uses_standard_policy() {
        let context = IoContext::new_default();

        assert_eq!(context.max_resolution, MAX_RESOLUTION);
        assert_eq!(context.cross_reference_database, "UNP");
        assert!(context.stop_on_rejected_header);
        assert!(context.stop_on_low_resolution);
        assert_eq!(context.residue_map.len(), 28);
    }

    #[test]
    fn classify_residue_maps_standard_residues() {
        let context = IoContext::new_default();

        assert_eq!(context.classify_residue("ALA"), Some(AminoAcid::ALA));
        assert_eq!(context.classify_residue("TRP"), Some(AminoAcid::TRP));
        assert_eq!(context.classify_residue("VAL"), Some(AminoAcid::VAL));
    }

    #[test]
    fn classify_residue_folds_histidine_variants() {
        let context = IoContext::new_default();

        assert_eq!(context.classify_residue("HIS"), Some(AminoAcid::HIS));
        assert_eq!(context.classify_residue("HIP"), Some(AminoAcid::HIS));
        assert_eq!(context.classify_residue("HIE"), Some(AminoAcid::HIS));
    }

    #[test]
    fn classify_residue_maps_rare_and_unknown_codes() {
        let context = IoContext::new_default();

        assert_eq!(context.classify_residue("SEC"), Some(AminoAcid::SEC));
        assert_eq!(context.classify_residue("PYL"), Some(AminoAcid::PYL));
        assert_eq!(context.classify_residue("XPL"), Some(AminoAcid::PYL));
        assert_eq!(context.classify_residue("GLX"), Some(AminoAcid::GLX));
        assert_eq!(context.classify_residue("ASX"), Some(AminoAcid::ASX));
        assert_eq!(context.classify_residue("UNK"), Some(AminoAcid::UNK));
    }

    #[test]
    fn classify_residue_rejects_names_outside_the_table() {
        let context = IoContext::new_default();

        assert_eq!(context.classify_residue("HOH"), None);
        assert_eq!(context.classify_residue("DA"), None);
        assert_eq!(context.classify_residue("MSE"), None);
        assert_eq!(context.classify_residue("ala"), None);
        assert_eq!(context.classify_residue(""), None);
    }

    #[test]
    fn add_alias_extends_the_table() {
        let mut context = IoContext::new_default();

        context.add_alias("MSE", AminoAcid::MET);
        assert_eq!(context.classify_residue("MSE"), Some(AminoAcid::MET));

        context.add_alias(String::from("HID"), AminoAcid::HIS);
        assert_eq!(context.classify_residue("HID"), Some(AminoAcid::HIS));
    }

    #[test]
    fn with_max_resolution_overrides_cutoff() {
        let context = IoContext::new_default().with_max_resolution(3.0);
        assert_eq!(context.max_resolution, 3.0);
    }

    #[test]
    fn cross_reference_database_matches_exact_tag() {
        let context = IoContext::default();
        assert!(context.is_cross_reference_database("UNP"));
        assert!(!context.is_cross_reference_database("GB"));
        assert!(!context.is_cross_reference_database("UNPX"));
    }
}
