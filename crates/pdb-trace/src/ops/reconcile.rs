//! Comparison of the atom-derived sequence against the `SEQRES` reference sequences.

use std::collections::BTreeMap;

/// Reference sequences split into the one that explains the parsed sequence and the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// First reference, in chain order, that contains the parsed sequence.
    pub matched: Option<String>,
    /// Every other non-empty reference, deduplicated, in chain order of first appearance.
    pub others: Vec<String>,
}

/// Matches a parsed sequence against per-chain reference sequences.
///
/// An empty parsed sequence matches nothing. Empty references are ignored. A reference whose
/// text equals the matched sequence is not repeated among the others, even when it belongs to a
/// different chain.
///
/// # Arguments
///
/// * `references` - Reference sequences keyed by chain identifier.
/// * `parsed` - One-letter sequence collected from alpha-carbon records.
pub fn reconcile(references: &BTreeMap<char, String>, parsed: &str) -> Reconciliation {
    let mut reconciliation = Reconciliation::default();

    for sequence in references.values().filter(|sequence| !sequence.is_empty()) {
        if reconciliation.matched.is_none() && !parsed.is_empty() && sequence.contains(parsed) {
            reconciliation.matched = Some(sequence.clone());
            continue;
        }
        if reconciliation.matched.as_deref() == Some(sequence.as_str())
            || reconciliation.others.contains(sequence)
        {
            continue;
        }
        reconciliation.others.push(sequence.clone());
    }

    // a chain before the match may share its text
    if let Some(matched) = &reconciliation.matched {
        reconciliation.others.retain(|other| other != matched);
    }

    reconciliation
}
