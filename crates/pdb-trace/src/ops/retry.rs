//! Per-model accept/retry decision taken at every chain terminator.

use crate::model::context::StructureContext;
use crate::ops::validity::{ParseCode, evaluate};
use log::debug;

/// Decision for the model closed by a terminator record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    /// The model is acceptable; the caller stops consuming input.
    Accepted,
    /// The model was rejected with the given code and its state has been discarded.
    Retry(ParseCode),
}

/// Evaluates the model that just ended and either accepts it or clears it for the next one.
///
/// Rejected models lose their coordinates, parsed sequence, residue numbering, and flags;
/// whole-stream data such as cross-references and gap diagnostics survive.
pub fn conclude_model(structure: &mut StructureContext, max_resolution: f64) -> ModelState {
    let code = evaluate(structure, max_resolution);

    if code.is_success() {
        debug!(
            "Accepted model of {} with {} alpha-carbons",
            structure.identifier(),
            structure.coordinates().len()
        );
        return ModelState::Accepted;
    }

    debug!(
        "Rejected model of {} ({}); retrying with the next model",
        structure.identifier(),
        code
    );
    structure.reset_model();
    ModelState::Retry(code)
}
