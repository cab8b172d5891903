//! Decisions taken over the parse state: acceptance codes, per-model retries, sequence
//! reconciliation, and batch surveys over many files.
//!
//! The evaluation functions are pure over [`crate::StructureContext`]; the stream reader in
//! [`crate::io`] calls them at model terminators and at end of stream.

mod reconcile;
mod retry;
mod survey;
mod validity;

pub use validity::{ParseCode, classifies_as_non_protein, evaluate};

pub use retry::{ModelState, conclude_model};

pub use reconcile::{Reconciliation, reconcile};

pub use survey::{SurveyObserver, SurveySummary, survey};
