//! Data types shared by the record processor, the evaluators, and the report formatters.
//!
//! The model layer owns the amino-acid vocabulary, the per-stream [`context::StructureContext`]
//! accumulator with its residue numbering checks, and the immutable [`report::TraceReport`]
//! snapshot handed to writers.

pub mod context;
pub mod report;
pub mod residue;
pub mod sequencer;
pub mod types;
