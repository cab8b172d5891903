//! # pdb-trace
//!
//! **pdb-trace** turns legacy fixed-column PDB files into clean alpha-carbon traces. A single
//! pass over the records collects the header, resolution, cross-references, reference sequences,
//! and alpha-carbon coordinates, then gates the structure on a fixed list of quality criteria.
//! Accepted structures yield one gap-checked chain of `(residue, x, y, z)` tuples plus a
//! reconciled sequence; rejected structures yield a single reason code.
//!
//! ## Features
//!
//! - **Streaming record processor** – Closed record dispatch over any `BufRead`, with per-model
//!   retry on chain terminators and no re-reading of earlier lines.
//! - **Deterministic gating** – Every stream receives exactly one [`ParseCode`], chosen in a
//!   fixed priority order (nucleic acid, excluded residues, resolution, gaps, missing atoms,
//!   missing cross-references).
//! - **Sequence reconciliation** – The atom-derived sequence is matched against the `SEQRES`
//!   reference sequences of every chain.
//! - **Text reports** – A line-oriented report format with a writer and a reader, so downstream
//!   tools can consume traces without re-parsing PDB files.
//! - **Batch surveys** – Parallel processing of whole archive trees, including `.ent.gz` files.

mod model;
mod utils;

pub mod io;
pub mod ops;

pub use model::context::StructureContext;
pub use model::report::TraceReport;
pub use model::residue::CaResidue;
pub use model::sequencer::{ResidueConfirmation, ResidueSequencer};
pub use model::types::{AminoAcid, Point};

pub use ops::ParseCode;
