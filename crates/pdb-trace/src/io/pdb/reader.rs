use crate::io::context::IoContext;
use crate::io::error::Error;
use crate::io::pdb::columns::{
    ATOM_NAME, ATOM_RES_NAME, ATOM_RES_SEQ, ATOM_X, ATOM_Y, ATOM_Z, DBREF_ACCESSION,
    DBREF_DATABASE, DBREF1_DATABASE, DBREF2_ACCESSION, HEADER_CLASSIFICATION, HEADER_ID_CODE,
    REMARK_NUMBER, REMARK_RESOLUTION, SEQRES_CHAIN, SEQRES_RESIDUES,
};
use crate::io::pdb::record::Record;
use crate::model::context::StructureContext;
use crate::model::report::TraceReport;
use crate::model::types::Point;
use crate::ops::{
    ModelState, ParseCode, Reconciliation, classifies_as_non_protein, conclude_model, evaluate,
    reconcile,
};
use log::{debug, trace, warn};
use std::io::{BufRead, Lines};

const RESOLUTION_REMARK: i32 = 2;

/// Result of running one PDB stream through the record processor.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Acceptance decision for the stream.
    pub code: ParseCode,
    /// Report block; carries coordinates only when `code` is [`ParseCode::Success`].
    pub report: TraceReport,
    /// Gap diagnostics collected over every model, in stream order.
    pub diagnostics: Vec<String>,
}

impl Extraction {
    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Line reader that keeps track of one-based line numbers.
///
/// Handlers normally see a single line; the `DBREF1` handler alone receives the source so it can
/// pull its continuation record.
struct LineSource<R> {
    lines: Lines<R>,
    line_num: usize,
}

impl<R: BufRead> LineSource<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_num: 0,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>, Error> {
        match self.lines.next() {
            Some(line) => {
                self.line_num += 1;
                line.map(Some).map_err(|e| Error::from_io(e, None))
            }
            None => Ok(None),
        }
    }

    fn line_num(&self) -> usize {
        self.line_num
    }
}

/// Runs a PDB stream through the record processor in a single pass.
///
/// Records are dispatched by tag. Every `TER` closes a model: an acceptable model stops the
/// scan, a rejected one is discarded and parsing continues with the next model. When the stream
/// ends without an accepted model, the partial state decides the code.
///
/// # Arguments
///
/// * `reader` - Buffered source of PDB text.
/// * `context` - Residue table and acceptance policy.
///
/// # Errors
///
/// Returns [`Error::Io`] when the source cannot be read, and [`Error::MalformedField`] or
/// [`Error::UnexpectedResidue`] when an alpha-carbon record cannot be decoded. Rejections are
/// not errors; they are reported through [`Extraction::code`].
pub fn read<R: BufRead>(reader: R, context: &IoContext) -> Result<Extraction, Error> {
    let mut source = LineSource::new(reader);
    let mut structure = StructureContext::new();

    while let Some(line) = source.next_line()? {
        let line_num = source.line_num();
        let record = Record::classify(&line);
        trace!("line {line_num}: {record:?}");

        let flow = match record {
            Record::Header => parse_header(&line, context, &mut structure),
            Record::Remark => parse_remark(&line, line_num, context, &mut structure),
            Record::DbRef => {
                parse_dbref(&line, context, &mut structure);
                Flow::Continue
            }
            Record::DbRef1 => {
                parse_dbref1(&line, &mut source, context, &mut structure)?;
                Flow::Continue
            }
            Record::SeqRes => {
                parse_seqres(&line, line_num, context, &mut structure);
                Flow::Continue
            }
            Record::Atom => {
                parse_atom_record(&line, line_num, context, &mut structure)?;
                Flow::Continue
            }
            Record::Ter => match conclude_model(&mut structure, context.max_resolution) {
                ModelState::Accepted => Flow::Stop,
                ModelState::Retry(_) => Flow::Continue,
            },
            Record::Other => Flow::Continue,
        };

        if flow == Flow::Stop {
            debug!("Stopped reading at line {line_num}");
            break;
        }
    }

    Ok(finish(structure, context))
}

fn parse_header(line: &str, context: &IoContext, structure: &mut StructureContext) -> Flow {
    structure.set_identifier(HEADER_ID_CODE.text(line));

    if !classifies_as_non_protein(HEADER_CLASSIFICATION.slice(line)) {
        return Flow::Continue;
    }

    debug!(
        "{} is classified as '{}'",
        structure.identifier(),
        HEADER_CLASSIFICATION.text(line)
    );
    structure.mark_non_protein();

    if context.stop_on_rejected_header {
        Flow::Stop
    } else {
        Flow::Continue
    }
}

fn parse_remark(
    line: &str,
    line_num: usize,
    context: &IoContext,
    structure: &mut StructureContext,
) -> Flow {
    match REMARK_NUMBER.parse_i32(line, line_num) {
        Ok(RESOLUTION_REMARK) => {}
        _ => return Flow::Continue,
    }

    if REMARK_RESOLUTION.text(line).is_empty() {
        return Flow::Continue;
    }

    let resolution = match REMARK_RESOLUTION.parse_f64(line, line_num) {
        Ok(resolution) => resolution,
        Err(err) => {
            debug!("Ignoring resolution remark: {err}");
            return Flow::Continue;
        }
    };
    structure.set_resolution(resolution);

    if context.stop_on_low_resolution && resolution >= context.max_resolution {
        debug!("Resolution {resolution} is at or above the cutoff");
        return Flow::Stop;
    }
    Flow::Continue
}

fn parse_dbref(line: &str, context: &IoContext, structure: &mut StructureContext) {
    if !context.is_cross_reference_database(DBREF_DATABASE.text(line)) {
        return;
    }
    if let Some(accession) = DBREF_ACCESSION.token(line) {
        structure.add_cross_ref_id(accession);
    }
}

/// Handles the split cross-reference form, whose accession lives on the next line.
///
/// The continuation is consumed only for matching databases; otherwise it is left for normal
/// dispatch, where it classifies as an ignored record.
fn parse_dbref1<R: BufRead>(
    line: &str,
    source: &mut LineSource<R>,
    context: &IoContext,
    structure: &mut StructureContext,
) -> Result<(), Error> {
    if !context.is_cross_reference_database(DBREF1_DATABASE.text(line)) {
        return Ok(());
    }

    let Some(continuation) = source.next_line()? else {
        debug!("DBREF1 record at end of stream has no continuation");
        return Ok(());
    };

    if let Some(accession) = DBREF2_ACCESSION.token(&continuation) {
        structure.add_cross_ref_id(accession);
    }
    Ok(())
}

fn parse_seqres(
    line: &str,
    line_num: usize,
    context: &IoContext,
    structure: &mut StructureContext,
) {
    let Some(chain) = SEQRES_CHAIN.char(line) else {
        return;
    };

    let sequence = structure.reference_sequence_mut(chain);
    for name in SEQRES_RESIDUES.slice(line).split_whitespace() {
        match context.classify_residue(name) {
            Some(residue) => sequence.push(residue.one_letter()),
            None => {
                warn!(
                    "Unmapped SEQRES residue '{name}' for chain '{chain}' (line {line_num}); \
                     skipping the rest of the line"
                );
                break;
            }
        }
    }
}

fn parse_atom_record(
    line: &str,
    line_num: usize,
    context: &IoContext,
    structure: &mut StructureContext,
) -> Result<(), Error> {
    if ATOM_NAME.text(line) != "CA" {
        return Ok(());
    }

    let res_seq = ATOM_RES_SEQ.parse_i32(line, line_num)?;
    let x = ATOM_X.parse_f64(line, line_num)?;
    let y = ATOM_Y.parse_f64(line, line_num)?;
    let z = ATOM_Z.parse_f64(line, line_num)?;

    // alternate conformations may carry a residue name outside the table
    if structure.is_duplicate_residue(res_seq) {
        trace!("Skipping duplicate alpha-carbon of residue {res_seq} (line {line_num})");
        return Ok(());
    }

    let res_name = ATOM_RES_NAME.text(line);
    let residue = context
        .classify_residue(res_name)
        .ok_or_else(|| Error::unexpected_residue(res_name, line_num))?;

    structure.record_alpha_carbon(res_seq, residue, Point::new(x, y, z));
    Ok(())
}

fn finish(mut structure: StructureContext, context: &IoContext) -> Extraction {
    let code = evaluate(&structure, context.max_resolution);
    let Reconciliation { matched, others } =
        reconcile(structure.reference_sequences(), structure.parsed_sequence());

    let mut report = TraceReport {
        success: code.is_success(),
        identifier: structure.identifier().to_string(),
        resolution: structure.resolution(),
        cross_ref_ids: structure.cross_ref_ids().iter().cloned().collect(),
        matched_sequence: matched,
        parsed_sequence: structure.parsed_sequence().to_string(),
        other_sequences: others,
        ..Default::default()
    };

    if report.success {
        report.first_residue = Some(structure.first_residue().unwrap_or(0));
        report.residues = structure.take_coordinates();
    }

    Extraction {
        code,
        report,
        diagnostics: structure.errors().to_vec(),
    }
}
