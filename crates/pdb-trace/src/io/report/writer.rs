use crate::io::error::Error;
use crate::model::report::TraceReport;
use std::io::Write;

/// Resolution written for structures without a resolution remark.
pub const UNSET_RESOLUTION: &str = "-1";

/// Writes the report block for one structure.
///
/// Every report starts with the success flag, identifier, resolution, cross-references, and the
/// sequence block. Accepted structures continue with the first residue number, a blank line, and
/// one `<one-letter> <x> <y> <z>` line per alpha-carbon.
pub fn write_report<W: Write>(writer: W, report: &TraceReport) -> Result<(), Error> {
    let mut ctx = WriterContext::new(writer);

    ctx.write_header(report)?;

    ctx.write_sequences(report)?;

    if report.success {
        ctx.write_coordinates(report)?;
    }

    ctx.flush()
}

/// Writes gap diagnostics, one per line, as they follow a rejected report.
pub fn write_diagnostics<W: Write>(writer: W, diagnostics: &[String]) -> Result<(), Error> {
    let mut ctx = WriterContext::new(writer);
    for diagnostic in diagnostics {
        ctx.line(format_args!("{diagnostic}"))?;
    }
    ctx.flush()
}

struct WriterContext<W> {
    writer: W,
}

impl<W: Write> WriterContext<W> {
    fn new(writer: W) -> Self {
        Self { writer }
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) -> Result<(), Error> {
        writeln!(self.writer, "{args}").map_err(|e| Error::from_io(e, None))
    }

    fn write_header(&mut self, report: &TraceReport) -> Result<(), Error> {
        self.line(format_args!("success: {}", u8::from(report.success)))?;
        self.line(format_args!("pdb_id:  {}", report.identifier))?;
        match report.resolution {
            Some(resolution) => self.line(format_args!("resolut: {resolution}"))?,
            None => self.line(format_args!("resolut: {UNSET_RESOLUTION}"))?,
        }
        self.line(format_args!("uniprot: {}", report.cross_ref_ids.join(",")))
    }

    fn write_sequences(&mut self, report: &TraceReport) -> Result<(), Error> {
        if let Some(matched) = &report.matched_sequence {
            self.line(format_args!("matched: {matched}"))?;
        }
        self.line(format_args!("parsed:  {}", report.parsed_sequence))?;
        for other in &report.other_sequences {
            self.line(format_args!("other:   {other}"))?;
        }
        Ok(())
    }

    fn write_coordinates(&mut self, report: &TraceReport) -> Result<(), Error> {
        self.line(format_args!("initres: {}", report.first_residue.unwrap_or(0)))?;
        self.line(format_args!(""))?;
        for residue in &report.residues {
            self.line(format_args!("{residue}"))?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.writer.flush().map_err(|e| Error::from_io(e, None))
    }
}
