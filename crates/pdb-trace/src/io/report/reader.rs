use crate::io::error::Error;
use crate::model::report::TraceReport;
use crate::model::residue::CaResidue;
use crate::model::types::{AminoAcid, Point};
use std::io::BufRead;

const LABEL_WIDTH: usize = 8;

/// Parses a report block written by [`crate::io::write_report`].
///
/// Coordinates read back carry no residue numbers. Lines following the sequence block of a
/// rejected report are gap diagnostics and are skipped.
///
/// # Errors
///
/// Returns [`Error::MalformedReport`] when a header line is missing or out of order, a value
/// does not parse, or a coordinate line is not `<one-letter> <x> <y> <z>`.
pub fn read<R: BufRead>(reader: R) -> Result<TraceReport, Error> {
    let mut report = TraceReport::default();
    let mut lines = reader.lines();
    let mut line_num = 0;

    let mut next_header = |label: &str| -> Result<(usize, String), Error> {
        let line = lines
            .next()
            .transpose()
            .map_err(|e| Error::from_io(e, None))?;
        line_num += 1;
        let line = line.ok_or_else(|| {
            Error::malformed_report(line_num, format!("missing '{label}' line"))
        })?;
        match split_label(&line) {
            (found, value) if found == label => Ok((line_num, value.to_string())),
            _ => Err(Error::malformed_report(
                line_num,
                format!("expected '{label}' line, found '{line}'"),
            )),
        }
    };

    let (n, value) = next_header("success:")?;
    report.success = match value.as_str() {
        "1" => true,
        "0" => false,
        other => {
            return Err(Error::malformed_report(
                n,
                format!("invalid success flag '{other}'"),
            ));
        }
    };

    let (_, value) = next_header("pdb_id:")?;
    report.identifier = value;

    let (n, value) = next_header("resolut:")?;
    let resolution = value
        .parse::<f64>()
        .map_err(|_| Error::malformed_report(n, format!("invalid resolution '{value}'")))?;
    report.resolution = (resolution >= 0.0).then_some(resolution);

    let (_, value) = next_header("uniprot:")?;
    report.cross_ref_ids = value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    let mut parsed_seen = false;
    let mut in_coordinates = false;

    for line in lines {
        let line = line.map_err(|e| Error::from_io(e, None))?;
        line_num += 1;

        if line.trim().is_empty() {
            if report.first_residue.is_some() {
                in_coordinates = true;
            }
            continue;
        }

        if in_coordinates {
            report.residues.push(parse_coordinate(&line, line_num)?);
            continue;
        }

        match split_label(&line) {
            ("matched:", value) if !parsed_seen && report.matched_sequence.is_none() => {
                report.matched_sequence = Some(value.to_string());
            }
            ("parsed:", value) if !parsed_seen => {
                report.parsed_sequence = value.to_string();
                parsed_seen = true;
            }
            ("other:", value) if parsed_seen && report.first_residue.is_none() => {
                report.other_sequences.push(value.to_string());
            }
            ("initres:", value) if parsed_seen && report.success => {
                let first = value.parse::<i32>().map_err(|_| {
                    Error::malformed_report(line_num, format!("invalid first residue '{value}'"))
                })?;
                report.first_residue = Some(first);
            }
            _ if parsed_seen && !report.success => {}
            _ => {
                return Err(Error::malformed_report(
                    line_num,
                    format!("unexpected line '{line}'"),
                ));
            }
        }
    }

    if !parsed_seen {
        return Err(Error::malformed_report(line_num, "missing 'parsed:' line"));
    }
    if report.success && report.first_residue.is_none() {
        return Err(Error::malformed_report(line_num, "missing 'initres:' line"));
    }

    Ok(report)
}

/// Splits a report line into its fixed-width label and trimmed value.
fn split_label(line: &str) -> (&str, &str) {
    let label = line.get(..LABEL_WIDTH).unwrap_or(line).trim_end();
    let value = line.get(LABEL_WIDTH..).unwrap_or("").trim();
    (label, value)
}

fn parse_coordinate(line: &str, line_num: usize) -> Result<CaResidue, Error> {
    let malformed =
        || Error::malformed_report(line_num, format!("invalid coordinate line '{line}'"));

    let mut fields = line.split_whitespace();
    let code = fields.next().ok_or_else(malformed)?;

    let mut chars = code.chars();
    let residue = match (chars.next(), chars.next()) {
        (Some(c), None) => AminoAcid::from_one_letter(c).ok_or_else(malformed)?,
        _ => return Err(malformed()),
    };

    let mut coordinate = || -> Result<f64, Error> {
        fields
            .next()
            .and_then(|value| value.parse::<f64>().ok())
            .ok_or_else(malformed)
    };
    let pos = Point::new(coordinate()?, coordinate()?, coordinate()?);

    if fields.next().is_some() {
        return Err(malformed());
    }

    Ok(CaResidue::unnumbered(residue, pos))
}
