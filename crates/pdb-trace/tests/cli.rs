use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use flate2::Compression;
use flate2::write::GzEncoder;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pdbtrace"))
}

fn ca(res_name: &str, res_seq: i32, x: f64, y: f64, z: f64) -> String {
    format!(
        "ATOM  {:>5}  CA  {:>3} A{:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00 20.00           C",
        res_seq, res_name, res_seq, x, y, z
    )
}

fn structure(id: &str, resolution: &str, residues: &[(&str, i32)]) -> String {
    let mut lines = vec![
        format!("HEADER    {:<40}01-JAN-00   {}", "HYDROLASE", id),
        format!("REMARK   2 RESOLUTION.{:>8} ANGSTROMS.", resolution),
        format!("DBREF  {} A    1   100  UNP    P12345   TEST_HUMAN       1    100", id),
        "SEQRES   1 A    5  MET ALA VAL LEU LYS".to_string(),
    ];
    for (i, (name, number)) in residues.iter().enumerate() {
        lines.push(ca(name, *number, i as f64, 1.25, -3.5));
    }
    lines.push("END".to_string());
    lines.join("\n") + "\n"
}

fn accepted(id: &str) -> String {
    structure(id, "1.80", &[("ALA", 2), ("VAL", 3), ("LEU", 4)])
}

fn write_gz(path: &Path, text: &str) {
    let mut encoder = GzEncoder::new(fs::File::create(path).unwrap(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = binary()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run binary");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().expect("failed to wait on binary")
}

#[test]
fn extract_prints_accepted_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("1tst.pdb");
    fs::write(&path, accepted("1TST")).unwrap();

    let output = binary()
        .args(["extract", "-q", "-i", path.to_str().unwrap()])
        .output()
        .expect("failed to run binary");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "success: 1\n\
         pdb_id:  1TST\n\
         resolut: 1.8\n\
         uniprot: P12345\n\
         matched: MAVLK\n\
         parsed:  AVL\n\
         initres: 2\n\
         \n\
         A 0.000 1.250 -3.500\n\
         V 1.000 1.250 -3.500\n\
         L 2.000 1.250 -3.500\n"
    );
    assert!(output.stderr.is_empty());
}

#[test]
fn extract_reports_gap_rejection() {
    let text = structure(
        "1GAP",
        "1.80",
        &[("GLY", 10), ("GLY", 11), ("GLY", 12), ("GLY", 15), ("GLY", 16)],
    );

    let output = run_with_stdin(&["extract", "-q"], &text);

    assert_eq!(output.status.code(), Some(3));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("success: 0\npdb_id:  1GAP\n"));
    assert!(stdout.contains("parsed:  GGGGG\n"));
    assert!(stdout.ends_with("missing residues; prev=12, next=15\n"));
    assert!(!stdout.contains("initres:"));
    assert_eq!(
        String::from_utf8_lossy(&output.stderr).trim_end(),
        "MISSING_NON_TERMINAL_RESIDUES"
    );
}

#[test]
fn extract_exit_status_follows_rejection_code() {
    let low = structure("1LOW", "3.20", &[("ALA", 1)]);
    assert_eq!(run_with_stdin(&["extract", "-q"], &low).status.code(), Some(1));

    let borderline = structure("1OKR", "2.49", &[("ALA", 1)]);
    assert_eq!(run_with_stdin(&["extract", "-q"], &borderline).status.code(), Some(0));

    let rare = structure("1SEC", "1.50", &[("ALA", 1), ("SEC", 2)]);
    assert_eq!(run_with_stdin(&["extract", "-q"], &rare).status.code(), Some(6));

    let no_ref = accepted("1NRF").replace("DBREF ", "REMARK");
    let output = run_with_stdin(&["extract", "-q"], &no_ref);
    assert_eq!(output.status.code(), Some(9));
    assert_eq!(String::from_utf8_lossy(&output.stderr).trim_end(), "NO_UNIPROT_ID");
}

#[test]
fn extract_honors_max_resolution_override() {
    let text = structure("1LOW", "3.20", &[("ALA", 1)]);
    let output = run_with_stdin(&["extract", "-q", "--max-resolution", "3.5"], &text);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("resolut: 3.2\n"));
}

#[test]
fn extract_full_scan_reads_past_low_resolution() {
    let text = structure("1LOW", "3.20", &[("ALA", 1), ("VAL", 2)]);

    let stopped = run_with_stdin(&["extract", "-q"], &text);
    assert_eq!(stopped.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&stopped.stdout);
    assert!(stdout.contains("uniprot: \n"));
    assert!(stdout.contains("parsed:  \n"));

    let scanned = run_with_stdin(&["extract", "-q", "--full-scan"], &text);
    assert_eq!(scanned.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&scanned.stdout);
    assert!(stdout.starts_with("success: 0\npdb_id:  1LOW\nresolut: 3.2\n"));
    assert!(stdout.contains("uniprot: P12345\n"));
    assert!(stdout.contains("parsed:  AV\n"));
    assert!(!stdout.contains("initres:"));
    assert_eq!(
        String::from_utf8_lossy(&scanned.stderr).trim_end(),
        "RESOLUTION_TOO_LOW"
    );
}

#[test]
fn extract_reads_gzip_input_and_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("pdb1tst.ent.gz");
    let report = dir.path().join("1tst.trace");
    write_gz(&input, &accepted("1TST"));

    let output = binary()
        .args([
            "extract",
            "-q",
            "-i",
            input.to_str().unwrap(),
            "-o",
            report.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run binary");

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    let text = fs::read_to_string(&report).unwrap();
    assert!(text.starts_with("success: 1\npdb_id:  1TST\n"));
    assert!(text.ends_with("L 2.000 1.250 -3.500\n"));
}

#[test]
fn extract_fails_on_format_violation() {
    let text = structure("1BAD", "1.80", &[("ALA", 1), ("MSE", 2)]);
    let output = run_with_stdin(&["extract", "-q"], &text);

    assert_eq!(output.status.code(), Some(64));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unexpected residue 'MSE'"));
}

#[test]
fn extract_fails_on_missing_input_file() {
    let output = binary()
        .args(["extract", "-q", "-i", "/nonexistent/1abc.pdb"])
        .output()
        .expect("failed to run binary");
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn survey_tallies_directory_and_writes_reports() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("archive");
    let nested = archive.join("ts");
    fs::create_dir_all(&nested).unwrap();
    write_gz(&archive.join("pdb1aaa.ent.gz"), &accepted("1AAA"));
    write_gz(&nested.join("pdb1bbb.ent.gz"), &accepted("1BBB"));
    write_gz(
        &nested.join("pdb1low.ent.gz"),
        &structure("1LOW", "3.20", &[("ALA", 1)]),
    );
    fs::write(archive.join("notes.txt"), "not a structure").unwrap();
    let reports = dir.path().join("reports");

    let output = binary()
        .args([
            "survey",
            "-q",
            archive.to_str().unwrap(),
            "--report-dir",
            reports.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run binary");

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Survey Summary"));
    assert!(stderr.contains("SUCCESS"));
    assert!(stderr.contains("RESOLUTION_TOO_LOW"));

    let mut written: Vec<_> = fs::read_dir(&reports)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    written.sort();
    assert_eq!(written, vec!["1AAA.trace", "1BBB.trace"]);

    let report = fs::read_to_string(reports.join("1BBB.trace")).unwrap();
    assert!(report.starts_with("success: 1\npdb_id:  1BBB\n"));
}

#[test]
fn survey_keeps_first_report_for_shared_identifier() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("archive");
    fs::create_dir_all(&archive).unwrap();
    write_gz(&archive.join("pdb1dup.ent.gz"), &accepted("1DUP"));
    write_gz(&archive.join("pdb1dupcopy.ent.gz"), &accepted("1DUP"));
    let reports = dir.path().join("reports");

    let output = binary()
        .args([
            "survey",
            archive.to_str().unwrap(),
            "--report-dir",
            reports.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run binary");

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already exists"));

    let written: Vec<_> = fs::read_dir(&reports)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(written, vec!["1DUP.trace"]);
    let report = fs::read_to_string(reports.join("1DUP.trace")).unwrap();
    assert!(report.starts_with("success: 1\npdb_id:  1DUP\n"));
    assert!(report.ends_with("L 2.000 1.250 -3.500\n"));
}

#[test]
fn survey_reports_format_violations() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("good.pdb"), accepted("1AAA")).unwrap();
    fs::write(
        dir.path().join("bad.pdb"),
        structure("1BAD", "1.80", &[("MSE", 1)]),
    )
    .unwrap();

    let output = binary()
        .args([
            "survey",
            "-q",
            "--extension",
            "pdb",
            "--jobs",
            "2",
            dir.path().to_str().unwrap(),
        ])
        .output()
        .expect("failed to run binary");

    assert_eq!(output.status.code(), Some(64));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("FORMAT_VIOLATION"));
    assert!(stderr.contains("bad.pdb"));
}

#[test]
fn survey_rejects_empty_selection() {
    let dir = tempfile::tempdir().unwrap();
    let output = binary()
        .args(["survey", "-q", dir.path().to_str().unwrap()])
        .output()
        .expect("failed to run binary");

    assert_eq!(output.status.code(), Some(64));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No files ending in '.ent.gz'"));
}
