use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use nightingale_lib::pipeline::provenance::anchorize_by_time;
use nightingale_lib::pipeline::redaction::redact;
use nightingale_lib::pipeline::summarize::{make_clinician_summary, make_patient_summary};
use nightingale_lib::{config, ComplaintClassifier};

const EXIT_OK: u8 = 0;
const EXIT_USAGE: u8 = 1;

const USAGE: &str = "Usage: nightingale \"complaint text here\" [override_code_optional]";

#[derive(Parser, Debug)]
#[command(name = "nightingale", about = "Classify a complaint into a standardized summary and ICD-11 chapter", version)]
struct Args {
    /// Free-text complaint.
    #[arg(allow_hyphen_values = true)]
    complaint: Option<String>,

    /// Clinician ICD-11 override code (ignored unless present in the label table).
    override_code: Option<String>,

    /// Labeled consult corpus (JSON Lines).
    #[arg(long, value_name = "FILE")]
    corpus: Option<PathBuf>,

    /// ICD-11 label table (YAML).
    #[arg(long, value_name = "FILE")]
    labels: Option<PathBuf>,

    /// Also print clinician and patient summaries of the redacted complaint.
    #[arg(long)]
    summarize: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    nightingale_lib::init_tracing();
    run(&args, &mut io::stdout().lock(), &mut io::stderr().lock()).map(ExitCode::from)
}

/// Classify and print. Returns the process exit status.
fn run(args: &Args, out: &mut dyn Write, err: &mut dyn Write) -> Result<u8> {
    let Some(complaint) = args.complaint.as_deref().filter(|c| !c.trim().is_empty()) else {
        writeln!(err, "{USAGE}")?;
        return Ok(EXIT_USAGE);
    };

    let corpus_path = args.corpus.clone().unwrap_or_else(config::default_corpus_path);
    let labels_path = args.labels.clone().unwrap_or_else(config::default_labels_path);

    let classifier = ComplaintClassifier::from_paths(&corpus_path, &labels_path)
        .with_context(|| format!("Failed to prepare classifier from {}", labels_path.display()))?;
    let res = classifier.classify(complaint, args.override_code.as_deref());

    writeln!(out, "=== Stage-1: Standardization ===")?;
    writeln!(out, "ID:   {}", res.standardized_id)?;
    writeln!(out, "Text: {}", res.standardized_text)?;
    writeln!(out)?;
    writeln!(out, "=== Stage-2: ICD-11 ===")?;
    writeln!(out, "Suggested: {}", res.icd_suggested)?;
    if res.override_applied {
        writeln!(out, "Effective (overridden): {}", res.icd_effective)?;
    } else {
        writeln!(out, "Effective: {}", res.icd_effective)?;
    }

    if args.summarize {
        let redacted = redact(complaint);
        let (bullets, anchors) = anchorize_by_time(&redacted);
        writeln!(out)?;
        writeln!(out, "=== Clinician summary ===")?;
        writeln!(out, "{}", make_clinician_summary(&redacted, &bullets, &anchors))?;
        writeln!(out)?;
        writeln!(out, "=== Patient summary ===")?;
        writeln!(out, "{}", make_patient_summary(&redacted, &bullets, &anchors))?;
    }

    Ok(EXIT_OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn repo_file(relative: &str) -> String {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join(relative)
            .display()
            .to_string()
    }

    /// Parse argv with the shipped corpus and label table, run, and capture output.
    fn run_cli(argv: &[&str]) -> (u8, String, String) {
        let corpus = repo_file("data/synthetic_consults.jsonl");
        let labels = repo_file("data-classifier/disease_labels.yaml");
        let mut full: Vec<&str> =
            vec!["nightingale", "--corpus", corpus.as_str(), "--labels", labels.as_str()];
        full.extend_from_slice(argv);
        let args = Args::try_parse_from(full).unwrap();

        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(&args, &mut out, &mut err).unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    // =================================================================
    // USAGE
    // =================================================================

    #[test]
    fn missing_complaint_prints_usage_and_exits_1() {
        let (code, out, err) = run_cli(&[]);
        assert_eq!(code, EXIT_USAGE);
        assert!(out.is_empty());
        assert_eq!(err.trim_end(), USAGE);
    }

    #[test]
    fn blank_complaint_prints_usage_and_exits_1() {
        let (code, _, err) = run_cli(&["   "]);
        assert_eq!(code, EXIT_USAGE);
        assert!(err.contains("Usage: nightingale"));
    }

    // =================================================================
    // CLASSIFICATION OUTPUT
    // =================================================================

    #[test]
    fn prints_both_stages_for_shipped_data() {
        let (code, out, err) = run_cli(&["I've had a fever and cough for three days."]);
        assert_eq!(code, EXIT_OK);
        assert!(err.is_empty());
        assert!(out.contains("=== Stage-1: Standardization ==="));
        assert!(out.contains("ID:   RESP_ACUTE"));
        assert!(out.contains("Text: Acute cough with fever and yellow sputum (~3 days)"));
        assert!(out.contains("Suggested: 12 — Diseases of the respiratory system"));
        assert!(out.contains("Effective: 12 — Diseases of the respiratory system"));
        assert!(!out.contains("overridden"));
    }

    #[test]
    fn valid_override_is_reported_as_overridden() {
        let (code, out, _) = run_cli(&["I've had a fever and cough for three days.", "05"]);
        assert_eq!(code, EXIT_OK);
        assert!(out.contains("Suggested: 12 — Diseases of the respiratory system"));
        assert!(out.contains("Effective (overridden): 05 — Endocrine, nutritional or metabolic diseases"));
    }

    #[test]
    fn unknown_override_keeps_suggestion() {
        let (_, out, _) = run_cli(&["I've had a fever and cough for three days.", "99"]);
        assert!(out.contains("Effective: 12 — Diseases of the respiratory system"));
        assert!(!out.contains("overridden"));
    }

    #[test]
    fn complaint_starting_with_hyphen_is_classified() {
        let (code, out, _) = run_cli(&["-3 days of fever and cough"]);
        assert_eq!(code, EXIT_OK);
        assert!(out.contains("ID:   RESP_ACUTE"));
    }

    #[test]
    fn summaries_are_redacted() {
        let (code, out, _) = run_cli(&[
            "--summarize",
            "Alex Tan here, call 91234567. Fever and cough since Monday.",
        ]);
        assert_eq!(code, EXIT_OK);
        assert!(out.contains("=== Clinician summary ==="));
        assert!(out.contains("=== Patient summary ==="));
        assert!(!out.contains("Alex Tan"));
        assert!(!out.contains("91234567"));
    }

    #[test]
    fn missing_label_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml");
        let args = Args::try_parse_from([
            "nightingale",
            "--labels",
            missing.to_str().unwrap(),
            "Fever and cough",
        ])
        .unwrap();
        let err = run(&args, &mut Vec::new(), &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("Failed to prepare classifier"));
    }
}
