use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::types::ConsultRecord;

/// Load the labeled consult corpus (JSON Lines).
///
/// A missing or unreadable file is an empty corpus. Blank and malformed lines
/// are skipped.
pub fn load_consults(path: &Path) -> Vec<ConsultRecord> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Consult corpus unavailable");
            return Vec::new();
        }
    };
    parse_consults(BufReader::new(file))
}

/// Parse JSON Lines from any reader with the same skipping rules as [`load_consults`].
pub fn parse_consults<R: BufRead>(reader: R) -> Vec<ConsultRecord> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<ConsultRecord>(line) {
            Ok(rec) => records.push(rec),
            Err(_) => skipped += 1,
        }
    }

    tracing::debug!(records = records.len(), skipped, "Consult corpus loaded");
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_empty_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let records = load_consults(&dir.path().join("absent.jsonl"));
        assert!(records.is_empty());
    }

    #[test]
    fn loads_valid_lines_and_skips_bad_ones() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"complaint": "Fever and cough for two days"}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, "not json at all").unwrap();
        writeln!(file, r#"{{"complaint": "Diarrhea since lunch", "age": 30}}"#).unwrap();
        writeln!(file, r#"["an", "array"]"#).unwrap();

        let records = load_consults(file.path());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].complaint, "Fever and cough for two days");
        assert_eq!(records[1].complaint, "Diarrhea since lunch");
    }

    #[test]
    fn parse_from_memory() {
        let input = "{\"complaint\": \"Joint pain\"}\n   \n{\"complaint\": \"Thirsty\"}\n";
        let records = parse_consults(input.as_bytes());
        assert_eq!(records.len(), 2);
    }
}
