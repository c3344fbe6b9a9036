use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder written in place of every PHI match.
pub const REDACTION_PLACEHOLDER: &str = "[REDACTED]";

/// Which PHI pattern produced a redaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhiKind {
    Phone,
    NationalId,
    Email,
    Name,
}

/// Count of substitutions made for one PHI kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redaction {
    pub kind: PhiKind,
    pub count: usize,
}

/// Result of running the redactor over a piece of text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionReport {
    /// The scrubbed text.
    pub text: String,
    /// Whether any pattern matched.
    pub was_modified: bool,
    /// Per-kind substitution counts, in pattern order. Kinds with no match are omitted.
    pub redactions: Vec<Redaction>,
}

struct PhiPattern {
    regex: Regex,
    kind: PhiKind,
}

/// PHI patterns, applied in this order.
static PHI_PATTERNS: LazyLock<Vec<PhiPattern>> = LazyLock::new(|| {
    vec![
        // Singapore mobile/landline, optional +65 prefix
        pattern(r"(?:\+65\s?)?[89]\d{3}\s?\d{4}", PhiKind::Phone),
        // NRIC / FIN
        pattern(r"(?i)\b[STFG]\d{7}[A-Z]\b", PhiKind::NationalId),
        pattern(r"\b[\w.-]+@[\w.-]+\.\w+\b", PhiKind::Email),
        // Demo stand-in for a name recognizer
        pattern(r"(?i)\bAlex\s+Tan\b", PhiKind::Name),
    ]
});

fn pattern(regex_str: &str, kind: PhiKind) -> PhiPattern {
    PhiPattern {
        regex: Regex::new(regex_str).expect("Invalid PHI regex pattern"),
        kind,
    }
}

/// Replace every PHI-like substring with [`REDACTION_PLACEHOLDER`].
pub fn redact(text: &str) -> String {
    redact_with_report(text).text
}

/// Redact and report what was removed (counts only, never the removed values).
pub fn redact_with_report(text: &str) -> RedactionReport {
    if text.is_empty() {
        return RedactionReport {
            text: String::new(),
            was_modified: false,
            redactions: Vec::new(),
        };
    }

    let mut result = text.to_string();
    let mut redactions = Vec::new();

    for pat in PHI_PATTERNS.iter() {
        let count = pat.regex.find_iter(&result).count();
        if count == 0 {
            continue;
        }
        result = pat
            .regex
            .replace_all(&result, REDACTION_PLACEHOLDER)
            .into_owned();
        redactions.push(Redaction {
            kind: pat.kind,
            count,
        });
    }

    if !redactions.is_empty() {
        tracing::debug!(
            kinds = ?redactions.iter().map(|r| r.kind).collect::<Vec<_>>(),
            total = redactions.iter().map(|r| r.count).sum::<usize>(),
            "PHI redacted"
        );
    }

    RedactionReport {
        was_modified: !redactions.is_empty(),
        text: result,
        redactions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYNTHETIC_PHI: &str = "My name is Alex Tan. \
        NRIC: S1234567D. \
        Mobile: +65 9123 4567. \
        Email: alex.tan@example.com. \
        I have had a fever for two days.";

    // =================================================================
    // PHI REMOVAL
    // =================================================================

    #[test]
    fn redact_removes_all_synthetic_phi() {
        let out = redact(SYNTHETIC_PHI);
        for token in ["Alex Tan", "S1234567D", "+65 9123 4567", "alex.tan@example.com"] {
            assert!(!out.contains(token), "Output leaked PHI: {token}");
        }
        assert!(out.contains(REDACTION_PLACEHOLDER));
    }

    #[test]
    fn redact_preserves_clinical_content() {
        let out = redact(SYNTHETIC_PHI);
        assert!(out.contains("fever for two days"));
    }

    #[test]
    fn redact_phone_without_country_code() {
        let out = redact("Call me on 8123 4567 after six.");
        assert_eq!(out, "Call me on [REDACTED] after six.");
    }

    #[test]
    fn redact_phone_without_spaces() {
        let out = redact("Reach me at 91234567");
        assert_eq!(out, "Reach me at [REDACTED]");
    }

    #[test]
    fn redact_national_id_case_insensitive() {
        let out = redact("id t7654321z on file");
        assert_eq!(out, "id [REDACTED] on file");
    }

    #[test]
    fn redact_name_case_insensitive() {
        let out = redact("ALEX   TAN called earlier");
        assert_eq!(out, "[REDACTED] called earlier");
    }

    #[test]
    fn redact_email() {
        let out = redact("send to first.last-1@clinic.example.sg please");
        assert_eq!(out, "send to [REDACTED] please");
    }

    // =================================================================
    // REPORT
    // =================================================================

    #[test]
    fn report_counts_each_kind() {
        let report = redact_with_report(SYNTHETIC_PHI);
        assert!(report.was_modified);
        let kinds: Vec<PhiKind> = report.redactions.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![PhiKind::Phone, PhiKind::NationalId, PhiKind::Email, PhiKind::Name]
        );
        assert!(report.redactions.iter().all(|r| r.count == 1));
    }

    #[test]
    fn report_unmodified_for_clean_text() {
        let report = redact_with_report("Loose stools since yesterday with abdominal cramps.");
        assert!(!report.was_modified);
        assert!(report.redactions.is_empty());
    }

    // =================================================================
    // EDGE CASES
    // =================================================================

    #[test]
    fn redact_empty_input() {
        assert_eq!(redact(""), "");
    }

    #[test]
    fn redact_clean_input_unchanged() {
        let input = "I've had a fever and cough for three days.";
        assert_eq!(redact(input), input);
    }

    #[test]
    fn redact_is_idempotent() {
        let once = redact(SYNTHETIC_PHI);
        assert_eq!(redact(&once), once);
    }

    #[test]
    fn redact_keeps_short_numbers_and_timecodes() {
        let input = "Temperature 38.5 at 00:05-00:10, BP 120/80, 3 days.";
        assert_eq!(redact(input), input);
    }
}
