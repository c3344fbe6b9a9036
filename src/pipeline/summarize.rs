//! Dual summaries over anchored bullets: a structured clinician note and a
//! conversational patient note. Input must already be redacted.

use super::provenance::{AnchorId, AnchorMap};

const CLINICIAN_PLACEHOLDER: &str = "No chief complaint provided [S1]";
const PATIENT_PLACEHOLDER: &str = "No main symptom captured [S1]";

/// Anchor cited by an illustrative line: the wanted position if the map has
/// it, otherwise the first anchor, otherwise `S1`.
fn cite(anchors: &AnchorMap, position: usize) -> AnchorId {
    let wanted = AnchorId::from_index(position);
    if anchors.contains(wanted) {
        wanted
    } else {
        anchors.first_id().unwrap_or(AnchorId::from_index(0))
    }
}

/// Clinician template: Chief Complaint / Plan / Red Flags.
pub fn make_clinician_summary(transcript: &str, bullets: &[String], anchors: &AnchorMap) -> String {
    let chief = bullets.first().map(String::as_str).unwrap_or(CLINICIAN_PLACEHOLDER);
    let lines = [
        "Chief Complaint:".to_string(),
        format!("- {chief}"),
        "Plan:".to_string(),
        format!("- Basic rest and hydration {}", cite(anchors, 0).bracketed()),
        "Red Flags:".to_string(),
        format!(
            "- Worsening persistent headache or high fever {}",
            cite(anchors, 1).bracketed()
        ),
    ];
    tracing::debug!(
        input_bytes = transcript.len(),
        bullets = bullets.len(),
        "Clinician summary rendered"
    );
    lines.join("\n")
}

/// Patient template: What this means for you / Action / Reminder.
pub fn make_patient_summary(transcript: &str, bullets: &[String], anchors: &AnchorMap) -> String {
    let you = bullets.first().map(String::as_str).unwrap_or(PATIENT_PLACEHOLDER);
    let lines = [
        "What this means for you:".to_string(),
        format!("- You reported: {you}"),
        "Action:".to_string(),
        "- Please rest well and drink enough water today.".to_string(),
        "Reminder:".to_string(),
        "- If symptoms worsen, consider a clinic visit promptly.".to_string(),
    ];
    tracing::debug!(
        input_bytes = transcript.len(),
        bullets = bullets.len(),
        anchors = anchors.len(),
        "Patient summary rendered"
    );
    lines.join("\n")
}
