pub mod classify;
pub mod latency;
pub mod provenance;
pub mod redaction;
pub mod segment;
pub mod summarize;

use provenance::{anchorize_by_time, Anchored};
use redaction::redact;

/// Redact, then anchor by time. The unit measured by the latency report.
pub fn process_transcript(text: &str) -> Anchored {
    anchorize_by_time(&redact(text))
}
