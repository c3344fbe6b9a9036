pub mod config;
pub mod phi_audit; // Static audit: no free text in tracing calls
pub mod pipeline; // Redaction, provenance, classification, summaries
pub mod safe_log; // Redacting in-memory log sink

use tracing_subscriber::EnvFilter;

pub use pipeline::classify::{
    end_to_end_classify, ClassificationResult, ClassifyError, ComplaintClassifier, IcdEntry,
    IcdLabels, StandardizedCategory,
};
pub use pipeline::process_transcript;
pub use pipeline::provenance::{anchorize_by_disease, anchorize_by_time, AnchorMap};
pub use pipeline::redaction::redact;
pub use pipeline::summarize::{make_clinician_summary, make_patient_summary};
pub use safe_log::{LogSink, SafeLogger};

/// Install the global `tracing` subscriber. `RUST_LOG` wins over the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}
