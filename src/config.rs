use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Nightingale";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the consult corpus location.
pub const CORPUS_ENV: &str = "NIGHTINGALE_CORPUS";
/// Environment variable overriding the ICD label table location.
pub const LABELS_ENV: &str = "NIGHTINGALE_ICD_LABELS";

const DEFAULT_CORPUS: &str = "data/synthetic_consults.jsonl";
const DEFAULT_LABELS: &str = "data-classifier/disease_labels.yaml";

/// Default `tracing` filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "nightingale=info,nightingale_lib=info"
}

/// Labeled consult corpus (JSON Lines) used to train Stage-1.
pub fn default_corpus_path() -> PathBuf {
    path_from_env(CORPUS_ENV, DEFAULT_CORPUS)
}

/// ICD-11 label table (YAML).
pub fn default_labels_path() -> PathBuf {
    path_from_env(LABELS_ENV, DEFAULT_LABELS)
}

fn path_from_env(var: &str, fallback: &str) -> PathBuf {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(fallback))
}
