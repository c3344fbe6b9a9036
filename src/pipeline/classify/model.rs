use std::collections::BTreeSet;

use super::rules::{rule_category, weak_label};
use super::types::{ConsultRecord, StandardizedCategory};

/// Fewer weak-labeled examples than this and Stage-1 stays rule-based.
pub const MIN_TRAINING_EXAMPLES: usize = 3;

/// Stage-1: complaint text → standardized category.
pub trait StandardizationStrategy: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Whether a fitted statistical model backs this strategy. Never fails.
    fn is_trained(&self) -> bool;

    fn predict(&self, complaint: &str) -> StandardizedCategory;

    /// `(category, description)` for a complaint.
    fn predict_std(&self, complaint: &str) -> (StandardizedCategory, &'static str) {
        let category = self.predict(complaint);
        (category, category.description())
    }
}

/// Keyword-rule strategy. Always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleStrategy;

impl StandardizationStrategy for RuleStrategy {
    fn name(&self) -> &'static str {
        "keyword_rules"
    }

    fn is_trained(&self) -> bool {
        false
    }

    fn predict(&self, complaint: &str) -> StandardizedCategory {
        rule_category(complaint)
    }
}

/// Whether this build carries the statistical modeling backend.
pub fn statistical_backend_available() -> bool {
    cfg!(feature = "trained-model")
}

/// Build the Stage-1 strategy for a corpus.
///
/// Complaints are weak-labeled by the keyword rules; unlabeled ones are
/// dropped. The statistical model is fitted only when the backend is
/// compiled in, at least [`MIN_TRAINING_EXAMPLES`] examples survive, and they
/// span two or more categories. Otherwise the rules are used directly.
pub fn train_stage1(corpus: &[ConsultRecord]) -> Box<dyn StandardizationStrategy> {
    if !statistical_backend_available() {
        tracing::info!(strategy = "keyword_rules", "Statistical backend not built; using rules");
        return Box::new(RuleStrategy);
    }

    let mut texts = Vec::new();
    let mut labels = Vec::new();
    for record in corpus {
        let text = record.complaint.trim();
        if text.is_empty() {
            continue;
        }
        if let Some(label) = weak_label(text) {
            texts.push(text);
            labels.push(label);
        }
    }

    let distinct = labels.iter().collect::<BTreeSet<_>>().len();
    if texts.len() < MIN_TRAINING_EXAMPLES || distinct < 2 {
        tracing::info!(
            strategy = "keyword_rules",
            labeled = texts.len(),
            classes = distinct,
            "Too little labeled data; using rules"
        );
        return Box::new(RuleStrategy);
    }

    fit_statistical(&texts, &labels)
}

#[cfg(feature = "trained-model")]
fn fit_statistical(texts: &[&str], labels: &[StandardizedCategory]) -> Box<dyn StandardizationStrategy> {
    Box::new(super::tfidf::TrainedStrategy::fit(texts, labels))
}

#[cfg(not(feature = "trained-model"))]
fn fit_statistical(_texts: &[&str], _labels: &[StandardizedCategory]) -> Box<dyn StandardizationStrategy> {
    Box::new(RuleStrategy)
}
