//! Two-stage complaint classification.
//!
//! Stage 1 maps complaint text to a [`StandardizedCategory`] using either a
//! small trained model or keyword rules (chosen once, at construction).
//! Stage 2 maps that category to an ICD-11 chapter and applies any clinician
//! override against the label table.

pub mod corpus;
pub mod icd;
pub mod model;
pub mod rules;
#[cfg(feature = "trained-model")]
pub mod tfidf;
pub mod types;

use std::path::Path;

pub use corpus::load_consults;
pub use icd::{apply_override, map_std_id_to_icd, map_std_to_icd, IcdLabelInfo, IcdLabels};
pub use model::{statistical_backend_available, train_stage1, RuleStrategy, StandardizationStrategy};
pub use types::{
    ClassificationResult, ClassifyError, ConsultRecord, IcdEntry, StandardizedCategory,
    FALLBACK_ICD_CODE, UNKNOWN_ICD_NAME,
};

/// Stage-1 strategy plus ICD label table, built once and reused per complaint.
pub struct ComplaintClassifier {
    strategy: Box<dyn StandardizationStrategy>,
    labels: IcdLabels,
}

impl ComplaintClassifier {
    pub fn new(strategy: Box<dyn StandardizationStrategy>, labels: IcdLabels) -> Self {
        Self { strategy, labels }
    }

    /// Train Stage-1 from the corpus file (missing → rules) and load the label
    /// table (missing → error).
    pub fn from_paths(corpus_path: &Path, labels_path: &Path) -> Result<Self, ClassifyError> {
        let labels = IcdLabels::load(labels_path)?;
        let strategy = train_stage1(&load_consults(corpus_path));
        Ok(Self::new(strategy, labels))
    }

    pub fn strategy(&self) -> &dyn StandardizationStrategy {
        self.strategy.as_ref()
    }

    pub fn labels(&self) -> &IcdLabels {
        &self.labels
    }

    /// Run both stages on one complaint.
    pub fn classify(&self, complaint: &str, override_code: Option<&str>) -> ClassificationResult {
        let (standardized_id, standardized_text) = self.strategy.predict_std(complaint);
        let icd_suggested = map_std_to_icd(standardized_id, &self.labels);
        let (icd_effective, override_applied) =
            apply_override(&icd_suggested, override_code, &self.labels);

        tracing::info!(
            strategy = self.strategy.name(),
            category = %standardized_id,
            suggested = %icd_suggested.code,
            effective = %icd_effective.code,
            override_applied,
            "Complaint classified"
        );

        ClassificationResult {
            standardized_id,
            standardized_text: standardized_text.to_string(),
            icd_suggested,
            icd_effective,
            override_applied,
        }
    }
}

/// One-shot classification: reads the corpus and label table, then classifies.
pub fn end_to_end_classify(
    complaint: &str,
    override_code: Option<&str>,
    corpus_path: &Path,
    labels_path: &Path,
) -> Result<ClassificationResult, ClassifyError> {
    let classifier = ComplaintClassifier::from_paths(corpus_path, labels_path)?;
    Ok(classifier.classify(complaint, override_code))
}
