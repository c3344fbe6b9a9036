use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Patient-friendly disease super-categories. Closed set: the classifier
/// never returns anything outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiseaseCategory {
    #[serde(rename = "General symptoms")]
    GeneralSymptoms,
    #[serde(rename = "Respiratory infection")]
    RespiratoryInfection,
    #[serde(rename = "Cardiovascular symptoms")]
    Cardiovascular,
    #[serde(rename = "Neurology (headache/dizziness/nerve pain)")]
    Neurology,
    #[serde(rename = "Digestive issues")]
    Digestive,
    #[serde(rename = "Urinary symptoms")]
    Urinary,
    #[serde(rename = "Musculoskeletal pain")]
    Musculoskeletal,
    #[serde(rename = "Skin & allergy")]
    SkinAllergy,
    #[serde(rename = "Eye/Ear/Nose/Throat")]
    EyeEarNoseThroat,
    #[serde(rename = "Endocrine & metabolic")]
    EndocrineMetabolic,
    #[serde(rename = "Mental health")]
    MentalHealth,
    #[serde(rename = "Reproductive & sexual health")]
    ReproductiveSexual,
}

impl DiseaseCategory {
    pub const ALL: [DiseaseCategory; 12] = [
        Self::GeneralSymptoms,
        Self::RespiratoryInfection,
        Self::Cardiovascular,
        Self::Neurology,
        Self::Digestive,
        Self::Urinary,
        Self::Musculoskeletal,
        Self::SkinAllergy,
        Self::EyeEarNoseThroat,
        Self::EndocrineMetabolic,
        Self::MentalHealth,
        Self::ReproductiveSexual,
    ];

    /// Display label shown to patients.
    pub fn label(&self) -> &'static str {
        match self {
            Self::GeneralSymptoms => "General symptoms",
            Self::RespiratoryInfection => "Respiratory infection",
            Self::Cardiovascular => "Cardiovascular symptoms",
            Self::Neurology => "Neurology (headache/dizziness/nerve pain)",
            Self::Digestive => "Digestive issues",
            Self::Urinary => "Urinary symptoms",
            Self::Musculoskeletal => "Musculoskeletal pain",
            Self::SkinAllergy => "Skin & allergy",
            Self::EyeEarNoseThroat => "Eye/Ear/Nose/Throat",
            Self::EndocrineMetabolic => "Endocrine & metabolic",
            Self::MentalHealth => "Mental health",
            Self::ReproductiveSexual => "Reproductive & sexual health",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for DiseaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct DiseaseRule {
    regex: Regex,
    category: DiseaseCategory,
}

/// Ordered rules; the first match wins, so a sentence mentioning both a
/// cough and a fever is a respiratory infection.
static DISEASE_RULES: LazyLock<Vec<DiseaseRule>> = LazyLock::new(|| {
    vec![
        rule(
            r"\b(?:cough(?:s|ing|ed)?|phlegmy?|sore throat|throat|runny nose|blocked nose)\b",
            DiseaseCategory::RespiratoryInfection,
        ),
        rule(
            r"\b(?:headaches?|dizzy|dizziness|migraines?|nerve pain)\b",
            DiseaseCategory::Neurology,
        ),
        rule(
            r"\b(?:diarrh(?:o)?ea|stomach pain|abdominal|nause(?:a|ated|ous)|vomit(?:s|ing|ed)?|acid reflux)\b",
            DiseaseCategory::Digestive,
        ),
        rule(
            r"\b(?:chest pain|palpitations?|shortness of breath|breathless(?:ness)?|tachycardia)\b",
            DiseaseCategory::Cardiovascular,
        ),
        rule(
            r"\b(?:fever(?:s|ish)?|fatigued?|weight loss)\b",
            DiseaseCategory::GeneralSymptoms,
        ),
        rule(
            r"\b(?:urinary|dysuria|blood in urine|frequency)\b",
            DiseaseCategory::Urinary,
        ),
        rule(
            r"\b(?:back pain|joint pain|muscle pain|shoulder pain)\b",
            DiseaseCategory::Musculoskeletal,
        ),
        rule(
            r"\b(?:rash(?:es)?|itch(?:y|ing)?|hives|allerg(?:y|ies|ic))\b",
            DiseaseCategory::SkinAllergy,
        ),
        rule(
            r"\b(?:eyes?|ears?|nose|conjunctivitis|earaches?|nosebleeds?)\b",
            DiseaseCategory::EyeEarNoseThroat,
        ),
        rule(
            r"\b(?:thyroid|blood sugar|diabet(?:es|ic))\b",
            DiseaseCategory::EndocrineMetabolic,
        ),
        rule(
            r"\b(?:anxiety|anxious|depress(?:ion|ed)|insomnia|sleep(?:ing|less)?)\b",
            DiseaseCategory::MentalHealth,
        ),
        rule(
            r"\b(?:reproductive|sexual|std|pelvic pain)\b",
            DiseaseCategory::ReproductiveSexual,
        ),
    ]
});

fn rule(regex_str: &str, category: DiseaseCategory) -> DiseaseRule {
    DiseaseRule {
        regex: Regex::new(regex_str).expect("Invalid disease rule regex"),
        category,
    }
}

/// Map one sentence to a patient-friendly disease category.
pub fn classify_disease(sentence: &str) -> DiseaseCategory {
    let lower = sentence.to_lowercase();
    DISEASE_RULES
        .iter()
        .find(|r| r.regex.is_match(&lower))
        .map(|r| r.category)
        .unwrap_or(DiseaseCategory::GeneralSymptoms)
}
