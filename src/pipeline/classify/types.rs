use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ICD-11 chapter used whenever a category or code cannot be resolved.
pub const FALLBACK_ICD_CODE: &str = "21";

/// Name reported for a code missing from the label table.
pub const UNKNOWN_ICD_NAME: &str = "Unknown";

/// Stage-1 output: a coarse, standardized complaint bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StandardizedCategory {
    RespAcute,
    EndoChronicGlyc,
    CardExertional,
    GiAcute,
    MskStiffPain,
    GeneralUnspecified,
}

impl StandardizedCategory {
    pub const ALL: [StandardizedCategory; 6] = [
        Self::RespAcute,
        Self::EndoChronicGlyc,
        Self::CardExertional,
        Self::GiAcute,
        Self::MskStiffPain,
        Self::GeneralUnspecified,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::RespAcute => "RESP_ACUTE",
            Self::EndoChronicGlyc => "ENDO_CHRONIC_GLYC",
            Self::CardExertional => "CARD_EXERTIONAL",
            Self::GiAcute => "GI_ACUTE",
            Self::MskStiffPain => "MSK_STIFF_PAIN",
            Self::GeneralUnspecified => "GENERAL_UNSPECIFIED",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    /// Readable snippet for clinicians and patients.
    pub fn description(&self) -> &'static str {
        match self {
            Self::RespAcute => "Acute cough with fever and yellow sputum (~3 days)",
            Self::EndoChronicGlyc => {
                "Chronic polydipsia/polyuria suggestive of glycemic dysregulation"
            }
            Self::CardExertional => "Exertional chest tightness with transient palpitations",
            Self::GiAcute => "Acute diarrhea with crampy abdominal pain (~1 day)",
            Self::MskStiffPain => "Morning-predominant joint stiffness and pain",
            Self::GeneralUnspecified => "General symptoms requiring further triage",
        }
    }

    /// ICD-11 chapter this category maps to.
    pub fn icd_code(&self) -> &'static str {
        match self {
            Self::RespAcute => "12",
            Self::EndoChronicGlyc => "05",
            Self::CardExertional => "11",
            Self::GiAcute => "13",
            Self::MskStiffPain => "15",
            Self::GeneralUnspecified => FALLBACK_ICD_CODE,
        }
    }
}

impl Default for StandardizedCategory {
    fn default() -> Self {
        Self::GeneralUnspecified
    }
}

impl fmt::Display for StandardizedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A resolved ICD-11 code and its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcdEntry {
    pub code: String,
    pub name: String,
}

impl fmt::Display for IcdEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} — {}", self.code, self.name)
    }
}

/// End-to-end output for one complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub standardized_id: StandardizedCategory,
    pub standardized_text: String,
    pub icd_suggested: IcdEntry,
    /// Equals `icd_suggested` unless a valid clinician override was supplied.
    pub icd_effective: IcdEntry,
    pub override_applied: bool,
}

/// One line of the labeled consult corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultRecord {
    #[serde(default)]
    pub complaint: String,
    /// Any other fields on the line are carried but unused.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ConsultRecord {
    pub fn new(complaint: impl Into<String>) -> Self {
        Self {
            complaint: complaint.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Classification errors. Only the ICD label table can fail; every other
/// miss degrades to a documented fallback.
#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Cannot read ICD label table {path}: {source}")]
    LabelsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ICD label table is not valid YAML: {0}")]
    LabelsParse(#[from] serde_yaml::Error),

    #[error("ICD label table entry {code}: {reason}")]
    LabelsEntry { code: String, reason: String },
}
