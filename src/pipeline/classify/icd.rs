//! Stage-2: standardized category → ICD-11 chapter, with names read from an
//! external YAML label table.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use super::types::{
    ClassifyError, IcdEntry, StandardizedCategory, FALLBACK_ICD_CODE, UNKNOWN_ICD_NAME,
};

/// One entry of the label table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcdLabelInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// ICD-11 label table keyed by two-digit chapter code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IcdLabels(BTreeMap<String, IcdLabelInfo>);

impl IcdLabels {
    /// Parse a label table, either flat or nested under a top-level `labels` key.
    /// Unquoted numeric codes (`05:`) are normalised to two-digit strings.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ClassifyError> {
        let root: Value = serde_yaml::from_str(yaml)?;
        let table = match root {
            Value::Mapping(mut m) if m.contains_key("labels") => {
                m.remove("labels").unwrap_or(Value::Null)
            }
            other => other,
        };

        let mapping = match table {
            Value::Mapping(m) => m,
            Value::Null => return Ok(Self::default()),
            other => {
                return Err(ClassifyError::LabelsEntry {
                    code: String::new(),
                    reason: format!("expected a mapping of codes, found {}", value_kind(&other)),
                })
            }
        };

        let mut labels = BTreeMap::new();
        for (key, value) in mapping {
            let code = normalise_code(&key).ok_or_else(|| ClassifyError::LabelsEntry {
                code: format!("{key:?}"),
                reason: "code must be a string or integer".to_string(),
            })?;
            let info: IcdLabelInfo =
                serde_yaml::from_value(value).map_err(|e| ClassifyError::LabelsEntry {
                    code: code.clone(),
                    reason: e.to_string(),
                })?;
            labels.insert(code, info);
        }

        tracing::debug!(codes = labels.len(), "ICD label table parsed");
        Ok(Self(labels))
    }

    /// Read and parse a label table file. A missing or malformed table is fatal.
    pub fn load(path: &Path) -> Result<Self, ClassifyError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ClassifyError::LabelsRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn get(&self, code: &str) -> Option<&IcdLabelInfo> {
        self.0.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve a code to an entry, naming unknown codes [`UNKNOWN_ICD_NAME`].
    pub fn entry(&self, code: &str) -> IcdEntry {
        IcdEntry {
            code: code.to_string(),
            name: self
                .get(code)
                .map(|info| info.name.clone())
                .unwrap_or_else(|| UNKNOWN_ICD_NAME.to_string()),
        }
    }
}

fn normalise_code(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => n.as_u64().map(|n| format!("{n:02}")),
        _ => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Suggested ICD entry for a standardized category.
pub fn map_std_to_icd(category: StandardizedCategory, labels: &IcdLabels) -> IcdEntry {
    labels.entry(category.icd_code())
}

/// Suggested ICD entry for a textual standardized id; unknown ids map to chapter 21.
pub fn map_std_id_to_icd(std_id: &str, labels: &IcdLabels) -> IcdEntry {
    let code = StandardizedCategory::from_id(std_id)
        .map(|c| c.icd_code())
        .unwrap_or(FALLBACK_ICD_CODE);
    labels.entry(code)
}

/// Apply a clinician override. Codes absent from the table are ignored.
///
/// Returns the effective entry and whether the override was applied.
pub fn apply_override(
    suggested: &IcdEntry,
    override_code: Option<&str>,
    labels: &IcdLabels,
) -> (IcdEntry, bool) {
    match override_code.map(str::trim).filter(|c| !c.is_empty()) {
        Some(code) if labels.contains(code) => (labels.entry(code), true),
        Some(_) => {
            tracing::info!(
                suggested = %suggested.code,
                "Override code not in label table; keeping suggestion"
            );
            (suggested.clone(), false)
        }
        None => (suggested.clone(), false),
    }
}
