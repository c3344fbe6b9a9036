use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::disease::DiseaseCategory;

/// Length of each synthetic timecode window in seconds.
pub const SECONDS_PER_SENTENCE: u32 = 5;

/// Per-sentence provenance id, rendered as `S<n>` with n starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnchorId(u32);

impl AnchorId {
    /// Anchor for the sentence at 0-based `index`.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    /// Bracketed form used as the bullet suffix, e.g. `[S3]`.
    pub fn bracketed(&self) -> String {
        format!("[{self}]")
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidAnchorId(pub String);

impl fmt::Display for InvalidAnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid anchor id: {:?}", self.0)
    }
}

impl std::error::Error for InvalidAnchorId {}

impl FromStr for AnchorId {
    type Err = InvalidAnchorId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('S')
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .map(AnchorId)
            .ok_or_else(|| InvalidAnchorId(s.to_string()))
    }
}

impl Serialize for AnchorId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Synthetic `[start, end)` window in seconds, rendered `MM:SS-MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timecode {
    pub start_secs: u32,
    pub end_secs: u32,
}

impl Timecode {
    /// Window for the sentence at 0-based `index`.
    pub fn for_index(index: usize) -> Self {
        let start_secs = index as u32 * SECONDS_PER_SENTENCE;
        Self {
            start_secs,
            end_secs: start_secs + SECONDS_PER_SENTENCE,
        }
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start_secs / 60,
            self.start_secs % 60,
            self.end_secs / 60,
            self.end_secs % 60
        )
    }
}

impl Serialize for Timecode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The enrichment carried by an anchor: exactly one of timecode or disease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorDetail {
    Timecode(Timecode),
    Disease(DiseaseCategory),
}

/// Metadata linking a bullet back to its source sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnchorRecord {
    /// Original sentence text.
    pub span: String,
    /// 0-based sentence position.
    pub index: usize,
    #[serde(flatten)]
    pub detail: AnchorDetail,
}

impl AnchorRecord {
    pub fn timecode(&self) -> Option<Timecode> {
        match self.detail {
            AnchorDetail::Timecode(tc) => Some(tc),
            AnchorDetail::Disease(_) => None,
        }
    }

    pub fn disease(&self) -> Option<DiseaseCategory> {
        match self.detail {
            AnchorDetail::Disease(d) => Some(d),
            AnchorDetail::Timecode(_) => None,
        }
    }
}

/// Anchor lookup ordered by anchor number (S2 before S10).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorMap(BTreeMap<AnchorId, AnchorRecord>);

impl AnchorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: AnchorId, record: AnchorRecord) -> Option<AnchorRecord> {
        self.0.insert(id, record)
    }

    pub fn get(&self, id: AnchorId) -> Option<&AnchorRecord> {
        self.0.get(&id)
    }

    /// Look up by textual id such as `"S2"`. Malformed ids resolve to `None`.
    pub fn get_str(&self, id: &str) -> Option<&AnchorRecord> {
        id.parse::<AnchorId>().ok().and_then(|id| self.0.get(&id))
    }

    pub fn contains(&self, id: AnchorId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn contains_str(&self, id: &str) -> bool {
        self.get_str(id).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = AnchorId> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnchorId, &AnchorRecord)> + '_ {
        self.0.iter().map(|(id, record)| (*id, record))
    }

    pub fn first_id(&self) -> Option<AnchorId> {
        self.0.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for AnchorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, record) in &self.0 {
            map.serialize_entry(&id.to_string(), record)?;
        }
        map.end()
    }
}

/// Which enrichment the anchorer attaches to each sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorMode {
    Time,
    Disease,
}
