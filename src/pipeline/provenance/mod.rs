//! Sentence-level provenance: every bullet carries an `[S#]` anchor that
//! resolves to its source sentence plus a timecode or disease category.

pub mod disease;
pub mod types;

pub use disease::{classify_disease, DiseaseCategory};
pub use types::{
    AnchorDetail, AnchorId, AnchorMap, AnchorMode, AnchorRecord, InvalidAnchorId, Timecode,
};

use super::segment::split_sentences;

/// Bullets (one per sentence, each ending in `[S#]`) and the matching anchor map.
pub type Anchored = (Vec<String>, AnchorMap);

/// Anchor each sentence with a synthetic 5-second timecode window.
pub fn anchorize_by_time(transcript: &str) -> Anchored {
    anchorize(transcript, AnchorMode::Time)
}

/// Anchor each sentence with its patient-friendly disease category.
pub fn anchorize_by_disease(transcript: &str) -> Anchored {
    anchorize(transcript, AnchorMode::Disease)
}

/// Shared traversal for both anchor modes.
pub fn anchorize(transcript: &str, mode: AnchorMode) -> Anchored {
    let sentences = split_sentences(transcript);
    let mut bullets = Vec::with_capacity(sentences.len());
    let mut anchors = AnchorMap::new();

    for (index, sentence) in sentences.into_iter().enumerate() {
        let id = AnchorId::from_index(index);
        let detail = match mode {
            AnchorMode::Time => AnchorDetail::Timecode(Timecode::for_index(index)),
            AnchorMode::Disease => AnchorDetail::Disease(classify_disease(sentence)),
        };
        bullets.push(format!("{sentence} {}", id.bracketed()));
        anchors.insert(
            id,
            AnchorRecord {
                span: sentence.to_string(),
                index,
                detail,
            },
        );
    }

    tracing::debug!(mode = ?mode, anchors = anchors.len(), "Transcript anchored");

    (bullets, anchors)
}

/// Anchor id at the end of a bullet (`"... [S3]"` → `S3`).
pub fn trailing_anchor(bullet: &str) -> Option<AnchorId> {
    let inner = bullet.trim_end().strip_suffix(']')?;
    let open = inner.rfind('[')?;
    inner[open + 1..].parse().ok()
}
