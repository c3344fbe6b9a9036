use std::sync::LazyLock;

use regex::Regex;

/// Runs of periods or newlines end a sentence.
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.\n]+").expect("Invalid sentence break regex"));

/// Split a transcript into trimmed, non-empty sentences in input order.
///
/// Deliberately naive: abbreviations ("Dr.") and decimals ("38.5") split too.
pub fn split_sentences(transcript: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(transcript)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_on_periods_and_newlines() {
        let sentences = split_sentences("First one. Second one\nThird one.");
        assert_eq!(sentences, vec!["First one", "Second one", "Third one"]);
    }

    #[test]
    fn split_collapses_runs() {
        let sentences = split_sentences("Tired...\n\n\nDizzy.\n");
        assert_eq!(sentences, vec!["Tired", "Dizzy"]);
    }

    #[test]
    fn split_discards_whitespace_only_parts() {
        let sentences = split_sentences("  .  \n \t . Fever");
        assert_eq!(sentences, vec!["Fever"]);
    }

    #[test]
    fn split_empty_input() {
        assert!(split_sentences("").is_empty());
    }

    #[test]
    fn split_does_not_protect_decimals() {
        let sentences = split_sentences("Temperature 38.5 today");
        assert_eq!(sentences, vec!["Temperature 38", "5 today"]);
    }

    #[test]
    fn split_keeps_other_punctuation() {
        let sentences = split_sentences("Does it hurt? Yes, a lot!");
        assert_eq!(sentences, vec!["Does it hurt? Yes, a lot!"]);
    }
}
