use super::types::StandardizedCategory;

/// A conjunctive keyword rule: every phrase must occur in the lower-cased text.
struct KeywordRule {
    keywords: &'static [&'static str],
    category: StandardizedCategory,
}

/// Ordered weak-labeling rules; first fully satisfied rule wins.
static KEYWORD_RULES: &[KeywordRule] = &[
    // Respiratory acute
    KeywordRule { keywords: &["fever", "cough"], category: StandardizedCategory::RespAcute },
    KeywordRule { keywords: &["cough", "sputum"], category: StandardizedCategory::RespAcute },
    // Endocrine glycemic
    KeywordRule { keywords: &["thirsty", "urinate"], category: StandardizedCategory::EndoChronicGlyc },
    KeywordRule { keywords: &["polydipsia", "polyuria"], category: StandardizedCategory::EndoChronicGlyc },
    // Cardiovascular exertional
    KeywordRule { keywords: &["chest tightness"], category: StandardizedCategory::CardExertional },
    KeywordRule { keywords: &["shortness of breath"], category: StandardizedCategory::CardExertional },
    KeywordRule { keywords: &["heart racing"], category: StandardizedCategory::CardExertional },
    // GI acute
    KeywordRule { keywords: &["diarrhea"], category: StandardizedCategory::GiAcute },
    KeywordRule { keywords: &["abdominal pain"], category: StandardizedCategory::GiAcute },
    // MSK stiffness/pain
    KeywordRule { keywords: &["joint", "stiff"], category: StandardizedCategory::MskStiffPain },
    KeywordRule { keywords: &["joint", "pain"], category: StandardizedCategory::MskStiffPain },
];

/// Weak label for a complaint, or `None` when no rule is fully satisfied.
pub fn weak_label(text: &str) -> Option<StandardizedCategory> {
    let lower = text.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|rule| rule.keywords.iter().all(|k| lower.contains(k)))
        .map(|rule| rule.category)
}

/// Rule-only Stage-1 prediction with the `GENERAL_UNSPECIFIED` fallback.
pub fn rule_category(text: &str) -> StandardizedCategory {
    weak_label(text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fever_and_cough_is_respiratory() {
        assert_eq!(
            weak_label("I've had a fever and cough for three days."),
            Some(StandardizedCategory::RespAcute)
        );
    }

    #[test]
    fn rules_are_conjunctive() {
        // "fever" alone satisfies no rule.
        assert_eq!(weak_label("High fever since last night"), None);
        assert_eq!(weak_label("Cough with green sputum"), Some(StandardizedCategory::RespAcute));
    }

    #[test]
    fn endocrine_from_thirst_and_urination() {
        assert_eq!(
            weak_label("Thirsty all the time and I urinate a lot lately"),
            Some(StandardizedCategory::EndoChronicGlyc)
        );
    }

    #[test]
    fn single_phrase_rules() {
        assert_eq!(
            weak_label("Chest tightness when climbing stairs"),
            Some(StandardizedCategory::CardExertional)
        );
        assert_eq!(
            weak_label("Loose stools since yesterday with abdominal pain"),
            Some(StandardizedCategory::GiAcute)
        );
    }

    #[test]
    fn keywords_match_as_substrings() {
        assert_eq!(
            weak_label("My joints are stiff every morning"),
            Some(StandardizedCategory::MskStiffPain)
        );
    }

    #[test]
    fn first_satisfied_rule_wins() {
        // Satisfies both the respiratory and the GI rules; respiratory is listed first.
        assert_eq!(
            weak_label("Fever, cough and diarrhea"),
            Some(StandardizedCategory::RespAcute)
        );
    }

    #[test]
    fn match_is_case_insensitive() {
        assert_eq!(weak_label("DIARRHEA since lunch"), Some(StandardizedCategory::GiAcute));
    }

    #[test]
    fn unmatched_falls_back_to_general() {
        assert_eq!(rule_category("I feel a bit off"), StandardizedCategory::GeneralUnspecified);
        assert_eq!(rule_category(""), StandardizedCategory::GeneralUnspecified);
    }
}
