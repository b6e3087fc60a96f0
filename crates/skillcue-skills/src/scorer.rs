//! Relevance scoring of an input against a skill's triggers.
//!
//! Each matching keyword adds 0.2, each matching intent pattern 0.5 and each
//! matching context indicator 0.3. The sum saturates at 1.0. Substring checks
//! are case-insensitive; intent patterns are compiled case-insensitive.

use crate::constants::{
    CONTEXT_INDICATOR_WEIGHT, INTENT_PATTERN_WEIGHT, KEYWORD_WEIGHT, MAX_RELEVANCE_SCORE,
};
use crate::rules::RuleStore;
use crate::types::SkillDefinition;

/// Score `input` against `skill`. Always within `[0.0, 1.0]`.
pub fn score(input: &str, skill: &SkillDefinition) -> f64 {
    if !skill.has_triggers {
        return 0.0;
    }

    let lowered = input.to_lowercase();
    let contains = |needle: &String| lowered.contains(&needle.to_lowercase());

    let keywords = skill.keywords.iter().filter(|k| contains(k)).count();
    let intents = skill
        .intent_patterns
        .iter()
        .filter(|p| p.is_match(input))
        .count();
    let indicators = skill
        .context_indicators
        .iter()
        .filter(|i| contains(i))
        .count();

    let total = keywords as f64 * KEYWORD_WEIGHT
        + intents as f64 * INTENT_PATTERN_WEIGHT
        + indicators as f64 * CONTEXT_INDICATOR_WEIGHT;

    total.min(MAX_RELEVANCE_SCORE)
}

/// Score `input` against every skill, in rule-store order.
pub fn score_all<'a>(input: &str, rules: &'a RuleStore) -> Vec<(&'a str, f64)> {
    rules
        .definitions()
        .map(|skill| (skill.name.as_str(), score(input, skill)))
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::pattern::Pattern;

    fn skill(keywords: &[&str], intents: &[&str], indicators: &[&str]) -> SkillDefinition {
        SkillDefinition {
            keywords: keywords.iter().map(ToString::to_string).collect(),
            intent_patterns: intents.iter().map(|p| Pattern::compile(p)).collect(),
            context_indicators: indicators.iter().map(ToString::to_string).collect(),
            has_triggers: true,
            ..SkillDefinition::new("test")
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn no_triggers_scores_zero() {
        let bare = SkillDefinition::new("bare");
        assert_eq!(score("create a table page codeunit", &bare), 0.0);
    }

    #[test]
    fn single_keyword() {
        let s = skill(&["table", "page"], &[], &[]);
        assert!(approx(score("create a table", &s), 0.2));
    }

    #[test]
    fn two_keywords() {
        let s = skill(&["table", "page"], &[], &[]);
        assert!(approx(score("create a table and a page", &s), 0.4));
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let s = skill(&["Codeunit"], &[], &[]);
        assert!(approx(score("new CODEUNIT please", &s), 0.2));
    }

    #[test]
    fn intent_and_indicator_weights() {
        let s = skill(&[], &[r"write\s+tests?"], &[".al"]);
        assert!(approx(score("Write tests for Customer.al", &s), 0.8));
    }

    #[test]
    fn saturates_at_one() {
        let s = skill(&["a", "b", "c"], &["a", "b"], &["c"]);
        assert!(approx(score("abc", &s), 1.0));
    }

    #[test]
    fn invalid_intent_pattern_is_ignored() {
        let s = skill(&["table"], &["(unclosed"], &[]);
        assert!(approx(score("table (unclosed", &s), 0.2));
    }

    #[test]
    fn empty_trigger_block_scores_zero() {
        let s = skill(&[], &[], &[]);
        assert_eq!(score("anything", &s), 0.0);
    }

    #[test]
    fn score_all_follows_store_order() {
        let store = RuleStore::new(vec![
            SkillDefinition {
                name: "b".into(),
                ..skill(&["x"], &[], &[])
            },
            SkillDefinition {
                name: "a".into(),
                ..skill(&["y"], &[], &[])
            },
        ]);
        let scores = score_all("x marks", &store);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].0, "b");
        assert!(approx(scores[0].1, 0.2));
        assert_eq!(scores[1].0, "a");
        assert_eq!(scores[1].1, 0.0);
    }

    proptest! {
        #[test]
        fn score_is_bounded(input in ".{0,64}") {
            let s = skill(&["table", "page", "e"], &["a.*b", "[0-9]+"], &["x", " "]);
            let value = score(&input, &s);
            prop_assert!((0.0..=1.0).contains(&value));
        }

        #[test]
        fn appending_a_match_never_lowers_score(prefix in "[a-z ]{0,32}") {
            let s = skill(&["table", "page", "query"], &[r"\bcreate\b"], &["codeunit"]);
            let before = score(&prefix, &s);
            let after = score(&format!("{prefix} table"), &s);
            prop_assert!(after >= before);
        }
    }
}
