//! Per-unit completeness checks: missing terminal punctuation and the
//! ordered incomplete-sentence rules.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::noise::has_code_vocabulary;
use crate::rules::{
    completion_suggestions, end_punctuation_suggestions, PatternRule, PHRASAL_PARTICLES,
    PHRASAL_VERBS, PREPOSITIONS,
};
use crate::segment::Sentence;
use crate::{Candidate, RuleId, HP};

pub const MISSING_END_PUNCTUATION_MESSAGE: &str =
    "Sentence appears to be missing ending punctuation";

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

static SUBJECT_AUX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:i|we|you|he|she|it|they|this|that|these|those|there|our|your|their",
        r"|users?|customers?|visitors?)\b.*",
        r"\b(?:am|is|are|was|were|be|been|being|has|have|had|do|does|did|will|would",
        r"|can|could|shall|should|may|might|must)\b",
    ))
    .unwrap()
});

const OBJECT_VERBS: &str = concat!(
    "recognize|respond|support|accept|honor|process|collect|share|sell|track|use",
    "|allow|provide|offer|guarantee|control|disclose",
);

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

pub static INCOMPLETE_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::new(
            "dangling_verb",
            RuleId::IncompleteSentence,
            "Verb appears to be missing its object",
            &format!(
                concat!(
                    r"(?i)\b(?:cannot|can't|(?:do|does|did|will|would|can|could|should)\s*(?:not|n't))",
                    r"\s+(?:\w+ly\s+)?(?:{v})(?:\s+(?:or|and)\s+(?:{v}))*(?:\s+to)?\s*[.!?]*$",
                ),
                v = OBJECT_VERBS
            ),
            completion_suggestions,
        ),
        PatternRule::new(
            "dangling_preposition",
            RuleId::HangingPreposition,
            "Sentence ends with a preposition that has no object",
            &format!(r"(?i)\b[\w'-]+\s+(?:{PREPOSITIONS})\s*[.!]*$"),
            completion_suggestions,
        )
        .unless(&format!(r"(?i)^(?:{PHRASAL_VERBS})\s+(?:{PHRASAL_PARTICLES})\b")),
        PatternRule::new(
            "browser_initiated",
            RuleId::IncompleteSentence,
            "Sentence ends with an unfinished phrase",
            r"(?i)\bbrowser-initiated\s*[.!?]*$",
            completion_suggestions,
        ),
        PatternRule::new(
            "trailing_list_intro",
            RuleId::IncompleteSentence,
            "Sentence ends before the list it introduces",
            r"(?i)\b(?:such as|including|as well as|for example)\s*[.!?]*$",
            completion_suggestions,
        ),
        PatternRule::new(
            "dependent_clause",
            RuleId::IncompleteSentence,
            "Dependent clause without a main clause",
            &format!(
                concat!(
                    r"(?i)^(?:although|though|because|since|unless|whereas|while|if|when|whenever)",
                    r"(?:\s+[^\s,;:.!?]+){{1,{max}}}[.!]$",
                ),
                max = HP.subordinate_max_tokens - 1
            ),
            completion_suggestions,
        ),
    ]
});

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn has_terminal_punctuation(text: &str) -> bool {
    text.trim_end()
        .trim_end_matches(['"', '\'', ')', ']', '\u{201D}', '\u{2019}'])
        .ends_with(['.', '!', '?', '\u{2026}'])
}

pub fn special_char_density(text: &str) -> f64 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let special = text
        .chars()
        .filter(|&c| {
            !c.is_alphanumeric()
                && !c.is_whitespace()
                && !matches!(c, '.' | ',' | '\'' | '"' | '-' | '!' | '?' | '\u{2019}')
        })
        .count();
    special as f64 / total as f64
}

pub fn is_content_sentence(text: &str) -> bool {
    let text = text.trim();
    if text.chars().count() < HP.content_min_chars {
        return false;
    }
    let tokens = text.split_whitespace().count();
    if tokens < HP.content_min_tokens {
        return false;
    }
    if SUBJECT_AUX_RE.is_match(text) {
        return true;
    }
    tokens >= HP.content_long_tokens
        && special_char_density(text) < HP.content_max_special_density
        && !has_code_vocabulary(text)
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

pub(crate) fn detect(sentence: &Sentence<'_>) -> Option<Candidate> {
    let text = sentence.text.trim();
    if text.is_empty() {
        return None;
    }

    if !has_terminal_punctuation(text) && !text.ends_with(':') && is_content_sentence(text) {
        return Some(Candidate {
            rule_id: RuleId::MissingEndPunctuation,
            message: MISSING_END_PUNCTUATION_MESSAGE,
            context: text.to_string(),
            suggestions: end_punctuation_suggestions(text),
            offset: sentence.offset,
        });
    }

    INCOMPLETE_RULES.iter().find_map(|rule| {
        rule.find(text).map(|m| Candidate {
            rule_id: rule.rule_id,
            message: rule.message,
            context: text.to_string(),
            suggestions: (rule.suggest)(m.as_str()),
            offset: sentence.offset,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(text: &str) -> Sentence<'_> {
        Sentence { text, offset: 0 }
    }

    fn rule_of(text: &str) -> Option<RuleId> {
        detect(&unit(text)).map(|c| c.rule_id)
    }

    #[test]
    fn terminal_punctuation_variants() {
        assert!(has_terminal_punctuation("Done."));
        assert!(has_terminal_punctuation("He said \"done.\""));
        assert!(has_terminal_punctuation("Really?!"));
        assert!(!has_terminal_punctuation("Not done"));
        assert!(!has_terminal_punctuation("Label:"));
    }

    #[test]
    fn missing_punctuation_on_content() {
        assert_eq!(
            rule_of("This policy explains how we collect data"),
            Some(RuleId::MissingEndPunctuation)
        );
        assert_eq!(
            rule_of("We will use your information to"),
            Some(RuleId::MissingEndPunctuation)
        );
    }

    #[test]
    fn missing_punctuation_has_single_fixed_suggestion() {
        let c = detect(&unit("We are always happy to hear from you")).unwrap();
        assert_eq!(c.suggestions, vec![crate::rules::ADD_END_PUNCTUATION]);
    }

    #[test]
    fn colon_ending_is_not_missing_punctuation() {
        assert_eq!(rule_of("We collect the following kinds of data:"), None);
    }

    #[test]
    fn short_labels_are_not_content() {
        assert!(!is_content_sentence("Read the docs"));
        assert!(!is_content_sentence("Pricing and plans"));
        assert!(!is_content_sentence("Set the margin and padding of every div element"));
        assert!(is_content_sentence("See all of the products in our catalog now"));
    }

    #[test]
    fn hanging_preposition_without_content() {
        assert_eq!(
            rule_of("Please visit our site to"),
            Some(RuleId::HangingPreposition)
        );
        assert_eq!(
            rule_of("Send your questions to."),
            Some(RuleId::HangingPreposition)
        );
    }

    #[test]
    fn phrasal_endings_and_questions_are_exempt() {
        assert_eq!(rule_of("Please sign in."), None);
        assert_eq!(rule_of("What are you looking for?"), None);
    }

    #[test]
    fn dangling_verb_wins_over_preposition() {
        let c = detect(&unit("We do not currently recognize or respond to.")).unwrap();
        assert_eq!(c.rule_id, RuleId::IncompleteSentence);
        assert!(c.suggestions[0].starts_with("Specify what is not recognized"));
        assert_eq!(c.suggestions[1], crate::rules::ADD_PROPER_PUNCTUATION);
    }

    #[test]
    fn fixed_fragments() {
        assert_eq!(
            rule_of("Our site does not respond to browser-initiated."),
            Some(RuleId::IncompleteSentence)
        );
        assert_eq!(
            rule_of("We accept many payment methods, such as."),
            Some(RuleId::IncompleteSentence)
        );
        assert_eq!(rule_of("Because we care."), Some(RuleId::IncompleteSentence));
    }

    #[test]
    fn complete_sentences_pass() {
        assert_eq!(rule_of("This is a complete sentence."), None);
        assert_eq!(rule_of("We appreciate your business."), None);
        assert_eq!(rule_of("If you have questions, contact us."), None);
    }
}
