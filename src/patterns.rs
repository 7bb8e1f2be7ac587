//! Whole-text scan for incomplete patterns that sentence segmentation can
//! split differently, e.g. a hanging preposition at the end of a long
//! capitalized run.

use once_cell::sync::Lazy;
use tracing::debug;

use crate::noise::{
    is_of_heading, is_template_heading, is_title_case_phrase, HeadingFilter, NoiseFilter,
    UiElementFilter,
};
use crate::rules::{
    completion_suggestions, PatternRule, PHRASAL_PARTICLES, PHRASAL_VERBS, PREPOSITIONS,
};
use crate::{Candidate, RuleId, HP};

const RUN_ENDINGS: &str = "and|or|but|nor|the|a|an|our|your|their|its|that|which|because|if";

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

pub static GLOBAL_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::new(
            "hanging_preposition_run",
            RuleId::HangingPreposition,
            "Text ends with a preposition that has no object",
            &format!(
                r"(?m)\b[A-Z][^.!?\n]{{{min},}}?[ \t](?i:{PREPOSITIONS})[ \t\r]*$",
                min = HP.pattern_min_run_chars
            ),
            completion_suggestions,
        )
        .unless(&format!(
            r"(?i)\b(?:{PHRASAL_VERBS})[ \t]+(?:{PHRASAL_PARTICLES})[ \t\r]*$"
        )),
        PatternRule::new(
            "dangling_conjunction_run",
            RuleId::PossibleIncompleteSentence,
            "Text ends with a word that should be followed by more of the sentence",
            &format!(
                r"(?m)\b[A-Z][^.!?\n]{{{min},}}?[ \t](?i:{RUN_ENDINGS})[ \t\r]*$",
                min = HP.pattern_min_run_chars
            ),
            completion_suggestions,
        ),
        PatternRule::new(
            "truncated_negation",
            RuleId::IncompleteSentence,
            "Verb appears to be missing its object",
            concat!(
                r"(?i)\b(?:do|does|did|will|would|can|could)\s*(?:not|n't)\s+(?:\w+ly\s+)?",
                r"(?:recognize|respond)(?:\s+(?:or|and)\s+(?:recognize|respond))*(?:\s+to)?\s*\.",
            ),
            completion_suggestions,
        ),
    ]
});

// ---------------------------------------------------------------------------
// Heading exemption
// ---------------------------------------------------------------------------

/// Heading shapes that legitimately end in a preposition: `"Limitation of"`,
/// `"The Right to"`, `"Disclosure of Information To"`.
pub fn is_preposition_heading(span: &str) -> bool {
    let span = span.trim();
    if span.split_whitespace().count() > HP.template_heading_max_words {
        return false;
    }
    if is_template_heading(span) {
        return true;
    }
    let head = span
        .rsplit_once(char::is_whitespace)
        .map_or("", |(head, _)| head.trim_end());
    !head.is_empty() && (is_title_case_phrase(head) || is_of_heading(head))
}

fn is_structural(span: &str) -> bool {
    HeadingFilter.matches(span) || UiElementFilter.matches(span) || is_preposition_heading(span)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub(crate) fn scan(text: &str) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for rule in GLOBAL_RULES.iter() {
        for m in rule.find_iter(text) {
            let span = m.as_str();
            if is_structural(span) {
                debug!(rule = rule.name, span = span.trim(), "heading-shaped match ignored");
                continue;
            }
            candidates.push(Candidate {
                rule_id: rule.rule_id,
                message: rule.message,
                context: span.to_string(),
                suggestions: (rule.suggest)(span),
                offset: m.start(),
            });
        }
    }
    candidates
}
