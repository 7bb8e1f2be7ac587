//! Declarative rule tables shared by the per-unit and whole-text detectors.
//!
//! A rule is a regex, the finding it produces, and a function choosing
//! suggestions from the matched text. New rules are new table entries.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::RuleId;

pub const ADD_END_PUNCTUATION: &str = "Add appropriate ending punctuation";
pub const ADD_PROPER_PUNCTUATION: &str = "Add proper punctuation";
pub const ADD_MAIN_CLAUSE: &str = "Complete the sentence with a main clause";
pub const ADD_PREPOSITION_OBJECT: &str = "Add the object of the preposition";

pub const PREPOSITIONS: &str =
    "to|of|for|with|from|by|about|into|onto|upon|at|in|on|than|through|via|regarding";

/// Verbs whose trailing particle legitimately ends a sentence ("log in").
pub const PHRASAL_VERBS: &str = concat!(
    "log|logged|sign|signed|check|checked|opt|opted|plug|plugged|turn|turned",
    "|carry|carried|hold|held|rely|relied|depend|depended|count|focus|focused|agree|agreed",
    "|belong|belongs|refer|referred|look|looking|ask|asked|care|talk|worry|come|came",
    "|go|going|move|moved|logging|signing",
);

pub const PHRASAL_PARTICLES: &str = "in|on|to|for|about|with|from";

pub struct PatternRule {
    pub name: &'static str,
    pub rule_id: RuleId,
    pub message: &'static str,
    pub pattern: Regex,
    /// Matches of `pattern` are discarded when this also matches them.
    pub unless: Option<Regex>,
    pub suggest: fn(&str) -> Vec<String>,
}

impl PatternRule {
    pub fn new(
        name: &'static str,
        rule_id: RuleId,
        message: &'static str,
        pattern: &str,
        suggest: fn(&str) -> Vec<String>,
    ) -> Self {
        Self {
            name,
            rule_id,
            message,
            pattern: Regex::new(pattern).unwrap(),
            unless: None,
            suggest,
        }
    }

    pub fn unless(mut self, pattern: &str) -> Self {
        self.unless = Some(Regex::new(pattern).unwrap());
        self
    }

    fn exempt(&self, matched: &str) -> bool {
        self.unless.as_ref().is_some_and(|re| re.is_match(matched))
    }

    pub fn find<'t>(&self, text: &'t str) -> Option<regex::Match<'t>> {
        self.pattern.find(text).filter(|m| !self.exempt(m.as_str()))
    }

    pub fn find_iter<'r, 't>(
        &'r self,
        text: &'t str,
    ) -> impl Iterator<Item = regex::Match<'t>> + 'r
    where
        't: 'r,
    {
        self.pattern
            .find_iter(text)
            .filter(move |m| !self.exempt(m.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Suggestion selection
// ---------------------------------------------------------------------------

/// Sub-patterns checked against the matched span, most specific first.
static SUGGESTION_SELECTORS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"(?i)\bbrowser-initiated\s*[.!?]*$").unwrap(),
            "Name what is browser-initiated, e.g. \"browser-initiated Do Not Track signals\"",
        ),
        (
            Regex::new(concat!(
                r"(?i)\b(?:do|does|did|will|would|can|could)\s*(?:not|n't)\b.*",
                r"\b(?:recognize|respond)\b",
            ))
            .unwrap(),
            "Specify what is not recognized or responded to, e.g. \"Do Not Track signals\"",
        ),
        (
            Regex::new(r"(?i)\b(?:cannot|can't|(?:do|does|did|will|would|could)\s*(?:not|n't))\b")
                .unwrap(),
            "Add the object of the verb",
        ),
        (
            Regex::new(r"(?i)\b(?:such as|including|as well as|for example)\s*[.!?:]*$").unwrap(),
            "Finish the list that this phrase introduces",
        ),
        (
            Regex::new(&format!(r"(?i)\s(?:{PREPOSITIONS})\s*[.!?]*$")).unwrap(),
            ADD_PREPOSITION_OBJECT,
        ),
    ]
});

pub fn completion_suggestions(matched: &str) -> Vec<String> {
    let primary = SUGGESTION_SELECTORS
        .iter()
        .find(|(re, _)| re.is_match(matched))
        .map_or(ADD_MAIN_CLAUSE, |(_, suggestion)| *suggestion);
    vec![primary.to_string(), ADD_PROPER_PUNCTUATION.to_string()]
}

pub fn end_punctuation_suggestions(_matched: &str) -> Vec<String> {
    vec![ADD_END_PUNCTUATION.to_string()]
}
