//! Suppression of repeated and overlapping findings within one run.

use std::collections::HashSet;

use crate::{GrammarError, RuleId};

/// Trimmed fragments accepted so far in a run.
///
/// A fragment is rejected when it equals, contains, or is contained in any
/// fragment already accepted. Acceptance is final: nothing is ever removed.
#[derive(Debug, Default)]
pub struct FragmentSet {
    seen: Vec<String>,
}

impl FragmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlaps(&self, fragment: &str) -> bool {
        let fragment = fragment.trim();
        self.seen
            .iter()
            .any(|s| s.contains(fragment) || fragment.contains(s.as_str()))
    }

    pub fn accept(&mut self, fragment: &str) -> bool {
        let fragment = fragment.trim();
        if fragment.is_empty() || self.overlaps(fragment) {
            return false;
        }
        self.seen.push(fragment.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

pub fn dedupe_by_context_and_rule(errors: Vec<GrammarError>) -> Vec<GrammarError> {
    let mut seen: HashSet<(String, RuleId)> = HashSet::new();
    let mut unique = Vec::new();
    for error in errors {
        if seen.insert((error.context.trim().to_string(), error.rule_id)) {
            unique.push(error);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    fn error(context: &str, rule_id: RuleId) -> GrammarError {
        GrammarError {
            message: "m".to_string(),
            context: context.to_string(),
            suggestions: vec!["s".to_string()],
            rule_id,
            position: Position {
                offset: 0,
                length: context.len(),
            },
        }
    }

    #[test]
    fn exact_repeat_is_rejected() {
        let mut set = FragmentSet::new();
        assert!(set.accept("Please visit our site to"));
        assert!(!set.accept("  Please visit our site to "));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn substring_and_superstring_are_rejected() {
        let mut set = FragmentSet::new();
        assert!(set.accept("visit our site to"));
        assert!(!set.accept("Please visit our site to"));
        assert!(!set.accept("site to"));
        assert!(set.accept("Something unrelated"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn empty_fragment_is_never_accepted() {
        let mut set = FragmentSet::new();
        assert!(!set.accept("   "));
        assert!(set.is_empty());
    }

    #[test]
    fn composite_key_keeps_first_occurrence() {
        let errors = vec![
            error("a b", RuleId::HangingPreposition),
            error("a b", RuleId::MissingEndPunctuation),
            error("a b ", RuleId::HangingPreposition),
        ];
        let unique = dedupe_by_context_and_rule(errors);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].rule_id, RuleId::HangingPreposition);
        assert_eq!(unique[1].rule_id, RuleId::MissingEndPunctuation);
    }
}
