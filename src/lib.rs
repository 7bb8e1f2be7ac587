use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

pub mod completeness;
pub mod config;
pub mod dedup;
pub mod error;
pub mod noise;
pub mod patterns;
pub mod rules;
pub mod segment;

pub use config::CheckOptions;
pub use error::{Error, Result};
pub use noise::{NoiseClassifier, NoiseFilter};

use dedup::FragmentSet;

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleId {
    MissingEndPunctuation,
    IncompleteSentence,
    HangingPreposition,
    PossibleIncompleteSentence,
}

impl RuleId {
    pub const ALL: [RuleId; 4] = [
        RuleId::MissingEndPunctuation,
        RuleId::IncompleteSentence,
        RuleId::HangingPreposition,
        RuleId::PossibleIncompleteSentence,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::MissingEndPunctuation => "MISSING_END_PUNCTUATION",
            RuleId::IncompleteSentence => "INCOMPLETE_SENTENCE",
            RuleId::HangingPreposition => "HANGING_PREPOSITION",
            RuleId::PossibleIncompleteSentence => "POSSIBLE_INCOMPLETE_SENTENCE",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RuleId::MissingEndPunctuation => "Content sentence without terminal punctuation",
            RuleId::IncompleteSentence => "Sentence is missing an object or a main clause",
            RuleId::HangingPreposition => "Clause ends in a preposition with no object",
            RuleId::PossibleIncompleteSentence => {
                "Text run ends in a conjunction, article or determiner"
            }
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        RuleId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownRule(wanted.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub offset: usize,
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarError {
    pub message: String,
    pub context: String,
    pub suggestions: Vec<String>,
    pub rule_id: RuleId,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub url: String,
    pub raw_text: String,
    errors: Vec<GrammarError>,
}

impl CheckResult {
    pub fn errors(&self) -> &[GrammarError] {
        &self.errors
    }

    pub fn total_errors(&self) -> usize {
        self.errors.len()
    }
}

impl Serialize for CheckResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CheckResult", 4)?;
        state.serialize_field("url", &self.url)?;
        state.serialize_field("rawText", &self.raw_text)?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("totalErrors", &self.total_errors())?;
        state.end()
    }
}

// ---------------------------------------------------------------------------
// Hyperparameters
// ---------------------------------------------------------------------------

/// Empirically tuned thresholds. These are a baseline to preserve, not
/// derived constants.
#[derive(Debug)]
pub struct Hyperparameters {
    pub content_min_chars: usize,
    pub content_min_tokens: usize,
    pub content_long_tokens: usize,
    pub content_max_special_density: f64,
    pub title_max_words: usize,
    pub title_max_chars: usize,
    pub numbered_heading_max_words: usize,
    pub colon_heading_max_words: usize,
    pub template_heading_max_words: usize,
    pub code_symbol_density: f64,
    pub code_symbol_min_count: usize,
    pub code_vocab_max_chars: usize,
    pub nav_min_tokens: usize,
    pub nav_segment_max_words: usize,
    pub pattern_min_run_chars: usize,
    pub subordinate_max_tokens: usize,
}

pub static HP: Hyperparameters = Hyperparameters {
    content_min_chars: 15,
    content_min_tokens: 4,
    content_long_tokens: 7,
    content_max_special_density: 0.05,
    title_max_words: 7,
    title_max_chars: 60,
    numbered_heading_max_words: 10,
    colon_heading_max_words: 8,
    template_heading_max_words: 10,
    code_symbol_density: 0.10,
    code_symbol_min_count: 3,
    code_vocab_max_chars: 40,
    nav_min_tokens: 3,
    nav_segment_max_words: 4,
    pattern_min_run_chars: 10,
    subordinate_max_tokens: 6,
};

// ---------------------------------------------------------------------------
// Analysis run
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub rule_id: RuleId,
    pub message: &'static str,
    pub context: String,
    pub suggestions: Vec<String>,
    pub offset: usize,
}

struct AnalysisRun<'a> {
    options: &'a CheckOptions,
    fragments: FragmentSet,
    errors: Vec<GrammarError>,
}

impl<'a> AnalysisRun<'a> {
    fn new(options: &'a CheckOptions) -> Self {
        Self {
            options,
            fragments: FragmentSet::new(),
            errors: Vec::new(),
        }
    }

    fn offer(&mut self, candidate: Candidate) {
        if !self.options.is_enabled(candidate.rule_id) {
            debug!(rule = %candidate.rule_id, context = %candidate.context, "rule disabled");
            return;
        }
        let context = candidate.context.trim();
        if !self.fragments.accept(context) {
            debug!(rule = %candidate.rule_id, context, "overlapping fragment suppressed");
            return;
        }
        // Keep the position on the trimmed span.
        let lead = candidate.context.len() - candidate.context.trim_start().len();
        self.errors.push(GrammarError {
            message: candidate.message.to_string(),
            context: context.to_string(),
            suggestions: candidate.suggestions,
            rule_id: candidate.rule_id,
            position: Position {
                offset: candidate.offset + lead,
                length: context.len(),
            },
        });
    }

    fn finish(self) -> Vec<GrammarError> {
        dedup::dedupe_by_context_and_rule(self.errors)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reusable, immutable checker. Each call to [`Checker::check`] gets its own
/// run state, so one checker can serve concurrent documents.
pub struct Checker {
    options: CheckOptions,
    classifier: NoiseClassifier,
}

impl Default for Checker {
    fn default() -> Self {
        Self::new(CheckOptions::default())
    }
}

impl Checker {
    pub fn new(options: CheckOptions) -> Self {
        Self {
            options,
            classifier: NoiseClassifier::default(),
        }
    }

    pub fn with_filter<F: NoiseFilter + 'static>(mut self, filter: F) -> Self {
        self.classifier.push(filter);
        self
    }

    pub fn classifier(&self) -> &NoiseClassifier {
        &self.classifier
    }

    pub fn check(&self, url: &str, text: &str) -> CheckResult {
        let mut run = AnalysisRun::new(&self.options);

        for paragraph in segment::segment(text) {
            for sentence in &paragraph.sentences {
                if let Some(filter) = self.classifier.classify(sentence.text) {
                    debug!(filter, text = sentence.text, "unit skipped as noise");
                    continue;
                }
                if !self.options.detect_incomplete {
                    continue;
                }
                if let Some(candidate) = completeness::detect(sentence) {
                    run.offer(candidate);
                }
            }
        }

        for candidate in patterns::scan(text) {
            run.offer(candidate);
        }

        let errors = run.finish();
        debug!(url, total = errors.len(), "check complete");

        CheckResult {
            url: url.to_string(),
            raw_text: text.to_string(),
            errors,
        }
    }
}

pub fn check(text: &str) -> CheckResult {
    Checker::default().check("", text)
}
