use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::HP;

pub trait NoiseFilter: Send + Sync {
    fn name(&self) -> &'static str;
    fn matches(&self, text: &str) -> bool;
}

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

static NUMBERED_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d{1,3}(?:\.\d{1,3})*\.?|[IVXLCDM]{1,6}\.|[A-Za-z][.)]|\(\w{1,4}\))\s+(\S.*)$")
        .unwrap()
});

static NUMBER_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d{1,3}(?:\.\d{1,3})*\.?|[IVXLCDM]{1,6}\.)\s+").unwrap());

static OF_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:The\s+)?[A-Z][\w'\u{2019}-]*(?:\s+[A-Z][\w'\u{2019}-]*)*",
        r"\s+of\s+(?:the\s+|our\s+|this\s+|these\s+|your\s+)?",
        r"[A-Z][\w'\u{2019}-]*",
        r"(?:\s+(?:[A-Z][\w'\u{2019}-]*|and|or|of|for|the|to|in|on|a|an|&)){0,3}$",
    ))
    .unwrap()
});

static TEMPLATE_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:(?:the|your)\s+right\s+to|how\s+(?:to|we))\b").unwrap());

static COPYRIGHT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:\u{00A9}|\(c\)|copyright\b)").unwrap());

static CODE_VOCAB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:width|height|margin|padding|color|background|font-size|font-family",
        r"|font-weight|display|flex|flexbox|grid|border|z-index|opacity|hover|webkit|moz",
        r"|rgba?|px|rem|div|span|onclick|const|var)\b",
        r"|\b\d+(?:px|rem|em|vh|vw)\b",
    ))
    .unwrap()
});

static NAV_SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*(?:\||\u{00BB}|\u{203A}|\u{00B7}|\u{2022}|\u{2192}|\s>\s|\s/\s)\s*").unwrap()
});

static CONSENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:cookies?|consent|accept|decline|privacy)\b").unwrap());

static SITE_USAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:website|experience|browse|browsing|uses)\b").unwrap());

const CODE_SYMBOLS: &[char] = &[
    '{', '}', '[', ']', '(', ')', '=', '<', '>', ':', ';', '$', '&', '#', '%', '~', '^', '\\',
    '|',
];

const TITLE_CONNECTORS: &[&str] = &[
    "a", "an", "and", "as", "at", "by", "for", "from", "in", "of", "on", "or", "the", "to",
    "with", "&",
];

static KNOWN_SECTION_TITLES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "introduction",
        "purpose",
        "scope",
        "definitions",
        "overview",
        "summary",
        "background",
        "conclusion",
        "table of contents",
        "privacy policy",
        "privacy notice",
        "cookie policy",
        "terms of service",
        "terms of use",
        "terms and conditions",
        "disclaimer",
        "governing law",
        "limitation of liability",
        "indemnification",
        "changes to this policy",
        "effective date",
        "last updated",
        "your rights",
        "children's privacy",
        "data retention",
        "data security",
        "security",
        "contact us",
        "contact information",
        "acknowledgements",
        "references",
        "appendix",
        "faq",
        "frequently asked questions",
    ]
    .into_iter()
    .collect()
});

static UI_VOCABULARY: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "home",
        "about",
        "about us",
        "contact",
        "contact us",
        "login",
        "log in",
        "sign in",
        "sign up",
        "register",
        "logout",
        "log out",
        "sign out",
        "my account",
        "submit",
        "send",
        "cancel",
        "accept",
        "accept all",
        "accept cookies",
        "decline",
        "reject all",
        "ok",
        "close",
        "menu",
        "search",
        "subscribe",
        "learn more",
        "read more",
        "see more",
        "show more",
        "continue",
        "next",
        "previous",
        "back",
        "back to top",
        "skip to content",
        "skip to main content",
        "share",
        "follow us",
        "privacy policy",
        "terms and conditions",
        "terms of use",
        "terms of service",
        "cookie settings",
        "manage preferences",
        "all rights reserved",
        "sitemap",
        "careers",
        "blog",
        "news",
        "faq",
        "help",
        "support",
        "shop",
        "cart",
        "checkout",
        "download",
        "get started",
    ]
    .into_iter()
    .collect()
});

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn ends_with_sentence_punctuation(text: &str) -> bool {
    text.trim_end().ends_with(['.', '!', '?'])
}

fn strip_trailing(text: &str) -> &str {
    text.trim_end_matches(['.', '!', ':', ' '])
}

fn is_capitalized(word: &str) -> bool {
    word.chars()
        .find(|c| c.is_alphanumeric())
        .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit())
}

/// `"1. Introduction"`, `"IV. Terms of Service"`, `"(a) Scope"`.
pub fn is_numbered_heading(text: &str) -> bool {
    let Some(caps) = NUMBERED_HEADING_RE.captures(text) else {
        return false;
    };
    let rest = caps.get(1).map_or("", |m| m.as_str());
    word_count(rest) <= HP.numbered_heading_max_words && !ends_with_sentence_punctuation(rest)
}

pub fn is_title_case_phrase(text: &str) -> bool {
    if text.contains(',') || text.chars().count() >= HP.title_max_chars {
        return false;
    }
    let words: Vec<&str> = strip_trailing(text).split_whitespace().collect();
    if words.is_empty() || words.len() > HP.title_max_words || !is_capitalized(words[0]) {
        return false;
    }
    let mut has_letters = false;
    for word in &words {
        if !word.chars().any(char::is_alphanumeric) {
            continue;
        }
        has_letters = true;
        if !is_capitalized(word) && !TITLE_CONNECTORS.contains(&word.to_lowercase().as_str()) {
            return false;
        }
    }
    has_letters
}

/// `"Use of Personal Data"`, `"Scope of this Agreement"`.
pub fn is_of_heading(text: &str) -> bool {
    word_count(text) <= HP.template_heading_max_words && OF_HEADING_RE.is_match(text)
}

pub fn is_template_heading(text: &str) -> bool {
    TEMPLATE_HEADING_RE.is_match(text)
        && word_count(text) <= HP.template_heading_max_words
        && !ends_with_sentence_punctuation(text)
}

pub fn is_known_section_title(text: &str) -> bool {
    let without_number = NUMBER_PREFIX_RE.replace(text, "");
    let normalized = strip_trailing(without_number.trim())
        .replace('\u{2019}', "'")
        .to_lowercase();
    KNOWN_SECTION_TITLES.contains(normalized.as_str())
}

pub fn is_colon_heading(text: &str) -> bool {
    let Some(core) = text.strip_suffix(':') else {
        return false;
    };
    let words = word_count(core);
    words > 0
        && words <= HP.colon_heading_max_words
        && core.chars().next().is_some_and(char::is_uppercase)
        && !core.contains(['.', '!', '?'])
}

pub fn code_symbol_density(text: &str) -> (usize, f64) {
    let total = text.chars().count();
    if total == 0 {
        return (0, 0.0);
    }
    let symbols = text.chars().filter(|c| CODE_SYMBOLS.contains(c)).count();
    (symbols, symbols as f64 / total as f64)
}

pub fn has_code_vocabulary(text: &str) -> bool {
    CODE_VOCAB_RE.is_match(text)
}

fn normalize_ui_text(text: &str) -> String {
    let trimmed = text
        .trim()
        .trim_start_matches(['\u{00AB}', '\u{2039}', '\u{2190}', '<', ' '])
        .trim_end_matches(['.', '!', ':', '\u{00BB}', '\u{203A}', '\u{2192}', '>', ' ']);
    trimmed
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ---------------------------------------------------------------------------
// Built-in filters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingFilter;

impl NoiseFilter for HeadingFilter {
    fn name(&self) -> &'static str {
        "heading"
    }

    fn matches(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        is_numbered_heading(text)
            || is_title_case_phrase(text)
            || is_of_heading(text)
            || is_template_heading(text)
            || is_known_section_title(text)
            || is_colon_heading(text)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UiElementFilter;

impl NoiseFilter for UiElementFilter {
    fn name(&self) -> &'static str {
        "ui_element"
    }

    fn matches(&self, text: &str) -> bool {
        let text = text.trim();
        if COPYRIGHT_RE.is_match(text) {
            return true;
        }
        UI_VOCABULARY.contains(normalize_ui_text(text).as_str())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CodeFilter;

impl NoiseFilter for CodeFilter {
    fn name(&self) -> &'static str {
        "code"
    }

    fn matches(&self, text: &str) -> bool {
        let text = text.trim();
        let (symbols, density) = code_symbol_density(text);
        if symbols >= HP.code_symbol_min_count && density > HP.code_symbol_density {
            return true;
        }
        text.chars().count() <= HP.code_vocab_max_chars && has_code_vocabulary(text)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NavigationFilter;

impl NoiseFilter for NavigationFilter {
    fn name(&self) -> &'static str {
        "navigation"
    }

    fn matches(&self, text: &str) -> bool {
        let text = text.trim();
        let segments: Vec<&str> = NAV_SEPARATOR_RE
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if segments.len() >= 2
            && segments
                .iter()
                .all(|s| word_count(s) <= HP.nav_segment_max_words)
        {
            return true;
        }

        if text.contains([',', '.', '!', '?', ';', ':']) {
            return false;
        }
        let tokens: Vec<&str> = text.split_whitespace().collect();
        tokens.len() >= HP.nav_min_tokens && tokens.iter().all(|t| is_capitalized(t))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CookieConsentFilter;

impl NoiseFilter for CookieConsentFilter {
    fn name(&self) -> &'static str {
        "cookie_consent"
    }

    fn matches(&self, text: &str) -> bool {
        CONSENT_RE.is_match(text) && SITE_USAGE_RE.is_match(text)
    }
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

pub struct NoiseClassifier {
    filters: Vec<Box<dyn NoiseFilter>>,
}

impl Default for NoiseClassifier {
    fn default() -> Self {
        let mut classifier = Self::empty();
        classifier.push(HeadingFilter);
        classifier.push(UiElementFilter);
        classifier.push(CodeFilter);
        classifier.push(NavigationFilter);
        classifier.push(CookieConsentFilter);
        classifier
    }
}

impl fmt::Debug for NoiseClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.filter_names()).finish()
    }
}

impl NoiseClassifier {
    pub fn empty() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    pub fn push<F: NoiseFilter + 'static>(&mut self, filter: F) {
        self.filters.push(Box::new(filter));
    }

    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    pub fn classify(&self, text: &str) -> Option<&'static str> {
        self.filters
            .iter()
            .find(|f| f.matches(text))
            .map(|f| f.name())
    }

    pub fn is_noise(&self, text: &str) -> bool {
        self.classify(text).is_some()
    }
}
