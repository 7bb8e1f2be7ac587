//! Paragraph and sentence segmentation.
//!
//! Paragraphs are separated by blank lines. Within a paragraph, a unit ends
//! at a run of `.`, `!` or `?` followed by whitespace; whatever trails the
//! last terminator becomes a unit of its own, so unterminated fragments are
//! never lost.

use once_cell::sync::Lazy;
use regex::Regex;

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

static PARAGRAPH_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r?\n(?:[ \t]*\r?\n)+").unwrap());

static ENUMERATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d{1,3}(?:\.\d{1,3})*|[IVXLCDM]{1,6}|[A-Za-z])$").unwrap());

const ABBREVIATIONS: &[&str] = &["e.g", "i.e", "mr", "mrs", "ms", "dr", "prof", "vs", "approx"];

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    pub text: &'a str,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph<'a> {
    pub text: &'a str,
    pub offset: usize,
    pub sentences: Vec<Sentence<'a>>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '\u{201D}' | '\u{2019}')
}

fn trimmed_at(slice: &str, offset: usize) -> Option<(&str, usize)> {
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lead = slice.len() - slice.trim_start().len();
    Some((trimmed, offset + lead))
}

/// Whether a period at the end of `before` belongs to an enumerator or an
/// abbreviation rather than ending the unit.
fn period_is_inline(before: &str) -> bool {
    let before = before.trim();
    if ENUMERATOR_RE.is_match(before) {
        return true;
    }
    let last_word = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    ABBREVIATIONS.contains(&last_word.as_str())
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn split_paragraphs(text: &str) -> Vec<(usize, &str)> {
    let mut paragraphs = Vec::new();
    let mut start = 0;
    for brk in PARAGRAPH_BREAK_RE.find_iter(text) {
        if let Some((para, offset)) = trimmed_at(&text[start..brk.start()], start) {
            paragraphs.push((offset, para));
        }
        start = brk.end();
    }
    if let Some((para, offset)) = trimmed_at(&text[start..], start) {
        paragraphs.push((offset, para));
    }
    paragraphs
}

/// Split one paragraph into sentence-like units. Offsets are relative to
/// `paragraph`.
pub fn split_sentences(paragraph: &str) -> Vec<(usize, &str)> {
    let mut units = Vec::new();
    let mut start = 0;
    let mut pos = 0;

    while let Some(c) = paragraph[pos..].chars().next() {
        if !is_terminator(c) {
            pos += c.len_utf8();
            continue;
        }

        let term_pos = pos;
        let mut end = pos + c.len_utf8();
        while let Some(next) = paragraph[end..].chars().next() {
            if is_terminator(next) || is_closer(next) {
                end += next.len_utf8();
            } else {
                break;
            }
        }

        let at_boundary = paragraph[end..]
            .chars()
            .next()
            .map_or(true, char::is_whitespace);
        let inline_period = c == '.'
            && end == term_pos + 1
            && period_is_inline(&paragraph[start..term_pos]);

        if at_boundary && !inline_period {
            if let Some((unit, offset)) = trimmed_at(&paragraph[start..end], start) {
                units.push((offset, unit));
            }
            start = end;
        }
        pos = end;
    }

    if let Some((unit, offset)) = trimmed_at(&paragraph[start..], start) {
        units.push((offset, unit));
    }
    units
}

pub fn segment(text: &str) -> Vec<Paragraph<'_>> {
    split_paragraphs(text)
        .into_iter()
        .map(|(offset, para)| Paragraph {
            text: para,
            offset,
            sentences: split_sentences(para)
                .into_iter()
                .map(|(rel, unit)| Sentence {
                    text: unit,
                    offset: offset + rel,
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let paras = split_paragraphs("One.\n\n  \n Two\r\n\r\nThree\n");
        let texts: Vec<&str> = paras.iter().map(|(_, p)| *p).collect();
        assert_eq!(texts, vec!["One.", "Two", "Three"]);
        assert_eq!(paras[1].0, 10);
    }

    #[test]
    fn empty_input_has_no_paragraphs() {
        assert!(split_paragraphs("").is_empty());
        assert!(split_paragraphs(" \n\n\t ").is_empty());
    }

    #[test]
    fn trailing_residue_becomes_a_unit() {
        let units = split_sentences("We appreciate your business. Please visit our site to");
        let texts: Vec<&str> = units.iter().map(|(_, u)| *u).collect();
        assert_eq!(
            texts,
            vec!["We appreciate your business.", "Please visit our site to"]
        );
        assert_eq!(units[1].0, 29);
    }

    #[test]
    fn enumerator_does_not_end_a_unit() {
        let texts: Vec<&str> = split_sentences("1. Introduction")
            .into_iter()
            .map(|(_, u)| u)
            .collect();
        assert_eq!(texts, vec!["1. Introduction"]);

        let texts: Vec<&str> = split_sentences("IV. Terms of Service")
            .into_iter()
            .map(|(_, u)| u)
            .collect();
        assert_eq!(texts, vec!["IV. Terms of Service"]);
    }

    #[test]
    fn abbreviations_and_decimals_stay_inline() {
        let texts: Vec<&str> = split_sentences("Prices rose 2.5 percent, e.g. in May. Then fell!")
            .into_iter()
            .map(|(_, u)| u)
            .collect();
        assert_eq!(
            texts,
            vec!["Prices rose 2.5 percent, e.g. in May.", "Then fell!"]
        );
    }

    #[test]
    fn closing_quotes_stay_with_their_sentence() {
        let texts: Vec<&str> = split_sentences("He said \"stop.\" We did?! Fine")
            .into_iter()
            .map(|(_, u)| u)
            .collect();
        assert_eq!(texts, vec!["He said \"stop.\"", "We did?!", "Fine"]);
    }

    #[test]
    fn unit_offsets_point_into_document() {
        let doc = "Title\n\nFirst one. Second";
        for para in segment(doc) {
            for s in &para.sentences {
                assert_eq!(&doc[s.offset..s.offset + s.text.len()], s.text);
            }
        }
    }
}
