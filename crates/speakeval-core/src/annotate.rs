//! Word-level correction rendering of a candidate against its best match.
//!
//! Alignment runs on normalized tokens, but every segment that came from the
//! candidate keeps its original surface form. Words the candidate left out
//! have no surface form and are rendered as a placeholder sized to the
//! expected word.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diff::{OpTag, SequenceMatcher};
use crate::normalize::{letter_count, normalize};

/// Glyph repeated once per letter of an omitted word.
pub const PLACEHOLDER_GLYPH: char = '❌';

/// How a segment relates to the expected sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Said and expected.
    Unchanged,
    /// Said in place of a different expected word.
    Substituted,
    /// Said but not expected.
    Extraneous,
    /// Expected but not said.
    Omitted,
}

impl SegmentKind {
    /// Whether the segment marks something the learner got wrong.
    pub fn is_error(self) -> bool {
        !matches!(self, SegmentKind::Unchanged)
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Unchanged => write!(f, "unchanged"),
            SegmentKind::Substituted => write!(f, "substituted"),
            SegmentKind::Extraneous => write!(f, "extraneous"),
            SegmentKind::Omitted => write!(f, "omitted"),
        }
    }
}

/// A whitespace-delimited word with its comparison key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// The word exactly as written.
    pub surface: &'a str,
    /// The word's normalized form; may be empty for punctuation-only words.
    pub key: String,
}

/// Split `text` on whitespace, keeping each word's original form.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    text.split_whitespace()
        .map(|surface| Token {
            surface,
            key: normalize(surface),
        })
        .collect()
}

/// One classified piece of the rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedSegment {
    pub kind: SegmentKind,
    /// Display text: the candidate's word, or a placeholder for omissions.
    pub text: String,
    /// The expected word an omitted placeholder stands for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
}

impl AnnotatedSegment {
    fn from_candidate(kind: SegmentKind, surface: &str) -> Self {
        Self {
            kind,
            text: surface.to_string(),
            expected: None,
        }
    }

    fn omitted(expected: &str) -> Self {
        Self {
            kind: SegmentKind::Omitted,
            text: placeholder(expected),
            expected: Some(expected.to_string()),
        }
    }
}

/// Placeholder for an omitted word: one glyph per letter or digit, at least one.
pub fn placeholder(expected: &str) -> String {
    let len = letter_count(expected).max(1);
    std::iter::repeat(PLACEHOLDER_GLYPH).take(len).collect()
}

/// The ordered segments produced for one candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub segments: Vec<AnnotatedSegment>,
}

impl Annotation {
    /// Candidate words in their original order, without placeholders.
    pub fn candidate_words(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter(|s| s.kind != SegmentKind::Omitted)
            .map(|s| s.text.as_str())
            .collect()
    }

    /// Number of segments of the given kind.
    pub fn count(&self, kind: SegmentKind) -> usize {
        self.segments.iter().filter(|s| s.kind == kind).count()
    }

    /// True when nothing was substituted, extra, or missing.
    pub fn is_clean(&self) -> bool {
        self.segments.iter().all(|s| !s.kind.is_error())
    }

    /// Plain-text rendering: wrong words as `*word*`, omissions as `[❌❌]`.
    pub fn render_plain(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s.kind {
                SegmentKind::Unchanged => s.text.clone(),
                SegmentKind::Substituted | SegmentKind::Extraneous => format!("*{}*", s.text),
                SegmentKind::Omitted => format!("[{}]", s.text),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Mark what the candidate said wrong, said extra, or left out relative to
/// `best_match`.
///
/// Segments follow the alignment order: candidate words left to right, with
/// omitted placeholders interleaved where the missing words belong.
pub fn highlight_differences(candidate: &str, best_match: &str) -> Annotation {
    let said = tokenize(candidate);
    let expected = tokenize(best_match);

    let said_keys: Vec<&str> = said.iter().map(|t| t.key.as_str()).collect();
    let expected_keys: Vec<&str> = expected.iter().map(|t| t.key.as_str()).collect();

    let mut segments = Vec::with_capacity(said.len().max(expected.len()));
    for op in SequenceMatcher::new(&said_keys, &expected_keys).opcodes() {
        match op.tag {
            OpTag::Equal => segments.extend(
                said[op.a]
                    .iter()
                    .map(|t| AnnotatedSegment::from_candidate(SegmentKind::Unchanged, t.surface)),
            ),
            OpTag::Replace => segments.extend(
                said[op.a]
                    .iter()
                    .map(|t| AnnotatedSegment::from_candidate(SegmentKind::Substituted, t.surface)),
            ),
            OpTag::Delete => segments.extend(
                said[op.a]
                    .iter()
                    .map(|t| AnnotatedSegment::from_candidate(SegmentKind::Extraneous, t.surface)),
            ),
            OpTag::Insert => segments.extend(
                expected[op.b]
                    .iter()
                    .map(|t| AnnotatedSegment::omitted(t.surface)),
            ),
        }
    }

    Annotation { segments }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(annotation: &Annotation) -> Vec<SegmentKind> {
        annotation.segments.iter().map(|s| s.kind).collect()
    }

    fn texts(annotation: &Annotation) -> Vec<&str> {
        annotation.segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn identical_after_normalization() {
        let a = highlight_differences("I go to school", "I go to school.");
        assert!(a.is_clean());
        assert_eq!(texts(&a), vec!["I", "go", "to", "school"]);
    }

    #[test]
    fn substituted_word_keeps_candidate_form() {
        use SegmentKind::*;
        let a = highlight_differences("I goes to school", "I go to school");
        assert_eq!(kinds(&a), vec![Unchanged, Substituted, Unchanged, Unchanged]);
        assert_eq!(a.segments[1].text, "goes");
    }

    #[test]
    fn extra_words_are_extraneous() {
        use SegmentKind::*;
        let a = highlight_differences("I go to the big school", "I go to school");
        assert_eq!(
            kinds(&a),
            vec![Unchanged, Unchanged, Unchanged, Extraneous, Extraneous, Unchanged]
        );
        assert_eq!(a.segments[3].text, "the");
        assert_eq!(a.segments[4].text, "big");
    }

    #[test]
    fn missing_words_become_sized_placeholders() {
        let a = highlight_differences("I go", "I go to school");
        assert_eq!(texts(&a), vec!["I", "go", "❌❌", "❌❌❌❌❌❌"]);
        assert_eq!(a.segments[2].expected.as_deref(), Some("to"));
        assert_eq!(a.count(SegmentKind::Omitted), 2);
    }

    #[test]
    fn empty_candidate_is_all_omitted() {
        let a = highlight_differences("", "Hello there");
        assert_eq!(kinds(&a), vec![SegmentKind::Omitted, SegmentKind::Omitted]);
        assert_eq!(texts(&a), vec!["❌❌❌❌❌", "❌❌❌❌❌"]);
    }

    #[test]
    fn empty_best_match_is_all_extraneous() {
        let a = highlight_differences("hello there", "");
        assert_eq!(a.count(SegmentKind::Extraneous), 2);
        assert!(highlight_differences("", "").segments.is_empty());
    }

    #[test]
    fn placeholder_ignores_punctuation() {
        assert_eq!(placeholder("school."), "❌❌❌❌❌❌");
        assert_eq!(placeholder("don't"), "❌❌❌❌");
        assert_eq!(placeholder("!"), "❌");
    }

    #[test]
    fn omission_between_words() {
        use SegmentKind::*;
        let a = highlight_differences("I to school", "I go to school!");
        assert_eq!(kinds(&a), vec![Unchanged, Omitted, Unchanged, Unchanged]);
        assert_eq!(a.segments[1].text, "❌❌");
        assert_eq!(a.segments[3].text, "school");
    }

    #[test]
    fn candidate_words_round_trip_original_tokens() {
        let candidate = "Well, I goes to   the School!";
        let a = highlight_differences(candidate, "I go to school.");
        let original: Vec<&str> = candidate.split_whitespace().collect();
        assert_eq!(a.candidate_words(), original);
    }

    #[test]
    fn punctuation_only_tokens_keep_their_place() {
        let a = highlight_differences("Hello , world", "Hello world");
        assert_eq!(a.candidate_words(), vec!["Hello", ",", "world"]);
        assert_eq!(a.segments[1].kind, SegmentKind::Extraneous);
    }

    #[test]
    fn render_plain_marks_errors() {
        let a = highlight_differences("I goes to the school", "I go to school");
        assert_eq!(a.render_plain(), "I *goes* to *the* school");

        let a = highlight_differences("I go", "I go to.");
        assert_eq!(a.render_plain(), "I go [❌❌]");
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&SegmentKind::Omitted).unwrap();
        assert_eq!(json, "\"omitted\"");
        assert_eq!(SegmentKind::Substituted.to_string(), "substituted");
    }

    const PAIRS: &[(&str, &str)] = &[
        ("I go to school", "I go to school."),
        ("I goes to the school", "I go to school"),
        ("", "Hello there"),
        ("Hello there", ""),
        ("", ""),
        ("Well , I  goes ... to   School!", "I go to school."),
        ("Café naïve résumé", "The café was naïve."),
        ("안녕하세요 반가워요", "안녕하세요, 만나서 반가워요."),
        ("? ! .", "Hi!"),
        ("I can't do that", "I cannot do that."),
        ("school school school", "school"),
        ("to", "I go to school to learn"),
        ("yesterday I goes to the big school with my friend", "Yesterday, I went to school with my friends."),
    ];

    #[test]
    fn every_candidate_token_appears_once_in_order() {
        for (candidate, best) in PAIRS {
            let a = highlight_differences(candidate, best);
            let original: Vec<&str> = candidate.split_whitespace().collect();
            assert_eq!(a.candidate_words(), original, "{candidate:?} vs {best:?}");
        }
    }

    #[test]
    fn omitted_and_unchanged_segments_rebuild_the_best_match() {
        for (candidate, best) in PAIRS {
            let a = highlight_differences(candidate, best);
            let expected_keys: Vec<String> = tokenize(best).into_iter().map(|t| t.key).collect();

            // Unchanged and omitted words are a subsequence of the best match.
            let mut keys = expected_keys.iter();
            for segment in &a.segments {
                let key = match segment.kind {
                    SegmentKind::Unchanged => normalize(&segment.text),
                    SegmentKind::Omitted => normalize(segment.expected.as_deref().unwrap()),
                    _ => continue,
                };
                assert!(
                    keys.any(|k| *k == key),
                    "{key:?} out of order for {candidate:?} vs {best:?}"
                );
            }
        }
    }

    #[test]
    fn placeholders_match_expected_word_length() {
        for (candidate, best) in PAIRS {
            for segment in highlight_differences(candidate, best).segments {
                if segment.kind != SegmentKind::Omitted {
                    assert!(segment.expected.is_none());
                    continue;
                }
                let expected = segment.expected.as_deref().unwrap();
                assert_eq!(
                    segment.text.chars().count(),
                    letter_count(expected).max(1),
                    "placeholder for {expected:?}"
                );
                assert!(segment.text.chars().all(|c| c == PLACEHOLDER_GLYPH));
            }
        }
    }

    #[test]
    fn identical_inputs_are_clean() {
        for (candidate, best) in PAIRS {
            for text in [candidate, best] {
                let a = highlight_differences(text, text);
                assert!(a.is_clean(), "{text:?}");
                assert_eq!(a.segments.len(), text.split_whitespace().count());
            }
        }
    }
}
