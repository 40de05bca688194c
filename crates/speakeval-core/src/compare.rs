//! Scoring a candidate answer against its acceptable references.

use serde::{Deserialize, Serialize};

use crate::diff::char_ratio;
use crate::normalize::normalize;

/// Outcome of scoring one candidate against a reference set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Highest similarity seen, in `[0.0, 1.0]`.
    pub score: f64,
    /// The reference (original form) that produced `score`, or `None` when
    /// there were no references to compare against.
    pub best_match: Option<String>,
    /// Position of `best_match` in the reference list.
    pub best_index: Option<usize>,
}

impl ComparisonResult {
    /// The "no reference available" result.
    pub fn none() -> Self {
        Self {
            score: 0.0,
            best_match: None,
            best_index: None,
        }
    }

    pub fn has_match(&self) -> bool {
        self.best_match.is_some()
    }
}

/// Character-level similarity of two raw texts after normalization.
pub fn similarity(candidate: &str, reference: &str) -> f64 {
    char_ratio(&normalize(candidate), &normalize(reference))
}

/// Score `candidate` against every reference and keep the best one.
///
/// References are scanned left to right; on equal scores the earlier
/// reference is kept. An empty reference list yields [`ComparisonResult::none`].
pub fn compare_answers<S: AsRef<str>>(candidate: &str, references: &[S]) -> ComparisonResult {
    let cleaned = normalize(candidate);
    let mut best = ComparisonResult::none();

    for (index, reference) in references.iter().enumerate() {
        let reference = reference.as_ref();
        let score = char_ratio(&cleaned, &normalize(reference));
        tracing::debug!(index, score, "scored reference");

        if best.best_match.is_none() || score > best.score {
            best = ComparisonResult {
                score,
                best_match: Some(reference.to_string()),
                best_index: Some(index),
            };
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_ignoring_punctuation() {
        let result = compare_answers("I go to school", &["I go to school."]);
        assert_eq!(result.score, 1.0);
        assert_eq!(result.best_match.as_deref(), Some("I go to school."));
        assert_eq!(result.best_index, Some(0));
    }

    #[test]
    fn picks_the_closest_reference() {
        let refs = ["She is a doctor.", "I am going to school.", "I go to school."];
        let result = compare_answers("i go to school", &refs);
        assert_eq!(result.best_index, Some(2));
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn ties_keep_the_first_reference() {
        let refs = ["Hello there!", "hello there", "HELLO THERE."];
        let result = compare_answers("hello there", &refs);
        assert_eq!(result.best_index, Some(0));
        assert_eq!(result.best_match.as_deref(), Some("Hello there!"));
    }

    #[test]
    fn empty_references_is_not_an_error() {
        let refs: [&str; 0] = [];
        let result = compare_answers("anything", &refs);
        assert_eq!(result, ComparisonResult::none());
        assert!(!result.has_match());
    }

    #[test]
    fn empty_candidate_scores_zero_but_still_matches() {
        let result = compare_answers("", &["Hello there"]);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.best_match.as_deref(), Some("Hello there"));
    }

    #[test]
    fn partial_similarity_is_bounded() {
        let result = compare_answers("I goes to school", &["I go to school"]);
        assert!(result.score > 0.9 && result.score < 1.0, "{}", result.score);
    }

    #[test]
    fn deterministic() {
        let refs = vec![
            "I'd like a cup of coffee.".to_string(),
            "I want a coffee, please.".to_string(),
        ];
        let first = compare_answers("I would like coffee", &refs);
        for _ in 0..10 {
            assert_eq!(compare_answers("I would like coffee", &refs), first);
        }
    }

    #[test]
    fn similarity_is_normalized() {
        assert_eq!(similarity("Can't STOP!", "can't stop"), 1.0);
    }

    const CANDIDATES: &[&str] = &[
        "",
        "I go to school",
        "i GO to the school!!",
        "school",
        "Café naïve",
        "안녕하세요",
        "... , ;",
        "I can't do that",
        "yesterday I goes to the big school with my friend",
    ];

    const REFERENCE_SETS: &[&[&str]] = &[
        &["I go to school."],
        &["I go to school.", "I am going to school."],
        &["Hello there", "hello there!", "Hi there."],
        &["", "?!"],
        &["Café naïve.", "cafe naive"],
        &["안녕하세요, 만나서 반가워요.", "안녕하세요"],
        &["I cannot do that.", "I can't do that."],
    ];

    #[test]
    fn best_match_is_the_first_maximal_reference() {
        for &candidate in CANDIDATES {
            for &refs in REFERENCE_SETS {
                let result = compare_answers(candidate, refs);
                let scores: Vec<f64> = refs.iter().map(|r| similarity(candidate, r)).collect();
                let max = scores.iter().cloned().fold(f64::MIN, f64::max);
                let first = scores.iter().position(|&s| s == max).unwrap();

                assert!((0.0..=1.0).contains(&result.score), "{candidate:?} {refs:?}");
                assert_eq!(result.score, max, "{candidate:?} {refs:?}");
                assert_eq!(result.best_index, Some(first), "{candidate:?} {refs:?}");
                assert_eq!(result.best_match.as_deref(), Some(refs[first]));
                assert_eq!(compare_answers(candidate, refs), result);
            }
        }
    }

    #[test]
    fn self_similarity_for_every_sample() {
        for s in CANDIDATES.iter().chain(REFERENCE_SETS.iter().flat_map(|r| r.iter())) {
            if normalize(s).is_empty() {
                continue;
            }
            let result = compare_answers(s, &[*s]);
            assert_eq!(result.score, 1.0, "{s:?}");
            assert_eq!(result.best_match.as_deref(), Some(*s));
        }
    }
}
