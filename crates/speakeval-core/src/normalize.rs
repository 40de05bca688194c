//! Text canonicalization used for comparison.
//!
//! Normalized text is only ever used as a comparison key. Anything shown to
//! the learner is taken from the original input.

/// Canonicalize `text` into its comparable form.
///
/// Lowercases, drops every character that is not a letter, digit,
/// whitespace or apostrophe, then trims the ends. Internal whitespace runs
/// are left alone so callers can still split on whitespace.
pub fn normalize(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|&c| is_kept(c))
        .collect();
    kept.trim().to_string()
}

fn is_kept(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || c == '\''
}

/// Number of letters and digits in `word`, ignoring punctuation.
pub fn letter_count(word: &str) -> usize {
    word.chars().filter(|c| c.is_alphanumeric()).count()
}
