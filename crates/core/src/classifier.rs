//! Word classifier: decides whether a token or lemma counts as a word.

/// Characters that never make a string a word on their own.
fn is_non_alphabetic(c: char) -> bool {
    c.is_ascii_punctuation() || c.is_ascii_digit()
}

/// Returns true if at least one character of `s` is neither ASCII punctuation
/// nor a decimal digit. The empty string is not a word.
pub fn is_word(s: &str) -> bool {
    s.chars().any(|c| !is_non_alphabetic(c))
}
