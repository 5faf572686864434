//! Allow-list based input cleaning
//!
//! User input is reduced to alphanumeric characters plus a small set of
//! punctuation before it reaches language detection and classification.

/// Punctuation kept by [`clean`] in addition to alphanumerics
pub const ALLOWED_PUNCTUATION: &[char] = &[' ', '.', ',', ';', '\'', '?', '-'];

/// Keep only allow-listed characters and strip trailing whitespace
///
/// # Examples
///
/// ```
/// use lingobot::sanitizer::clean;
///
/// assert_eq!(clean("Tell me about  World War II!!"), "Tell me about  World War II");
/// assert_eq!(clean("@#$%"), "");
/// ```
pub fn clean(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || ALLOWED_PUNCTUATION.contains(c))
        .collect();
    kept.trim_end().to_string()
}
