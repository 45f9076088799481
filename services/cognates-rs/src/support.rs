//! Shared helpers for the aligner and the metric library: input validation,
//! n-gram extraction and tokenization.

use ahash::AHashSet;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{CognateError, CognateResult};
use crate::types::GAP;

/// Check that both arguments are present.
pub fn validate<'a>(a: Option<&'a str>, b: Option<&'a str>) -> CognateResult<(&'a str, &'a str)> {
    match (a, b) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(CognateError::InvalidInput(
            "both input strings must be present".to_string(),
        )),
    }
}

/// Reject words that carry the gap marker or an embedded NUL.
pub fn validate_word(word: &str) -> CognateResult<()> {
    if word.contains(GAP) || word.contains('\0') {
        return Err(CognateError::InvalidInput(format!(
            "word {:?} contains a gap marker or NUL character",
            word
        )));
    }
    Ok(())
}

/// The n-gram of `size` characters starting at `start`, or an empty string when out of range.
pub fn ngram(word: &str, start: usize, size: usize) -> String {
    let chars: Vec<char> = word.chars().collect();
    if start + size > chars.len() {
        return String::new();
    }
    chars[start..start + size].iter().collect()
}

/// N-grams in order of occurrence. With `range`, every size from 1 to `size` is included.
pub fn ngrams(word: &str, size: usize, range: bool) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let smallest = if range { 1 } else { size };

    let mut result = Vec::new();
    for k in smallest.max(1)..=size {
        result.extend(chars.windows(k).map(|w| w.iter().collect::<String>()));
    }
    result
}

/// Distinct n-grams of exactly `size` characters.
pub fn unique_ngrams(word: &str, size: usize) -> AHashSet<String> {
    ngrams(word, size, false).into_iter().collect()
}

/// Token n-grams in order of occurrence, each keyed by its tokens joined with a space.
pub fn token_ngrams(tokens: &[&str], size: usize) -> Vec<String> {
    if size == 0 {
        return Vec::new();
    }
    tokens.windows(size).map(|w| w.join(" ")).collect()
}

pub fn unique_token_ngrams(tokens: &[&str], size: usize) -> AHashSet<String> {
    token_ngrams(tokens, size).into_iter().collect()
}

/// Split a phrase into Unicode words for the token-sequence metrics.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.unicode_words().collect()
}

/// Format a value with optional digits: at most `after` fractional digits, no trailing
/// zeros, no bare leading zero (`0.5` -> `.5`, `1.0` -> `1`).
pub fn format_decimal(value: f64, before: i32, after: i32) -> CognateResult<String> {
    if before <= 0 || after <= 0 {
        return Err(CognateError::invalid_parameter(
            "digits",
            "the number of digits before or after the floating point must be positive",
        ));
    }

    let mut formatted = format!("{:.*}", after as usize, value);
    if formatted.contains('.') {
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.').len();
        formatted.truncate(trimmed);
    }

    let (sign, digits) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let digits = match digits.strip_prefix('0') {
        Some(rest) if rest.starts_with('.') => rest,
        _ => digits,
    };

    if digits == "0" || digits.is_empty() {
        return Ok("0".to_string());
    }
    Ok(format!("{}{}", sign, digits))
}
