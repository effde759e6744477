//! Sentence tokenization

/// Characters stripped from both ends of a sentence before splitting
const EDGE_PUNCTUATION: &[char] = &[' ', ',', ';', '.', ':', '!', '?'];

/// Strip edge punctuation, lowercase and split on whitespace.
///
/// Only the sentence edges are stripped; punctuation inside the sentence
/// stays attached to its word ("hund," remains "hund,").
pub fn tokenize(sentence: &str) -> Vec<String> {
    sentence
        .trim_matches(EDGE_PUNCTUATION)
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Uppercase the first character and lowercase the rest
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
